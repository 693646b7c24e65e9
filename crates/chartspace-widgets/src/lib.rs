#![forbid(unsafe_code)]

//! Workspace widgets for chartspace.
//!
//! Widgets render themselves into a [`Buffer`] within a given [`Rect`]
//! and read workspace state from `chartspace-core`; none of them own
//! state beyond per-widget view state (scroll offsets, cursors).

pub mod event_list;
pub mod filter_panel;
pub mod overflow_menu;
pub mod pane_view;
pub mod split_view;
pub mod tab_bar;

use chartspace_render::{Buffer, Rect};

pub use event_list::{EventList, EventListState};
pub use filter_panel::{FilterPanel, FilterPanelState};
pub use overflow_menu::{OverflowItem, OverflowMenu, OverflowMenuState};
pub use pane_view::{PaneView, RenderFn, TabDirectory};
pub use split_view::{SplitRegions, SplitView, SplitViewState, resolve_regions};
pub use tab_bar::{TabBar, TabBarState, TabHit};

/// A `Widget` is a renderable component.
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;
    /// Render the widget into the buffer with mutable state.
    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State);
}
