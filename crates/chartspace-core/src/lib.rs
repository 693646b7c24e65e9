#![forbid(unsafe_code)]

//! Workspace state model for chartspace.
//!
//! # Role in chartspace
//! `chartspace-core` is the single source of truth for the split workspace:
//! which tabs are open in the main and side panes, which tab is selected,
//! how a drag gesture reorders or moves tabs, which closed default tabs can
//! be reopened, and whether the side pane is collapsed.
//!
//! # This crate provides
//! - [`TabStore`] with index-consistent open/close/reorder/move operations.
//! - [`DragContext`] and [`apply_drag`] translating drag gestures into
//!   store operations.
//! - [`DefaultTabSets`] and [`reopenable`] for the reopen (overflow) menu.
//! - [`SplitState`] tracking side-pane collapse and the user-driven split.
//! - [`DraftCache`] for per-patient/per-encounter editor drafts.
//!
//! # How it fits in the system
//! Everything here is pure, synchronous state: mutations happen inside UI
//! event handlers and the render layer (`chartspace-widgets`) reads the
//! state back out. There is no I/O and no background work.

pub mod drafts;
pub mod drag;
pub mod overflow;
pub mod split;
pub mod tabs;
pub mod util;

pub use drafts::{DraftCache, DraftKey};
pub use drag::{DragContext, TabAddress, apply_drag};
pub use overflow::{DefaultTabSets, ReopenCandidate, TabSetError, reopenable};
pub use split::{
    DEFAULT_SIDE_PERCENT, MIN_PANE_COLS, NARROW_VIEWPORT_COLS, SplitLayout, SplitState,
};
pub use tabs::{PaneId, PaneTabs, TabEntry, TabStore};
pub use util::{age_in_years, clamp, upsert};
