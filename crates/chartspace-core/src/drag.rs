#![forbid(unsafe_code)]

//! Drag controller.
//!
//! Translates the result of a tab-header drag gesture into the matching
//! [`TabStore`] operation. The drag context is transient: it is built at
//! drag-start, completed (or not) at drag-end, applied once, and discarded.

use serde::{Deserialize, Serialize};

use crate::tabs::{PaneId, TabStore};

/// Location of a tab: which pane, and where in that pane's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabAddress {
    /// Owning pane.
    pub pane: PaneId,
    /// Position within the pane's tab order.
    pub index: usize,
}

impl TabAddress {
    /// Create a tab address.
    #[must_use]
    pub const fn new(pane: PaneId, index: usize) -> Self {
        Self { pane, index }
    }
}

/// An in-progress or completed drag of a tab header.
///
/// `destination` is `None` while the drag is in flight and stays `None`
/// when the gesture ends outside any droppable target, in which case the
/// drag is cancelled with no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragContext {
    /// Where the drag started.
    pub source: TabAddress,
    /// Where the drag ended, if over a droppable target.
    pub destination: Option<TabAddress>,
}

impl DragContext {
    /// Start a drag from `source` with no destination yet.
    #[must_use]
    pub const fn start(source: TabAddress) -> Self {
        Self {
            source,
            destination: None,
        }
    }

    /// Complete the drag at `destination`.
    #[must_use]
    pub const fn drop_at(mut self, destination: TabAddress) -> Self {
        self.destination = Some(destination);
        self
    }
}

/// Apply a completed drag to the store.
///
/// Same-pane drags reorder within the pane; cross-pane drags move the tab
/// between panes. A drag with no destination is a no-op. Returns whether
/// any state changed.
pub fn apply_drag<P>(store: &mut TabStore<P>, drag: DragContext) -> bool {
    let Some(dest) = drag.destination else {
        tracing::debug!(message = "tabs.drag_cancelled", pane = %drag.source.pane);
        return false;
    };
    if drag.source.pane == dest.pane {
        store.reorder_within_pane(drag.source.pane, drag.source.index, dest.index)
    } else {
        store.move_between_panes(drag.source.pane, drag.source.index, dest.pane, dest.index)
    }
}
