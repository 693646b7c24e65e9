#![forbid(unsafe_code)]

//! Collapse/resize controller for the pane split.
//!
//! Tracks the user-driven split between the main and side panes and
//! whether the side pane is collapsed. Collapse is not a separate flag
//! that can drift out of sync with the pane size: a side share of zero
//! *is* the collapsed state, and the previous nonzero share is remembered
//! for re-expansion. Both directions stay in sync by construction:
//! `toggle` resizes, and an external drag that reaches zero collapses.

use serde::{Deserialize, Serialize};

use crate::util::clamp;

/// Viewports narrower than this never show the side pane.
pub const NARROW_VIEWPORT_COLS: u16 = 96;

/// Minimum width of a visible pane, in columns.
pub const MIN_PANE_COLS: u16 = 24;

/// Side-pane share of the split for a fresh workspace, in percent.
pub const DEFAULT_SIDE_PERCENT: u16 = 35;

const MIN_SIDE_PERCENT: u16 = 15;
const MAX_SIDE_PERCENT: u16 = 70;

/// Resolved column widths for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLayout {
    /// Columns given to the main pane.
    pub main_cols: u16,
    /// Column occupied by the divider, when the split is shown.
    pub divider_col: Option<u16>,
    /// Columns given to the side pane (0 when hidden or collapsed).
    pub side_cols: u16,
}

impl SplitLayout {
    /// Whether any side-pane content area exists this frame.
    #[must_use]
    pub const fn side_visible(&self) -> bool {
        self.side_cols > 0
    }
}

/// Persistent split state: side-pane share and remembered share.
///
/// Serializable so a host can snapshot the split across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitState {
    side_percent: u16,
    remembered_percent: u16,
    #[serde(skip)]
    dragging: bool,
}

impl Default for SplitState {
    fn default() -> Self {
        Self {
            side_percent: DEFAULT_SIDE_PERCENT,
            remembered_percent: DEFAULT_SIDE_PERCENT,
            dragging: false,
        }
    }
}

impl SplitState {
    /// Create the default split.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Side-pane share of the split, in percent (0 when collapsed).
    #[must_use]
    pub const fn side_percent(&self) -> u16 {
        self.side_percent
    }

    /// Whether the side pane is user-collapsed.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.side_percent == 0
    }

    /// Collapse the side pane, or expand it back to its remembered share.
    pub fn toggle(&mut self) {
        if self.is_collapsed() {
            self.side_percent = if self.remembered_percent == 0 {
                DEFAULT_SIDE_PERCENT
            } else {
                self.remembered_percent
            };
        } else {
            self.remembered_percent = self.side_percent;
            self.side_percent = 0;
        }
        tracing::debug!(message = "split.toggle", collapsed = self.is_collapsed());
    }

    /// Layout callback: the host observed the side pane at `side_cols`.
    ///
    /// A size of zero collapses (remembering the prior share); any other
    /// size updates the share from the observed width.
    pub fn observe_side_size(&mut self, side_cols: u16, viewport_cols: u16) {
        if side_cols == 0 {
            if !self.is_collapsed() {
                self.remembered_percent = self.side_percent;
                self.side_percent = 0;
            }
            return;
        }
        let available = viewport_cols.saturating_sub(1).max(1);
        let percent = (u32::from(side_cols) * 100 / u32::from(available)) as u16;
        self.side_percent = clamp(percent, MIN_SIDE_PERCENT, MAX_SIDE_PERCENT);
        self.remembered_percent = self.side_percent;
    }

    /// Begin a divider drag.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Whether a divider drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Track the divider to `col` during a drag.
    ///
    /// Dragging the divider close to the right edge collapses the side
    /// pane; otherwise the share follows the pointer within bounds.
    pub fn drag_to(&mut self, col: u16, viewport_cols: u16) {
        if !self.dragging {
            return;
        }
        let side_cols = viewport_cols.saturating_sub(col.saturating_add(1));
        if side_cols < MIN_PANE_COLS / 2 {
            self.observe_side_size(0, viewport_cols);
        } else {
            self.observe_side_size(side_cols, viewport_cols);
        }
    }

    /// End a divider drag.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Resolve column widths for the current frame.
    ///
    /// Hard visibility rule: on narrow viewports, or when the side pane
    /// has no tabs, the side pane (and its divider) does not appear at
    /// all, regardless of collapse state. A collapsed-but-eligible side
    /// pane keeps its divider so the split can be re-expanded.
    #[must_use]
    pub fn layout(&self, viewport_cols: u16, side_empty: bool) -> SplitLayout {
        if viewport_cols < NARROW_VIEWPORT_COLS || side_empty {
            return SplitLayout {
                main_cols: viewport_cols,
                divider_col: None,
                side_cols: 0,
            };
        }
        let available = viewport_cols.saturating_sub(1);
        let side_cols = if self.is_collapsed() {
            0
        } else {
            let raw = (u32::from(available) * u32::from(self.side_percent) / 100) as u16;
            clamp(raw, MIN_PANE_COLS, available.saturating_sub(MIN_PANE_COLS))
        };
        let main_cols = available - side_cols;
        SplitLayout {
            main_cols,
            divider_col: Some(main_cols),
            side_cols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewport_never_shows_side_pane() {
        let split = SplitState::new();
        let layout = split.layout(NARROW_VIEWPORT_COLS - 1, false);
        assert_eq!(layout.main_cols, NARROW_VIEWPORT_COLS - 1);
        assert_eq!(layout.divider_col, None);
        assert!(!layout.side_visible());
    }

    #[test]
    fn empty_side_pane_is_hidden_even_when_wide() {
        let split = SplitState::new();
        let layout = split.layout(160, true);
        assert_eq!(layout.main_cols, 160);
        assert_eq!(layout.divider_col, None);
    }

    #[test]
    fn default_split_gives_side_pane_its_share() {
        let split = SplitState::new();
        let layout = split.layout(101, false);
        assert_eq!(layout.side_cols, 35);
        assert_eq!(layout.main_cols, 65);
        assert_eq!(layout.divider_col, Some(65));
    }

    #[test]
    fn toggle_collapses_and_restores_remembered_share() {
        let mut split = SplitState::new();
        split.observe_side_size(50, 101);
        let share = split.side_percent();
        split.toggle();
        assert!(split.is_collapsed());
        assert_eq!(split.layout(101, false).side_cols, 0);
        // Divider stays so the pane can be re-expanded.
        assert!(split.layout(101, false).divider_col.is_some());
        split.toggle();
        assert_eq!(split.side_percent(), share);
    }

    #[test]
    fn observing_zero_size_collapses() {
        let mut split = SplitState::new();
        split.observe_side_size(0, 120);
        assert!(split.is_collapsed());
        split.toggle();
        assert_eq!(split.side_percent(), DEFAULT_SIDE_PERCENT);
    }

    #[test]
    fn drag_follows_pointer_within_bounds() {
        let mut split = SplitState::new();
        split.begin_drag();
        split.drag_to(60, 121);
        split.end_drag();
        assert!(!split.is_collapsed());
        assert_eq!(split.side_percent(), 50);
    }

    #[test]
    fn drag_to_right_edge_collapses() {
        let mut split = SplitState::new();
        split.begin_drag();
        split.drag_to(118, 120);
        assert!(split.is_collapsed());
        split.end_drag();
    }

    #[test]
    fn drag_without_begin_is_ignored() {
        let mut split = SplitState::new();
        let before = split;
        split.drag_to(30, 120);
        assert_eq!(split, before);
    }

    #[test]
    fn split_share_is_clamped() {
        let mut split = SplitState::new();
        split.observe_side_size(110, 121);
        assert_eq!(split.side_percent(), MAX_SIDE_PERCENT);
        split.observe_side_size(2, 121);
        assert_eq!(split.side_percent(), MIN_SIDE_PERCENT);
    }

    #[test]
    fn split_state_serde_round_trip() {
        let mut split = SplitState::new();
        split.observe_side_size(40, 101);
        let json = serde_json::to_string(&split).unwrap();
        let back: SplitState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.side_percent(), split.side_percent());
    }
}
