#![forbid(unsafe_code)]

//! Two-pane workspace frame.
//!
//! Resolves the viewport into tab-bar, body, and divider regions from
//! the split state, then renders a [`TabBar`] and [`PaneView`] for each
//! visible pane. Region resolution is exposed separately so the host can
//! route mouse events against the same geometry the frame was drawn with.

use chartspace_core::{PaneId, SplitState, TabStore};
use chartspace_render::{Buffer, Cell, Rect, Style};

use crate::pane_view::{PaneView, TabDirectory};
use crate::tab_bar::{TabBar, TabBarState};
use crate::{StatefulWidget, Widget};

/// Screen regions of one workspace frame.
///
/// Hidden regions are empty rects, so `contains` checks stay uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitRegions {
    /// Main pane tab strip.
    pub main_bar: Rect,
    /// Main pane content area.
    pub main_body: Rect,
    /// Divider column, full height; empty when the split is hidden.
    pub divider: Rect,
    /// Side pane tab strip; empty when the side pane is hidden.
    pub side_bar: Rect,
    /// Side pane content area; empty when the side pane is hidden.
    pub side_body: Rect,
}

impl SplitRegions {
    /// Pane whose bar or body contains `(x, y)`, if any.
    #[must_use]
    pub fn pane_at(&self, x: u16, y: u16) -> Option<PaneId> {
        if self.main_bar.contains(x, y) || self.main_body.contains(x, y) {
            Some(PaneId::Main)
        } else if self.side_bar.contains(x, y) || self.side_body.contains(x, y) {
            Some(PaneId::Side)
        } else {
            None
        }
    }
}

/// Resolve the viewport into frame regions.
pub fn resolve_regions(viewport: Rect, split: &SplitState, side_empty: bool) -> SplitRegions {
    let layout = split.layout(viewport.width, side_empty);
    let bar_height = u16::from(viewport.height > 0);
    let body_height = viewport.height.saturating_sub(bar_height);
    let body_y = viewport.y + bar_height;

    let main_bar = Rect::new(viewport.x, viewport.y, layout.main_cols, bar_height);
    let main_body = Rect::new(viewport.x, body_y, layout.main_cols, body_height);
    let divider = match layout.divider_col {
        Some(col) => Rect::new(viewport.x + col, viewport.y, 1, viewport.height),
        None => Rect::new(viewport.x, viewport.y, 0, 0),
    };
    let (side_bar, side_body) = if layout.side_visible() {
        let side_x = viewport.x + layout.main_cols + 1;
        (
            Rect::new(side_x, viewport.y, layout.side_cols, bar_height),
            Rect::new(side_x, body_y, layout.side_cols, body_height),
        )
    } else {
        (
            Rect::new(viewport.x, viewport.y, 0, 0),
            Rect::new(viewport.x, viewport.y, 0, 0),
        )
    };
    SplitRegions {
        main_bar,
        main_body,
        divider,
        side_bar,
        side_body,
    }
}

/// View state for a [`SplitView`]: one tab-bar scroll per pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitViewState {
    /// Main pane tab-bar state.
    pub main_bar: TabBarState,
    /// Side pane tab-bar state.
    pub side_bar: TabBarState,
}

/// The whole two-pane workspace widget.
pub struct SplitView<'a, P> {
    store: &'a TabStore<P>,
    split: &'a SplitState,
    directory: &'a TabDirectory<'a, P>,
    bar_style: Style,
    active_tab_style: Style,
    divider_style: Style,
}

impl<'a, P> SplitView<'a, P> {
    /// Create the frame over the workspace state.
    #[must_use]
    pub fn new(
        store: &'a TabStore<P>,
        split: &'a SplitState,
        directory: &'a TabDirectory<'a, P>,
    ) -> Self {
        Self {
            store,
            split,
            directory,
            bar_style: Style::default(),
            active_tab_style: Style::default(),
            divider_style: Style::default(),
        }
    }

    /// Set the tab-strip style.
    #[must_use]
    pub fn bar_style(mut self, style: Style) -> Self {
        self.bar_style = style;
        self
    }

    /// Set the active-tab style.
    #[must_use]
    pub fn active_tab_style(mut self, style: Style) -> Self {
        self.active_tab_style = style;
        self
    }

    /// Set the divider style.
    #[must_use]
    pub fn divider_style(mut self, style: Style) -> Self {
        self.divider_style = style;
        self
    }

    /// Regions this frame resolves to for `viewport`.
    #[must_use]
    pub fn regions(&self, viewport: Rect) -> SplitRegions {
        resolve_regions(viewport, self.split, self.store.pane(PaneId::Side).is_empty())
    }

    fn bar(&self, pane: PaneId) -> TabBar<'_> {
        TabBar::from_pane(self.store.pane(pane))
            .closable(true)
            .style(self.bar_style)
            .active_style(self.active_tab_style)
    }
}

impl<P> StatefulWidget for SplitView<'_, P> {
    type State = SplitViewState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }
        let regions = self.regions(area);

        self.bar(PaneId::Main)
            .render(regions.main_bar, buf, &mut state.main_bar);
        PaneView::new(self.store.pane(PaneId::Main), self.directory)
            .render(regions.main_body, buf);

        if !regions.divider.is_empty() {
            buf.fill(regions.divider, Cell::new('│', self.divider_style));
        }
        if !regions.side_body.is_empty() {
            self.bar(PaneId::Side)
                .render(regions.side_bar, buf, &mut state.side_bar);
            PaneView::new(self.store.pane(PaneId::Side), self.directory)
                .render(regions.side_body, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartspace_core::TabEntry;

    fn store() -> TabStore<u8> {
        TabStore::new(
            vec![TabEntry::new("Chart Review", 0), TabEntry::new("Orders", 1)],
            vec![TabEntry::new("Timeline", 2)],
        )
    }

    fn directory() -> TabDirectory<'static, u8> {
        let label = |tag: &'static str| {
            Box::new(move |_: &u8, area: Rect, buf: &mut Buffer| {
                buf.draw_span(0, 0, tag, Style::default(), area.right());
            })
        };
        TabDirectory::new()
            .with("Chart Review", label("chart body"))
            .with("Orders", label("orders body"))
            .with("Timeline", label("timeline body"))
    }

    #[test]
    fn regions_partition_a_wide_viewport() {
        let split = SplitState::new();
        let regions = resolve_regions(Rect::new(0, 0, 101, 30), &split, false);
        assert_eq!(regions.main_bar, Rect::new(0, 0, 65, 1));
        assert_eq!(regions.main_body, Rect::new(0, 1, 65, 29));
        assert_eq!(regions.divider, Rect::new(65, 0, 1, 30));
        assert_eq!(regions.side_bar, Rect::new(66, 0, 35, 1));
        assert_eq!(regions.side_body, Rect::new(66, 1, 35, 29));
    }

    #[test]
    fn narrow_viewport_gives_the_main_pane_everything() {
        let split = SplitState::new();
        let regions = resolve_regions(Rect::new(0, 0, 80, 24), &split, false);
        assert_eq!(regions.main_body.width, 80);
        assert!(regions.divider.is_empty());
        assert!(regions.side_body.is_empty());
    }

    #[test]
    fn collapsed_split_keeps_the_divider() {
        let mut split = SplitState::new();
        split.toggle();
        let regions = resolve_regions(Rect::new(0, 0, 120, 24), &split, false);
        assert!(!regions.divider.is_empty());
        assert!(regions.side_body.is_empty());
        assert_eq!(regions.main_body.width, 119);
    }

    #[test]
    fn pane_at_routes_columns_to_panes() {
        let split = SplitState::new();
        let regions = resolve_regions(Rect::new(0, 0, 101, 30), &split, false);
        assert_eq!(regions.pane_at(10, 5), Some(PaneId::Main));
        assert_eq!(regions.pane_at(70, 5), Some(PaneId::Side));
        // Divider column belongs to neither pane.
        assert_eq!(regions.pane_at(65, 5), None);
    }

    #[test]
    fn renders_both_panes_and_the_divider() {
        let store = store();
        let split = SplitState::new();
        let directory = directory();
        let view = SplitView::new(&store, &split, &directory);
        let mut buf = Buffer::new(101, 6);
        let mut state = SplitViewState::default();
        StatefulWidget::render(&view, Rect::new(0, 0, 101, 6), &mut buf, &mut state);
        let bar = buf.row_text(0);
        assert!(bar.contains("[Chart Review x]"));
        assert!(bar.contains("[Timeline x]"));
        let body = buf.row_text(1);
        assert!(body.contains("chart body"));
        assert!(body.contains("timeline body"));
        assert!(!body.contains("orders body"));
        assert_eq!(buf.get(65, 3).map(|cell| cell.ch), Some('│'));
    }

    #[test]
    fn empty_side_pane_is_not_rendered() {
        let store: TabStore<u8> = TabStore::new(vec![TabEntry::new("Chart Review", 0)], vec![]);
        let split = SplitState::new();
        let directory = directory();
        let view = SplitView::new(&store, &split, &directory);
        let mut buf = Buffer::new(120, 4);
        let mut state = SplitViewState::default();
        StatefulWidget::render(&view, Rect::new(0, 0, 120, 4), &mut buf, &mut state);
        assert!(!buf.row_text(0).contains("Timeline"));
        assert!(!buf.row_text(2).contains('│'));
    }
}
