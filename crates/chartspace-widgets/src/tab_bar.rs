#![forbid(unsafe_code)]

//! Tab header strip for one pane.
//!
//! Shows every tab in order (the selected one bracketed), with close
//! markers and `<`/`>` scroll markers when the strip overflows its area.
//! The bar is a pure view over the pane's tab list; selection and
//! structure live in the tab store.

use chartspace_core::PaneTabs;
use chartspace_render::{Buffer, Rect, Style};
use unicode_width::UnicodeWidthStr;

use crate::StatefulWidget;

/// View state for a [`TabBar`]: the left-most visible tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabBarState {
    /// Index of the left-most rendered tab when scrolled.
    pub offset: usize,
}

/// What a column in the bar corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabHit {
    /// The tab's label: select it (or start a drag from it).
    Tab(usize),
    /// The tab's close marker.
    Close(usize),
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    index: usize,
    /// Column relative to the bar area.
    x: u16,
    width: u16,
    /// Column of the close marker within the segment, when closable.
    close_x: Option<u16>,
}

#[derive(Debug, Clone, Default)]
struct BarLayout {
    end: usize,
    overflow_left: bool,
    overflow_right: bool,
    segments: Vec<Segment>,
}

/// Tab header strip widget.
#[derive(Debug, Clone)]
pub struct TabBar<'a> {
    labels: Vec<&'a str>,
    active: usize,
    closable: bool,
    style: Style,
    active_style: Style,
    separator: &'a str,
}

impl<'a> TabBar<'a> {
    /// Build a bar from a pane's tab list and selection.
    #[must_use]
    pub fn from_pane<P>(pane: &'a PaneTabs<P>) -> Self {
        Self {
            labels: pane.entries().iter().map(|entry| entry.name.as_str()).collect(),
            active: pane.selected(),
            closable: false,
            style: Style::default(),
            active_style: Style::default(),
            separator: " ",
        }
    }

    /// Set base style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the active tab style.
    #[must_use]
    pub fn active_style(mut self, style: Style) -> Self {
        self.active_style = style;
        self
    }

    /// Show close markers on every tab.
    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    fn label(&self, index: usize) -> String {
        let mut out = String::new();
        out.push(if index == self.active { '[' } else { ' ' });
        out.push_str(self.labels[index]);
        if self.closable {
            out.push_str(" x");
        }
        out.push(if index == self.active { ']' } else { ' ' });
        out
    }

    fn label_width(&self, index: usize) -> u16 {
        self.label(index).width() as u16
    }

    fn all_fit(&self, width: u16) -> bool {
        let sep = self.separator.width() as u16;
        let mut used = 0u16;
        for index in 0..self.labels.len() {
            if index > 0 {
                used = used.saturating_add(sep);
            }
            used = used.saturating_add(self.label_width(index));
        }
        used <= width
    }

    fn layout(&self, offset: usize, width: u16) -> BarLayout {
        if self.labels.is_empty() || width == 0 {
            return BarLayout::default();
        }
        let all_fit = self.all_fit(width);
        let offset = if all_fit {
            0
        } else {
            offset.min(self.labels.len() - 1)
        };
        let overflow_left = offset > 0;
        // One column each for the scroll markers when scrolled.
        let left_pad: u16 = if overflow_left { 1 } else { 0 };
        let right_pad: u16 = if all_fit { 0 } else { 1 };
        let limit = width.saturating_sub(right_pad);

        let sep = self.separator.width() as u16;
        let mut segments = Vec::new();
        let mut x = left_pad;
        let mut end = offset;
        let mut clipped = false;
        for index in offset..self.labels.len() {
            let gap = if index == offset { 0 } else { sep };
            let full = self.label_width(index);
            if !segments.is_empty() && x.saturating_add(gap).saturating_add(full) > limit {
                break;
            }
            x = x.saturating_add(gap);
            // The first tab is admitted even when over-long and clipped at
            // the limit; hit geometry must match the clipped extent.
            let width = full.min(limit.saturating_sub(x));
            if width == 0 {
                break;
            }
            if width < full {
                clipped = true;
            }
            let close_x = (self.closable && full >= 2 && full - 2 < width).then(|| full - 2);
            segments.push(Segment {
                index,
                x,
                width,
                close_x,
            });
            x = x.saturating_add(width);
            end = index + 1;
        }
        BarLayout {
            end,
            overflow_left,
            overflow_right: end < self.labels.len() || clipped,
            segments,
        }
    }

    /// Scroll the bar so the active tab is visible.
    pub fn ensure_visible(&self, state: &mut TabBarState, width: u16) {
        if self.labels.is_empty() {
            state.offset = 0;
            return;
        }
        state.offset = state.offset.min(self.labels.len() - 1);
        if self.active < state.offset {
            state.offset = self.active;
        }
        while self.active >= self.layout(state.offset, width).end.max(state.offset + 1)
            && state.offset < self.active
        {
            state.offset += 1;
        }
    }

    /// Map a column (relative to the bar's area) to a tab or close hit.
    ///
    /// Uses the same layout as the last render for the given state.
    #[must_use]
    pub fn hit_test(&self, state: &TabBarState, width: u16, x: u16) -> Option<TabHit> {
        let layout = self.layout(state.offset, width);
        for segment in &layout.segments {
            if x >= segment.x && x < segment.x + segment.width {
                if let Some(close_x) = segment.close_x
                    && x == segment.x + close_x
                {
                    return Some(TabHit::Close(segment.index));
                }
                return Some(TabHit::Tab(segment.index));
            }
        }
        None
    }

    /// Index a dragged tab would land at when dropped at column `x`.
    ///
    /// Dropping past the last tab targets the end of the list.
    #[must_use]
    pub fn drop_index(&self, state: &TabBarState, width: u16, x: u16) -> usize {
        match self.hit_test(state, width, x) {
            Some(TabHit::Tab(index) | TabHit::Close(index)) => index,
            None => self.labels.len().saturating_sub(1),
        }
    }
}

impl StatefulWidget for TabBar<'_> {
    type State = TabBarState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() || self.labels.is_empty() {
            return;
        }
        self.ensure_visible(state, area.width);
        let layout = self.layout(state.offset, area.width);

        buf.set_style_area(Rect::new(area.x, area.y, area.width, 1), self.style);
        if layout.overflow_left {
            buf.draw_span(area.x, area.y, "<", self.style, area.right());
        }
        if layout.overflow_right {
            buf.draw_span(area.right() - 1, area.y, ">", self.style, area.right());
        }

        let limit = if layout.overflow_right {
            area.right() - 1
        } else {
            area.right()
        };
        for segment in &layout.segments {
            let style = if segment.index == self.active {
                self.active_style.merge(&self.style)
            } else {
                self.style
            };
            buf.draw_span(
                area.x + segment.x,
                area.y,
                &self.label(segment.index),
                style,
                limit,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartspace_core::{PaneTabs, TabEntry};

    fn pane(names: &[&str]) -> PaneTabs<u8> {
        PaneTabs::from_entries(names.iter().map(|name| TabEntry::new(*name, 0)).collect())
    }

    fn bar<'a>(pane: &'a PaneTabs<u8>) -> TabBar<'a> {
        TabBar::from_pane(pane)
    }

    #[test]
    fn renders_active_tab_bracketed() {
        let pane = pane(&["One", "Two"]);
        let tab_bar = bar(&pane);
        let mut buf = Buffer::new(20, 1);
        let mut state = TabBarState::default();
        StatefulWidget::render(&tab_bar, Rect::new(0, 0, 20, 1), &mut buf, &mut state);
        let row = buf.row_text(0);
        assert!(row.contains("[One]"));
        assert!(row.contains(" Two "));
    }

    #[test]
    fn close_marker_renders_when_closable() {
        let pane = pane(&["Notes"]);
        let tab_bar = bar(&pane).closable(true);
        let mut buf = Buffer::new(20, 1);
        let mut state = TabBarState::default();
        StatefulWidget::render(&tab_bar, Rect::new(0, 0, 20, 1), &mut buf, &mut state);
        assert!(buf.row_text(0).contains("[Notes x]"));
    }

    #[test]
    fn overflow_markers_appear_when_tabs_do_not_fit() {
        use chartspace_core::{PaneId, TabStore};

        let entries = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]
            .iter()
            .map(|name| TabEntry::new(*name, 0u8))
            .collect();
        let mut store = TabStore::new(entries, Vec::new());
        store.select(PaneId::Main, 2);
        let tab_bar = TabBar::from_pane(store.pane(PaneId::Main));
        let mut buf = Buffer::new(14, 1);
        let mut state = TabBarState::default();
        StatefulWidget::render(&tab_bar, Rect::new(0, 0, 14, 1), &mut buf, &mut state);
        // Scrolled to keep "Gamma" visible: tabs remain on both sides.
        let row = buf.row_text(0);
        assert!(row.starts_with('<'));
        assert!(row.trim_end().ends_with('>'));
    }

    #[test]
    fn clipped_tab_hits_stop_at_the_drawn_limit() {
        let pane = pane(&["Extremely Long Tab Name"]);
        let tab_bar = bar(&pane).closable(true);
        let state = TabBarState::default();
        // The label is wider than the bar, so it is clipped at the `>`
        // marker in column 9; only the drawn columns register hits and the
        // clipped close marker registers none.
        for x in 0..9 {
            assert_eq!(tab_bar.hit_test(&state, 10, x), Some(TabHit::Tab(0)));
        }
        assert_eq!(tab_bar.hit_test(&state, 10, 9), None);
        assert_eq!(tab_bar.hit_test(&state, 10, 25), None);

        let mut buf = Buffer::new(10, 1);
        let mut render_state = TabBarState::default();
        StatefulWidget::render(&tab_bar, Rect::new(0, 0, 10, 1), &mut buf, &mut render_state);
        assert!(buf.row_text(0).ends_with('>'));
    }

    #[test]
    fn hit_test_resolves_tab_and_close_columns() {
        let pane = pane(&["AB", "CD"]);
        let tab_bar = bar(&pane).closable(true);
        let state = TabBarState::default();
        // Active label "[AB x]" spans columns 0..6, close at 4.
        assert_eq!(tab_bar.hit_test(&state, 30, 1), Some(TabHit::Tab(0)));
        assert_eq!(tab_bar.hit_test(&state, 30, 4), Some(TabHit::Close(0)));
        // Separator column hits nothing.
        assert_eq!(tab_bar.hit_test(&state, 30, 6), None);
        assert_eq!(tab_bar.hit_test(&state, 30, 8), Some(TabHit::Tab(1)));
    }

    #[test]
    fn hit_test_outside_all_tabs_is_none() {
        let pane = pane(&["AB"]);
        let tab_bar = bar(&pane);
        let state = TabBarState::default();
        assert_eq!(tab_bar.hit_test(&state, 30, 25), None);
    }

    #[test]
    fn drop_index_past_the_last_tab_targets_the_end() {
        let pane = pane(&["AB", "CD"]);
        let tab_bar = bar(&pane);
        let state = TabBarState::default();
        assert_eq!(tab_bar.drop_index(&state, 30, 28), 1);
    }

    #[test]
    fn empty_pane_renders_nothing() {
        let pane: PaneTabs<u8> = PaneTabs::default();
        let tab_bar = TabBar::from_pane(&pane);
        let mut buf = Buffer::new(10, 1);
        let mut state = TabBarState::default();
        StatefulWidget::render(&tab_bar, Rect::new(0, 0, 10, 1), &mut buf, &mut state);
        assert_eq!(buf.row_text(0).trim(), "");
    }
}
