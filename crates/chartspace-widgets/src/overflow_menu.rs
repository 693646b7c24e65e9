#![forbid(unsafe_code)]

//! Reopen menu for configured tabs that are not currently open.
//!
//! Lists each closed default tab with the pane it would reopen into.
//! The menu is a pure view; the host derives its items from
//! [`chartspace_core::reopenable`] and performs the reopen itself.

use chartspace_core::{PaneId, ReopenCandidate};
use chartspace_render::{Buffer, Rect, Style};

use crate::StatefulWidget;

/// One closed configured tab offered for reopening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowItem {
    /// Tab name, as configured.
    pub name: String,
    /// Pane the tab reopens into.
    pub pane: PaneId,
}

impl OverflowItem {
    /// Build an item from a reopen candidate.
    #[must_use]
    pub fn from_candidate<P>(candidate: &ReopenCandidate<'_, P>) -> Self {
        Self {
            name: candidate.name.to_owned(),
            pane: candidate.pane,
        }
    }
}

/// View state for an [`OverflowMenu`]: the highlighted row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverflowMenuState {
    /// Highlighted item index.
    pub cursor: usize,
}

impl OverflowMenuState {
    /// Move the cursor up one row.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one row, clamped to the item count.
    pub fn move_down(&mut self, item_count: usize) {
        if self.cursor + 1 < item_count {
            self.cursor += 1;
        }
    }
}

/// Dropdown listing reopenable tabs.
#[derive(Debug, Clone)]
pub struct OverflowMenu<'a> {
    items: &'a [OverflowItem],
    style: Style,
    highlight_style: Style,
}

impl<'a> OverflowMenu<'a> {
    /// Create a menu over the given items.
    #[must_use]
    pub fn new(items: &'a [OverflowItem]) -> Self {
        Self {
            items,
            style: Style::default(),
            highlight_style: Style::default(),
        }
    }

    /// Set base style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the highlighted row style.
    #[must_use]
    pub fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    /// Item under a row (relative to the menu's area), if any.
    #[must_use]
    pub fn hit_test(&self, row: u16) -> Option<usize> {
        let index = usize::from(row);
        (index < self.items.len()).then_some(index)
    }
}

impl StatefulWidget for OverflowMenu<'_> {
    type State = OverflowMenuState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }
        buf.set_style_area(area, self.style);
        if self.items.is_empty() {
            buf.draw_span(area.x + 1, area.y, "Nothing to reopen", self.style, area.right());
            return;
        }
        state.cursor = state.cursor.min(self.items.len() - 1);
        for (row, item) in self.items.iter().enumerate() {
            let y = area.y + row as u16;
            if y >= area.bottom() {
                break;
            }
            let style = if row == state.cursor {
                self.highlight_style.merge(&self.style)
            } else {
                self.style
            };
            if row == state.cursor {
                buf.set_style_area(Rect::new(area.x, y, area.width, 1), style);
            }
            let line = format!("{}  ({})", item.name, item.pane);
            buf.draw_span(area.x + 1, y, &line, style, area.right());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<OverflowItem> {
        vec![
            OverflowItem {
                name: "Allergies".into(),
                pane: PaneId::Side,
            },
            OverflowItem {
                name: "Growth Chart".into(),
                pane: PaneId::Main,
            },
        ]
    }

    #[test]
    fn lists_items_with_their_target_pane() {
        let items = items();
        let menu = OverflowMenu::new(&items);
        let mut buf = Buffer::new(30, 4);
        let mut state = OverflowMenuState::default();
        StatefulWidget::render(&menu, Rect::new(0, 0, 30, 4), &mut buf, &mut state);
        assert!(buf.row_text(0).contains("Allergies  (side)"));
        assert!(buf.row_text(1).contains("Growth Chart  (main)"));
    }

    #[test]
    fn empty_menu_says_so() {
        let menu = OverflowMenu::new(&[]);
        let mut buf = Buffer::new(30, 2);
        let mut state = OverflowMenuState::default();
        StatefulWidget::render(&menu, Rect::new(0, 0, 30, 2), &mut buf, &mut state);
        assert!(buf.row_text(0).contains("Nothing to reopen"));
    }

    #[test]
    fn cursor_clamps_to_item_count() {
        let items = items();
        let menu = OverflowMenu::new(&items);
        let mut buf = Buffer::new(30, 4);
        let mut state = OverflowMenuState { cursor: 9 };
        StatefulWidget::render(&menu, Rect::new(0, 0, 30, 4), &mut buf, &mut state);
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn cursor_motion_respects_bounds() {
        let mut state = OverflowMenuState::default();
        state.move_up();
        assert_eq!(state.cursor, 0);
        state.move_down(2);
        assert_eq!(state.cursor, 1);
        state.move_down(2);
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn hit_test_maps_rows_to_items() {
        let items = items();
        let menu = OverflowMenu::new(&items);
        assert_eq!(menu.hit_test(0), Some(0));
        assert_eq!(menu.hit_test(1), Some(1));
        assert_eq!(menu.hit_test(2), None);
    }
}
