#![forbid(unsafe_code)]

//! Category filter panel.
//!
//! Lists the category catalog with tri-state marks (`[x]`, `[~]`, `[ ]`),
//! children indented under their parent. The panel is a pure view over
//! a [`CategoryFilter`]; the host applies `toggle`/`select_all`/`clear`
//! in response to the hits this widget resolves.

use chartspace_render::{Buffer, Rect, Style};
use chartspace_timeline::{CategoryFilter, TriState};

use crate::StatefulWidget;

/// View state for a [`FilterPanel`]: the highlighted catalog row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPanelState {
    /// Highlighted catalog index.
    pub cursor: usize,
}

impl FilterPanelState {
    /// Move the cursor up one row.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one row, clamped to the catalog size.
    pub fn move_down(&mut self, catalog_len: usize) {
        if self.cursor + 1 < catalog_len {
            self.cursor += 1;
        }
    }
}

/// Hierarchical category filter widget.
pub struct FilterPanel<'a> {
    filter: &'a CategoryFilter,
    style: Style,
    highlight_style: Style,
}

impl<'a> FilterPanel<'a> {
    /// Create a panel over the filter.
    #[must_use]
    pub fn new(filter: &'a CategoryFilter) -> Self {
        Self {
            filter,
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

    /// Set the highlighted-row style.
    #[must_use]
    pub fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    /// Category id under the cursor, if any.
    #[must_use]
    pub fn cursor_id(&self, state: &FilterPanelState) -> Option<&'a str> {
        self.filter
            .catalog()
            .get(state.cursor)
            .map(|category| category.id.as_str())
    }

    /// Category id at a row (relative to the panel's area), if any.
    #[must_use]
    pub fn hit_test(&self, row: u16) -> Option<&'a str> {
        self.filter
            .catalog()
            .get(usize::from(row))
            .map(|category| category.id.as_str())
    }

    fn mark(state: TriState) -> &'static str {
        match state {
            TriState::Selected => "[x]",
            TriState::Indeterminate => "[~]",
            TriState::Unselected => "[ ]",
        }
    }
}

impl StatefulWidget for FilterPanel<'_> {
    type State = FilterPanelState;

    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }
        let catalog = self.filter.catalog();
        buf.set_style_area(area, self.style);
        if catalog.is_empty() {
            return;
        }
        state.cursor = state.cursor.min(catalog.len() - 1);
        for (row, category) in catalog.iter().enumerate() {
            let y = area.y + row as u16;
            if y >= area.bottom() {
                break;
            }
            let style = if row == state.cursor {
                let style = self.highlight_style.merge(&self.style);
                buf.set_style_area(Rect::new(area.x, y, area.width, 1), style);
                style
            } else {
                self.style
            };
            let indent = if category.parent.is_some() { "  " } else { "" };
            let line = format!(
                "{indent}{} {} {}",
                Self::mark(self.filter.state(&category.id)),
                category.icon,
                category.label,
            );
            buf.draw_span(area.x + 1, y, &line, style, area.right());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartspace_timeline::Category;

    fn catalog() -> Vec<Category> {
        vec![
            Category::new("labs", "Labs", "L", "blue"),
            Category::new("mar", "MAR", "M", "green"),
            Category::new("mar_scheduled", "Scheduled", "S", "green").child_of("mar"),
            Category::new("mar_prn", "PRN", "P", "green").child_of("mar"),
        ]
    }

    #[test]
    fn renders_tri_state_marks_and_indentation() {
        let filter =
            CategoryFilter::with_selected(catalog(), ["labs".to_string(), "mar_prn".to_string()]);
        let panel = FilterPanel::new(&filter);
        let mut buf = Buffer::new(30, 5);
        let mut state = FilterPanelState::default();
        StatefulWidget::render(&panel, Rect::new(0, 0, 30, 5), &mut buf, &mut state);
        assert!(buf.row_text(0).contains("[x] L Labs"));
        assert!(buf.row_text(1).contains("[~] M MAR"));
        assert!(buf.row_text(2).contains("  [ ] S Scheduled"));
        assert!(buf.row_text(3).contains("  [x] P PRN"));
    }

    #[test]
    fn cursor_resolves_to_a_category_id() {
        let filter = CategoryFilter::all_selected(catalog());
        let panel = FilterPanel::new(&filter);
        let mut state = FilterPanelState::default();
        state.move_down(filter.catalog().len());
        state.move_down(filter.catalog().len());
        assert_eq!(panel.cursor_id(&state), Some("mar_scheduled"));
    }

    #[test]
    fn hit_test_maps_rows_to_ids() {
        let filter = CategoryFilter::all_selected(catalog());
        let panel = FilterPanel::new(&filter);
        assert_eq!(panel.hit_test(1), Some("mar"));
        assert_eq!(panel.hit_test(9), None);
    }

    #[test]
    fn cursor_is_clamped_to_the_catalog() {
        let filter = CategoryFilter::all_selected(catalog());
        let panel = FilterPanel::new(&filter);
        let mut buf = Buffer::new(30, 5);
        let mut state = FilterPanelState { cursor: 42 };
        StatefulWidget::render(&panel, Rect::new(0, 0, 30, 5), &mut buf, &mut state);
        assert_eq!(state.cursor, 3);
    }
}
