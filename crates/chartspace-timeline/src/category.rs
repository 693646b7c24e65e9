#![forbid(unsafe_code)]

//! Category catalog and hierarchical selection.
//!
//! Categories form an optionally two-level hierarchy (`orders` →
//! `orders_med`). Selection is stored as a flat set of ids; a parent's
//! tri-state is derived functionally from its children rather than stored,
//! so it can never drift.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A static catalog entry for one filterable category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id; children embed the parent as a `parent_child` prefix
    /// convention in event tags.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Single-cell icon glyph.
    pub icon: String,
    /// Named theme color slot.
    pub color: String,
    /// Parent category id for second-level entries.
    pub parent: Option<String>,
}

impl Category {
    /// Create a top-level category.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            color: color.into(),
            parent: None,
        }
    }

    /// Create a child category.
    #[must_use]
    pub fn child_of(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// Derived selection state of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    Unselected,
    Selected,
    /// Some but not all children selected (parents only).
    Indeterminate,
}

/// Catalog plus the set of selected category ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    catalog: Vec<Category>,
    selected: BTreeSet<String>,
}

impl CategoryFilter {
    /// Create a filter with everything selected.
    #[must_use]
    pub fn all_selected(catalog: Vec<Category>) -> Self {
        let selected = catalog
            .iter()
            .map(|category| category.id.clone())
            .collect();
        Self { catalog, selected }
    }

    /// Create a filter with an explicit selection.
    #[must_use]
    pub fn with_selected(catalog: Vec<Category>, ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            catalog,
            selected: ids.into_iter().collect(),
        }
    }

    /// Catalog entries in display order.
    #[must_use]
    pub fn catalog(&self) -> &[Category] {
        &self.catalog
    }

    /// Currently selected ids.
    #[must_use]
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    fn children(&self, id: &str) -> impl Iterator<Item = &Category> {
        self.catalog
            .iter()
            .filter(move |category| category.parent.as_deref() == Some(id))
    }

    /// Derived tri-state for one catalog entry.
    ///
    /// A parent is `Selected` when all of its children are selected and
    /// `Indeterminate` when only some are; entries without children follow
    /// their own membership in the selected set.
    #[must_use]
    pub fn state(&self, id: &str) -> TriState {
        let mut child_count = 0usize;
        let mut selected_children = 0usize;
        for child in self.children(id) {
            child_count += 1;
            if self.selected.contains(&child.id) {
                selected_children += 1;
            }
        }
        if child_count == 0 {
            if self.selected.contains(id) {
                TriState::Selected
            } else {
                TriState::Unselected
            }
        } else if selected_children == child_count {
            TriState::Selected
        } else if selected_children > 0 {
            TriState::Indeterminate
        } else {
            TriState::Unselected
        }
    }

    /// Toggle one entry.
    ///
    /// Toggling a parent selects all of its children unless all were
    /// already selected, in which case it clears them.
    pub fn toggle(&mut self, id: &str) {
        let child_ids: Vec<String> = self.children(id).map(|child| child.id.clone()).collect();
        if child_ids.is_empty() {
            if !self.selected.remove(id) {
                self.selected.insert(id.to_string());
            }
        } else if self.state(id) == TriState::Selected {
            for child in &child_ids {
                self.selected.remove(child);
            }
            self.selected.remove(id);
        } else {
            for child in child_ids {
                self.selected.insert(child);
            }
        }
        tracing::debug!(message = "timeline.filter_toggle", id);
    }

    /// Select every catalog entry.
    pub fn select_all(&mut self) {
        self.selected = self
            .catalog
            .iter()
            .map(|category| category.id.clone())
            .collect();
    }

    /// Clear the selection (no events pass).
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Whether an event category passes the current selection.
    ///
    /// An event passes when its category equals a selected id or starts
    /// with `id + "_"`, so selecting a parent admits its children without
    /// the event enumerating ancestors.
    #[must_use]
    pub fn passes(&self, category: &str) -> bool {
        self.selected.iter().any(|id| {
            category == id
                || (category.len() > id.len()
                    && category.starts_with(id.as_str())
                    && category.as_bytes()[id.len()] == b'_')
        })
    }
}
