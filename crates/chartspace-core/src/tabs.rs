#![forbid(unsafe_code)]

//! Tab store.
//!
//! Holds the ordered tab lists and selections for both workspace panes and
//! exposes mutators that keep the selected index consistent across
//! structural changes. All operations are total: an out-of-range index is
//! treated as a no-op rather than a panic, because stale indices are an
//! expected consequence of decoupled UI event handlers (two close clicks
//! landing in the same tick, a drag ending after a close, and so on).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for one of the two workspace panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaneId {
    /// The primary (left) pane.
    Main,
    /// The secondary (right) pane.
    Side,
}

impl PaneId {
    /// The other pane.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Main => Self::Side,
            Self::Side => Self::Main,
        }
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Side => f.write_str("side"),
        }
    }
}

/// A named, ordered slot within a pane holding opaque payload data.
///
/// The payload is interpreted only by the renderer registered for `name`
/// in the tab directory; the store never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabEntry<P> {
    /// Tab name, unique within its pane while `select_if_exists` opens are
    /// used (duplicates are permitted when explicitly requested).
    pub name: String,
    /// Opaque payload handed to the tab's renderer.
    pub payload: P,
}

impl<P> TabEntry<P> {
    /// Create a new tab entry.
    pub fn new(name: impl Into<String>, payload: P) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// One pane's ordered tab list plus its selected index.
///
/// `selected` is in `[0, len - 1]`, or 0 when the list is empty; callers
/// must guard access when the list is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneTabs<P> {
    entries: Vec<TabEntry<P>>,
    selected: usize,
}

impl<P> Default for PaneTabs<P> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            selected: 0,
        }
    }
}

impl<P> PaneTabs<P> {
    /// Create a pane from an initial tab list, selecting index 0.
    #[must_use]
    pub fn from_entries(entries: Vec<TabEntry<P>>) -> Self {
        Self {
            entries,
            selected: 0,
        }
    }

    /// Number of open tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the pane has no tabs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered tab entries.
    #[must_use]
    pub fn entries(&self) -> &[TabEntry<P>] {
        &self.entries
    }

    /// Selected index (0 when empty).
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Currently selected entry, if any tab is open.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&TabEntry<P>> {
        self.entries.get(self.selected)
    }

    /// Index of the first tab with the given name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    fn select(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.selected = index;
        true
    }

    /// Remove the tab at `index`, recomputing the selection.
    ///
    /// Selection rule (shared by both panes): if the list becomes empty the
    /// selection resets to 0; if the closed index was selected, the
    /// selection becomes `min(index, new_len - 1)`; if the closed index was
    /// before the selection, the selection shifts down by one; otherwise it
    /// is unchanged.
    fn close(&mut self, index: usize) -> Option<TabEntry<P>> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        if self.entries.is_empty() {
            self.selected = 0;
        } else if index == self.selected {
            self.selected = index.min(self.entries.len() - 1);
        } else if index < self.selected {
            self.selected -= 1;
        }
        Some(removed)
    }

    fn insert(&mut self, index: usize, entry: TabEntry<P>) -> usize {
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
        index
    }
}

/// Single source of truth for both panes' tab lists and selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStore<P> {
    main: PaneTabs<P>,
    side: PaneTabs<P>,
}

impl<P> TabStore<P> {
    /// Create a store from initial tab lists for each pane.
    #[must_use]
    pub fn new(main: Vec<TabEntry<P>>, side: Vec<TabEntry<P>>) -> Self {
        Self {
            main: PaneTabs::from_entries(main),
            side: PaneTabs::from_entries(side),
        }
    }

    /// Read access to one pane.
    #[must_use]
    pub fn pane(&self, pane: PaneId) -> &PaneTabs<P> {
        match pane {
            PaneId::Main => &self.main,
            PaneId::Side => &self.side,
        }
    }

    fn pane_mut(&mut self, pane: PaneId) -> &mut PaneTabs<P> {
        match pane {
            PaneId::Main => &mut self.main,
            PaneId::Side => &mut self.side,
        }
    }

    /// Total tab count across both panes.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.main.len() + self.side.len()
    }

    /// Whether a tab with the given name is open in either pane.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.main.position(name).is_some() || self.side.position(name).is_some()
    }

    /// Select the tab at `index` in `pane`. Out-of-range is a no-op.
    pub fn select(&mut self, pane: PaneId, index: usize) -> bool {
        self.pane_mut(pane).select(index)
    }

    /// Close the tab at `index` in `pane`.
    ///
    /// Returns `false` (without touching any state) when the index is out
    /// of range.
    pub fn close_tab(&mut self, pane: PaneId, index: usize) -> bool {
        let closed = self.pane_mut(pane).close(index).is_some();
        if closed {
            tracing::debug!(message = "tabs.close", %pane, index);
        }
        closed
    }

    /// Close the first tab named `name`.
    ///
    /// Looks in the given pane, or in main then side when `pane` is `None`.
    /// Returns whether a tab was found and closed.
    pub fn close_tab_by_name(&mut self, name: &str, pane: Option<PaneId>) -> bool {
        let target = match pane {
            Some(pane) => self.pane(pane).position(name).map(|index| (pane, index)),
            None => self
                .main
                .position(name)
                .map(|index| (PaneId::Main, index))
                .or_else(|| self.side.position(name).map(|index| (PaneId::Side, index))),
        };
        match target {
            Some((pane, index)) => self.close_tab(pane, index),
            None => false,
        }
    }

    /// Open a tab in `pane` and return its index.
    ///
    /// When a tab named `name` already exists in the pane and
    /// `select_if_exists` is true, the existing tab is selected and its
    /// index returned without creating a duplicate. Otherwise the entry is
    /// appended and selected. The returned index is computed from the list
    /// length after the append lands, so rapid successive calls always see
    /// strictly correct indices.
    pub fn open_tab(
        &mut self,
        name: impl Into<String>,
        payload: P,
        pane: PaneId,
        select_if_exists: bool,
    ) -> usize {
        let name = name.into();
        let tabs = self.pane_mut(pane);
        if select_if_exists
            && let Some(existing) = tabs.position(&name)
        {
            tabs.selected = existing;
            tracing::debug!(message = "tabs.open", %pane, index = existing, existing = true);
            return existing;
        }
        tabs.entries.push(TabEntry { name, payload });
        tabs.selected = tabs.entries.len() - 1;
        tracing::debug!(message = "tabs.open", %pane, index = tabs.selected, existing = false);
        tabs.selected
    }

    /// Move the tab at `source` to `dest` within one pane and select it.
    ///
    /// `dest` is clamped to the post-removal length; an out-of-range
    /// `source` is a no-op.
    pub fn reorder_within_pane(&mut self, pane: PaneId, source: usize, dest: usize) -> bool {
        let tabs = self.pane_mut(pane);
        if source >= tabs.entries.len() {
            return false;
        }
        let entry = tabs.entries.remove(source);
        let landed = tabs.insert(dest, entry);
        tabs.selected = landed;
        tracing::debug!(message = "tabs.move", %pane, source, dest = landed);
        true
    }

    /// Move a tab from one pane to the other.
    ///
    /// The moved tab is selected at its destination index (clamped). In the
    /// source pane the selection becomes `clamp(source - 1, 0, new_len - 1)`.
    /// A same-pane call degrades to [`Self::reorder_within_pane`].
    pub fn move_between_panes(
        &mut self,
        source_pane: PaneId,
        source: usize,
        dest_pane: PaneId,
        dest: usize,
    ) -> bool {
        if source_pane == dest_pane {
            return self.reorder_within_pane(source_pane, source, dest);
        }
        let from = self.pane_mut(source_pane);
        if source >= from.entries.len() {
            return false;
        }
        let entry = from.entries.remove(source);
        from.selected = source
            .saturating_sub(1)
            .min(from.entries.len().saturating_sub(1));
        let to = self.pane_mut(dest_pane);
        let landed = to.insert(dest, entry);
        to.selected = landed;
        tracing::debug!(
            message = "tabs.move",
            from = %source_pane,
            to = %dest_pane,
            source,
            dest = landed,
        );
        true
    }
}
