#![forbid(unsafe_code)]

//! Overflow (reopen) resolver.
//!
//! Computes which configured tabs are currently closed in both panes so
//! the workspace can offer a reopen menu. Configuration comes in three
//! static lists: the main-pane defaults, the side-pane defaults, and
//! "overflow-only" tabs that are discoverable through the menu but not
//! part of either default set.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tabs::{PaneId, TabEntry, TabStore};

/// Configuration error for the default/overflow tab sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabSetError {
    /// A tab name appears more than once within one set.
    DuplicateName {
        /// Which set the duplicate was found in.
        set: &'static str,
        /// The repeated name.
        name: String,
    },
}

impl fmt::Display for TabSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { set, name } => {
                write!(f, "duplicate tab name {name:?} in {set} tab set")
            }
        }
    }
}

impl Error for TabSetError {}

/// The static tab configuration supplied by the hosting screen.
///
/// The workspace treats these lists as read-only configuration; it never
/// mutates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultTabSets<P> {
    /// Tabs open in the main pane when the workspace is freshly opened.
    pub main: Vec<TabEntry<P>>,
    /// Tabs open in the side pane when the workspace is freshly opened.
    pub side: Vec<TabEntry<P>>,
    /// Tabs only reachable through the reopen menu; they open into main.
    pub overflow_only: Vec<TabEntry<P>>,
}

impl<P> DefaultTabSets<P> {
    /// Check each set for duplicate names.
    pub fn validate(&self) -> Result<(), TabSetError> {
        for (set, entries) in [
            ("main", &self.main),
            ("side", &self.side),
            ("overflow-only", &self.overflow_only),
        ] {
            for (position, entry) in entries.iter().enumerate() {
                if entries[..position].iter().any(|prior| prior.name == entry.name) {
                    return Err(TabSetError::DuplicateName {
                        set,
                        name: entry.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<P: Clone> DefaultTabSets<P> {
    /// Build the initial store for a freshly opened workspace.
    #[must_use]
    pub fn initial_store(&self) -> TabStore<P> {
        TabStore::new(self.main.clone(), self.side.clone())
    }
}

/// A closed tab that can be reopened, and the pane it reopens into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReopenCandidate<'a, P> {
    /// Tab name.
    pub name: &'a str,
    /// Payload the tab reopens with.
    pub payload: &'a P,
    /// Destination pane: default tabs return to their original pane,
    /// overflow-only tabs always open into main.
    pub pane: PaneId,
}

/// Compute the reopenable tabs, in catalog order.
///
/// A tab is reopenable iff it appears in the union of the three configured
/// sets and is not currently present by name in either pane's live list.
/// An empty result means the menu must show an explicit "nothing to
/// reopen" state rather than a blank list.
pub fn reopenable<'a, P>(
    defaults: &'a DefaultTabSets<P>,
    store: &TabStore<P>,
) -> Vec<ReopenCandidate<'a, P>> {
    let candidates = [
        (PaneId::Main, &defaults.main),
        (PaneId::Side, &defaults.side),
        (PaneId::Main, &defaults.overflow_only),
    ];
    let mut out = Vec::new();
    for (pane, entries) in candidates {
        for entry in entries {
            if !store.contains_name(&entry.name) {
                out.push(ReopenCandidate {
                    name: &entry.name,
                    payload: &entry.payload,
                    pane,
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<TabEntry<u8>> {
        names.iter().map(|name| TabEntry::new(*name, 0)).collect()
    }

    fn defaults() -> DefaultTabSets<u8> {
        DefaultTabSets {
            main: entries(&["Chart Review", "Notes"]),
            side: entries(&["Orders"]),
            overflow_only: entries(&["Growth Chart"]),
        }
    }

    #[test]
    fn fresh_workspace_has_nothing_to_reopen_except_overflow_only() {
        let defaults = defaults();
        let store = defaults.initial_store();
        let reopen = reopenable(&defaults, &store);
        assert_eq!(reopen.len(), 1);
        assert_eq!(reopen[0].name, "Growth Chart");
        assert_eq!(reopen[0].pane, PaneId::Main);
    }

    #[test]
    fn closed_default_tabs_become_reopenable_into_their_pane() {
        let defaults = defaults();
        let mut store = defaults.initial_store();
        store.close_tab(PaneId::Main, 1);
        store.close_tab(PaneId::Side, 0);
        let reopen = reopenable(&defaults, &store);
        let found: Vec<_> = reopen
            .iter()
            .map(|candidate| (candidate.name, candidate.pane))
            .collect();
        assert_eq!(
            found,
            vec![
                ("Notes", PaneId::Main),
                ("Orders", PaneId::Side),
                ("Growth Chart", PaneId::Main),
            ]
        );
    }

    #[test]
    fn tab_open_in_either_pane_is_not_reopenable() {
        let defaults = defaults();
        let mut store = defaults.initial_store();
        // Move "Notes" to the side pane; it is still open, just elsewhere.
        store.move_between_panes(PaneId::Main, 1, PaneId::Side, 0);
        store.open_tab("Growth Chart", 0, PaneId::Side, true);
        assert!(reopenable(&defaults, &store).is_empty());
    }

    #[test]
    fn validate_rejects_duplicates_within_one_set() {
        let mut defaults = defaults();
        defaults.side.push(TabEntry::new("Orders", 0));
        assert_eq!(
            defaults.validate(),
            Err(TabSetError::DuplicateName {
                set: "side",
                name: "Orders".into(),
            })
        );
    }

    #[test]
    fn validate_allows_same_name_across_sets() {
        let mut defaults = defaults();
        defaults.overflow_only.push(TabEntry::new("Notes", 0));
        assert!(defaults.validate().is_ok());
    }

    #[test]
    fn tab_set_error_displays_context() {
        let err = TabSetError::DuplicateName {
            set: "main",
            name: "Notes".into(),
        };
        assert_eq!(err.to_string(), "duplicate tab name \"Notes\" in main tab set");
    }
}
