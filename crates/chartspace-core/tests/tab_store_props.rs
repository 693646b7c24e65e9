//! Property-style invariants for tab store operations.
//!
//! Exercises random (length, selection, index) combinations and random
//! operation streams against the public `TabStore` API and asserts the
//! close-selection rule, tab conservation across pane moves, and overflow
//! completeness.

use chartspace_core::{DefaultTabSets, PaneId, TabEntry, TabStore, reopenable};
use proptest::prelude::*;

fn store_with(len: usize, selected: usize) -> TabStore<usize> {
    let entries = (0..len)
        .map(|i| TabEntry::new(format!("tab-{i}"), i))
        .collect();
    let mut store = TabStore::new(entries, Vec::new());
    store.select(PaneId::Main, selected);
    store
}

proptest! {
    #[test]
    fn close_selection_invariant(
        len in 1usize..=10,
        selected_seed in 0usize..10,
        index_seed in 0usize..10,
    ) {
        let selected = selected_seed % len;
        let index = index_seed % len;
        let mut store = store_with(len, selected);
        prop_assert!(store.close_tab(PaneId::Main, index));

        let expected = if len == 1 {
            0
        } else if index == selected {
            index.min(len - 2)
        } else if index < selected {
            selected - 1
        } else {
            selected
        };
        prop_assert_eq!(store.pane(PaneId::Main).selected(), expected);
        prop_assert_eq!(store.pane(PaneId::Main).len(), len - 1);

        // The selection must index a live entry whenever one exists.
        if !store.pane(PaneId::Main).is_empty() {
            prop_assert!(store.pane(PaneId::Main).selected_entry().is_some());
        }
    }

    #[test]
    fn moves_conserve_tabs_and_keep_selections_in_range(
        main_len in 0usize..6,
        side_len in 0usize..6,
        ops in proptest::collection::vec((any::<bool>(), 0usize..8, 0usize..8), 0..24),
    ) {
        let main = (0..main_len).map(|i| TabEntry::new(format!("m{i}"), i)).collect();
        let side = (0..side_len).map(|i| TabEntry::new(format!("s{i}"), i)).collect();
        let mut store = TabStore::new(main, side);
        let total = store.total_len();

        for (from_main, source, dest) in ops {
            let (from, to) = if from_main {
                (PaneId::Main, PaneId::Side)
            } else {
                (PaneId::Side, PaneId::Main)
            };
            store.move_between_panes(from, source, to, dest);
            prop_assert_eq!(store.total_len(), total);
            for pane in [PaneId::Main, PaneId::Side] {
                let tabs = store.pane(pane);
                if tabs.is_empty() {
                    prop_assert_eq!(tabs.selected(), 0);
                } else {
                    prop_assert!(tabs.selected() < tabs.len());
                }
            }
        }
    }

    #[test]
    fn overflow_lists_exactly_the_closed_configured_tabs(
        close_mask in 0u8..64,
        extra_open in any::<bool>(),
    ) {
        let defaults = DefaultTabSets {
            main: vec![
                TabEntry::new("Chart Review", 0usize),
                TabEntry::new("Notes", 1),
                TabEntry::new("Results", 2),
            ],
            side: vec![TabEntry::new("Orders", 3), TabEntry::new("MAR", 4)],
            overflow_only: vec![TabEntry::new("Growth Chart", 5)],
        };
        defaults.validate().expect("fixed sets are duplicate-free");
        let mut store = defaults.initial_store();

        let all_names = ["Chart Review", "Notes", "Results", "Orders", "MAR"];
        for (bit, name) in all_names.iter().enumerate() {
            if close_mask & (1 << bit) != 0 {
                store.close_tab_by_name(name, None);
            }
        }
        if extra_open {
            store.open_tab("Growth Chart", 5usize, PaneId::Main, true);
        }

        let reopen = reopenable(&defaults, &store);
        let configured = ["Chart Review", "Notes", "Results", "Orders", "MAR", "Growth Chart"];
        for name in configured {
            let listed = reopen.iter().any(|candidate| candidate.name == name);
            prop_assert_eq!(
                listed,
                !store.contains_name(name),
                "overflow membership must mirror closed-ness for {}",
                name
            );
        }
        // Nothing outside the configured union ever shows up.
        for candidate in &reopen {
            prop_assert!(configured.contains(&candidate.name));
        }
    }
}
