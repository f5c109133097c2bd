use landing_frontend::faq::watchdog::assess;
use landing_frontend::faq::controller::key_activates;
use landing_frontend::faq::{AccordionState, RebuildReason, Snapshot, Verdict};

/// Walks a fixed pseudo-random sequence of activations over `items` entries.
fn activation_sequence(items: usize, steps: usize) -> Vec<usize> {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    (0..steps)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % items as u64) as usize
        })
        .collect()
}

fn expanded(state: &AccordionState, items: usize) -> Vec<usize> {
    (0..items).filter(|i| state.is_open(*i)).collect()
}

#[test]
fn three_items_walkthrough() {
    let mut state = AccordionState::new();
    assert!(expanded(&state, 3).is_empty());

    state.activate(1);
    assert_eq!(expanded(&state, 3), vec![1]);

    state.activate(2);
    assert_eq!(expanded(&state, 3), vec![2]);

    state.activate(2);
    assert!(expanded(&state, 3).is_empty());
}

#[test]
fn opening_any_closed_item_isolates_it() {
    for items in 1..=8 {
        for target in 0..items {
            for already_open in (0..items).filter(|i| *i != target) {
                let mut state = AccordionState::new();
                state.activate(already_open);
                state.activate(target);
                assert_eq!(expanded(&state, items), vec![target]);
            }
        }
    }
}

#[test]
fn never_more_than_one_expanded() {
    let items = 5;
    let mut state = AccordionState::new();
    for index in activation_sequence(items, 500) {
        state.activate(index);
        assert!(expanded(&state, items).len() <= 1);
        assert_eq!(expanded(&state, items).len(), state.open_count());
    }
}

#[test]
fn keyboard_and_pointer_reach_the_same_state() {
    let keys = ["Enter", " ", "Tab", "Escape"];
    for key in keys {
        let mut by_pointer = AccordionState::new();
        let mut by_keyboard = AccordionState::new();
        for index in activation_sequence(4, 50) {
            by_pointer.activate(index);
            if key_activates(key) {
                by_keyboard.activate(index);
                assert_eq!(by_pointer, by_keyboard);
            } else {
                assert_eq!(by_keyboard, AccordionState::new());
            }
        }
    }
}

#[test]
fn page_without_items_needs_nothing() {
    let snapshot = Snapshot {
        discovered: 0,
        bindable: 0,
        bound: 0,
        initialized: true,
    };
    assert_eq!(assess(&snapshot), Verdict::NoItems);
}

#[test]
fn rebuild_then_healthy() {
    let broken = Snapshot {
        discovered: 3,
        bindable: 3,
        bound: 0,
        initialized: false,
    };
    assert_eq!(
        assess(&broken),
        Verdict::Rebuild(RebuildReason::NotInitialized)
    );

    // After the rebuild the controller reports all bindable items bound.
    let rebuilt = Snapshot {
        bound: 3,
        initialized: true,
        ..broken
    };
    assert_eq!(assess(&rebuilt), Verdict::Healthy);

    // State survives a rebuild because it is reseeded from the projection.
    let mut state = AccordionState::new();
    state.activate(1);
    let projected: Vec<bool> = (0..3).map(|i| state.is_open(i)).collect();
    let mut reseeded = AccordionState::from_expanded(projected);
    assert_eq!(reseeded, state);
    reseeded.activate(0);
    assert_eq!(expanded(&reseeded, 3), vec![0]);
}
