//! Structural invariants checked after every step of longer action
//! sequences. The store audit covers the cached child counts, dense sibling
//! orders, depth chains, and parent-link acyclicity.

use mindpad_editor::{layout, Action, DocumentState, ElementId, History, Suggestion};

fn id(raw: &str) -> ElementId {
    ElementId::from(raw)
}

/// Dispatch and assert the store is still structurally sound.
fn step(state: DocumentState, history: &mut History, action: Action) -> DocumentState {
    let next = mindpad_editor::reduce(&state, &action, history);
    let violations = next.store.integrity_violations();
    assert!(
        violations.is_empty(),
        "invariants broken after {:?}: {:?}",
        action,
        violations
    );
    next
}

#[test]
fn invariants_hold_across_a_full_editing_session() {
    let mut history = History::new();
    let mut state = DocumentState::new();

    // Build a small map.
    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    state = step(state, &mut history, Action::AddElement); // 2
    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    state = step(state, &mut history, Action::AddElement); // 3
    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    state = step(state, &mut history, Action::AddElement); // 4
    state = step(state, &mut history, Action::SelectElement { id: id("2") });
    state = step(state, &mut history, Action::AddElement); // 5
    state = step(state, &mut history, Action::AddElement); // 6 under 5

    // Edit text and sizes.
    state = step(
        state,
        &mut history,
        Action::UpdateText { id: id("5"), index: 0, value: "topic".into() },
    );
    state = step(
        state,
        &mut history,
        Action::UpdateSectionHeight { id: id("5"), index: 0, height: 48.0 },
    );

    // Shuffle structure around.
    state = step(
        state,
        &mut history,
        Action::DropElement {
            id: id("5"),
            old_parent_id: id("2"),
            new_parent_id: id("4"),
            depth: 3,
        },
    );
    state = step(state, &mut history, Action::SelectElement { id: id("3") });
    state = step(state, &mut history, Action::DeleteElement);

    // Clipboard traffic.
    state = step(state, &mut history, Action::SelectElement { id: id("4") });
    state = step(state, &mut history, Action::CopyElement);
    state = step(state, &mut history, Action::SelectElement { id: id("2") });
    state = step(state, &mut history, Action::PasteElement);
    state = step(state, &mut history, Action::SelectElement { id: id("4") });
    state = step(state, &mut history, Action::CutElement);
    state = step(state, &mut history, Action::SelectElement { id: id("2") });
    state = step(state, &mut history, Action::PasteElement);

    // Collapse, suggestions, undo churn.
    state = step(state, &mut history, Action::CollapseElement);
    state = step(
        state,
        &mut history,
        Action::AddSuggestions {
            parent_id: id("1"),
            suggestions: vec![Suggestion::new("a"), Suggestion::new("b")],
        },
    );
    state = step(state, &mut history, Action::RejectSuggestions);
    state = step(state, &mut history, Action::Undo);
    state = step(state, &mut history, Action::Undo);
    state = step(state, &mut history, Action::Redo);
    state = step(state, &mut history, Action::ExpandElement);

    assert!(state.store.len() > 1);
}

#[test]
fn no_element_becomes_its_own_ancestor_under_drop_pressure() {
    let mut history = History::new();
    let mut state = DocumentState::new();

    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    state = step(state, &mut history, Action::AddElement); // 2
    state = step(state, &mut history, Action::AddElement); // 3 under 2
    state = step(state, &mut history, Action::AddElement); // 4 under 3

    // Every upward drop along the chain must be rejected.
    for (dragged, target) in [("2", "3"), ("2", "4"), ("3", "4")] {
        let before = state.clone();
        state = step(
            state,
            &mut history,
            Action::DropElement {
                id: id(dragged),
                old_parent_id: id("1"),
                new_parent_id: id(target),
                depth: 2,
            },
        );
        assert_eq!(state, before, "drop {} -> {} must not commit", dragged, target);
    }

    // A legal downward drop still works.
    state = step(
        state,
        &mut history,
        Action::DropElement {
            id: id("4"),
            old_parent_id: id("3"),
            new_parent_id: id("2"),
            depth: 3,
        },
    );
    assert_eq!(state.store.get(&id("4")).unwrap().parent_id, Some(id("2")));
}

#[test]
fn layout_is_idempotent_after_arbitrary_edits() {
    let mut history = History::new();
    let mut state = DocumentState::new();

    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    state = step(state, &mut history, Action::AddElement);
    state = step(state, &mut history, Action::AddElement);
    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    state = step(state, &mut history, Action::AddElement);
    state = step(
        state,
        &mut history,
        Action::UpdateSectionHeight { id: id("2"), index: 1, height: 72.0 },
    );

    let before: Vec<(ElementId, f64, f64)> =
        state.store.iter().map(|e| (e.id.clone(), e.x, e.y)).collect();

    let config = state.layout.clone();
    layout(&mut state.store, &config);

    for (element_id, x, y) in before {
        let element = state.store.get(&element_id).unwrap();
        assert_eq!(element.x, x);
        assert_eq!(element.y, y);
    }
}

#[test]
fn transient_moves_skip_history_and_layout() {
    let mut history = History::new();
    let mut state = DocumentState::new();

    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    state = step(state, &mut history, Action::AddElement); // 2
    let snapshots = history.undo_levels();

    let sibling_y = state.store.get(&id("1")).unwrap().y;

    // A burst of pointer moves.
    for i in 0..50 {
        state = step(
            state,
            &mut history,
            Action::MoveElement { id: id("2"), x: 500.0 + f64::from(i), y: 300.0 },
        );
    }

    assert_eq!(history.undo_levels(), snapshots, "moves must not snapshot");
    assert_eq!(state.store.get(&id("2")).unwrap().x, 549.0);
    // Nothing else moved: no layout pass ran.
    assert_eq!(state.store.get(&id("1")).unwrap().y, sibling_y);
    assert!(state.drag.is_some());
}

#[test]
fn delete_recompacts_sibling_order_densely() {
    let mut history = History::new();
    let mut state = DocumentState::new();

    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    for _ in 0..4 {
        state = step(state, &mut history, Action::AddElement);
        state = step(state, &mut history, Action::SelectElement { id: id("1") });
    }

    // Remove the middle sibling ("3").
    state = step(state, &mut history, Action::SelectElement { id: id("3") });
    state = step(state, &mut history, Action::DeleteElement);

    let mut orders: Vec<usize> = state
        .store
        .children_of(&id("1"))
        .iter()
        .map(|c| c.order)
        .collect();
    orders.sort_unstable();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn cut_of_root_is_refused() {
    let mut history = History::new();
    let mut state = DocumentState::new();

    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    let before = state.clone();

    state = step(state, &mut history, Action::CutElement);
    assert_eq!(state, before);
    assert!(state.clipboard.is_none());
    assert!(!history.can_undo());
}

#[test]
fn paste_with_empty_clipboard_is_a_no_op() {
    let mut history = History::new();
    let mut state = DocumentState::new();

    state = step(state, &mut history, Action::SelectElement { id: id("1") });
    let before = state.clone();

    state = step(state, &mut history, Action::PasteElement);
    assert_eq!(state, before);
    assert!(!history.can_undo());
}
