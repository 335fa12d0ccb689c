//! # Mutation Reducer
//!
//! The single mutation entry point for a document. `reduce` is total: every
//! action either commits (possibly triggering a layout pass and a history
//! snapshot) or leaves the state untouched. Invalid input, such as a
//! selection-requiring action with no selection, deleting the root, a cyclic
//! drop, or pasting an empty clipboard, is a silent no-op reported only as a
//! debug event.
//!
//! Snapshot policy: the pre-mutation store is recorded for `AddElement`,
//! `DeleteElement`, `DropElement`, `CutElement`, `PasteElement`,
//! `UpdateText`, and the suggestion batch actions. `MoveElement` and
//! `UpdateSectionHeight` run at pointer/measure frequency and never
//! snapshot; neither do selection, visibility, marker, or zoom changes.

use crate::actions::{Action, MarkerEnd, Suggestion};
use crate::dnd::{validate_drop, DropCheck};
use crate::history::History;
use crate::state::{Clipboard, DocumentState, DragOrigin, MIN_ZOOM, ZOOM_STEP};
use crate::subtree::{extract_subtree, graft_subtree};
use mindpad_layout::layout;
use mindpad_model::{Element, ElementId, Marker, DEFAULT_SECTION_HEIGHT, SECTION_COUNT};

/// Apply one action to one document's state.
pub fn reduce(state: &DocumentState, action: &Action, history: &mut History) -> DocumentState {
    match action {
        Action::AddElement => add_element(state, history),
        Action::DeleteElement => delete_element(state, history),
        Action::SelectElement { id } => select_element(state, id),
        Action::EndEditing => end_editing(state),
        Action::MoveElement { id, x, y } => move_element(state, id, *x, *y),
        Action::DropElement { id, new_parent_id, .. } => {
            drop_element(state, history, id, new_parent_id)
        }
        Action::CutElement => cut_element(state, history),
        Action::CopyElement => copy_element(state),
        Action::PasteElement => paste_element(state, history),
        Action::ExpandElement => set_subtree_visibility(state, true),
        Action::CollapseElement => set_subtree_visibility(state, false),
        Action::UpdateText { id, index, value } => update_text(state, history, id, *index, value),
        Action::UpdateSectionHeight { id, index, height } => {
            update_section_height(state, id, *index, *height)
        }
        Action::SetMarker { id, end, marker } => set_marker(state, id, *end, *marker),
        Action::AddSuggestions { parent_id, suggestions } => {
            add_suggestions(state, history, parent_id, suggestions)
        }
        Action::ConfirmSuggestions => confirm_suggestions(state, history),
        Action::RejectSuggestions => reject_suggestions(state, history),
        Action::Undo => undo(state, history),
        Action::Redo => redo(state, history),
        Action::ZoomIn => zoom(state, ZOOM_STEP),
        Action::ZoomOut => zoom(state, -ZOOM_STEP),
    }
}

fn run_layout(state: &mut DocumentState) {
    layout(&mut state.store, &state.layout);
}

/// Append a new child under the selection and start editing it.
fn add_element(state: &DocumentState, history: &mut History) -> DocumentState {
    let Some(parent) = state.store.selected().cloned() else {
        tracing::debug!("add ignored: no selection");
        return state.clone();
    };

    history.snapshot(&state.store);
    let mut next = state.clone();

    for element in next.store.iter_mut() {
        element.selected = false;
        element.editing = false;
    }

    let mut child = Element::child_of(next.ids.next_id(), &parent, parent.children);
    child.selected = true;
    child.editing = true;
    child.visible = parent.visible;
    next.store.insert(child);
    next.store.refresh_child_count(&parent.id);

    run_layout(&mut next);
    next
}

/// Remove the selected element and its subtree. The root is undeletable.
fn delete_element(state: &DocumentState, history: &mut History) -> DocumentState {
    let Some(selected) = state.store.selected() else {
        tracing::debug!("delete ignored: no selection");
        return state.clone();
    };
    let Some(parent_id) = selected.parent_id.clone() else {
        tracing::debug!(id = %selected.id, "delete ignored: root element");
        return state.clone();
    };
    let selected_id = selected.id.clone();

    history.snapshot(&state.store);
    let mut next = state.clone();
    remove_subtree(&mut next, &selected_id, &parent_id);
    run_layout(&mut next);
    next
}

/// Drop `id`'s subtree and restore the parent's count and sibling order.
fn remove_subtree(state: &mut DocumentState, id: &ElementId, parent_id: &ElementId) {
    for descendant in state.store.subtree_ids(id) {
        state.store.remove(&descendant);
    }
    state.store.refresh_child_count(parent_id);
    state.store.recompact_children(parent_id);
}

/// Make `id` the single selected element; editing ends everywhere.
fn select_element(state: &DocumentState, id: &ElementId) -> DocumentState {
    if !state.store.contains(id) {
        tracing::debug!(%id, "select ignored: unknown element");
        return state.clone();
    }

    let mut next = state.clone();
    for element in next.store.iter_mut() {
        element.selected = element.id == *id;
        element.editing = false;
    }
    next
}

fn end_editing(state: &DocumentState) -> DocumentState {
    let mut next = state.clone();
    for element in next.store.iter_mut() {
        element.editing = false;
    }
    next
}

/// Transient coordinate write during a drag. The first move of a gesture
/// captures the pre-drag origin so a rejected drop can revert.
fn move_element(state: &DocumentState, id: &ElementId, x: f64, y: f64) -> DocumentState {
    let Some(element) = state.store.get(id) else {
        return state.clone();
    };

    let mut next = state.clone();
    let same_gesture = next.drag.as_ref().map(|d| &d.id) == Some(id);
    if !same_gesture {
        next.drag = Some(DragOrigin {
            id: id.clone(),
            x: element.x,
            y: element.y,
        });
    }

    if let Some(element) = next.store.get_mut(id) {
        element.x = x;
        element.y = y;
    }
    next
}

/// Commit a drag gesture: reparent, fix depths, recompact both sibling
/// groups. A rejected drop reverts the dragged element to where the
/// gesture started and changes nothing else.
fn drop_element(
    state: &DocumentState,
    history: &mut History,
    id: &ElementId,
    new_parent_id: &ElementId,
) -> DocumentState {
    if validate_drop(&state.store, id, new_parent_id) == DropCheck::Rejected {
        tracing::debug!(%id, target = %new_parent_id, "drop rejected");
        let mut next = state.clone();
        if let Some(origin) = next.drag.take() {
            if origin.id == *id {
                if let Some(element) = next.store.get_mut(id) {
                    element.x = origin.x;
                    element.y = origin.y;
                }
            } else {
                next.drag = Some(origin);
            }
        }
        return next;
    }

    let old_parent_id = state.store.get(id).and_then(|e| e.parent_id.clone());
    // The validator guaranteed the new parent exists.
    let (new_parent_children, new_depth) = match state.store.get(new_parent_id) {
        Some(parent) => (parent.children, parent.depth + 1),
        None => return state.clone(),
    };

    history.snapshot(&state.store);
    let mut next = state.clone();

    if next.drag.as_ref().map(|d| &d.id) == Some(id) {
        next.drag = None;
    }

    if let Some(element) = next.store.get_mut(id) {
        element.parent_id = Some(new_parent_id.clone());
        // Past the last sibling; recompacted to dense below.
        element.order = new_parent_children;
    }
    next.store.fix_depths(id, new_depth);

    if let Some(old_parent_id) = &old_parent_id {
        next.store.refresh_child_count(old_parent_id);
        next.store.recompact_children(old_parent_id);
    }
    next.store.refresh_child_count(new_parent_id);
    next.store.recompact_children(new_parent_id);

    run_layout(&mut next);
    next
}

/// Extract the selected subtree to the clipboard and delete it from the
/// store. Like delete, cut refuses the root.
fn cut_element(state: &DocumentState, history: &mut History) -> DocumentState {
    let Some(selected) = state.store.selected() else {
        tracing::debug!("cut ignored: no selection");
        return state.clone();
    };
    let Some(parent_id) = selected.parent_id.clone() else {
        tracing::debug!(id = %selected.id, "cut ignored: root element");
        return state.clone();
    };
    let selected_id = selected.id.clone();
    let Some(detached) = extract_subtree(&state.store, &selected_id) else {
        return state.clone();
    };

    history.snapshot(&state.store);
    let mut next = state.clone();
    next.clipboard = Some(Clipboard {
        root_id: selected_id.clone(),
        elements: detached,
    });
    remove_subtree(&mut next, &selected_id, &parent_id);
    run_layout(&mut next);
    next
}

/// Extract the selected subtree to the clipboard. The store is untouched,
/// so no snapshot is taken.
fn copy_element(state: &DocumentState) -> DocumentState {
    let Some(selected_id) = state.store.selected_id() else {
        tracing::debug!("copy ignored: no selection");
        return state.clone();
    };
    let Some(detached) = extract_subtree(&state.store, &selected_id) else {
        return state.clone();
    };

    let mut next = state.clone();
    next.clipboard = Some(Clipboard {
        root_id: selected_id,
        elements: detached,
    });
    next
}

/// Graft the clipboard under the selection with fresh ids.
fn paste_element(state: &DocumentState, history: &mut History) -> DocumentState {
    let Some(target_id) = state.store.selected_id() else {
        tracing::debug!("paste ignored: no selection");
        return state.clone();
    };
    let Some(clipboard) = state.clipboard.clone() else {
        tracing::debug!("paste ignored: empty clipboard");
        return state.clone();
    };
    if clipboard.elements.is_empty() || !clipboard.elements.contains(&clipboard.root_id) {
        tracing::debug!("paste ignored: clipboard has no root");
        return state.clone();
    }

    history.snapshot(&state.store);
    let mut next = state.clone();
    if graft_subtree(
        &mut next.store,
        &clipboard.elements,
        &clipboard.root_id,
        &target_id,
        &mut next.ids,
    )
    .is_none()
    {
        return state.clone();
    }

    run_layout(&mut next);
    next
}

/// Expand or collapse the selection: rewrite `visible` on every descendant
/// (the selected element itself stays visible).
fn set_subtree_visibility(state: &DocumentState, visible: bool) -> DocumentState {
    let Some(selected_id) = state.store.selected_id() else {
        tracing::debug!("visibility change ignored: no selection");
        return state.clone();
    };

    let mut next = state.clone();
    next.store.set_descendants_visible(&selected_id, visible);
    run_layout(&mut next);
    next
}

/// Replace one text section. Editing state is left alone; it ends with an
/// explicit `EndEditing` or the next selection change.
fn update_text(
    state: &DocumentState,
    history: &mut History,
    id: &ElementId,
    index: usize,
    value: &str,
) -> DocumentState {
    match state.store.get(id) {
        Some(element) if index < element.texts.len() => {}
        _ => {
            tracing::debug!(%id, index, "text update ignored");
            return state.clone();
        }
    }

    history.snapshot(&state.store);
    let mut next = state.clone();
    if let Some(element) = next.store.get_mut(id) {
        element.texts[index] = value.to_string();
    }
    next
}

/// Write one measured section height and reflow. Runs continuously while
/// the host measures text, so it never snapshots.
fn update_section_height(
    state: &DocumentState,
    id: &ElementId,
    index: usize,
    height: f64,
) -> DocumentState {
    match state.store.get(id) {
        Some(element) if index < element.section_heights.len() && height >= 0.0 => {}
        _ => {
            tracing::debug!(%id, index, "section height update ignored");
            return state.clone();
        }
    }

    let mut next = state.clone();
    if let Some(element) = next.store.get_mut(id) {
        element.section_heights[index] = height;
    }
    run_layout(&mut next);
    next
}

fn set_marker(state: &DocumentState, id: &ElementId, end: MarkerEnd, marker: Marker) -> DocumentState {
    if !state.store.contains(id) {
        tracing::debug!(%id, "marker change ignored: unknown element");
        return state.clone();
    }

    let mut next = state.clone();
    if let Some(element) = next.store.get_mut(id) {
        match end {
            MarkerEnd::Start => element.start_marker = marker,
            MarkerEnd::End => element.end_marker = marker,
        }
    }
    next
}

/// Insert a batch of tentative children in one atomic step: one snapshot,
/// one layout pass, however many suggestions arrived.
fn add_suggestions(
    state: &DocumentState,
    history: &mut History,
    parent_id: &ElementId,
    suggestions: &[Suggestion],
) -> DocumentState {
    let Some(parent) = state.store.get(parent_id).cloned() else {
        tracing::debug!(%parent_id, "suggestions ignored: unknown parent");
        return state.clone();
    };
    if suggestions.is_empty() {
        return state.clone();
    }

    history.snapshot(&state.store);
    let mut next = state.clone();

    for (offset, suggestion) in suggestions.iter().enumerate() {
        let mut child = Element::child_of(next.ids.next_id(), &parent, parent.children + offset);
        let mut texts = suggestion.texts.clone();
        if texts.len() < SECTION_COUNT {
            texts.resize(SECTION_COUNT, String::new());
        }
        child.section_heights.resize(texts.len(), DEFAULT_SECTION_HEIGHT);
        child.texts = texts;
        child.tentative = true;
        child.visible = parent.visible;
        next.store.insert(child);
    }
    next.store.refresh_child_count(parent_id);

    run_layout(&mut next);
    next
}

/// Accept every tentative element as a permanent part of the document.
fn confirm_suggestions(state: &DocumentState, history: &mut History) -> DocumentState {
    if !state.store.iter().any(|e| e.tentative) {
        tracing::debug!("confirm ignored: nothing tentative");
        return state.clone();
    }

    history.snapshot(&state.store);
    let mut next = state.clone();
    for element in next.store.iter_mut() {
        element.tentative = false;
    }
    next
}

/// Discard every tentative element (and anything beneath it).
fn reject_suggestions(state: &DocumentState, history: &mut History) -> DocumentState {
    let tentative_ids: Vec<ElementId> = state
        .store
        .iter()
        .filter(|e| e.tentative)
        .map(|e| e.id.clone())
        .collect();
    if tentative_ids.is_empty() {
        tracing::debug!("reject ignored: nothing tentative");
        return state.clone();
    }

    history.snapshot(&state.store);
    let mut next = state.clone();
    for id in &tentative_ids {
        // Earlier removals may have taken this one out already.
        if next.store.contains(id) {
            for descendant in next.store.subtree_ids(id) {
                next.store.remove(&descendant);
            }
        }
    }
    next.store.normalize();
    run_layout(&mut next);
    next
}

fn undo(state: &DocumentState, history: &mut History) -> DocumentState {
    let Some(restored) = history.undo(&state.store) else {
        tracing::debug!("undo ignored: at oldest entry");
        return state.clone();
    };

    let mut next = state.clone();
    next.store = restored;
    next.drag = None;
    next
}

fn redo(state: &DocumentState, history: &mut History) -> DocumentState {
    let Some(restored) = history.redo(&state.store) else {
        tracing::debug!("redo ignored: at newest entry");
        return state.clone();
    };

    let mut next = state.clone();
    next.store = restored;
    next.drag = None;
    next
}

fn zoom(state: &DocumentState, delta: f64) -> DocumentState {
    let mut next = state.clone();
    next.zoom = (next.zoom + delta).max(MIN_ZOOM);
    next
}
