//! Drag-drop reparenting validation.
//!
//! A drop is structurally valid unless it would make an element its own
//! ancestor: dropping onto itself, or onto anything inside its subtree.
//! Checking walks the proposed parent's ancestor chain looking for the
//! dragged element, so the cost is bounded by tree depth.

use mindpad_model::{ElementId, ElementStore};

/// Outcome of checking a proposed drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropCheck {
    Ok,
    Rejected,
}

/// Check whether `dragged` may be reparented under `target_parent`.
pub fn validate_drop(
    store: &ElementStore,
    dragged: &ElementId,
    target_parent: &ElementId,
) -> DropCheck {
    if dragged == target_parent {
        return DropCheck::Rejected;
    }
    if !store.contains(dragged) || !store.contains(target_parent) {
        return DropCheck::Rejected;
    }
    if store.is_ancestor(dragged, target_parent) {
        return DropCheck::Rejected;
    }
    DropCheck::Ok
}
