use crate::element::Element;
use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Normalized element storage: one flat id-keyed map.
///
/// All tree structure is expressed through `parent_id` references, so the
/// store itself never forms ownership cycles. The query helpers sort by
/// `order` where sibling position matters, and the fix-up helpers restore the
/// structural invariants (dense sibling order, cached child counts, depth
/// chain) after structural edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementStore {
    elements: HashMap<ElementId, Element>,
}

impl ElementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Insert an element keyed by its own id, replacing any previous record.
    pub fn insert(&mut self, element: Element) {
        self.elements.insert(element.id.clone(), element);
    }

    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        self.elements.remove(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.values_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ElementId> {
        self.elements.keys()
    }

    /// Root ids, sorted for deterministic traversal order.
    pub fn root_ids(&self) -> Vec<ElementId> {
        let mut roots: Vec<ElementId> = self
            .elements
            .values()
            .filter(|e| e.is_root())
            .map(|e| e.id.clone())
            .collect();
        roots.sort_by(|a, b| numeric_then_lexical(a, b));
        roots
    }

    /// Children of `id`, sorted by sibling order.
    pub fn children_of(&self, id: &ElementId) -> Vec<&Element> {
        let mut children: Vec<&Element> = self
            .elements
            .values()
            .filter(|e| e.parent_id.as_ref() == Some(id))
            .collect();
        children.sort_by_key(|e| e.order);
        children
    }

    /// Child ids of `id`, sorted by sibling order.
    pub fn child_ids_of(&self, id: &ElementId) -> Vec<ElementId> {
        self.children_of(id).into_iter().map(|e| e.id.clone()).collect()
    }

    /// Number of elements whose `parent_id` is `id`, counted live.
    pub fn live_child_count(&self, id: &ElementId) -> usize {
        self.elements
            .values()
            .filter(|e| e.parent_id.as_ref() == Some(id))
            .count()
    }

    /// `id` plus every descendant, in depth-first order.
    pub fn subtree_ids(&self, id: &ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if self.contains(id) {
            self.collect_subtree(id, &mut out);
        }
        out
    }

    fn collect_subtree(&self, id: &ElementId, out: &mut Vec<ElementId>) {
        out.push(id.clone());
        for child in self.child_ids_of(id) {
            self.collect_subtree(&child, out);
        }
    }

    /// The selected element, if any.
    pub fn selected(&self) -> Option<&Element> {
        self.elements.values().find(|e| e.selected)
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected().map(|e| e.id.clone())
    }

    /// Walk `id`'s parent chain looking for `ancestor`. The walk is capped at
    /// the store size so a corrupted chain cannot loop forever.
    pub fn is_ancestor(&self, ancestor: &ElementId, id: &ElementId) -> bool {
        let mut hops = self.len();
        let mut current = self.get(id).and_then(|e| e.parent_id.clone());
        while let Some(parent) = current {
            if &parent == ancestor {
                return true;
            }
            if hops == 0 {
                return false;
            }
            hops -= 1;
            current = self.get(&parent).and_then(|e| e.parent_id.clone());
        }
        false
    }

    /// Renumber the children of `parent_id` to a dense `0..n-1`, preserving
    /// their relative order.
    pub fn recompact_children(&mut self, parent_id: &ElementId) {
        let ordered = self.child_ids_of(parent_id);
        for (index, child_id) in ordered.iter().enumerate() {
            if let Some(child) = self.get_mut(child_id) {
                child.order = index;
            }
        }
    }

    /// Refresh the cached child count of `id` from the live store.
    pub fn refresh_child_count(&mut self, id: &ElementId) {
        let count = self.live_child_count(id);
        if let Some(element) = self.get_mut(id) {
            element.children = count;
        }
    }

    /// Set `id`'s depth and rewrite every descendant to match.
    pub fn fix_depths(&mut self, id: &ElementId, depth: u32) {
        if let Some(element) = self.get_mut(id) {
            element.depth = depth;
        } else {
            return;
        }
        for child in self.child_ids_of(id) {
            self.fix_depths(&child, depth + 1);
        }
    }

    /// Set `visible` on every descendant of `id` (not `id` itself).
    pub fn set_descendants_visible(&mut self, id: &ElementId, visible: bool) {
        for child in self.child_ids_of(id) {
            if let Some(element) = self.get_mut(&child) {
                element.visible = visible;
            }
            self.set_descendants_visible(&child, visible);
        }
    }

    /// Rebuild child counts, sibling orders, and depths from the parent
    /// links. Used after loading a persisted document, where none of the
    /// cached fields can be trusted.
    pub fn normalize(&mut self) {
        let ids: Vec<ElementId> = self.elements.keys().cloned().collect();
        for id in &ids {
            self.refresh_child_count(id);
            self.recompact_children(id);
        }
        for root in self.root_ids() {
            self.fix_depths(&root, 1);
        }
    }

    /// Structural audit: returns a description of every violated invariant.
    /// Used by tests and debug assertions; an empty result means the store is
    /// consistent.
    pub fn integrity_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();

        for element in self.elements.values() {
            // Parent links resolve and never cycle back.
            if let Some(parent_id) = &element.parent_id {
                if !self.contains(parent_id) {
                    violations.push(format!("{}: dangling parent {}", element.id, parent_id));
                    continue;
                }
                if self.is_ancestor(&element.id, &element.id) {
                    violations.push(format!("{}: cyclic parent chain", element.id));
                    continue;
                }
                let parent_depth = self.get(parent_id).map(|p| p.depth).unwrap_or(0);
                if element.depth != parent_depth + 1 {
                    violations.push(format!(
                        "{}: depth {} but parent depth {}",
                        element.id, element.depth, parent_depth
                    ));
                }
            } else if element.depth != 1 {
                violations.push(format!("{}: root depth {}", element.id, element.depth));
            }

            // Cached child count matches the live count.
            let live = self.live_child_count(&element.id);
            if element.children != live {
                violations.push(format!(
                    "{}: cached children {} but live count {}",
                    element.id, element.children, live
                ));
            }

            // Sibling orders form a dense 0..n-1.
            let mut orders: Vec<usize> =
                self.children_of(&element.id).iter().map(|c| c.order).collect();
            orders.sort_unstable();
            if orders.iter().enumerate().any(|(i, o)| i != *o) {
                violations.push(format!("{}: sibling orders {:?} not dense", element.id, orders));
            }
        }

        violations
    }
}

fn numeric_then_lexical(a: &ElementId, b: &ElementId) -> std::cmp::Ordering {
    match (a.as_str().parse::<u64>(), b.as_str().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.as_str().cmp(b.as_str()),
    }
}
