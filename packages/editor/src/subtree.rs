//! Subtree extraction and grafting, the engine behind cut/copy/paste.

use mindpad_model::{ElementId, ElementStore, IdGenerator};
use std::collections::HashMap;

/// Copy `root_id` and every descendant into a standalone store.
///
/// The copied root has its `parent_id` nulled and its order zeroed; the
/// copies carry no selection or editing state. Returns `None` when
/// `root_id` is not in the store.
pub fn extract_subtree(store: &ElementStore, root_id: &ElementId) -> Option<ElementStore> {
    if !store.contains(root_id) {
        return None;
    }

    let mut detached = ElementStore::new();
    for id in store.subtree_ids(root_id) {
        let mut copy = store.get(&id)?.clone();
        copy.selected = false;
        copy.editing = false;
        detached.insert(copy);
    }

    let root = detached.get_mut(root_id)?;
    root.parent_id = None;
    root.order = 0;
    Some(detached)
}

/// Graft a detached subtree under `target_id`, re-identified.
///
/// Every element in `detached` gets a fresh id; internal parent references
/// are rewritten through the translation table; depths are rebased so the
/// grafted root lands at `target.depth + 1`. The target's cached child
/// count is bumped. Returns the grafted root's new id, or `None` when the
/// target or the detached root is missing (the store is untouched then).
pub fn graft_subtree(
    store: &mut ElementStore,
    detached: &ElementStore,
    detached_root: &ElementId,
    target_id: &ElementId,
    ids: &mut IdGenerator,
) -> Option<ElementId> {
    let target = store.get(target_id)?;
    let target_depth = target.depth;
    let insert_order = target.children;

    let original_root = detached.get(detached_root)?;
    let depth_delta = i64::from(target_depth) + 1 - i64::from(original_root.depth);

    let mut table: HashMap<ElementId, ElementId> = HashMap::new();
    for id in detached.ids() {
        table.insert(id.clone(), ids.next_id());
    }

    for element in detached.iter() {
        let mut copy = element.clone();
        copy.id = table[&element.id].clone();
        copy.parent_id = element.parent_id.as_ref().map(|p| table[p].clone());
        copy.depth = (i64::from(element.depth) + depth_delta) as u32;
        copy.selected = false;
        copy.editing = false;
        store.insert(copy);
    }

    let new_root_id = table[detached_root].clone();
    if let Some(root) = store.get_mut(&new_root_id) {
        root.parent_id = Some(target_id.clone());
        root.order = insert_order;
    }
    if let Some(target) = store.get_mut(target_id) {
        target.children += 1;
    }

    Some(new_root_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindpad_model::Element;

    /// Root "1" with child "2", which has child "3".
    fn sample_store() -> ElementStore {
        let mut store = ElementStore::new();
        let mut root = Element::root(ElementId::from("1"));
        root.children = 1;
        let mut a = Element::child_of(ElementId::from("2"), &root, 0);
        a.children = 1;
        a.texts[0] = "a".to_string();
        let b = Element::child_of(ElementId::from("3"), &a, 0);
        store.insert(root);
        store.insert(a);
        store.insert(b);
        store
    }

    #[test]
    fn test_extract_includes_descendants_and_nulls_root_parent() {
        let store = sample_store();
        let detached = extract_subtree(&store, &ElementId::from("2")).unwrap();

        assert_eq!(detached.len(), 2);
        assert!(detached.get(&ElementId::from("2")).unwrap().parent_id.is_none());
        assert_eq!(
            detached.get(&ElementId::from("3")).unwrap().parent_id,
            Some(ElementId::from("2"))
        );
        // Source store untouched.
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_extract_missing_root_is_none() {
        let store = sample_store();
        assert!(extract_subtree(&store, &ElementId::from("99")).is_none());
    }

    #[test]
    fn test_graft_rewrites_ids_and_depths() {
        let mut store = sample_store();
        let detached = extract_subtree(&store, &ElementId::from("2")).unwrap();
        let mut ids = IdGenerator::new();
        for id in store.ids() {
            ids.reserve(id);
        }

        // Paste under "3": original depths 2/3 must become 4/5.
        let new_root = graft_subtree(
            &mut store,
            &detached,
            &ElementId::from("2"),
            &ElementId::from("3"),
            &mut ids,
        )
        .unwrap();

        assert_eq!(store.len(), 5);
        assert!(!detached.ids().any(|id| id == &new_root));

        let grafted_root = store.get(&new_root).unwrap();
        assert_eq!(grafted_root.parent_id, Some(ElementId::from("3")));
        assert_eq!(grafted_root.depth, 4);
        assert_eq!(grafted_root.texts[0], "a");

        let grafted_child = store
            .iter()
            .find(|e| e.parent_id.as_ref() == Some(&new_root))
            .unwrap();
        assert_eq!(grafted_child.depth, 5);

        assert_eq!(store.get(&ElementId::from("3")).unwrap().children, 1);
        assert!(store.integrity_violations().is_empty());
    }

    #[test]
    fn test_graft_twice_from_same_clipboard() {
        let mut store = sample_store();
        let detached = extract_subtree(&store, &ElementId::from("3")).unwrap();
        let mut ids = IdGenerator::new();
        for id in store.ids() {
            ids.reserve(id);
        }

        let first = graft_subtree(&mut store, &detached, &ElementId::from("3"), &ElementId::from("1"), &mut ids).unwrap();
        let second = graft_subtree(&mut store, &detached, &ElementId::from("3"), &ElementId::from("1"), &mut ids).unwrap();

        assert_ne!(first, second);
        assert_eq!(store.get(&ElementId::from("1")).unwrap().children, 3);
        assert!(store.integrity_violations().is_empty());
    }
}
