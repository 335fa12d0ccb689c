//! Per-document editing state.
//!
//! Everything the reducer reads and writes lives here: the element store,
//! the zoom ratio, the detached clipboard, transient drag bookkeeping, and
//! the id generator. History snapshots cover only the element store; the
//! rest is either derived or deliberately outside undo (clipboard, drag).

use mindpad_layout::LayoutConfig;
use mindpad_model::{Element, ElementId, ElementStore, IdGenerator};

/// Smallest allowed zoom ratio.
pub const MIN_ZOOM: f64 = 0.1;

/// Amount one zoom action changes the ratio by.
pub const ZOOM_STEP: f64 = 0.1;

/// Subtree detached from the live store by cut/copy.
///
/// The elements keep their internal structure (parent links, orders,
/// depths) but the root's `parent_id` is `None`. Paste re-ids everything,
/// so one clipboard can be pasted any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Clipboard {
    pub root_id: ElementId,
    pub elements: ElementStore,
}

/// Where a dragged element started. Captured by the first `MoveElement` of
/// a gesture, consumed by `DropElement`; never snapshotted.
#[derive(Debug, Clone, PartialEq)]
pub struct DragOrigin {
    pub id: ElementId,
    pub x: f64,
    pub y: f64,
}

/// Complete mutable state of one open document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState {
    pub store: ElementStore,
    pub zoom: f64,
    pub clipboard: Option<Clipboard>,
    pub drag: Option<DragOrigin>,
    pub layout: LayoutConfig,
    pub ids: IdGenerator,
}

impl DocumentState {
    /// Fresh single-root document. The root gets id `"1"`.
    pub fn new() -> Self {
        let mut ids = IdGenerator::new();
        let mut store = ElementStore::new();
        store.insert(Element::root(ids.next_id()));

        Self {
            store,
            zoom: 1.0,
            clipboard: None,
            drag: None,
            layout: LayoutConfig::default(),
            ids,
        }
    }

    /// Wrap a loaded store, advancing the id generator past every id the
    /// document already uses.
    pub fn from_store(store: ElementStore) -> Self {
        let mut ids = IdGenerator::new();
        for id in store.ids() {
            ids.reserve(id);
        }

        Self {
            store,
            zoom: 1.0,
            clipboard: None,
            drag: None,
            layout: LayoutConfig::default(),
            ids,
        }
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_single_root() {
        let state = DocumentState::new();
        assert_eq!(state.store.len(), 1);
        let root = state.store.get(&ElementId::from("1")).unwrap();
        assert!(root.is_root());
        assert_eq!(state.zoom, 1.0);
    }

    #[test]
    fn test_from_store_reserves_ids() {
        let mut store = ElementStore::new();
        let root = Element::root(ElementId::from("5"));
        store.insert(root);

        let mut state = DocumentState::from_store(store);
        assert_eq!(state.ids.next_id().as_str(), "6");
    }
}
