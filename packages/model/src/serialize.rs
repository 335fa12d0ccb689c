//! Loading and saving persisted documents.
//!
//! The on-disk form is a JSON array (or, for older exports, an id-keyed map)
//! of element records. Two generations of records exist:
//!
//! - modern records carry `texts` and `sectionHeights`
//! - legacy records carry flat `text` / `text2` / `text3` fields and no
//!   heights at all
//!
//! Loading upgrades legacy records in place, defaulting missing heights to
//! the stock section height. A record that fails to deserialize, or whose
//! `parentId` cannot be resolved, is dropped (with a warning) rather than
//! failing the whole load; counts, orders, and depths are rebuilt afterwards
//! so the store is consistent no matter what the file contained.

use crate::element::{Direction, Element, Marker, DEFAULT_SECTION_HEIGHT, DEFAULT_WIDTH, SECTION_COUNT};
use crate::error::PersistError;
use crate::id::ElementId;
use crate::store::ElementStore;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// One element record as it appears on disk, both generations.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedElement {
    id: ElementId,
    #[serde(default)]
    parent_id: Option<ElementId>,
    #[serde(default)]
    order: usize,
    #[serde(default)]
    texts: Option<Vec<String>>,
    #[serde(default)]
    section_heights: Option<Vec<f64>>,
    // Legacy flat text scheme.
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    text2: Option<String>,
    #[serde(default)]
    text3: Option<String>,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_true")]
    visible: bool,
    #[serde(default)]
    tentative: bool,
    #[serde(default)]
    start_marker: Marker,
    #[serde(default)]
    end_marker: Marker,
    #[serde(default)]
    direction: Direction,
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_true() -> bool {
    true
}

impl PersistedElement {
    /// Upgrade to a live element. Legacy text fields become `texts`;
    /// heights are padded to one per section. Editing/selection state is
    /// never persisted, so both start cleared.
    fn into_element(self) -> Element {
        let mut texts = match self.texts {
            Some(texts) if !texts.is_empty() => texts,
            _ => vec![
                self.text.unwrap_or_default(),
                self.text2.unwrap_or_default(),
                self.text3.unwrap_or_default(),
            ],
        };
        if texts.len() < SECTION_COUNT {
            texts.resize(SECTION_COUNT, String::new());
        }

        // One height per section, whatever the record carried.
        let mut section_heights = self.section_heights.unwrap_or_default();
        section_heights.resize(texts.len(), DEFAULT_SECTION_HEIGHT);

        let height = section_heights.iter().sum();

        Element {
            id: self.id,
            parent_id: self.parent_id,
            order: self.order,
            depth: 1, // rebuilt by normalize()
            children: 0,
            texts,
            section_heights,
            x: self.x,
            y: self.y,
            width: self.width,
            height,
            editing: false,
            selected: false,
            visible: self.visible,
            tentative: self.tentative,
            start_marker: self.start_marker,
            end_marker: self.end_marker,
            direction: self.direction,
        }
    }
}

/// Parse a persisted document into a consistent [`ElementStore`].
pub fn load_document(json: &str) -> Result<ElementStore, PersistError> {
    let value: Value = serde_json::from_str(json)?;

    let records: Vec<Value> = match value {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        _ => return Err(PersistError::UnsupportedShape),
    };

    let mut elements = Vec::new();
    for record in records {
        match serde_json::from_value::<PersistedElement>(record) {
            Ok(persisted) => elements.push(persisted.into_element()),
            Err(error) => {
                tracing::warn!(%error, "dropping malformed element record");
            }
        }
    }

    // Drop records whose parent chain leads out of the document. Removing an
    // element can orphan its children, so iterate to a fixpoint.
    let mut ids: HashSet<ElementId> = elements.iter().map(|e| e.id.clone()).collect();
    loop {
        let before = elements.len();
        elements.retain(|e| match &e.parent_id {
            Some(parent_id) => {
                let keep = ids.contains(parent_id);
                if !keep {
                    tracing::warn!(id = %e.id, parent = %parent_id, "dropping element with dangling parent");
                }
                keep
            }
            None => true,
        });
        if elements.len() == before {
            break;
        }
        ids = elements.iter().map(|e| e.id.clone()).collect();
    }

    let mut store = ElementStore::new();
    for element in elements {
        store.insert(element);
    }

    // A corrupted file can also contain parent cycles. Those clusters hang
    // off no root, so anything unreachable from a root gets dropped too.
    let mut reachable: HashSet<ElementId> = HashSet::new();
    for root in store.root_ids() {
        reachable.extend(store.subtree_ids(&root));
    }
    let unreachable: Vec<ElementId> = store
        .ids()
        .filter(|id| !reachable.contains(*id))
        .cloned()
        .collect();
    for id in unreachable {
        tracing::warn!(%id, "dropping element outside any root's tree");
        store.remove(&id);
    }

    store.normalize();
    Ok(store)
}

/// Read and parse a document file.
pub fn load_document_file(path: impl AsRef<Path>) -> Result<ElementStore, PersistError> {
    let json = std::fs::read_to_string(path)?;
    load_document(&json)
}

/// Serialize a store to the array form, ordered by id for stable output.
pub fn save_document(store: &ElementStore) -> Result<String, PersistError> {
    let mut elements: Vec<&Element> = store.iter().collect();
    elements.sort_by(|a, b| match (a.id.as_str().parse::<u64>(), b.id.as_str().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => std::cmp::Ordering::Less,
        (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
        (Err(_), Err(_)) => a.id.as_str().cmp(b.id.as_str()),
    });
    Ok(serde_json::to_string_pretty(&elements)?)
}

/// Serialize and write a document file.
pub fn save_document_file(store: &ElementStore, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let json = save_document(store)?;
    std::fs::write(path, json)?;
    Ok(())
}
