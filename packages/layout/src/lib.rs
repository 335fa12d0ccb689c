//! Tree layout for mindpad documents.
//!
//! [`layout`] recomputes every element's geometry from tree structure alone,
//! so running it twice without a structural change moves nothing.
//!
//! Placement rules:
//!
//! - X: a root sits at the configured origin; a child sits one horizontal
//!   gap from its parent, on the side its `direction` selects. Offsets
//!   accumulate, so depth-k elements end up k-1 gaps out.
//! - Y: a running cursor walks each root's subtree depth-first. An element
//!   with no visible children is placed at the cursor, which then advances
//!   by the element's height plus the vertical gap. An element with visible
//!   children is centered on the span of its first and last child, computed
//!   after the children are placed. Collapsed subtrees take no space.

use mindpad_model::{ElementId, ElementStore};
use serde::{Deserialize, Serialize};

/// Geometry constants for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// X of every root element.
    pub root_x: f64,
    /// Y where the first placed element starts.
    pub root_y: f64,
    /// Horizontal distance between a parent and its children.
    pub horizontal_gap: f64,
    /// Vertical distance between stacked elements.
    pub vertical_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root_x: 400.0,
            root_y: 60.0,
            horizontal_gap: 220.0,
            vertical_gap: 16.0,
        }
    }
}

/// Recompute every element's position from the tree structure.
pub fn layout(store: &mut ElementStore, config: &LayoutConfig) {
    // Heights first: the vertical pass reads them.
    for element in store.iter_mut() {
        element.height = element.section_span();
    }

    for root_id in store.root_ids() {
        let mut cursor = config.root_y;
        place_subtree(store, &root_id, config.root_x, &mut cursor, config);
    }
}

/// Position `id` and its visible descendants. Returns the vertical span
/// `(top, bottom)` the subtree occupies, or `None` if `id` is missing.
fn place_subtree(
    store: &mut ElementStore,
    id: &ElementId,
    x: f64,
    cursor: &mut f64,
    config: &LayoutConfig,
) -> Option<(f64, f64)> {
    let visible_children: Vec<ElementId> = store
        .children_of(id)
        .into_iter()
        .filter(|child| child.visible)
        .map(|child| child.id.clone())
        .collect();

    if visible_children.is_empty() {
        let element = store.get_mut(id)?;
        element.x = x;
        element.y = *cursor;
        let span = (element.y, element.y + element.height);
        *cursor += element.height + config.vertical_gap;
        return Some(span);
    }

    let mut span: Option<(f64, f64)> = None;
    for child_id in &visible_children {
        let sign = store.get(child_id).map(|c| c.direction.sign()).unwrap_or(1.0);
        let child_x = x + sign * config.horizontal_gap;
        if let Some((top, bottom)) = place_subtree(store, child_id, child_x, cursor, config) {
            span = Some(match span {
                Some((first_top, _)) => (first_top, bottom),
                None => (top, bottom),
            });
        }
    }

    let element = store.get_mut(id)?;
    element.x = x;
    match span {
        Some((top, bottom)) => {
            // Centered on the children's combined span.
            element.y = (top + bottom) / 2.0 - element.height / 2.0;
            Some((element.y.min(top), element.y.max(bottom)))
        }
        None => {
            element.y = *cursor;
            let own = (element.y, element.y + element.height);
            *cursor += element.height + config.vertical_gap;
            Some(own)
        }
    }
}
