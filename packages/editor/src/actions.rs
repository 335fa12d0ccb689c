//! # Editor Actions
//!
//! The closed set of operations the reducer understands. Actions arrive from
//! the UI layer as values, or as tagged JSON over the host bridge, and are
//! handled by an exhaustive match, so adding a variant without handling it is
//! a compile error rather than a runtime fallthrough.

use mindpad_model::{ElementId, Marker};
use serde::{Deserialize, Serialize};

/// Which connector decoration `SetMarker` addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerEnd {
    Start,
    End,
}

/// One AI-proposed element awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub texts: Vec<String>,
}

impl Suggestion {
    pub fn new(text: impl Into<String>) -> Self {
        Self { texts: vec![text.into()] }
    }
}

/// Editor actions with their payloads.
///
/// Contracts the reducer enforces (invalid input is a silent no-op):
///
/// - `AddElement`, `DeleteElement`, `CutElement`, `CopyElement`,
///   `PasteElement`, `ExpandElement`, `CollapseElement` operate on the
///   current selection.
/// - `DeleteElement` and `CutElement` refuse the root.
/// - `MoveElement` is the pointer-drag hot path: a raw coordinate write with
///   no layout pass and no history snapshot.
/// - `DropElement` commits a drag. `depth` is the drop preview the UI
///   computed; the new parent link is authoritative.
/// - `AddSuggestions` inserts a whole batch atomically: one snapshot, one
///   layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Append a new child under the selected element and start editing it.
    AddElement,

    /// Remove the selected element and its subtree.
    DeleteElement,

    /// Make `id` the single selected element.
    SelectElement { id: ElementId },

    /// Clear the editing flag everywhere.
    EndEditing,

    /// Transient coordinate write during a drag gesture.
    MoveElement { id: ElementId, x: f64, y: f64 },

    /// Commit a drag gesture onto a new parent.
    DropElement {
        id: ElementId,
        old_parent_id: ElementId,
        new_parent_id: ElementId,
        depth: u32,
    },

    /// Extract the selected subtree to the clipboard and delete it.
    CutElement,

    /// Extract the selected subtree to the clipboard.
    CopyElement,

    /// Graft the clipboard subtree under the selected element, with fresh ids.
    PasteElement,

    /// Reveal every descendant of the selected element.
    ExpandElement,

    /// Hide every descendant of the selected element.
    CollapseElement,

    /// Replace one text section.
    UpdateText { id: ElementId, index: usize, value: String },

    /// Replace one measured section height.
    UpdateSectionHeight { id: ElementId, index: usize, height: f64 },

    /// Set a connector decoration.
    SetMarker {
        id: ElementId,
        end: MarkerEnd,
        marker: Marker,
    },

    /// Insert a batch of tentative AI-suggested children under `parent_id`.
    AddSuggestions {
        parent_id: ElementId,
        suggestions: Vec<Suggestion>,
    },

    /// Keep every tentative element.
    ConfirmSuggestions,

    /// Delete every tentative element.
    RejectSuggestions,

    Undo,
    Redo,

    ZoomIn,
    ZoomOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trips_as_tagged_json() {
        let action = Action::UpdateText {
            id: ElementId::from("7"),
            index: 1,
            value: "hello".to_string(),
        };

        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"type\":\"UpdateText\""));

        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }

    #[test]
    fn test_unit_variant_serializes_with_tag_only() {
        let json = serde_json::to_string(&Action::Undo).unwrap();
        assert_eq!(json, "{\"type\":\"Undo\"}");
    }
}
