//! # Mindpad Editor
//!
//! Mutation engine for mindpad documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI layer (external): pointer + key events   │
//! └─────────────────────────────────────────────┘
//!                     ↓ Action
//! ┌─────────────────────────────────────────────┐
//! │ editor: reduce(state, action, history)      │
//! │  - validate, mutate the element store       │
//! │  - subtree cut/copy/paste, drop validation  │
//! │  - snapshot undoable changes                │
//! └─────────────────────────────────────────────┘
//!                     ↓ structural change
//! ┌─────────────────────────────────────────────┐
//! │ layout: recompute every element's geometry  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The store is the source of truth**: rendering is a derived view
//! 2. **Total reducer**: invalid actions are silent no-ops, never errors
//! 3. **Per-session history**: each open document owns its undo stacks
//! 4. **Hot path stays cheap**: pointer-drag moves skip layout and history
//!
//! ## Usage
//!
//! ```rust
//! use mindpad_editor::{Action, EditSession, ElementId};
//! use mindpad_model::document_id_for_path;
//!
//! let mut session = EditSession::new(document_id_for_path("/maps/plan.json"));
//!
//! session.dispatch(Action::SelectElement { id: ElementId::from("1") });
//! session.dispatch(Action::AddElement);
//! session.dispatch(Action::Undo);
//!
//! assert_eq!(session.elements().len(), 1);
//! ```

mod actions;
mod dnd;
mod errors;
mod history;
mod reducer;
mod session;
mod state;
mod subtree;

pub use actions::{Action, MarkerEnd, Suggestion};
pub use dnd::{validate_drop, DropCheck};
pub use errors::EditorError;
pub use history::History;
pub use reducer::reduce;
pub use session::EditSession;
pub use state::{Clipboard, DocumentState, DragOrigin, MIN_ZOOM, ZOOM_STEP};
pub use subtree::{extract_subtree, graft_subtree};

// Re-export common types for convenience
pub use mindpad_layout::{layout, LayoutConfig};
pub use mindpad_model::{Direction, Element, ElementId, ElementStore, Marker};
