//! # Edit Session
//!
//! One open document: its state plus its own undo/redo history. Every open
//! tab gets its own session, so histories can never bleed between
//! documents. `dispatch` is the sole mutation entry point; everything else
//! is read access for the rendering layer.

use crate::actions::Action;
use crate::errors::EditorError;
use crate::history::History;
use crate::reducer::reduce;
use crate::state::DocumentState;
use mindpad_model::{
    document_id_for_path, load_document, save_document, DocumentId, ElementStore,
};

/// One client-side editing session for one document.
pub struct EditSession {
    /// Stable identity of the underlying document.
    pub id: DocumentId,

    state: DocumentState,
    history: History,
}

impl EditSession {
    /// Fresh single-root document.
    pub fn new(id: DocumentId) -> Self {
        let mut state = DocumentState::new();
        mindpad_layout::layout(&mut state.store, &state.layout);
        Self {
            id,
            state,
            history: History::new(),
        }
    }

    /// Open a persisted document from its JSON text.
    pub fn open(path: &str, json: &str) -> Result<Self, EditorError> {
        let store = load_document(json)?;
        let mut state = DocumentState::from_store(store);
        mindpad_layout::layout(&mut state.store, &state.layout);

        Ok(Self {
            id: document_id_for_path(path),
            state,
            history: History::new(),
        })
    }

    /// Apply one action and return the resulting state.
    pub fn dispatch(&mut self, action: Action) -> &DocumentState {
        tracing::trace!(session = %self.id, ?action, "dispatch");
        self.state = reduce(&self.state, &action, &mut self.history);
        &self.state
    }

    pub fn state(&self) -> &DocumentState {
        &self.state
    }

    /// Read-only element map for the rendering layer.
    pub fn elements(&self) -> &ElementStore {
        &self.state.store
    }

    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Serialize the current document.
    pub fn save(&self) -> Result<String, EditorError> {
        Ok(save_document(&self.state.store)?)
    }
}
