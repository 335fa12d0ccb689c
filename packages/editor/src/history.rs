//! # Undo/Redo History
//!
//! Linear history of element-store snapshots, owned by one document session.
//! Earlier versions of this editor kept the undo/redo arrays as module-level
//! state, which scrambled history whenever two documents were open at once;
//! the stacks now travel with the session that owns them.
//!
//! ## Design
//!
//! - `snapshot` records the store as it was *before* an undoable mutation
//!   and clears the redo stack
//! - `undo` exchanges the current store with the most recent snapshot
//! - `redo` exchanges it back
//! - Boundary calls (`undo` with nothing recorded, `redo` after a fresh
//!   mutation) return `None` and change nothing

use mindpad_model::ElementStore;

const DEFAULT_MAX_LEVELS: usize = 100;

/// Undo/redo stacks for one document.
#[derive(Debug, Clone)]
pub struct History {
    /// Pre-mutation snapshots, most recent last.
    undo_stack: Vec<ElementStore>,

    /// Undone states, most recent last.
    redo_stack: Vec<ElementStore>,

    /// Maximum number of undo levels (0 = unlimited).
    max_levels: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the store about to be mutated. Invalidates the redo stack.
    pub fn snapshot(&mut self, store: &ElementStore) {
        self.undo_stack.push(store.clone());

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back one entry: returns the store to restore, parking `current`
    /// on the redo stack. `None` at the oldest entry.
    pub fn undo(&mut self, current: &ElementStore) -> Option<ElementStore> {
        let restored = self.undo_stack.pop()?;
        self.redo_stack.push(current.clone());
        Some(restored)
    }

    /// Step forward one entry: returns the store to restore, parking
    /// `current` back on the undo stack. `None` at the newest entry.
    pub fn redo(&mut self, current: &ElementStore) -> Option<ElementStore> {
        let restored = self.redo_stack.pop()?;
        self.undo_stack.push(current.clone());
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drop all history.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
