//! # Mindpad Model
//!
//! Document model for the mindpad diagram editor.
//!
//! A document is a flat, id-keyed store of [`Element`] records. Elements
//! reference their parent by id rather than by pointer, so the tree has no
//! ownership cycles and serializes trivially. The editor crate mutates the
//! store through its reducer; the layout crate rewrites geometry; everything
//! else (rendering, pointer handling) only reads it.

pub mod element;
pub mod error;
pub mod id;
pub mod serialize;
pub mod store;

pub use element::{Direction, Element, Marker, DEFAULT_SECTION_HEIGHT, DEFAULT_WIDTH, SECTION_COUNT};
pub use error::PersistError;
pub use id::{document_id_for_path, DocumentId, ElementId, IdGenerator};
pub use serialize::{load_document, load_document_file, save_document, save_document_file};
pub use store::ElementStore;
