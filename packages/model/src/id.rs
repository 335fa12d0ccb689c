use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one element within a document.
///
/// A newtype rather than a bare `String` so ids cannot be confused with
/// section text or other arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Identifier of an open document, derived from its file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a document ID from a file path using CRC32.
pub fn document_id_for_path(path: &str) -> DocumentId {
    let mut buff = String::from(path);
    if !path.starts_with("file://") {
        buff = format!("file://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    DocumentId(format!("{:x}", hasher.finalize()))
}

/// Sequential ID generator for elements within a document.
///
/// Ids are stringified counters, so the first element of a fresh document is
/// `"1"`. When a persisted document is loaded, [`IdGenerator::reserve`] moves
/// the counter past every numeric id already in use.
#[derive(Debug, Clone, PartialEq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Generate the next id.
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next.to_string());
        self.next += 1;
        id
    }

    /// Ensure `id` is never produced again. Non-numeric ids need no
    /// reservation since the generator only emits numeric ones.
    pub fn reserve(&mut self, id: &ElementId) {
        if let Ok(n) = id.as_str().parse::<u64>() {
            if n >= self.next {
                self.next = n + 1;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
