//! Error types for the document model and patch engine.

use thiserror::Error;

/// Errors raised while computing or applying patches.
#[derive(Error, Debug)]
pub enum PatchError {
    /// The patch produced a value that no longer deserializes as a
    /// document. The original document is left untouched when this
    /// happens; application is pure and swaps in the result only on
    /// success.
    #[error("patch produced an invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}
