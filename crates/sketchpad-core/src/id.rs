//! Identifier aliases and generation.

use uuid::Uuid;

/// Identifies a shape within a page.
pub type ShapeId = String;

/// Identifies a binding within a page.
pub type BindingId = String;

/// Identifies a page within a document.
pub type PageId = String;

/// Generates a fresh, globally-unique identifier.
///
/// Every entity created at runtime gets one of these; id collisions are a
/// correctness violation for duplicate/paste, so ids are never derived from
/// existing ones.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
