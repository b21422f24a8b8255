//! Error handling for the editor layer.
//!
//! Structural violations (a second session, undo during a gesture) are
//! rejected before any patch is computed or applied; they can never leave
//! the document half-mutated. Missing-entity conditions inside actions are
//! deliberately not errors: the action skips that id and continues.

use sketchpad_core::{PageId, PatchError, ShapeId};
use thiserror::Error;

/// Editor error type.
#[derive(Error, Debug)]
pub enum EditorError {
    /// A session is already in progress; only one mutator may be in flight.
    #[error("a {current} session is already in progress")]
    SessionInProgress {
        /// The name of the active session.
        current: &'static str,
    },

    /// An operation that needs an active session found none.
    #[error("no session is active")]
    NoActiveSession,

    /// The active session was fed the wrong kind of input.
    #[error("{session} session expected {expected} input")]
    WrongSessionInput {
        /// The name of the active session.
        session: &'static str,
        /// The input kind the session accepts.
        expected: &'static str,
    },

    /// The session cannot operate on the named shape.
    #[error("shape {shape_id} cannot start a {session} session")]
    InvalidSessionTarget {
        /// The name of the session.
        session: &'static str,
        /// The offending shape id.
        shape_id: ShapeId,
    },

    /// The session requires a non-empty selection.
    #[error("the {session} session requires a selection")]
    NothingSelected {
        /// The name of the session.
        session: &'static str,
    },

    /// The referenced page does not exist in the document.
    #[error("unknown page: {0}")]
    UnknownPage(PageId),

    /// A loaded document contains no pages at all.
    #[error("the document has no pages")]
    EmptyDocument,

    /// A patch could not be computed or applied.
    #[error(transparent)]
    Patch(#[from] PatchError),
}
