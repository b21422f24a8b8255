//! Interactive gesture sessions.
//!
//! A session turns a continuous pointer gesture into exactly one command
//! (or none). Every session captures a snapshot of the document when it is
//! created and computes each update purely from that snapshot and the
//! latest input sample, never from its previous output, so repeated
//! updates cannot accumulate drift.
//!
//! Lifecycle: the editor constructs a session, calls [`EditorSession::start`]
//! once (the first partial update), then [`EditorSession::update`] per input
//! sample, and finally either [`EditorSession::complete`] or
//! [`EditorSession::cancel`]. Completed and cancelled sessions are consumed
//! by the editor; there is no way to transition out of a terminal state.

mod brush;
mod draw;
mod edit_text;
mod handle;
mod rotate;
mod transform;
mod translate;

use std::collections::HashSet;

pub use brush::BrushSession;
pub use draw::DrawSession;
pub use edit_text::EditTextSession;
pub use handle::HandleSession;
pub use rotate::RotateSession;
pub use transform::{TransformCorner, TransformSession};
pub use translate::TranslateSession;

use sketchpad_core::{Document, PageId, Patch, Point, ShapeId, Touched};

use crate::error::EditorError;
use crate::history::Command;

/// One pointer input sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInfo {
    pub point: Point,
    pub shift: bool,
    pub alt: bool,
    pub pressure: f64,
}

impl PointerInfo {
    pub fn at(point: Point) -> Self {
        Self {
            point,
            shift: false,
            alt: false,
            pressure: 0.5,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// Input accepted by [`EditorSession::update`]. Pointer-driven sessions
/// take [`SessionInput::Pointer`]; text editing takes
/// [`SessionInput::Text`]. Feeding a session the wrong kind is a
/// structural violation and fails before any patch is computed.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    Pointer(PointerInfo),
    Text(String),
}

/// What a finished gesture leaves behind.
#[derive(Debug, Clone)]
pub struct SessionCompletion {
    /// An ephemeral finalizer (clearing a brush, leaving text-edit mode).
    /// Applied to the document but never recorded in history.
    pub finalize: Patch,
    /// The undoable result, when the gesture had a net effect.
    pub command: Option<Command>,
}

impl SessionCompletion {
    fn ephemeral(finalize: Patch) -> Self {
        Self {
            finalize,
            command: None,
        }
    }

    fn command(command: Command) -> Self {
        Self {
            finalize: Patch::empty(),
            command: Some(command),
        }
    }
}

/// The closed set of gesture types the editor supports.
#[derive(Debug, Clone)]
pub enum EditorSession {
    Translate(TranslateSession),
    Transform(TransformSession),
    Rotate(RotateSession),
    Draw(DrawSession),
    Brush(BrushSession),
    Handle(HandleSession),
    EditText(EditTextSession),
}

impl EditorSession {
    pub fn name(&self) -> &'static str {
        match self {
            EditorSession::Translate(_) => "translate",
            EditorSession::Transform(_) => "transform",
            EditorSession::Rotate(_) => "rotate",
            EditorSession::Draw(_) => "draw",
            EditorSession::Brush(_) => "brush",
            EditorSession::Handle(_) => "handle",
            EditorSession::EditText(_) => "edit_text",
        }
    }

    /// The first partial update (e.g. creating the draw shape or
    /// initializing the selection brush). Most sessions change nothing at
    /// start and return an empty patch.
    pub(crate) fn start(&mut self, doc: &Document) -> Result<Patch, EditorError> {
        match self {
            EditorSession::Draw(s) => s.start(doc),
            EditorSession::Brush(s) => s.start(doc),
            EditorSession::EditText(s) => s.start(doc),
            _ => Ok(Patch::empty()),
        }
    }

    /// One incremental update, computed from the session's snapshot and
    /// this input sample.
    pub(crate) fn update(
        &mut self,
        doc: &Document,
        input: &SessionInput,
    ) -> Result<Patch, EditorError> {
        match (self, input) {
            (EditorSession::Translate(s), SessionInput::Pointer(p)) => s.update(doc, p),
            (EditorSession::Transform(s), SessionInput::Pointer(p)) => s.update(doc, p),
            (EditorSession::Rotate(s), SessionInput::Pointer(p)) => s.update(doc, p),
            (EditorSession::Draw(s), SessionInput::Pointer(p)) => s.update(doc, p),
            (EditorSession::Brush(s), SessionInput::Pointer(p)) => s.update(doc, p),
            (EditorSession::Handle(s), SessionInput::Pointer(p)) => s.update(doc, p),
            (EditorSession::EditText(s), SessionInput::Text(text)) => s.update(doc, text),
            (session, _) => Err(EditorError::WrongSessionInput {
                session: session.name(),
                expected: match session {
                    EditorSession::EditText(_) => "text",
                    _ => "pointer",
                },
            }),
        }
    }

    /// Finalizes the gesture against the current document state.
    pub(crate) fn complete(&self, doc: &Document) -> Result<SessionCompletion, EditorError> {
        match self {
            EditorSession::Translate(s) => s.complete(doc),
            EditorSession::Transform(s) => s.complete(doc),
            EditorSession::Rotate(s) => s.complete(doc),
            EditorSession::Draw(s) => s.complete(doc),
            EditorSession::Brush(s) => s.complete(doc),
            EditorSession::Handle(s) => s.complete(doc),
            EditorSession::EditText(s) => s.complete(doc),
        }
    }

    /// Reverts the document to the session's snapshot. Never produces a
    /// command.
    pub(crate) fn cancel(&self, doc: &Document) -> Result<Patch, EditorError> {
        match self {
            EditorSession::Translate(s) => s.cancel(doc),
            EditorSession::Transform(s) => s.cancel(doc),
            EditorSession::Rotate(s) => s.cancel(doc),
            EditorSession::Draw(s) => s.cancel(doc),
            EditorSession::Brush(s) => s.cancel(doc),
            EditorSession::Handle(s) => s.cancel(doc),
            EditorSession::EditText(s) => s.cancel(doc),
        }
    }
}

/// The touched-entity set for a gesture over `ids`: the shapes themselves
/// plus every binding (and binding source) referencing them in either the
/// snapshot or the current document.
pub(crate) fn touched_for_shapes(
    snapshot: &Document,
    current: &Document,
    page_id: &PageId,
    ids: &HashSet<ShapeId>,
) -> Touched {
    let mut touched = Touched {
        shapes: ids.clone(),
        ..Touched::default()
    };
    for doc in [snapshot, current] {
        if let Some(page) = doc.page(page_id) {
            for binding in page.bindings.values() {
                if ids.contains(&binding.from_id) || ids.contains(&binding.to_id) {
                    touched.bindings.insert(binding.id.clone());
                    touched.shapes.insert(binding.from_id.clone());
                }
            }
        }
    }
    touched
}

/// Builds the completion for a snapshot-vs-final diff: a command when the
/// gesture changed anything, otherwise an empty ephemeral patch.
pub(crate) fn complete_with_diff(
    name: &'static str,
    snapshot: &Document,
    current: &Document,
    page_id: &PageId,
    touched: &Touched,
) -> Result<SessionCompletion, EditorError> {
    let after = sketchpad_core::diff_documents(snapshot, current, page_id, touched)?;
    if after.is_empty() {
        return Ok(SessionCompletion::ephemeral(Patch::empty()));
    }
    let before = sketchpad_core::diff_documents(current, snapshot, page_id, touched)?;
    Ok(SessionCompletion::command(Command::new(
        name, before, after,
    )))
}
