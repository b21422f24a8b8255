//! Editing a text shape's content.

use sketchpad_core::{diff_documents, Document, PageId, Patch, ShapeId, ShapeKind, Touched};

use crate::error::EditorError;
use crate::session::{complete_with_diff, SessionCompletion};

/// Live-edits the text of a single text shape. Entering and leaving edit
/// mode is view state (`editing_id`), handled ephemerally; only the text
/// change itself becomes a command.
#[derive(Debug, Clone)]
pub struct EditTextSession {
    page_id: PageId,
    shape_id: ShapeId,
    snapshot: Document,
}

impl EditTextSession {
    pub fn new(doc: &Document, page_id: &PageId, shape_id: &ShapeId) -> Result<Self, EditorError> {
        let shape = doc
            .shape(page_id, shape_id)
            .ok_or_else(|| EditorError::InvalidSessionTarget {
                session: "edit_text",
                shape_id: shape_id.clone(),
            })?;
        if !matches!(shape.kind, ShapeKind::Text { .. }) {
            return Err(EditorError::InvalidSessionTarget {
                session: "edit_text",
                shape_id: shape_id.clone(),
            });
        }
        Ok(Self {
            page_id: page_id.clone(),
            shape_id: shape_id.clone(),
            snapshot: doc.clone(),
        })
    }

    pub(crate) fn start(&mut self, doc: &Document) -> Result<Patch, EditorError> {
        let mut desired = doc.clone();
        if let Some(state) = desired.page_state_mut(&self.page_id) {
            state.editing_id = Some(self.shape_id.clone());
        }
        let touched = Touched::default().with_page_state();
        Ok(diff_documents(doc, &desired, &self.page_id, &touched)?)
    }

    pub(crate) fn update(&mut self, doc: &Document, text: &str) -> Result<Patch, EditorError> {
        let mut desired = self.snapshot.clone();
        if let Some(state) = desired.page_state_mut(&self.page_id) {
            state.editing_id = Some(self.shape_id.clone());
        }
        if let Some(page) = desired.page_mut(&self.page_id) {
            if let Some(shape) = page.shapes.get_mut(&self.shape_id) {
                shape.kind = ShapeKind::Text {
                    text: text.to_string(),
                };
            }
        }
        let touched = Touched::shapes([self.shape_id.clone()]).with_page_state();
        Ok(diff_documents(doc, &desired, &self.page_id, &touched)?)
    }

    pub(crate) fn complete(&self, doc: &Document) -> Result<SessionCompletion, EditorError> {
        let mut desired = doc.clone();
        if let Some(state) = desired.page_state_mut(&self.page_id) {
            state.editing_id = None;
        }
        let finalize = diff_documents(
            doc,
            &desired,
            &self.page_id,
            &Touched::default().with_page_state(),
        )?;

        // The command covers the text change only; edit mode is ephemeral.
        let touched = Touched::shapes([self.shape_id.clone()]);
        let mut completion =
            complete_with_diff("edit_text", &self.snapshot, &desired, &self.page_id, &touched)?;
        completion.finalize = finalize;
        Ok(completion)
    }

    pub(crate) fn cancel(&self, doc: &Document) -> Result<Patch, EditorError> {
        let touched = Touched::shapes([self.shape_id.clone()]).with_page_state();
        Ok(diff_documents(doc, &self.snapshot, &self.page_id, &touched)?)
    }
}
