//! Dragging the selected shapes.

use std::collections::HashSet;

use sketchpad_core::{diff_documents, Document, PageId, Patch, Point, ShapeId};

use crate::bindings::resolve_bindings;
use crate::error::EditorError;
use crate::session::{complete_with_diff, touched_for_shapes, PointerInfo, SessionCompletion};

/// Moves the selected shapes by the pointer's total offset from the drag
/// origin. Bindings are re-resolved on every update: a target that moves
/// drags its bound arrows' handles along, while an arrow dragged off an
/// unmoved target is released.
#[derive(Debug, Clone)]
pub struct TranslateSession {
    page_id: PageId,
    ids: Vec<ShapeId>,
    origin: Point,
    snapshot: Document,
}

impl TranslateSession {
    /// Captures the current selection and document state. Fails if nothing
    /// is selected.
    pub fn new(doc: &Document, page_id: &PageId, origin: Point) -> Result<Self, EditorError> {
        let state = doc
            .page_state(page_id)
            .ok_or_else(|| EditorError::UnknownPage(page_id.clone()))?;
        if state.selected_ids.is_empty() {
            return Err(EditorError::NothingSelected {
                session: "translate",
            });
        }
        Ok(Self {
            page_id: page_id.clone(),
            ids: state.selected_ids.clone(),
            origin,
            snapshot: doc.clone(),
        })
    }

    fn desired(&self, pointer: &PointerInfo) -> Result<Document, EditorError> {
        let mut delta = pointer.point.sub(self.origin);
        if pointer.shift {
            // Lock to the dominant axis.
            if delta.x.abs() > delta.y.abs() {
                delta.y = 0.0;
            } else {
                delta.x = 0.0;
            }
        }

        let mut desired = self.snapshot.clone();
        let page = desired
            .page_mut(&self.page_id)
            .ok_or_else(|| EditorError::UnknownPage(self.page_id.clone()))?;

        let mut changed = HashSet::new();
        for id in &self.ids {
            if let Some(shape) = page.shapes.get_mut(id) {
                shape.translate_by(delta);
                changed.insert(id.clone());
            }
        }
        resolve_bindings(page, &changed, &HashSet::new());
        Ok(desired)
    }

    pub(crate) fn update(
        &mut self,
        doc: &Document,
        pointer: &PointerInfo,
    ) -> Result<Patch, EditorError> {
        let desired = self.desired(pointer)?;
        let touched = self.touched(doc);
        Ok(diff_documents(doc, &desired, &self.page_id, &touched)?)
    }

    pub(crate) fn complete(&self, doc: &Document) -> Result<SessionCompletion, EditorError> {
        let touched = self.touched(doc);
        complete_with_diff("translate", &self.snapshot, doc, &self.page_id, &touched)
    }

    pub(crate) fn cancel(&self, doc: &Document) -> Result<Patch, EditorError> {
        let touched = self.touched(doc);
        Ok(diff_documents(doc, &self.snapshot, &self.page_id, &touched)?)
    }

    fn touched(&self, current: &Document) -> sketchpad_core::Touched {
        let ids: HashSet<ShapeId> = self.ids.iter().cloned().collect();
        touched_for_shapes(&self.snapshot, current, &self.page_id, &ids)
    }
}
