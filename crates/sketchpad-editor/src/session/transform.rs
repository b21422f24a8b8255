//! Resizing the selected shapes by dragging a corner of their bounds.

use std::collections::HashSet;

use sketchpad_core::{diff_documents, Bounds, Document, PageId, Patch, Point, ShapeId};

use crate::bindings::resolve_bindings;
use crate::error::EditorError;
use crate::session::{complete_with_diff, touched_for_shapes, PointerInfo, SessionCompletion};

/// Minimum edge length the new bounds may collapse to.
const MIN_SIZE: f64 = 1.0;

/// Which corner of the selection bounds is being dragged. The opposite
/// corner stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformCorner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// Resizes every selected shape by mapping it relatively from the original
/// common bounds into the dragged bounds.
#[derive(Debug, Clone)]
pub struct TransformSession {
    page_id: PageId,
    ids: Vec<ShapeId>,
    corner: TransformCorner,
    initial_bounds: Bounds,
    snapshot: Document,
}

impl TransformSession {
    pub fn new(
        doc: &Document,
        page_id: &PageId,
        corner: TransformCorner,
    ) -> Result<Self, EditorError> {
        let page = doc
            .page(page_id)
            .ok_or_else(|| EditorError::UnknownPage(page_id.clone()))?;
        let state = doc
            .page_state(page_id)
            .ok_or_else(|| EditorError::UnknownPage(page_id.clone()))?;
        let ids = state.selected_ids.clone();
        let initial_bounds =
            page.common_bounds(&ids)
                .ok_or(EditorError::NothingSelected {
                    session: "transform",
                })?;
        Ok(Self {
            page_id: page_id.clone(),
            ids,
            corner,
            initial_bounds,
            snapshot: doc.clone(),
        })
    }

    fn new_bounds(&self, pointer: &PointerInfo) -> Bounds {
        let b = &self.initial_bounds;
        let fixed = match self.corner {
            TransformCorner::TopLeft => Point::new(b.max_x, b.max_y),
            TransformCorner::TopRight => Point::new(b.min_x, b.max_y),
            TransformCorner::BottomRight => Point::new(b.min_x, b.min_y),
            TransformCorner::BottomLeft => Point::new(b.max_x, b.min_y),
        };

        let mut dragged = pointer.point;
        if pointer.shift && b.width() > f64::EPSILON {
            // Preserve the original aspect ratio.
            let ratio = b.height() / b.width();
            let width = (dragged.x - fixed.x).abs();
            let dir_y = if dragged.y >= fixed.y { 1.0 } else { -1.0 };
            dragged.y = fixed.y + width * ratio * dir_y;
        }

        let mut to = Bounds::from_corners(fixed, dragged);
        if to.width() < MIN_SIZE {
            to.max_x = to.min_x + MIN_SIZE;
        }
        if to.height() < MIN_SIZE {
            to.max_y = to.min_y + MIN_SIZE;
        }
        to
    }

    fn desired(&self, pointer: &PointerInfo) -> Result<Document, EditorError> {
        let to = self.new_bounds(pointer);
        let mut desired = self.snapshot.clone();
        let page = desired
            .page_mut(&self.page_id)
            .ok_or_else(|| EditorError::UnknownPage(self.page_id.clone()))?;

        let mut changed = HashSet::new();
        for id in &self.ids {
            if let Some(shape) = page.shapes.get_mut(id) {
                shape.transform(&self.initial_bounds, &to);
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
        complete_with_diff("transform", &self.snapshot, doc, &self.page_id, &touched)
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
