//! Rotating the selected shapes around their common center.

use std::collections::HashSet;
use std::f64::consts::TAU;

use sketchpad_core::{diff_documents, Document, PageId, Patch, Point, ShapeId};

use crate::bindings::resolve_bindings;
use crate::error::EditorError;
use crate::session::{complete_with_diff, touched_for_shapes, PointerInfo, SessionCompletion};

/// Shift snaps rotation to multiples of 15 degrees.
const SNAP_INCREMENT: f64 = TAU / 24.0;

#[derive(Debug, Clone)]
pub struct RotateSession {
    page_id: PageId,
    ids: Vec<ShapeId>,
    pivot: Point,
    origin: Point,
    snapshot: Document,
}

impl RotateSession {
    pub fn new(doc: &Document, page_id: &PageId, origin: Point) -> Result<Self, EditorError> {
        let page = doc
            .page(page_id)
            .ok_or_else(|| EditorError::UnknownPage(page_id.clone()))?;
        let state = doc
            .page_state(page_id)
            .ok_or_else(|| EditorError::UnknownPage(page_id.clone()))?;
        let ids = state.selected_ids.clone();
        let pivot = page
            .common_bounds(&ids)
            .ok_or(EditorError::NothingSelected { session: "rotate" })?
            .center();
        Ok(Self {
            page_id: page_id.clone(),
            ids,
            pivot,
            origin,
            snapshot: doc.clone(),
        })
    }

    fn desired(&self, pointer: &PointerInfo) -> Result<Document, EditorError> {
        let start = (self.origin.y - self.pivot.y).atan2(self.origin.x - self.pivot.x);
        let current = (pointer.point.y - self.pivot.y).atan2(pointer.point.x - self.pivot.x);
        let mut delta = current - start;
        if pointer.shift {
            delta = (delta / SNAP_INCREMENT).round() * SNAP_INCREMENT;
        }

        let mut desired = self.snapshot.clone();
        let page = desired
            .page_mut(&self.page_id)
            .ok_or_else(|| EditorError::UnknownPage(self.page_id.clone()))?;

        let mut changed = HashSet::new();
        for id in &self.ids {
            if let Some(shape) = page.shapes.get_mut(id) {
                let center = shape.center();
                let rotated = center.rotated_around(self.pivot, delta);
                shape.translate_by(rotated.sub(center));
                shape.rotation = (shape.rotation + delta).rem_euclid(TAU);
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
        complete_with_diff("rotate", &self.snapshot, doc, &self.page_id, &touched)
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
