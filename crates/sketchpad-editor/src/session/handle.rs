//! Dragging a single arrow handle, creating or releasing bindings.

use std::collections::HashSet;

use sketchpad_core::{
    diff_documents, new_id, Binding, BindingId, Document, HandleId, PageId, Patch, Point, ShapeId,
    ShapeKind, Touched,
};

use crate::error::EditorError;
use crate::session::{complete_with_diff, PointerInfo, SessionCompletion};

/// Moves one handle of an arrow. When the pointer lands inside another
/// shape's bounds, the handle binds to that shape (anchored at the
/// pointer's normalized position within the target); anywhere else, any
/// binding the handle had is released.
#[derive(Debug, Clone)]
pub struct HandleSession {
    page_id: PageId,
    shape_id: ShapeId,
    handle_id: HandleId,
    /// Stable id for the binding this gesture may create, so repeated
    /// updates do not churn fresh ids into the diff.
    binding_id: BindingId,
    snapshot: Document,
}

impl HandleSession {
    pub fn new(
        doc: &Document,
        page_id: &PageId,
        shape_id: &ShapeId,
        handle_id: HandleId,
    ) -> Result<Self, EditorError> {
        let shape = doc
            .shape(page_id, shape_id)
            .ok_or_else(|| EditorError::InvalidSessionTarget {
                session: "handle",
                shape_id: shape_id.clone(),
            })?;
        if shape.handle(handle_id).is_none() {
            return Err(EditorError::InvalidSessionTarget {
                session: "handle",
                shape_id: shape_id.clone(),
            });
        }
        Ok(Self {
            page_id: page_id.clone(),
            shape_id: shape_id.clone(),
            handle_id,
            binding_id: new_id(),
            snapshot: doc.clone(),
        })
    }

    /// The topmost non-arrow shape under the pointer, excluding the arrow
    /// being edited.
    fn target_under(&self, desired: &Document, point: Point) -> Option<ShapeId> {
        let page = desired.page(&self.page_id)?;
        page.shape_ids_in_order()
            .into_iter()
            .rev()
            .find(|id| {
                *id != self.shape_id
                    && page.shapes.get(id).is_some_and(|s| {
                        !matches!(s.kind, ShapeKind::Arrow { .. })
                            && s.bounds().contains_point(point)
                    })
            })
    }

    fn desired(&self, pointer: &PointerInfo) -> Result<Document, EditorError> {
        let mut desired = self.snapshot.clone();
        let target = self.target_under(&desired, pointer.point);

        let page = desired
            .page_mut(&self.page_id)
            .ok_or_else(|| EditorError::UnknownPage(self.page_id.clone()))?;

        let prior_binding = page
            .shapes
            .get(&self.shape_id)
            .and_then(|s| s.handle(self.handle_id))
            .and_then(|h| h.binding_id.clone());

        let new_binding = target.and_then(|to_id| {
            let anchor = page
                .shapes
                .get(&to_id)?
                .bounds()
                .relative_point(pointer.point);
            Some(
                Binding::new(
                    self.shape_id.clone(),
                    to_id,
                    self.handle_id,
                    anchor,
                    0.0,
                )
                .with_id(self.binding_id.clone()),
            )
        });

        if let Some(prior) = prior_binding {
            page.bindings.remove(&prior);
        }
        let binding_id = new_binding.as_ref().map(|b| b.id.clone());
        if let Some(binding) = new_binding {
            page.add_binding(binding);
        }

        if let Some(arrow) = page.shapes.get_mut(&self.shape_id) {
            let local = pointer.point.sub(arrow.point);
            if let Some(handle) = arrow.handle_mut(self.handle_id) {
                handle.point = local;
                handle.binding_id = binding_id;
            }
        }
        Ok(desired)
    }

    fn touched(&self, current: &Document) -> Touched {
        let mut touched = Touched::shapes([self.shape_id.clone()]);
        touched.bindings.insert(self.binding_id.clone());
        // Whatever binding the handle had before or holds now.
        for doc in [&self.snapshot, current] {
            if let Some(handle) = doc
                .shape(&self.page_id, &self.shape_id)
                .and_then(|s| s.handle(self.handle_id))
            {
                if let Some(id) = &handle.binding_id {
                    touched.bindings.insert(id.clone());
                }
            }
        }
        touched
    }

    pub(crate) fn update(
        &mut self,
        doc: &Document,
        pointer: &PointerInfo,
    ) -> Result<Patch, EditorError> {
        let desired = self.desired(pointer)?;
        let mut touched = self.touched(doc);
        // Bindings present in the desired state but not yet applied.
        if let Some(page) = desired.page(&self.page_id) {
            let ids: HashSet<ShapeId> = [self.shape_id.clone()].into();
            for binding in page.bindings.values() {
                if ids.contains(&binding.from_id) {
                    touched.bindings.insert(binding.id.clone());
                }
            }
        }
        Ok(diff_documents(doc, &desired, &self.page_id, &touched)?)
    }

    pub(crate) fn complete(&self, doc: &Document) -> Result<SessionCompletion, EditorError> {
        let touched = self.touched(doc);
        complete_with_diff("handle", &self.snapshot, doc, &self.page_id, &touched)
    }

    pub(crate) fn cancel(&self, doc: &Document) -> Result<Patch, EditorError> {
        let touched = self.touched(doc);
        Ok(diff_documents(doc, &self.snapshot, &self.page_id, &touched)?)
    }
}
