//! Creating a freehand shape, one input sample at a time.

use sketchpad_core::{
    diff_documents, Document, PageId, Patch, Point, Shape, ShapeId, ShapeKind, ShapeStyle, Touched,
};

use crate::error::EditorError;
use crate::history::Command;
use crate::session::{PointerInfo, SessionCompletion};

/// Builds a draw shape from the raw input samples of the gesture. The
/// accumulated samples are the session's working data; every update
/// replaces the shape's whole point list (point lists patch wholesale, so
/// there is no per-element merging to get wrong).
#[derive(Debug, Clone)]
pub struct DrawSession {
    page_id: PageId,
    shape_id: ShapeId,
    origin: Point,
    points: Vec<Point>,
    template: Shape,
    snapshot: Document,
}

impl DrawSession {
    pub fn new(
        doc: &Document,
        page_id: &PageId,
        origin: Point,
        style: ShapeStyle,
    ) -> Result<Self, EditorError> {
        let page = doc
            .page(page_id)
            .ok_or_else(|| EditorError::UnknownPage(page_id.clone()))?;
        let template = Shape::draw(page_id, origin)
            .with_child_index(page.next_child_index())
            .with_style(style);
        Ok(Self {
            page_id: page_id.clone(),
            shape_id: template.id.clone(),
            origin,
            points: vec![Point::default()],
            template,
            snapshot: doc.clone(),
        })
    }

    pub fn shape_id(&self) -> &ShapeId {
        &self.shape_id
    }

    fn current_shape(&self) -> Shape {
        let mut shape = self.template.clone();
        shape.kind = ShapeKind::Draw {
            points: self.points.clone(),
        };
        shape
    }

    fn desired(&self) -> Result<Document, EditorError> {
        let mut desired = self.snapshot.clone();
        desired
            .page_mut(&self.page_id)
            .ok_or_else(|| EditorError::UnknownPage(self.page_id.clone()))?
            .add_shape(self.current_shape());
        Ok(desired)
    }

    fn touched(&self) -> Touched {
        Touched::shapes([self.shape_id.clone()])
    }

    pub(crate) fn start(&mut self, doc: &Document) -> Result<Patch, EditorError> {
        let desired = self.desired()?;
        Ok(diff_documents(doc, &desired, &self.page_id, &self.touched())?)
    }

    pub(crate) fn update(
        &mut self,
        doc: &Document,
        pointer: &PointerInfo,
    ) -> Result<Patch, EditorError> {
        let next = pointer.point.sub(self.origin);
        if self.points.last() != Some(&next) {
            self.points.push(next);
        }
        let desired = self.desired()?;
        Ok(diff_documents(doc, &desired, &self.page_id, &self.touched())?)
    }

    /// Drawing always commits, even a single dot. The command's `before`
    /// patch deletes the shape and restores the prior selection.
    pub(crate) fn complete(&self, doc: &Document) -> Result<SessionCompletion, EditorError> {
        let mut desired = doc.clone();
        if let Some(state) = desired.page_state_mut(&self.page_id) {
            state.selected_ids = vec![self.shape_id.clone()];
        }
        let touched = self.touched().with_page_state();
        let finalize = diff_documents(doc, &desired, &self.page_id, &touched)?;
        let after = diff_documents(&self.snapshot, &desired, &self.page_id, &touched)?;
        let before = diff_documents(&desired, &self.snapshot, &self.page_id, &touched)?;
        Ok(SessionCompletion {
            finalize,
            command: Some(Command::new("draw", before, after)),
        })
    }

    pub(crate) fn cancel(&self, doc: &Document) -> Result<Patch, EditorError> {
        Ok(diff_documents(doc, &self.snapshot, &self.page_id, &self.touched())?)
    }
}
