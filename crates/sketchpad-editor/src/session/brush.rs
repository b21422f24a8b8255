//! Drag-select: the selection brush.

use sketchpad_core::{diff_documents, Bounds, Document, PageId, Patch, Point, ShapeId, Touched};

use crate::error::EditorError;
use crate::session::{PointerInfo, SessionCompletion};

/// Maintains the brush rectangle and recomputes the selection from the
/// snapshot's shape bounds on every update. Selection is view state, so
/// brushing never produces a command.
#[derive(Debug, Clone)]
pub struct BrushSession {
    page_id: PageId,
    origin: Point,
    initial_selected: Vec<ShapeId>,
    snapshot: Document,
}

impl BrushSession {
    pub fn new(doc: &Document, page_id: &PageId, origin: Point) -> Result<Self, EditorError> {
        let state = doc
            .page_state(page_id)
            .ok_or_else(|| EditorError::UnknownPage(page_id.clone()))?;
        Ok(Self {
            page_id: page_id.clone(),
            origin,
            initial_selected: state.selected_ids.clone(),
            snapshot: doc.clone(),
        })
    }

    fn touched() -> Touched {
        Touched::default().with_page_state()
    }

    pub(crate) fn start(&mut self, doc: &Document) -> Result<Patch, EditorError> {
        let mut desired = self.snapshot.clone();
        if let Some(state) = desired.page_state_mut(&self.page_id) {
            state.brush = Some(Bounds::from_corners(self.origin, self.origin));
        }
        Ok(diff_documents(doc, &desired, &self.page_id, &Self::touched())?)
    }

    pub(crate) fn update(
        &mut self,
        doc: &Document,
        pointer: &PointerInfo,
    ) -> Result<Patch, EditorError> {
        let brush = Bounds::from_corners(self.origin, pointer.point);

        let page = self
            .snapshot
            .page(&self.page_id)
            .ok_or_else(|| EditorError::UnknownPage(self.page_id.clone()))?;
        let mut hits: Vec<ShapeId> = page
            .shape_ids_in_order()
            .into_iter()
            .filter(|id| {
                page.shapes
                    .get(id)
                    .is_some_and(|s| s.bounds().intersects(&brush))
            })
            .collect();

        // Shift extends the selection that existed when the brush started.
        let selected = if pointer.shift {
            let mut selected = self.initial_selected.clone();
            hits.retain(|id| !selected.contains(id));
            selected.extend(hits);
            selected
        } else {
            hits
        };

        let mut desired = self.snapshot.clone();
        if let Some(state) = desired.page_state_mut(&self.page_id) {
            state.brush = Some(brush);
            state.selected_ids = selected;
        }
        Ok(diff_documents(doc, &desired, &self.page_id, &Self::touched())?)
    }

    /// Completion keeps whatever the brush selected and clears the brush
    /// rectangle. No history entry.
    pub(crate) fn complete(&self, doc: &Document) -> Result<SessionCompletion, EditorError> {
        let mut desired = doc.clone();
        if let Some(state) = desired.page_state_mut(&self.page_id) {
            state.brush = None;
        }
        let finalize = diff_documents(doc, &desired, &self.page_id, &Self::touched())?;
        Ok(SessionCompletion {
            finalize,
            command: None,
        })
    }

    pub(crate) fn cancel(&self, doc: &Document) -> Result<Patch, EditorError> {
        Ok(diff_documents(doc, &self.snapshot, &self.page_id, &Self::touched())?)
    }
}
