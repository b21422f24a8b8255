//! The stateful editor facade.
//!
//! The editor owns the document, the undo history, the clipboard and at
//! most one live session. Every mutation flows through [`Editor::apply`]:
//! sessions and actions produce patches and documents, the editor turns
//! them into patch applications and history entries. Structural
//! violations (a second session, undo mid-gesture) fail before anything
//! is computed or applied.

use tracing::{debug, warn};

use sketchpad_core::{
    diff_documents, Document, HandleId, Page, PageId, PageState, Patch, Point, Shape, ShapeId,
    ShapeStyle, Touched,
};

use crate::actions::{
    self, AlignType, Clipboard, DistributeType, FlipType, MoveType, StretchType, DUPLICATE_OFFSET,
};
use crate::error::EditorError;
use crate::history::{Command, History};
use crate::session::{
    BrushSession, DrawSession, EditTextSession, EditorSession, HandleSession, RotateSession,
    SessionInput, TransformCorner, TransformSession, TranslateSession,
};

/// An interactive editor over one document.
#[derive(Debug)]
pub struct Editor {
    document: Document,
    current_page_id: PageId,
    history: History,
    session: Option<EditorSession>,
    clipboard: Option<Clipboard>,
}

impl Editor {
    /// An editor over a fresh single-page document.
    pub fn new() -> Self {
        let document = Document::new("New Document");
        let current_page_id = document
            .first_page_id()
            .unwrap_or_default();
        Self {
            document,
            current_page_id,
            history: History::new(),
            session: None,
            clipboard: None,
        }
    }

    /// Takes over an existing document, pointing at its first page.
    /// History from any previous document is discarded.
    pub fn load_document(&mut self, document: Document) -> Result<(), EditorError> {
        let page_id = document.first_page_id().ok_or(EditorError::EmptyDocument)?;
        self.document = document;
        self.current_page_id = page_id;
        self.history.clear();
        self.session = None;
        debug!(page = %self.current_page_id, "document loaded");
        Ok(())
    }

    // ----- reads -----

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn current_page_id(&self) -> &PageId {
        &self.current_page_id
    }

    pub fn page(&self) -> Option<&Page> {
        self.document.page(&self.current_page_id)
    }

    pub fn page_state(&self) -> Option<&PageState> {
        self.document.page_state(&self.current_page_id)
    }

    pub fn selected_ids(&self) -> Vec<ShapeId> {
        self.page_state()
            .map(|s| s.selected_ids.clone())
            .unwrap_or_default()
    }

    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.document.shape(&self.current_page_id, id)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clipboard(&self) -> Option<&Clipboard> {
        self.clipboard.as_ref()
    }

    pub fn session_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session_name(&self) -> Option<&'static str> {
        self.session.as_ref().map(|s| s.name())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn ensure_idle(&self) -> Result<(), EditorError> {
        match &self.session {
            Some(session) => {
                warn!(session = session.name(), "rejected: session in progress");
                Err(EditorError::SessionInProgress {
                    current: session.name(),
                })
            }
            None => Ok(()),
        }
    }

    fn apply(&mut self, patch: &Patch) -> Result<(), EditorError> {
        if patch.is_empty() {
            return Ok(());
        }
        self.document = self.document.patched(patch)?;
        Ok(())
    }

    // ----- pages -----

    pub fn set_current_page(&mut self, page_id: &PageId) -> Result<(), EditorError> {
        self.ensure_idle()?;
        if self.document.page(page_id).is_none() {
            return Err(EditorError::UnknownPage(page_id.clone()));
        }
        self.current_page_id = page_id.clone();
        Ok(())
    }

    // ----- selection (ephemeral, never recorded) -----

    /// Replaces the selection. Ids that do not resolve are dropped.
    pub fn select<I, S>(&mut self, ids: I) -> Result<(), EditorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<ShapeId>,
    {
        self.ensure_idle()?;
        let page = self
            .document
            .page(&self.current_page_id)
            .ok_or_else(|| EditorError::UnknownPage(self.current_page_id.clone()))?;
        let present: Vec<ShapeId> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| page.shapes.contains_key(id))
            .collect();

        let mut desired = self.document.clone();
        if let Some(state) = desired.page_state_mut(&self.current_page_id) {
            state.selected_ids = present;
        }
        let patch = diff_documents(
            &self.document,
            &desired,
            &self.current_page_id,
            &Touched::default().with_page_state(),
        )?;
        self.apply(&patch)
    }

    pub fn select_all(&mut self) -> Result<(), EditorError> {
        let ids = self.page().map(|p| p.shape_ids_in_order()).unwrap_or_default();
        self.select(ids)
    }

    pub fn deselect_all(&mut self) -> Result<(), EditorError> {
        self.select(Vec::<ShapeId>::new())
    }

    // ----- sessions -----

    /// Starts a session, applying its initial patch. Fails if another
    /// session is already in flight.
    pub fn begin_session(&mut self, mut session: EditorSession) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let patch = session.start(&self.document)?;
        self.apply(&patch)?;
        debug!(session = session.name(), "session started");
        self.session = Some(session);
        Ok(())
    }

    /// Starts translating the current selection from `origin`.
    pub fn begin_translate(&mut self, origin: Point) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let session = TranslateSession::new(&self.document, &self.current_page_id, origin)?;
        self.begin_session(EditorSession::Translate(session))
    }

    /// Starts resizing the current selection by dragging `corner`.
    pub fn begin_transform(&mut self, corner: TransformCorner) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let session = TransformSession::new(&self.document, &self.current_page_id, corner)?;
        self.begin_session(EditorSession::Transform(session))
    }

    /// Starts rotating the current selection around its common center.
    pub fn begin_rotate(&mut self, origin: Point) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let session = RotateSession::new(&self.document, &self.current_page_id, origin)?;
        self.begin_session(EditorSession::Rotate(session))
    }

    /// Starts drawing a freehand shape at `origin`. Returns the id of the
    /// shape the gesture is building.
    pub fn begin_draw(&mut self, origin: Point, style: ShapeStyle) -> Result<ShapeId, EditorError> {
        self.ensure_idle()?;
        let session = DrawSession::new(&self.document, &self.current_page_id, origin, style)?;
        let shape_id = session.shape_id().clone();
        self.begin_session(EditorSession::Draw(session))?;
        Ok(shape_id)
    }

    /// Starts drag-selecting from `origin`.
    pub fn begin_brush(&mut self, origin: Point) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let session = BrushSession::new(&self.document, &self.current_page_id, origin)?;
        self.begin_session(EditorSession::Brush(session))
    }

    /// Starts dragging one handle of an arrow.
    pub fn begin_handle(
        &mut self,
        shape_id: &ShapeId,
        handle_id: HandleId,
    ) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let session =
            HandleSession::new(&self.document, &self.current_page_id, shape_id, handle_id)?;
        self.begin_session(EditorSession::Handle(session))
    }

    /// Starts editing a text shape's content.
    pub fn begin_edit_text(&mut self, shape_id: &ShapeId) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let session = EditTextSession::new(&self.document, &self.current_page_id, shape_id)?;
        self.begin_session(EditorSession::EditText(session))
    }

    /// Feeds one input sample to the active session and applies the
    /// resulting partial update.
    pub fn update_session(&mut self, input: SessionInput) -> Result<(), EditorError> {
        let mut session = self.session.take().ok_or(EditorError::NoActiveSession)?;
        let result = session.update(&self.document, &input);
        self.session = Some(session);
        let patch = result?;
        self.apply(&patch)
    }

    /// Completes the active session. Returns `true` when the gesture
    /// produced a command.
    pub fn complete_session(&mut self) -> Result<bool, EditorError> {
        let session = self.session.take().ok_or(EditorError::NoActiveSession)?;
        let completion = session.complete(&self.document)?;
        self.apply(&completion.finalize)?;
        match completion.command {
            Some(command) => {
                debug!(session = session.name(), command = %command.id, "session committed");
                self.history.push(command);
                Ok(true)
            }
            None => {
                debug!(session = session.name(), "session completed with no net change");
                Ok(false)
            }
        }
    }

    /// Cancels the active session, reverting its partial updates. Leaves
    /// no trace in history.
    pub fn cancel_session(&mut self) -> Result<(), EditorError> {
        let session = self.session.take().ok_or(EditorError::NoActiveSession)?;
        let patch = session.cancel(&self.document)?;
        self.apply(&patch)?;
        debug!(session = session.name(), "session cancelled");
        Ok(())
    }

    // ----- history -----

    /// Steps one command back. Returns `false` at the bottom of the stack.
    /// Illegal while a session is in progress.
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        let command = match self.history.undo() {
            Some(command) => command.clone(),
            None => return Ok(false),
        };
        debug!(command = %command.id, "undo");
        self.apply(&command.before)?;
        Ok(true)
    }

    /// Re-applies the next undone command, if any.
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        let command = match self.history.redo() {
            Some(command) => command.clone(),
            None => return Ok(false),
        };
        debug!(command = %command.id, "redo");
        self.apply(&command.after)?;
        Ok(true)
    }

    // ----- actions -----

    /// Diffs the current document against an action's result, applies the
    /// forward patch and records the command. Actions that changed nothing
    /// leave no history entry.
    fn commit(
        &mut self,
        name: &'static str,
        after: Document,
        touched: Touched,
    ) -> Result<(), EditorError> {
        let forward = diff_documents(&self.document, &after, &self.current_page_id, &touched)?;
        if forward.is_empty() {
            return Ok(());
        }
        let backward = diff_documents(&after, &self.document, &self.current_page_id, &touched)?;
        self.apply(&forward)?;
        debug!(command = name, "command pushed");
        self.history.push(Command::new(name, backward, forward));
        Ok(())
    }

    /// Duplicates the selected shapes, offset slightly, and selects the
    /// copies.
    pub fn duplicate(&mut self) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let ids = self.selected_ids();
        let (after, touched) =
            actions::duplicate(&self.document, &self.current_page_id, &ids, DUPLICATE_OFFSET)?;
        self.commit("duplicate", after, touched)
    }

    /// Copies the selected shapes (and their intra-selection bindings) to
    /// the clipboard. Does not touch the document.
    pub fn copy_selection(&mut self) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let ids = self.selected_ids();
        let clipboard = actions::copy(&self.document, &self.current_page_id, &ids)?;
        if !clipboard.is_empty() {
            self.clipboard = Some(clipboard);
        }
        Ok(())
    }

    /// Pastes the clipboard contents under fresh ids and selects them.
    pub fn paste(&mut self) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let Some(clipboard) = self.clipboard.clone() else {
            return Ok(());
        };
        let (after, touched) = actions::paste(
            &self.document,
            &self.current_page_id,
            &clipboard,
            DUPLICATE_OFFSET,
        )?;
        self.commit("paste", after, touched)
    }

    /// Deletes the selected shapes and every binding referencing them.
    pub fn delete_selection(&mut self) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let ids = self.selected_ids();
        let (after, touched) = actions::delete(&self.document, &self.current_page_id, &ids)?;
        self.commit("delete", after, touched)
    }

    pub fn align(&mut self, align: AlignType) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let ids = self.selected_ids();
        let (after, touched) = actions::align(&self.document, &self.current_page_id, &ids, align)?;
        self.commit("align", after, touched)
    }

    pub fn distribute(&mut self, distribute: DistributeType) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let ids = self.selected_ids();
        let (after, touched) =
            actions::distribute(&self.document, &self.current_page_id, &ids, distribute)?;
        self.commit("distribute", after, touched)
    }

    pub fn stretch(&mut self, stretch: StretchType) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let ids = self.selected_ids();
        let (after, touched) =
            actions::stretch(&self.document, &self.current_page_id, &ids, stretch)?;
        self.commit("stretch", after, touched)
    }

    pub fn flip(&mut self, flip: FlipType) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let ids = self.selected_ids();
        let (after, touched) = actions::flip(&self.document, &self.current_page_id, &ids, flip)?;
        self.commit("flip", after, touched)
    }

    pub fn reorder(&mut self, move_type: MoveType) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let ids = self.selected_ids();
        let (after, touched) =
            actions::reorder(&self.document, &self.current_page_id, &ids, move_type)?;
        self.commit("reorder", after, touched)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
