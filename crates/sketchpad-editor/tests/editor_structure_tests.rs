//! Structural rules: one session at a time, no history motion mid-gesture,
//! violations fail before anything mutates.

mod common;

use common::{shape_point, three_rects};
use sketchpad_core::{Document, Point};
use sketchpad_editor::{Editor, EditorError, PointerInfo, SessionInput};

fn pointer(x: f64, y: f64) -> SessionInput {
    SessionInput::Pointer(PointerInfo::at(Point::new(x, y)))
}

#[test]
fn a_second_session_is_rejected() {
    let mut editor = three_rects();
    editor.select(["rect1"]).unwrap();
    editor.begin_translate(Point::new(0.0, 0.0)).unwrap();

    let err = editor.begin_brush(Point::new(0.0, 0.0)).unwrap_err();
    assert!(matches!(
        err,
        EditorError::SessionInProgress {
            current: "translate"
        }
    ));
    // The original session is still live and functional.
    assert_eq!(editor.session_name(), Some("translate"));
    editor.update_session(pointer(5.0, 5.0)).unwrap();
    assert_eq!(shape_point(&editor, "rect1"), Point::new(5.0, 5.0));
}

#[test]
fn undo_and_redo_are_rejected_during_a_session() {
    let mut editor = three_rects();
    editor.select(["rect1"]).unwrap();
    editor.begin_translate(Point::new(0.0, 0.0)).unwrap();
    editor.update_session(pointer(10.0, 10.0)).unwrap();

    assert!(matches!(
        editor.undo(),
        Err(EditorError::SessionInProgress { .. })
    ));
    assert!(matches!(
        editor.redo(),
        Err(EditorError::SessionInProgress { .. })
    ));
    // The rejected calls changed nothing.
    assert_eq!(shape_point(&editor, "rect1"), Point::new(10.0, 10.0));
    assert!(editor.session_active());
}

#[test]
fn actions_are_rejected_during_a_session() {
    let mut editor = three_rects();
    editor.select(["rect1"]).unwrap();
    editor.begin_translate(Point::new(0.0, 0.0)).unwrap();

    assert!(matches!(
        editor.duplicate(),
        Err(EditorError::SessionInProgress { .. })
    ));
    assert!(matches!(
        editor.delete_selection(),
        Err(EditorError::SessionInProgress { .. })
    ));
    assert_eq!(editor.page().unwrap().shapes.len(), 3);
}

#[test]
fn session_calls_without_a_session_fail() {
    let mut editor = three_rects();
    assert!(matches!(
        editor.update_session(pointer(1.0, 1.0)),
        Err(EditorError::NoActiveSession)
    ));
    assert!(matches!(
        editor.complete_session(),
        Err(EditorError::NoActiveSession)
    ));
    assert!(matches!(
        editor.cancel_session(),
        Err(EditorError::NoActiveSession)
    ));
}

#[test]
fn wrong_input_kind_fails_without_mutating() {
    let mut editor = three_rects();
    editor.select(["rect1"]).unwrap();
    editor.begin_translate(Point::new(0.0, 0.0)).unwrap();

    let err = editor
        .update_session(SessionInput::Text("nope".to_string()))
        .unwrap_err();
    assert!(matches!(err, EditorError::WrongSessionInput { .. }));
    assert_eq!(shape_point(&editor, "rect1"), Point::new(0.0, 0.0));

    // The session survives and accepts pointer input afterwards.
    editor.update_session(pointer(5.0, 0.0)).unwrap();
    editor.cancel_session().unwrap();
}

#[test]
fn undo_at_the_bottom_returns_false() {
    let mut editor = three_rects();
    assert!(!editor.undo().unwrap());
    assert!(!editor.redo().unwrap());
}

#[test]
fn loading_a_document_without_pages_fails() {
    let mut editor = Editor::new();
    let mut doc = Document::new("empty");
    doc.pages.clear();
    doc.page_states.clear();
    assert!(matches!(
        editor.load_document(doc),
        Err(EditorError::EmptyDocument)
    ));
}

#[test]
fn selection_is_never_recorded_in_history() {
    let mut editor = three_rects();
    editor.select(["rect1", "rect2"]).unwrap();
    editor.select_all().unwrap();
    editor.deselect_all().unwrap();
    assert!(editor.history().is_empty());
    assert!(!editor.can_undo());
}

#[test]
fn selection_drops_unknown_ids() {
    let mut editor = three_rects();
    editor.select(["rect1", "ghost"]).unwrap();
    assert_eq!(editor.selected_ids(), vec!["rect1".to_string()]);
}

#[test]
fn history_survives_serialization() {
    let mut editor = three_rects();
    editor.select(["rect1"]).unwrap();
    editor.begin_translate(Point::new(0.0, 0.0)).unwrap();
    editor.update_session(pointer(15.0, 5.0)).unwrap();
    editor.complete_session().unwrap();

    let json = serde_json::to_string(editor.history()).unwrap();
    let restored: sketchpad_editor::History = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 1);
    assert!(restored.can_undo());
}
