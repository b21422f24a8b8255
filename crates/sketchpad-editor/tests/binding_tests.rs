//! Binding consistency across sessions, actions and undo.

mod common;

use common::bound_arrow;
use sketchpad_core::{HandleId, Point};
use sketchpad_editor::{PointerInfo, SessionInput};

fn pointer(x: f64, y: f64) -> SessionInput {
    SessionInput::Pointer(PointerInfo::at(Point::new(x, y)))
}

fn end_handle_point(editor: &sketchpad_editor::Editor) -> Point {
    editor
        .shape(&"arrow".to_string())
        .unwrap()
        .handle(HandleId::End)
        .unwrap()
        .point
}

#[test]
fn translating_the_target_drags_the_bound_handle() {
    let mut editor = bound_arrow();
    editor.select(["target"]).unwrap();

    editor.begin_translate(Point::new(0.0, 0.0)).unwrap();
    editor.update_session(pointer(40.0, 0.0)).unwrap();
    // Anchor follows the target's center.
    assert_eq!(end_handle_point(&editor), Point::new(165.0, 125.0));

    assert!(editor.complete_session().unwrap());
    assert_eq!(editor.page().unwrap().bindings.len(), 1);

    // Undo restores both the target and the arrow's handle.
    assert!(editor.undo().unwrap());
    assert_eq!(end_handle_point(&editor), Point::new(125.0, 125.0));
    assert_eq!(
        editor.shape(&"target".to_string()).unwrap().point,
        Point::new(100.0, 100.0)
    );
}

#[test]
fn translating_the_arrow_alone_releases_the_binding() {
    let mut editor = bound_arrow();
    editor.select(["arrow"]).unwrap();

    editor.begin_translate(Point::new(0.0, 0.0)).unwrap();
    editor.update_session(pointer(-50.0, 0.0)).unwrap();

    assert!(editor.page().unwrap().bindings.is_empty());
    let handle = editor
        .shape(&"arrow".to_string())
        .unwrap()
        .handle(HandleId::End)
        .unwrap();
    assert_eq!(handle.binding_id, None);

    assert!(editor.complete_session().unwrap());
    assert!(editor.undo().unwrap());
    // Undo brings the binding back.
    assert_eq!(editor.page().unwrap().bindings.len(), 1);
    let handle = editor
        .shape(&"arrow".to_string())
        .unwrap()
        .handle(HandleId::End)
        .unwrap();
    assert_eq!(handle.binding_id, Some("binding1".to_string()));
}

#[test]
fn translating_arrow_and_target_together_keeps_the_binding() {
    let mut editor = bound_arrow();
    editor.select(["arrow", "target"]).unwrap();

    editor.begin_translate(Point::new(0.0, 0.0)).unwrap();
    editor.update_session(pointer(10.0, 10.0)).unwrap();
    assert!(editor.complete_session().unwrap());

    assert_eq!(editor.page().unwrap().bindings.len(), 1);
    // Handle stays fixed relative to the arrow.
    assert_eq!(end_handle_point(&editor), Point::new(125.0, 125.0));
}

#[test]
fn deleting_the_target_removes_the_binding_and_detaches() {
    let mut editor = bound_arrow();
    editor.select(["target"]).unwrap();
    editor.delete_selection().unwrap();

    let page = editor.page().unwrap();
    assert!(page.bindings.is_empty());
    assert!(page.shapes.contains_key("arrow"));
    let handle = editor
        .shape(&"arrow".to_string())
        .unwrap()
        .handle(HandleId::End)
        .unwrap();
    assert_eq!(handle.binding_id, None);
    // The handle keeps its position; nothing dangles.
    assert_eq!(handle.point, Point::new(125.0, 125.0));

    assert!(editor.undo().unwrap());
    let page = editor.page().unwrap();
    assert_eq!(page.bindings.len(), 1);
    assert!(page.shapes.contains_key("target"));
    let handle = editor
        .shape(&"arrow".to_string())
        .unwrap()
        .handle(HandleId::End)
        .unwrap();
    assert_eq!(handle.binding_id, Some("binding1".to_string()));
}

#[test]
fn duplicating_arrow_and_target_remaps_the_binding() {
    let mut editor = bound_arrow();
    editor.select(["arrow", "target"]).unwrap();
    editor.duplicate().unwrap();

    let page = editor.page().unwrap();
    assert_eq!(page.shapes.len(), 4);
    assert_eq!(page.bindings.len(), 2);

    let selected = editor.selected_ids();
    let new_binding = page
        .bindings
        .values()
        .find(|b| b.id != "binding1")
        .unwrap();
    assert!(selected.contains(&new_binding.from_id));
    assert!(selected.contains(&new_binding.to_id));

    // The copied arrow's handle references the new binding, not the old.
    let new_arrow = page.shapes.get(&new_binding.from_id).unwrap();
    let handle = new_arrow.handle(HandleId::End).unwrap();
    assert_eq!(handle.binding_id, Some(new_binding.id.clone()));

    // The original binding is untouched.
    let original = page.bindings.get("binding1").unwrap();
    assert_eq!(original.from_id, "arrow");
    assert_eq!(original.to_id, "target");
}

#[test]
fn duplicating_only_the_arrow_drops_the_binding_from_the_copy() {
    let mut editor = bound_arrow();
    editor.select(["arrow"]).unwrap();
    editor.duplicate().unwrap();

    let page = editor.page().unwrap();
    assert_eq!(page.bindings.len(), 1);
    let copy_id = editor.selected_ids()[0].clone();
    let handle = editor
        .shape(&copy_id)
        .unwrap()
        .handle(HandleId::End)
        .unwrap();
    assert_eq!(handle.binding_id, None);
}
