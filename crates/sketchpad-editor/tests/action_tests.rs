//! Atomic actions through the editor: one command each, clean undo/redo.

mod common;

use common::{editor_with, page_id, rect, shape_point, three_rects};
use sketchpad_core::Point;
use sketchpad_editor::{AlignType, DistributeType, FlipType, MoveType, StretchType};

#[test]
fn duplicate_offsets_the_copy_and_selects_it() {
    let mut editor = three_rects();
    editor.select(["rect1"]).unwrap();
    editor.duplicate().unwrap();

    assert_eq!(editor.page().unwrap().shapes.len(), 4);
    let selected = editor.selected_ids();
    assert_eq!(selected.len(), 1);
    let copy_id = selected[0].clone();
    assert_ne!(copy_id, "rect1");

    let copy = editor.shape(&copy_id).unwrap();
    assert_eq!(copy.point, Point::new(16.0, 16.0));
    // The copy lands on top of everything.
    assert_eq!(copy.child_index, 4.0);
    // The original is untouched.
    assert_eq!(shape_point(&editor, "rect1"), Point::new(0.0, 0.0));
}

#[test]
fn duplicate_redo_reuses_the_same_id() {
    let mut editor = three_rects();
    editor.select(["rect1"]).unwrap();
    editor.duplicate().unwrap();
    let copy_id = editor.selected_ids()[0].clone();

    assert!(editor.undo().unwrap());
    assert_eq!(editor.page().unwrap().shapes.len(), 3);
    assert!(editor.shape(&copy_id).is_none());
    assert_eq!(editor.selected_ids(), vec!["rect1".to_string()]);

    // Redo replays the recorded patch; the copy keeps its id.
    assert!(editor.redo().unwrap());
    assert_eq!(editor.page().unwrap().shapes.len(), 4);
    assert!(editor.shape(&copy_id).is_some());
    assert_eq!(editor.selected_ids(), vec![copy_id]);
}

#[test]
fn duplicate_with_nothing_selected_is_a_no_op() {
    let mut editor = three_rects();
    editor.duplicate().unwrap();
    assert_eq!(editor.page().unwrap().shapes.len(), 3);
    assert!(editor.history().is_empty());
}

#[test]
fn copy_and_paste_insert_fresh_ids() {
    let mut editor = three_rects();
    editor.select(["rect1", "rect2"]).unwrap();
    editor.copy_selection().unwrap();
    editor.paste().unwrap();

    assert_eq!(editor.page().unwrap().shapes.len(), 5);
    let selected = editor.selected_ids();
    assert_eq!(selected.len(), 2);
    for id in &selected {
        assert!(id != "rect1" && id != "rect2");
    }

    // Pasting again mints another set of ids.
    editor.paste().unwrap();
    assert_eq!(editor.page().unwrap().shapes.len(), 7);

    assert!(editor.undo().unwrap());
    assert!(editor.undo().unwrap());
    assert_eq!(editor.page().unwrap().shapes.len(), 3);
}

#[test]
fn paste_with_empty_clipboard_is_a_no_op() {
    let mut editor = three_rects();
    editor.paste().unwrap();
    assert_eq!(editor.page().unwrap().shapes.len(), 3);
    assert!(editor.history().is_empty());
}

#[test]
fn delete_removes_shapes_and_clears_selection() {
    let mut editor = three_rects();
    editor.select(["rect1", "rect3"]).unwrap();
    editor.delete_selection().unwrap();

    assert_eq!(editor.page().unwrap().shapes.len(), 1);
    assert!(editor.shape(&"rect2".to_string()).is_some());
    assert!(editor.selected_ids().is_empty());

    assert!(editor.undo().unwrap());
    assert_eq!(editor.page().unwrap().shapes.len(), 3);
    assert_eq!(
        editor.selected_ids(),
        vec!["rect1".to_string(), "rect3".to_string()]
    );
}

#[test]
fn align_left_shares_the_minimum_x() {
    let mut editor = three_rects();
    editor.select(["rect1", "rect2", "rect3"]).unwrap();
    editor.align(AlignType::Left).unwrap();

    assert_eq!(shape_point(&editor, "rect1").x, 0.0);
    assert_eq!(shape_point(&editor, "rect2").x, 0.0);
    assert_eq!(shape_point(&editor, "rect3").x, 0.0);
    // The vertical positions are untouched.
    assert_eq!(shape_point(&editor, "rect2").y, 100.0);

    assert!(editor.undo().unwrap());
    assert_eq!(shape_point(&editor, "rect2").x, 100.0);
}

#[test]
fn align_needs_at_least_two_shapes() {
    let mut editor = three_rects();
    editor.select(["rect2"]).unwrap();
    editor.align(AlignType::Left).unwrap();
    assert_eq!(shape_point(&editor, "rect2").x, 100.0);
    assert!(editor.history().is_empty());
}

#[test]
fn distribute_spaces_centers_evenly() {
    let mut editor = editor_with(vec![
        rect("rect1", 0.0, 0.0, 1.0),
        rect("rect2", 30.0, 0.0, 2.0),
        rect("rect3", 200.0, 0.0, 3.0),
    ]);
    editor.select(["rect1", "rect2", "rect3"]).unwrap();
    editor.distribute(DistributeType::Horizontal).unwrap();

    // Outer centers at 50 and 250 stay fixed; the middle lands at 150.
    assert_eq!(shape_point(&editor, "rect1").x, 0.0);
    assert_eq!(shape_point(&editor, "rect2").x, 100.0);
    assert_eq!(shape_point(&editor, "rect3").x, 200.0);

    assert!(editor.undo().unwrap());
    assert_eq!(shape_point(&editor, "rect2").x, 30.0);
}

#[test]
fn distribute_needs_at_least_three_shapes() {
    let mut editor = three_rects();
    editor.select(["rect1", "rect2"]).unwrap();
    editor.distribute(DistributeType::Horizontal).unwrap();
    assert!(editor.history().is_empty());
}

#[test]
fn stretch_fills_the_common_bounds_on_one_axis() {
    let mut editor = three_rects();
    editor.select(["rect1", "rect3"]).unwrap();
    editor.stretch(StretchType::Horizontal).unwrap();

    let b1 = editor.shape(&"rect1".to_string()).unwrap().bounds();
    let b3 = editor.shape(&"rect3".to_string()).unwrap().bounds();
    assert_eq!((b1.min_x, b1.max_x), (0.0, 300.0));
    assert_eq!((b3.min_x, b3.max_x), (0.0, 300.0));
    // Heights are untouched.
    assert_eq!(b1.height(), 100.0);

    assert!(editor.undo().unwrap());
    let b1 = editor.shape(&"rect1".to_string()).unwrap().bounds();
    assert_eq!(b1.width(), 100.0);
}

#[test]
fn flip_horizontal_mirrors_positions() {
    let mut editor = three_rects();
    editor.select(["rect1", "rect3"]).unwrap();
    editor.flip(FlipType::Horizontal).unwrap();

    // Common bounds span x 0..300; the two rects trade places.
    assert_eq!(shape_point(&editor, "rect1"), Point::new(200.0, 0.0));
    assert_eq!(shape_point(&editor, "rect3"), Point::new(0.0, 200.0));

    assert!(editor.undo().unwrap());
    assert_eq!(shape_point(&editor, "rect1"), Point::new(0.0, 0.0));
}

#[test]
fn move_to_front_raises_the_selection() {
    let mut editor = three_rects();
    editor.select(["rect1"]).unwrap();
    editor.reorder(MoveType::ToFront).unwrap();

    let page = editor.page().unwrap();
    assert_eq!(
        page.shape_ids_in_order(),
        vec![
            "rect2".to_string(),
            "rect3".to_string(),
            "rect1".to_string()
        ]
    );

    assert!(editor.undo().unwrap());
    assert_eq!(
        editor.page().unwrap().shape_ids_in_order(),
        vec![
            "rect1".to_string(),
            "rect2".to_string(),
            "rect3".to_string()
        ]
    );
}

#[test]
fn move_backward_steps_one_position() {
    let mut editor = three_rects();
    editor.select(["rect3"]).unwrap();
    editor.reorder(MoveType::Backward).unwrap();

    assert_eq!(
        editor.page().unwrap().shape_ids_in_order(),
        vec![
            "rect1".to_string(),
            "rect3".to_string(),
            "rect2".to_string()
        ]
    );
}

#[test]
fn reorder_of_already_frontmost_shape_records_nothing() {
    let mut editor = three_rects();
    editor.select(["rect3"]).unwrap();
    editor.reorder(MoveType::ToFront).unwrap();
    assert!(editor.history().is_empty());
}

#[test]
fn deleting_a_missing_id_is_a_no_op() {
    let editor = three_rects();
    let ids = vec!["ghost".to_string(), "rect1".to_string()];
    let (after, _) =
        sketchpad_editor::actions::delete(editor.document(), &page_id(), &ids).unwrap();
    // The unknown id is skipped; the known one is still deleted.
    assert_eq!(after.page(&page_id()).unwrap().shapes.len(), 2);
}

#[test]
fn text_shapes_participate_in_actions() {
    let text = sketchpad_core::Shape::text(&page_id(), Point::new(50.0, 50.0), "hi")
        .with_id("text1")
        .with_child_index(4.0);
    let mut editor = three_rects();
    let mut doc = editor.document().clone();
    doc.page_mut(&page_id()).unwrap().add_shape(text);
    editor.load_document(doc).unwrap();

    editor.select(["text1"]).unwrap();
    editor.duplicate().unwrap();
    assert_eq!(editor.page().unwrap().shapes.len(), 5);
    let copy = editor.shape(&editor.selected_ids()[0]).unwrap();
    assert_eq!(copy.point, Point::new(66.0, 66.0));
}
