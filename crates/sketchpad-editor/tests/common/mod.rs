//! Shared fixtures for the integration tests.

use sketchpad_core::{Binding, Document, HandleId, Page, PageId, Point, Shape};
use sketchpad_editor::Editor;

pub const PAGE: &str = "page1";

pub fn page_id() -> PageId {
    PAGE.to_string()
}

/// A 100x100 rectangle at the given position.
pub fn rect(id: &str, x: f64, y: f64, child_index: f64) -> Shape {
    Shape::rectangle(&page_id(), Point::new(x, y), Point::new(100.0, 100.0))
        .with_id(id)
        .with_child_index(child_index)
}

/// An editor over a single known page holding the given shapes.
pub fn editor_with(shapes: Vec<Shape>) -> Editor {
    let mut page = Page::new("Page 1").with_id(PAGE);
    for shape in shapes {
        page.add_shape(shape);
    }
    let mut doc = Document::new("test");
    doc.pages.clear();
    doc.page_states.clear();
    doc.add_page(page);

    let mut editor = Editor::new();
    editor.load_document(doc).unwrap();
    editor
}

/// Three rectangles on a diagonal, z-ordered bottom to top.
pub fn three_rects() -> Editor {
    editor_with(vec![
        rect("rect1", 0.0, 0.0, 1.0),
        rect("rect2", 100.0, 100.0, 2.0),
        rect("rect3", 200.0, 200.0, 3.0),
    ])
}

/// An arrow whose end handle is bound to the center of a 50x50 target
/// rectangle at (100, 100).
pub fn bound_arrow() -> Editor {
    let target = Shape::rectangle(&page_id(), Point::new(100.0, 100.0), Point::new(50.0, 50.0))
        .with_id("target")
        .with_child_index(1.0);
    let mut arrow = Shape::arrow(&page_id(), Point::new(0.0, 0.0))
        .with_id("arrow")
        .with_child_index(2.0);
    arrow.set_handle_point(HandleId::End, Point::new(125.0, 125.0));
    if let Some(handle) = arrow.handle_mut(HandleId::End) {
        handle.binding_id = Some("binding1".to_string());
    }
    let binding = Binding::new("arrow", "target", HandleId::End, Point::new(0.5, 0.5), 0.0)
        .with_id("binding1");

    let mut editor = editor_with(vec![target, arrow]);
    let mut doc = editor.document().clone();
    doc.page_mut(&page_id()).unwrap().add_binding(binding);
    editor.load_document(doc).unwrap();
    editor
}

/// The position of a shape on the editor's current page.
pub fn shape_point(editor: &Editor, id: &str) -> Point {
    editor.shape(&id.to_string()).unwrap().point
}
