//! Pages own shapes and bindings; page states carry per-page view state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::binding::Binding;
use crate::geometry::{Bounds, Point};
use crate::id::{new_id, BindingId, PageId, ShapeId};
use crate::shape::Shape;

/// A single page of the document: a map of shapes and a map of bindings.
///
/// Invariant: every binding's `from_id` and `to_id` resolve to shapes in
/// this page. Operations that remove shapes must run the binding resolver
/// so no binding is ever left dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: PageId,
    pub name: String,
    pub shapes: HashMap<ShapeId, Shape>,
    pub bindings: HashMap<BindingId, Binding>,
}

impl Page {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            shapes: HashMap::new(),
            bindings: HashMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<PageId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.insert(shape.id.clone(), shape);
    }

    pub fn add_binding(&mut self, binding: Binding) {
        self.bindings.insert(binding.id.clone(), binding);
    }

    /// Shape ids sorted by z-order, bottom-most first.
    pub fn shape_ids_in_order(&self) -> Vec<ShapeId> {
        let mut ids: Vec<(&ShapeId, f64)> = self
            .shapes
            .iter()
            .map(|(id, s)| (id, s.child_index))
            .collect();
        ids.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        ids.into_iter().map(|(id, _)| id.clone()).collect()
    }

    /// The z-order key a newly created shape should get to land on top.
    pub fn next_child_index(&self) -> f64 {
        self.shapes
            .values()
            .map(|s| s.child_index)
            .fold(0.0, f64::max)
            + 1.0
    }

    pub fn min_child_index(&self) -> f64 {
        self.shapes
            .values()
            .map(|s| s.child_index)
            .fold(f64::INFINITY, f64::min)
            .min(1.0)
    }

    /// The union of the bounds of the given shapes, skipping ids that are
    /// not present.
    pub fn common_bounds(&self, ids: &[ShapeId]) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for id in ids {
            if let Some(shape) = self.shapes.get(id) {
                let b = shape.bounds();
                bounds = Some(match bounds {
                    Some(acc) => acc.union(&b),
                    None => b,
                });
            }
        }
        bounds
    }
}

/// Camera position and zoom for one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub point: Point,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            point: Point::default(),
            zoom: 1.0,
        }
    }
}

/// Ephemeral per-page view state. Not an undo unit of its own, but
/// `selected_ids` is patched alongside document edits whenever an operation
/// changes the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub id: PageId,
    #[serde(default)]
    pub selected_ids: Vec<ShapeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hovered_id: Option<ShapeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editing_id: Option<ShapeId>,
    /// The drag-select rectangle while a brush session is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brush: Option<Bounds>,
    #[serde(default)]
    pub camera: Camera,
}

impl PageState {
    pub fn new(page_id: impl Into<PageId>) -> Self {
        Self {
            id: page_id.into(),
            selected_ids: Vec::new(),
            hovered_id: None,
            editing_id: None,
            brush: None,
            camera: Camera::default(),
        }
    }
}
