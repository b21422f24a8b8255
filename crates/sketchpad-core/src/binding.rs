//! Bindings anchor one shape's handle to another shape.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::id::{new_id, BindingId, ShapeId};
use crate::shape::HandleId;

/// A directed, positional relationship from a handle on `from_id` to the
/// shape `to_id`. A binding exists only while both shapes exist in the same
/// page; the binding resolver deletes it the moment either side goes away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub id: BindingId,
    /// The shape whose handle is anchored (always an arrow).
    pub from_id: ShapeId,
    /// The shape being pointed at.
    pub to_id: ShapeId,
    /// Which handle on `from_id` this binding positions.
    pub handle_id: HandleId,
    /// Anchor within the target's bounds, normalized to [0, 1] per axis.
    pub point: Point,
    /// How far short of the anchor the handle sits, along the direction
    /// from the arrow's opposite handle.
    pub distance: f64,
}

impl Binding {
    pub fn new(
        from_id: impl Into<ShapeId>,
        to_id: impl Into<ShapeId>,
        handle_id: HandleId,
        point: Point,
        distance: f64,
    ) -> Self {
        Self {
            id: new_id(),
            from_id: from_id.into(),
            to_id: to_id.into(),
            handle_id,
            point,
            distance,
        }
    }

    pub fn with_id(mut self, id: impl Into<BindingId>) -> Self {
        self.id = id.into();
        self
    }
}
