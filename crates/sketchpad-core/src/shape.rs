//! The closed set of shape variants and their geometric capabilities.
//!
//! Shape behavior is dispatched over [`ShapeKind`], a tagged enum covering
//! the five variants the editor supports. Each variant carries only its own
//! geometry; position, z-order and style live on [`Shape`] itself.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Point};
use crate::id::{new_id, BindingId, PageId, ShapeId};
use crate::style::ShapeStyle;

/// Estimated glyph advance for text bounds, in document units at scale 1.
const TEXT_GLYPH_WIDTH: f64 = 7.2;
/// Estimated line height for text bounds, in document units at scale 1.
const TEXT_LINE_HEIGHT: f64 = 20.0;

/// A named control point on an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    Start,
    Bend,
    End,
}

impl HandleId {
    /// The handle at the other end of the arrow. The bend handle has no
    /// opposite; it falls back to the end handle.
    pub fn opposite(self) -> HandleId {
        match self {
            HandleId::Start => HandleId::End,
            HandleId::End => HandleId::Start,
            HandleId::Bend => HandleId::End,
        }
    }
}

/// An independently positionable control point on a shape. Its point is
/// relative to the owning shape's position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handle {
    pub id: HandleId,
    pub point: Point,
    /// Set while this handle is anchored to another shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding_id: Option<BindingId>,
}

impl Handle {
    pub fn new(id: HandleId, point: Point) -> Self {
        Self {
            id,
            point,
            binding_id: None,
        }
    }
}

/// The three handles of an arrow shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowHandles {
    pub start: Handle,
    pub bend: Handle,
    pub end: Handle,
}

impl ArrowHandles {
    /// A fresh straight arrow from the local origin to `end`.
    pub fn straight_to(end: Point) -> Self {
        let mid = Point::new(end.x / 2.0, end.y / 2.0);
        Self {
            start: Handle::new(HandleId::Start, Point::default()),
            bend: Handle::new(HandleId::Bend, mid),
            end: Handle::new(HandleId::End, end),
        }
    }

    pub fn get(&self, id: HandleId) -> &Handle {
        match id {
            HandleId::Start => &self.start,
            HandleId::Bend => &self.bend,
            HandleId::End => &self.end,
        }
    }

    pub fn get_mut(&mut self, id: HandleId) -> &mut Handle {
        match id {
            HandleId::Start => &mut self.start,
            HandleId::Bend => &mut self.bend,
            HandleId::End => &mut self.end,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        [&self.start, &self.bend, &self.end].into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Handle> {
        [&mut self.start, &mut self.bend, &mut self.end].into_iter()
    }
}

/// An ornament at one end of an arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    Arrow,
}

/// Which ends of an arrow carry a decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArrowDecorations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Decoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Decoration>,
}

/// Variant-specific geometry. Serialized with a `type` tag so documents
/// read naturally as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle {
        size: Point,
    },
    Ellipse {
        radius: Point,
    },
    /// Freehand stroke; points are relative to the shape's position.
    Draw {
        points: Vec<Point>,
    },
    Arrow {
        bend: f64,
        handles: ArrowHandles,
        decorations: ArrowDecorations,
    },
    Text {
        text: String,
    },
}

/// A drawable entity on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    /// The page that owns this shape.
    pub parent_id: PageId,
    /// Z-order key; higher draws on top.
    pub child_index: f64,
    /// Position of the shape's local origin in document coordinates.
    pub point: Point,
    /// Rotation around the shape's center, in radians.
    pub rotation: f64,
    pub style: ShapeStyle,
    #[serde(flatten)]
    pub kind: ShapeKind,
}

impl Shape {
    fn base(parent_id: &PageId, point: Point, kind: ShapeKind) -> Self {
        Self {
            id: new_id(),
            parent_id: parent_id.clone(),
            child_index: 1.0,
            point,
            rotation: 0.0,
            style: ShapeStyle::default(),
            kind,
        }
    }

    pub fn rectangle(parent_id: &PageId, point: Point, size: Point) -> Self {
        Self::base(parent_id, point, ShapeKind::Rectangle { size })
    }

    pub fn ellipse(parent_id: &PageId, point: Point, radius: Point) -> Self {
        Self::base(parent_id, point, ShapeKind::Ellipse { radius })
    }

    pub fn draw(parent_id: &PageId, point: Point) -> Self {
        Self::base(
            parent_id,
            point,
            ShapeKind::Draw {
                points: vec![Point::default()],
            },
        )
    }

    pub fn arrow(parent_id: &PageId, point: Point) -> Self {
        Self::base(
            parent_id,
            point,
            ShapeKind::Arrow {
                bend: 0.0,
                handles: ArrowHandles::straight_to(Point::new(1.0, 1.0)),
                decorations: ArrowDecorations {
                    start: None,
                    end: Some(Decoration::Arrow),
                },
            },
        )
    }

    pub fn text(parent_id: &PageId, point: Point, text: impl Into<String>) -> Self {
        Self::base(parent_id, point, ShapeKind::Text { text: text.into() })
    }

    /// Replaces the generated id; intended for tests and fixtures.
    pub fn with_id(mut self, id: impl Into<ShapeId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_child_index(mut self, child_index: f64) -> Self {
        self.child_index = child_index;
        self
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// The unrotated, axis-aligned bounds of this shape in document
    /// coordinates.
    pub fn bounds(&self) -> Bounds {
        let local = match &self.kind {
            ShapeKind::Rectangle { size } => Bounds::new(0.0, 0.0, size.x, size.y),
            ShapeKind::Ellipse { radius } => Bounds::new(0.0, 0.0, radius.x * 2.0, radius.y * 2.0),
            ShapeKind::Draw { points } => Bounds::around(points),
            ShapeKind::Arrow { handles, .. } => {
                let pts: Vec<Point> = handles.iter().map(|h| h.point).collect();
                Bounds::around(&pts)
            }
            ShapeKind::Text { text } => {
                let scale = self.style.scale;
                let width = text.chars().count() as f64 * TEXT_GLYPH_WIDTH * scale;
                Bounds::new(0.0, 0.0, width.max(TEXT_GLYPH_WIDTH), TEXT_LINE_HEIGHT * scale)
            }
        };
        local.translated(self.point)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn translate_by(&mut self, delta: Point) {
        self.point = self.point.add(delta);
    }

    pub fn translate_to(&mut self, point: Point) {
        self.point = point;
    }

    /// Remaps this shape from one frame of reference into another, scaling
    /// its variant geometry relatively. This is the resize primitive: a
    /// transform session computes new common bounds and maps every selected
    /// shape through it.
    pub fn transform(&mut self, from: &Bounds, to: &Bounds) {
        let sx = if from.width() < f64::EPSILON {
            1.0
        } else {
            to.width() / from.width()
        };
        let sy = if from.height() < f64::EPSILON {
            1.0
        } else {
            to.height() / from.height()
        };

        self.point = Point::new(
            to.min_x + (self.point.x - from.min_x) * sx,
            to.min_y + (self.point.y - from.min_y) * sy,
        );

        match &mut self.kind {
            ShapeKind::Rectangle { size } => *size = size.scaled(sx, sy),
            ShapeKind::Ellipse { radius } => *radius = radius.scaled(sx, sy),
            ShapeKind::Draw { points } => {
                for p in points.iter_mut() {
                    *p = p.scaled(sx, sy);
                }
            }
            ShapeKind::Arrow { handles, .. } => {
                for h in handles.iter_mut() {
                    h.point = h.point.scaled(sx, sy);
                }
            }
            // Text keeps its metrics and scales uniformly instead.
            ShapeKind::Text { .. } => self.style.scale *= sx.abs().max(sy.abs()),
        }
    }

    /// Mirrors the shape horizontally within the given bounds.
    pub fn flip_x_within(&mut self, within: &Bounds) {
        let before = self.bounds();
        let target_min_x = within.min_x + (within.max_x - before.max_x);
        let width = before.width();
        match &mut self.kind {
            ShapeKind::Draw { points } => {
                for p in points.iter_mut() {
                    p.x = width - p.x;
                }
            }
            ShapeKind::Arrow { handles, .. } => {
                for h in handles.iter_mut() {
                    h.point.x = width - h.point.x;
                }
            }
            _ => {}
        }
        let after = self.bounds();
        self.point.x += target_min_x - after.min_x;
    }

    /// Mirrors the shape vertically within the given bounds.
    pub fn flip_y_within(&mut self, within: &Bounds) {
        let before = self.bounds();
        let target_min_y = within.min_y + (within.max_y - before.max_y);
        let height = before.height();
        match &mut self.kind {
            ShapeKind::Draw { points } => {
                for p in points.iter_mut() {
                    p.y = height - p.y;
                }
            }
            ShapeKind::Arrow { handles, .. } => {
                for h in handles.iter_mut() {
                    h.point.y = height - h.point.y;
                }
            }
            _ => {}
        }
        let after = self.bounds();
        self.point.y += target_min_y - after.min_y;
    }

    /// The arrow handles, if this shape is an arrow.
    pub fn handles(&self) -> Option<&ArrowHandles> {
        match &self.kind {
            ShapeKind::Arrow { handles, .. } => Some(handles),
            _ => None,
        }
    }

    pub fn handles_mut(&mut self) -> Option<&mut ArrowHandles> {
        match &mut self.kind {
            ShapeKind::Arrow { handles, .. } => Some(handles),
            _ => None,
        }
    }

    pub fn handle(&self, id: HandleId) -> Option<&Handle> {
        self.handles().map(|h| h.get(id))
    }

    pub fn handle_mut(&mut self, id: HandleId) -> Option<&mut Handle> {
        self.handles_mut().map(|h| h.get_mut(id))
    }

    /// Moves a handle to a point relative to the shape's position. No-op
    /// for non-arrow shapes.
    pub fn set_handle_point(&mut self, id: HandleId, point: Point) {
        if let Some(handle) = self.handle_mut(id) {
            handle.point = point;
        }
    }
}
