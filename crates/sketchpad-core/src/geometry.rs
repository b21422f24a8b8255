//! Points and axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

/// Represents a 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn scaled(self, sx: f64, sy: f64) -> Point {
        Point::new(self.x * sx, self.y * sy)
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Returns the unit vector in this point's direction, or zero for a
    /// degenerate vector.
    pub fn normalized(&self) -> Point {
        let len = self.length();
        if len < f64::EPSILON {
            Point::default()
        } else {
            Point::new(self.x / len, self.y / len)
        }
    }

    /// Rotates this point around a center by the given angle in radians.
    pub fn rotated_around(&self, center: Point, angle: f64) -> Point {
        if angle.abs() < 1e-12 {
            return *self;
        }
        let (sin_a, cos_a) = angle.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point {
            x: center.x + dx * cos_a - dy * sin_a,
            y: center.y + dx * sin_a + dy * cos_a,
        }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Builds a bounds from two opposite corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Builds the tightest bounds around a set of points. An empty set
    /// yields a zero-size bounds at the origin.
    pub fn around(points: &[Point]) -> Self {
        let mut iter = points.iter();
        let Some(first) = iter.next() else {
            return Bounds::new(0.0, 0.0, 0.0, 0.0);
        };
        let mut b = Bounds::new(first.x, first.y, first.x, first.y);
        for p in iter {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        b
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    pub fn translated(&self, delta: Point) -> Bounds {
        Bounds {
            min_x: self.min_x + delta.x,
            min_y: self.min_y + delta.y,
            max_x: self.max_x + delta.x,
            max_y: self.max_y + delta.y,
        }
    }

    /// Converts an absolute point into coordinates normalized to this
    /// bounds, where (0, 0) is the top-left corner and (1, 1) the
    /// bottom-right. Degenerate axes normalize to 0.5.
    pub fn relative_point(&self, p: Point) -> Point {
        let nx = if self.width() < f64::EPSILON {
            0.5
        } else {
            (p.x - self.min_x) / self.width()
        };
        let ny = if self.height() < f64::EPSILON {
            0.5
        } else {
            (p.y - self.min_y) / self.height()
        };
        Point::new(nx, ny)
    }

    /// Converts normalized coordinates back into an absolute point.
    pub fn absolute_point(&self, anchor: Point) -> Point {
        Point::new(
            self.min_x + anchor.x * self.width(),
            self.min_y + anchor.y * self.height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_covers_both() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(5.0, -5.0, 20.0, 8.0);
        let u = a.union(&b);
        assert_eq!(u, Bounds::new(0.0, -5.0, 20.0, 10.0));
    }

    #[test]
    fn relative_and_absolute_points_round_trip() {
        let b = Bounds::new(10.0, 20.0, 110.0, 220.0);
        let p = Point::new(35.0, 70.0);
        let anchor = b.relative_point(p);
        let back = b.absolute_point(anchor);
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn from_corners_normalizes() {
        let b = Bounds::from_corners(Point::new(10.0, 10.0), Point::new(-5.0, 2.0));
        assert_eq!(b, Bounds::new(-5.0, 2.0, 10.0, 10.0));
    }

    #[test]
    fn rotation_around_center() {
        let p = Point::new(1.0, 0.0).rotated_around(Point::default(), std::f64::consts::FRAC_PI_2);
        assert!((p.x - 0.0).abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }
}
