//! Geometric primitives shared by measurement, drawing and hit-testing.
//!
//! Coordinates grow rightward and downward. Callers convert into that
//! convention before building a [`Rect`].

use serde::{Deserialize, Serialize};

/// Rendered width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box.
///
/// `top <= bottom` and `left <= right` are expected from the caller and are
/// not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Rect {
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Box anchored at `(x, y)` with the given size.
    pub fn from_origin(x: f64, y: f64, size: Size) -> Self {
        Self::new(y, y + size.height, x, x + size.width)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether the point lies inside the box. Edges are inclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Whether the two boxes overlap. Boxes that only share an edge or a
    /// corner count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.left > other.right
            || self.right < other.left
            || self.top > other.bottom
            || self.bottom < other.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_every_edge() {
        let rect = Rect::new(0.0, 10.0, 0.0, 10.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(0.0, 10.0));
        assert!(rect.contains(5.0, 5.0));
        assert!(!rect.contains(10.5, 5.0));
        assert!(!rect.contains(5.0, -0.1));
    }

    #[test]
    fn edge_touching_boxes_intersect() {
        let a = Rect::new(0.0, 10.0, 0.0, 10.0);
        let b = Rect::new(10.0, 20.0, 10.0, 20.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn separated_boxes_do_not_intersect() {
        let a = Rect::new(0.0, 5.0, 0.0, 5.0);
        let b = Rect::new(6.0, 10.0, 6.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn intersection_is_symmetric() {
        let boxes = [
            Rect::new(0.0, 5.0, 0.0, 5.0),
            Rect::new(2.0, 3.0, 2.0, 3.0),
            Rect::new(5.0, 9.0, -4.0, 0.0),
            Rect::new(-3.0, -1.0, 1.0, 2.0),
            Rect::new(6.0, 7.0, 6.0, 7.0),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn from_origin_builds_extents() {
        let rect = Rect::from_origin(4.0, 2.0, Size::new(10.0, 6.0));
        assert_eq!(rect, Rect::new(2.0, 8.0, 4.0, 14.0));
        assert_eq!(rect.width(), 10.0);
        assert_eq!(rect.height(), 6.0);
    }
}
