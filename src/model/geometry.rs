//! Page geometry.
//!
//! All rectangles use a top-left origin with y growing downward, so a
//! heading's `y1` is its bottom edge and "below" means a larger `y`.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in page space (points).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl Rect {
    /// Create a rectangle from its edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// A rectangle with non-positive width or height.
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Overlapping area of two rectangles, if any.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (!r.is_empty()).then_some(r)
    }

    /// Whether `other` lies mostly inside this rectangle.
    ///
    /// A span counts as inside when its vertical midpoint falls within the
    /// rectangle and more than half of its width overlaps horizontally.
    pub fn contains_mostly(&self, other: &Rect) -> bool {
        let mid_y = (other.y0 + other.y1) / 2.0;
        if mid_y < self.y0 || mid_y > self.y1 {
            return false;
        }
        let overlap = other.x1.min(self.x1) - other.x0.max(self.x0);
        let width = other.width();
        if width <= 0.0 {
            return other.x0 >= self.x0 && other.x0 <= self.x1;
        }
        overlap / width > 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_size() {
        let a = Rect::new(10.0, 10.0, 20.0, 20.0);
        let b = Rect::new(15.0, 5.0, 40.0, 12.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(10.0, 5.0, 40.0, 20.0));
        assert_eq!(u.width(), 30.0);
        assert_eq!(u.height(), 15.0);
    }

    #[test]
    fn test_intersect_disjoint() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 20.0, 30.0, 30.0);
        assert!(a.intersect(&b).is_none());
        assert_eq!(
            a.intersect(&Rect::new(5.0, 5.0, 15.0, 15.0)),
            Some(Rect::new(5.0, 5.0, 10.0, 10.0))
        );
    }

    #[test]
    fn test_contains_mostly() {
        let region = Rect::new(0.0, 100.0, 600.0, 800.0);
        assert!(region.contains_mostly(&Rect::new(72.0, 120.0, 200.0, 132.0)));
        // Midpoint above the region
        assert!(!region.contains_mostly(&Rect::new(72.0, 90.0, 200.0, 102.0)));
        // Mostly outside horizontally
        assert!(!region.contains_mostly(&Rect::new(580.0, 120.0, 700.0, 132.0)));
    }
}
