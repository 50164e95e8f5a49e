use std::fmt;

use crate::grid::{Direction, Offset};

/// A point on the integer design grid.
///
/// Points are plain values; the staged offset of an element being dragged
/// lives on the element itself (see [`Offset`]), so two points compare equal
/// exactly when their coordinates match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a new point at the given coordinates.
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by the given deltas.
    #[must_use]
    pub fn offset_by(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns this point with a staged offset applied.
    #[must_use]
    pub fn translated(self, offset: Offset) -> Self {
        self.offset_by(offset.dx, offset.dy)
    }

    /// Returns the point one grid unit away in the given direction.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset_by(dx, dy)
    }

    /// Returns the Manhattan distance to another point.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> i32 {
        (other.x - self.x).abs() + (other.y - self.y).abs()
    }

    /// Returns `true` if this point lies on the axis-aligned span from
    /// `start` to `end`, endpoints included.
    ///
    /// All three points must share an axis; a point off the span's line is
    /// never between, even inside its bounding box.
    #[must_use]
    pub fn is_between(self, start: Self, end: Self) -> bool {
        if start.x == end.x && self.x == start.x {
            (self.y >= start.y && self.y <= end.y) || (self.y <= start.y && self.y >= end.y)
        } else if start.y == end.y && self.y == start.y {
            (self.x >= start.x && self.x <= end.x) || (self.x <= start.x && self.x >= end.x)
        } else {
            false
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn between_horizontal_span() {
        assert!(p(2, 0).is_between(p(0, 0), p(4, 0)));
        assert!(p(2, 0).is_between(p(4, 0), p(0, 0)));
    }

    #[test]
    fn between_vertical_span() {
        assert!(p(3, 2).is_between(p(3, 5), p(3, 0)));
    }

    #[test]
    fn between_includes_endpoints() {
        assert!(p(0, 0).is_between(p(0, 0), p(4, 0)));
        assert!(p(4, 0).is_between(p(0, 0), p(4, 0)));
    }

    #[test]
    fn between_rejects_off_axis_point() {
        // Inside the bounding box but not on the span's line.
        assert!(!p(2, 1).is_between(p(0, 0), p(4, 0)));
    }

    #[test]
    fn between_rejects_point_past_span() {
        assert!(!p(5, 0).is_between(p(0, 0), p(4, 0)));
    }

    #[test]
    fn manhattan_distance_sums_both_axes() {
        assert_eq!(p(1, 1).manhattan_distance(p(4, -3)), 7);
        assert_eq!(p(2, 2).manhattan_distance(p(2, 2)), 0);
    }

    #[test]
    fn step_follows_direction_deltas() {
        assert_eq!(p(1, 1).step(Direction::Up), p(1, 0));
        assert_eq!(p(1, 1).step(Direction::Down), p(1, 2));
        assert_eq!(p(1, 1).step(Direction::Left), p(0, 1));
        assert_eq!(p(1, 1).step(Direction::Right), p(2, 1));
    }
}
