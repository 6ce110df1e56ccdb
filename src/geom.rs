//! Shared geometry and collision primitives
//!
//! Leaf module used by every engine: cardinal directions and Manhattan
//! distance for the grid games, axis-aligned rectangles for the
//! continuous-space games.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// A cardinal movement direction on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed scan order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit cell offset for this direction (y grows downward)
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// The opposite direction
    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True when both directions lie on the same axis
    #[inline]
    pub fn same_axis(self, other: Direction) -> bool {
        self.delta().x.abs() == other.delta().x.abs()
    }
}

/// Manhattan distance between two cells
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Axis-aligned overlap test. Touching edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_same_axis() {
        assert!(Direction::Up.same_axis(Direction::Down));
        assert!(Direction::Left.same_axis(Direction::Right));
        assert!(Direction::Left.same_axis(Direction::Left));
        assert!(!Direction::Up.same_axis(Direction::Left));
        assert!(!Direction::Right.same_axis(Direction::Down));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan(IVec2::new(1, 1), IVec2::new(4, 5)), 7);
        assert_eq!(manhattan(IVec2::new(4, 5), IVec2::new(1, 1)), 7);
        assert_eq!(manhattan(IVec2::new(3, 3), IVec2::new(3, 3)), 0);
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&Rect::new(-5.0, -5.0, 10.0, 10.0)));
        // Touching edges are not an overlap
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Clearly apart
        assert!(!a.overlaps(&Rect::new(20.0, 20.0, 4.0, 4.0)));
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 4.0, 8.0);
        assert_eq!(r.center(), Vec2::new(12.0, 24.0));
    }
}
