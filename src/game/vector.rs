use std::ops::Add;

/// A (row, col) pair measuring distance along the two board axes.
///
/// Interpreted as a position, a `Vec2` is an offset from (0, 0); interpreted
/// as a movement, it is an offset from some other position. Adding two of
/// them therefore yields another `Vec2`. Signed so that positions one step
/// off the board are representable; bounds checking is the board's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vec2 {
    pub row: i32,
    pub col: i32,
}

impl Vec2 {
    /// One step toward the left edge.
    pub const LEFT: Vec2 = Vec2 { row: 0, col: -1 };
    /// One step toward the right edge.
    pub const RIGHT: Vec2 = Vec2 { row: 0, col: 1 };
    /// One step toward the top edge.
    pub const UP: Vec2 = Vec2 { row: -1, col: 0 };
    /// One step toward the bottom edge.
    pub const DOWN: Vec2 = Vec2 { row: 1, col: 0 };

    pub fn new(row: i32, col: i32) -> Self {
        Vec2 { row, col }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.row + other.row, self.col + other.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality() {
        assert_ne!(Vec2::new(7, 12), Vec2::new(8, 13));
        assert_eq!(Vec2::new(7, 12), Vec2::new(7, 12));
    }

    #[test]
    fn test_addition() {
        let v1 = Vec2::new(8, 7);
        let v2 = Vec2::new(12, 15);
        assert_eq!(v1 + v2, Vec2::new(20, 22));
        // Addition does not modify the operands
        assert_eq!(v1, Vec2::new(8, 7));
        assert_eq!(v2, Vec2::new(12, 15));
    }

    #[test]
    fn test_direction_constants_are_unit_steps() {
        let origin = Vec2::new(1, 1);
        assert_eq!(origin + Vec2::LEFT, Vec2::new(1, 0));
        assert_eq!(origin + Vec2::RIGHT, Vec2::new(1, 2));
        assert_eq!(origin + Vec2::UP, Vec2::new(0, 1));
        assert_eq!(origin + Vec2::DOWN, Vec2::new(2, 1));
    }

    #[test]
    fn test_opposite_directions_cancel() {
        assert_eq!(Vec2::LEFT + Vec2::RIGHT, Vec2::new(0, 0));
        assert_eq!(Vec2::UP + Vec2::DOWN, Vec2::new(0, 0));
    }
}
