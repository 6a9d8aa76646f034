//! Piece catalog: the 7 shapes and their rotation states
//!
//! Offsets are (dx, dy) from the piece anchor, with row 0 at the top of the
//! board. Every cell sits on or above the anchor row (dy <= 0), so a piece
//! anchored at row -1 is entirely hidden above the board.

use serde::Serialize;

type Offsets = [(i32, i32); 4];

const I_ROTATIONS: &[Offsets] = &[
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(0, 0), (0, -1), (0, -2), (0, -3)],
];

const L_ROTATIONS: &[Offsets] = &[
    [(0, 0), (1, 0), (2, 0), (2, -1)],
    [(0, -2), (1, -2), (1, -1), (1, 0)],
    [(0, 0), (0, -1), (1, -1), (2, -1)],
    [(0, -2), (0, -1), (0, 0), (1, 0)],
];

const O_ROTATIONS: &[Offsets] = &[[(0, 0), (0, -1), (1, 0), (1, -1)]];

// Z: XX.    S: .XX
//    .XX       XX.
const Z_ROTATIONS: &[Offsets] = &[
    [(0, -1), (1, -1), (1, 0), (2, 0)],
    [(0, 0), (0, -1), (1, -1), (1, -2)],
];

const T_ROTATIONS: &[Offsets] = &[
    [(0, -1), (1, -1), (2, -1), (1, 0)],
    [(0, 0), (0, -1), (0, -2), (1, -1)],
    [(0, 0), (1, 0), (2, 0), (1, -1)],
    [(1, 0), (1, -1), (1, -2), (0, -1)],
];

const J_ROTATIONS: &[Offsets] = &[
    [(0, 0), (0, -1), (1, 0), (2, 0)],
    [(1, -2), (0, -2), (0, -1), (0, 0)],
    [(2, 0), (2, -1), (1, -1), (0, -1)],
    [(1, -2), (1, -1), (1, 0), (0, 0)],
];

const S_ROTATIONS: &[Offsets] = &[
    [(2, -1), (1, -1), (1, 0), (0, 0)],
    [(1, 0), (1, -1), (0, -1), (0, -2)],
];

/// The 7 piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Shape {
    I, // straight
    L,
    O, // square
    Z,
    T,
    J,
    S,
}

impl Shape {
    /// All shapes in catalog order
    pub fn all() -> [Shape; 7] {
        [
            Shape::I,
            Shape::L,
            Shape::O,
            Shape::Z,
            Shape::T,
            Shape::J,
            Shape::S,
        ]
    }

    /// Every distinct rotation state, in cycling order
    pub fn rotations(&self) -> &'static [Offsets] {
        match self {
            Shape::I => I_ROTATIONS,
            Shape::L => L_ROTATIONS,
            Shape::O => O_ROTATIONS,
            Shape::Z => Z_ROTATIONS,
            Shape::T => T_ROTATIONS,
            Shape::J => J_ROTATIONS,
            Shape::S => S_ROTATIONS,
        }
    }

    pub fn rotation_count(&self) -> usize {
        self.rotations().len()
    }

    /// The rotation that follows `rotation`, wrapping around
    pub fn next_rotation(&self, rotation: usize) -> usize {
        (rotation + 1) % self.rotation_count()
    }

    /// Cell offsets for a rotation state (taken modulo the rotation count)
    pub fn cells(&self, rotation: usize) -> Offsets {
        let rotations = self.rotations();
        rotations[rotation % rotations.len()]
    }

    /// Number of rows spanned by a rotation state
    pub fn height(&self, rotation: usize) -> usize {
        let min_dy = self.cells(rotation).iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        (1 - min_dy.min(0)) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_state_has_four_distinct_cells() {
        for shape in Shape::all() {
            for cells in shape.rotations() {
                let unique: HashSet<_> = cells.iter().collect();
                assert_eq!(unique.len(), 4, "{:?}", shape);
            }
        }
    }

    #[test]
    fn test_cells_never_below_anchor() {
        for shape in Shape::all() {
            for cells in shape.rotations() {
                assert!(cells.iter().all(|&(dx, dy)| dy <= 0 && dx >= 0));
            }
        }
    }

    #[test]
    fn test_rotation_counts() {
        assert_eq!(Shape::I.rotation_count(), 2);
        assert_eq!(Shape::L.rotation_count(), 4);
        assert_eq!(Shape::O.rotation_count(), 1);
        assert_eq!(Shape::Z.rotation_count(), 2);
        assert_eq!(Shape::T.rotation_count(), 4);
        assert_eq!(Shape::J.rotation_count(), 4);
        assert_eq!(Shape::S.rotation_count(), 2);
    }

    #[test]
    fn test_rotation_cycle_is_closed() {
        for shape in Shape::all() {
            let mut rotation = 0;
            for _ in 0..shape.rotation_count() {
                rotation = shape.next_rotation(rotation);
            }
            assert_eq!(rotation, 0);
            assert_eq!(shape.cells(rotation), shape.cells(0));
        }
    }

    #[test]
    fn test_heights() {
        assert_eq!(Shape::I.height(0), 1);
        assert_eq!(Shape::I.height(1), 4);
        assert_eq!(Shape::O.height(0), 2);
        assert_eq!(Shape::L.height(1), 3);
        assert_eq!(Shape::T.height(2), 2);
    }
}
