//! Active falling piece logic

use crate::board::{BOARD_WIDTH, Board, PieceColor};
use crate::tetromino::Shape;

/// Anchor column for freshly spawned pieces
pub const SPAWN_COL: i32 = BOARD_WIDTH as i32 / 2;
/// Anchor row for freshly spawned pieces, just above the board
pub const SPAWN_ROW: i32 = -1;

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    /// Index into the shape's rotation states
    pub rotation: usize,
    /// Anchor column
    pub col: i32,
    /// Anchor row, negative while above the board
    pub row: i32,
    /// Color the piece must be locked in, independent of its shape
    pub color: PieceColor,
}

impl Piece {
    /// Create a new piece at the spawn position
    pub fn new(shape: Shape, color: PieceColor) -> Self {
        Self::new_at(shape, color, SPAWN_COL, SPAWN_ROW)
    }

    pub fn new_at(shape: Shape, color: PieceColor, col: i32, row: i32) -> Self {
        Self {
            shape,
            rotation: 0,
            col,
            row,
            color,
        }
    }

    /// Absolute (col, row) of all 4 blocks
    pub fn block_positions(&self) -> [(i32, i32); 4] {
        self.positions_at(self.rotation, self.col, self.row)
    }

    fn positions_at(&self, rotation: usize, col: i32, row: i32) -> [(i32, i32); 4] {
        self.shape
            .cells(rotation)
            .map(|(dx, dy)| (col + dx, row + dy))
    }

    /// Whether this piece could occupy the given rotation and anchor
    pub fn fits(&self, board: &Board, rotation: usize, col: i32, row: i32) -> bool {
        board.are_positions_valid(&self.positions_at(rotation, col, row))
    }

    /// Number of rows the piece spans in its current rotation
    pub fn height(&self) -> usize {
        self.shape.height(self.rotation)
    }

    fn shift(&mut self, board: &Board, dcol: i32, drow: i32) -> bool {
        if self.fits(board, self.rotation, self.col + dcol, self.row + drow) {
            self.col += dcol;
            self.row += drow;
            true
        } else {
            false
        }
    }

    /// Try to move left, returns true if successful
    pub fn move_left(&mut self, board: &Board) -> bool {
        self.shift(board, -1, 0)
    }

    /// Try to move right, returns true if successful
    pub fn move_right(&mut self, board: &Board) -> bool {
        self.shift(board, 1, 0)
    }

    /// Try to move down, returns true if successful
    pub fn move_down(&mut self, board: &Board) -> bool {
        self.shift(board, 0, 1)
    }

    /// Try to advance to the next rotation in place. There are no wall
    /// kicks: a colliding rotation is simply refused.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let next = self.shape.next_rotation(self.rotation);
        if self.fits(board, next, self.col, self.row) {
            self.rotation = next;
            true
        } else {
            false
        }
    }
}
