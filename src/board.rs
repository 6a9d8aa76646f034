//! Game board, color zones and collision detection

use serde::Serialize;

/// Board dimensions: three zones of four columns each
pub const ZONE_WIDTH: usize = 4;
pub const BOARD_WIDTH: usize = ZONE_WIDTH * 3;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Blue,
    Green,
    /// Misplaced or frozen block, never part of a zone clear
    Gray,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        !self.is_empty()
    }
}

/// The colors a piece can be assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceColor {
    Red,
    Blue,
    Green,
}

impl PieceColor {
    pub fn all() -> [PieceColor; 3] {
        [PieceColor::Red, PieceColor::Blue, PieceColor::Green]
    }

    /// The board cell this color paints
    pub fn cell(&self) -> Cell {
        match self {
            PieceColor::Red => Cell::Red,
            PieceColor::Blue => Cell::Blue,
            PieceColor::Green => Cell::Green,
        }
    }
}

/// One of the three fixed column ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Left,   // columns 0-3, red
    Middle, // columns 4-7, blue
    Right,  // columns 8-11, green
}

impl Zone {
    pub fn all() -> [Zone; 3] {
        [Zone::Left, Zone::Middle, Zone::Right]
    }

    /// The zone a column belongs to, if any
    pub fn for_column(col: i32) -> Option<Zone> {
        match col {
            0..=3 => Some(Zone::Left),
            4..=7 => Some(Zone::Middle),
            8..=11 => Some(Zone::Right),
            _ => None,
        }
    }

    pub fn color(&self) -> PieceColor {
        match self {
            Zone::Left => PieceColor::Red,
            Zone::Middle => PieceColor::Blue,
            Zone::Right => PieceColor::Green,
        }
    }

    /// Column range covered by this zone
    pub fn columns(&self) -> std::ops::Range<usize> {
        let start = match self {
            Zone::Left => 0,
            Zone::Middle => ZONE_WIDTH,
            Zone::Right => ZONE_WIDTH * 2,
        };
        start..start + ZONE_WIDTH
    }
}

/// The color a block must have to count in column `col`.
/// Columns outside the board belong to no zone and map to gray.
pub fn zone_color_for(col: i32) -> Cell {
    Zone::for_column(col).map_or(Cell::Gray, |zone| zone.color().cell())
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn is_inside(&self, col: i32, row: i32) -> bool {
        (0..BOARD_HEIGHT as i32).contains(&row) && (0..BOARD_WIDTH as i32).contains(&col)
    }

    /// Get the cell at (col, row), None if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        if !self.is_inside(col, row) {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    /// Set a cell, returns false if out of bounds
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) -> bool {
        if !self.is_inside(col, row) {
            return false;
        }
        self.cells[row as usize][col as usize] = cell;
        true
    }

    pub fn is_occupied(&self, col: i32, row: i32) -> bool {
        self.get(col, row).is_some_and(|cell| cell.is_filled())
    }

    /// Check if a single block may sit at (col, row).
    /// Above the board only the horizontal bounds apply.
    pub fn is_valid_position(&self, col: i32, row: i32) -> bool {
        if row < 0 {
            return (0..BOARD_WIDTH as i32).contains(&col);
        }
        self.is_inside(col, row) && !self.is_occupied(col, row)
    }

    /// Check if a set of block positions are all valid
    pub fn are_positions_valid(&self, positions: &[(i32, i32)]) -> bool {
        positions
            .iter()
            .all(|&(col, row)| self.is_valid_position(col, row))
    }

    /// Lock a piece's blocks onto the board.
    ///
    /// Blocks inside the zone of their color keep it, all others turn gray.
    /// Blocks still above the board are dropped.
    pub fn lock_piece(&mut self, positions: &[(i32, i32)], color: PieceColor) {
        for &(col, row) in positions {
            let cell = if zone_color_for(col) == color.cell() {
                color.cell()
            } else {
                Cell::Gray
            };
            self.set(col, row, cell);
        }
    }

    pub fn is_zone_segment_complete(&self, row: usize, zone: Zone) -> bool {
        let Some(cells) = self.cells.get(row) else {
            return false;
        };
        let expected = zone.color().cell();
        cells[zone.columns()].iter().all(|&cell| cell == expected)
    }

    pub fn clear_zone_segment(&mut self, row: usize, zone: Zone) {
        if let Some(cells) = self.cells.get_mut(row) {
            cells[zone.columns()].fill(Cell::Empty);
        }
    }

    /// Clear every complete zone segment in a row, returns how many cleared
    pub fn clear_completed_segments(&mut self, row: usize) -> usize {
        let complete: Vec<Zone> = Zone::all()
            .into_iter()
            .filter(|&zone| self.is_zone_segment_complete(row, zone))
            .collect();
        for &zone in &complete {
            self.clear_zone_segment(row, zone);
        }
        complete.len()
    }

    /// Shift every row above `row` down by one, overwriting `row`.
    /// The top row becomes empty.
    pub fn collapse_row(&mut self, row: usize) {
        if row >= BOARD_HEIGHT {
            return;
        }
        for y in (1..=row).rev() {
            self.cells[y] = self.cells[y - 1];
        }
        self.cells[0] = [Cell::Empty; BOARD_WIDTH];
    }

    /// Scan `height` rows upward from `bottom_row` for completed zone segments.
    ///
    /// Each scanned row is cleared and collapsed repeatedly until none of its
    /// segments is complete, since the row shifted in may itself be complete.
    /// Returns the number of collapses.
    pub fn clear_zone_segments(&mut self, bottom_row: i32, height: usize) -> u32 {
        let mut lines = 0;
        for row in (0..height as i32).map(|i| bottom_row - i) {
            if !(0..BOARD_HEIGHT as i32).contains(&row) {
                continue;
            }
            let row = row as usize;
            while self.clear_completed_segments(row) > 0 {
                self.collapse_row(row);
                lines += 1;
            }
        }
        lines
    }

    pub fn is_top_row_empty(&self) -> bool {
        self.cells[0].iter().all(|cell| cell.is_empty())
    }

    /// Turn every occupied cell gray (game over)
    pub fn freeze(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if cell.is_filled() {
                *cell = Cell::Gray;
            }
        }
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> &[[Cell; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.cells
    }
}
