//! Piece randomizer and next-piece preview
//!
//! Shape and color are drawn independently and uniformly. The random source
//! sits behind the [`Randomizer`] trait so tests and replays can script it.

use crate::board::{Cell, PieceColor};
use crate::tetromino::Shape;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Preview grid dimensions
pub const PREVIEW_WIDTH: usize = 4;
pub const PREVIEW_HEIGHT: usize = 3;

/// Source of shapes and colors for new pieces
pub trait Randomizer {
    fn next_shape(&mut self) -> Shape;
    fn next_color(&mut self) -> PieceColor;
}

/// Uniform randomizer over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngRandomizer<R = ChaCha8Rng> {
    rng: R,
}

impl RngRandomizer<ChaCha8Rng> {
    /// Reproducible randomizer for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RngRandomizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Randomizer for RngRandomizer<R> {
    fn next_shape(&mut self) -> Shape {
        let shapes = Shape::all();
        shapes[self.rng.gen_range(0..shapes.len())]
    }

    fn next_color(&mut self) -> PieceColor {
        let colors = PieceColor::all();
        colors[self.rng.gen_range(0..colors.len())]
    }
}

/// Replays fixed shape and color sequences, wrapping around at the end
#[derive(Debug, Clone)]
pub struct SequenceRandomizer {
    shapes: Vec<Shape>,
    colors: Vec<PieceColor>,
    shape_index: usize,
    color_index: usize,
}

impl SequenceRandomizer {
    /// Both sequences must be non-empty
    pub fn new(shapes: Vec<Shape>, colors: Vec<PieceColor>) -> Self {
        assert!(!shapes.is_empty() && !colors.is_empty(), "empty piece sequence");
        Self {
            shapes,
            colors,
            shape_index: 0,
            color_index: 0,
        }
    }
}

impl Randomizer for SequenceRandomizer {
    fn next_shape(&mut self) -> Shape {
        let shape = self.shapes[self.shape_index % self.shapes.len()];
        self.shape_index += 1;
        shape
    }

    fn next_color(&mut self) -> PieceColor {
        let color = self.colors[self.color_index % self.colors.len()];
        self.color_index += 1;
        color
    }
}

/// The upcoming piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextPiece {
    pub shape: Shape,
    pub color: PieceColor,
}

impl NextPiece {
    /// The piece drawn into the preview grid, rotation 0 anchored at the
    /// bottom-left corner
    pub fn preview(&self) -> [[Cell; PREVIEW_WIDTH]; PREVIEW_HEIGHT] {
        let mut grid = [[Cell::Empty; PREVIEW_WIDTH]; PREVIEW_HEIGHT];
        for (dx, dy) in self.shape.cells(0) {
            let row = PREVIEW_HEIGHT as i32 - 1 + dy;
            if let Some(cell) = usize::try_from(row)
                .ok()
                .and_then(|row| grid.get_mut(row))
                .and_then(|cells| cells.get_mut(dx as usize))
            {
                *cell = self.color.cell();
            }
        }
        grid
    }
}

/// Draws pieces and keeps the next one on display
#[derive(Debug, Clone)]
pub struct Spawner<R> {
    randomizer: R,
    next: NextPiece,
}

impl<R: Randomizer> Spawner<R> {
    pub fn new(mut randomizer: R) -> Self {
        let next = Self::draw(&mut randomizer);
        Self { randomizer, next }
    }

    fn draw(randomizer: &mut R) -> NextPiece {
        let color = randomizer.next_color();
        let shape = randomizer.next_shape();
        NextPiece { shape, color }
    }

    /// Preview the next piece without consuming it
    pub fn peek(&self) -> NextPiece {
        self.next
    }

    /// Hand out the previewed piece and draw a new one in its place
    pub fn take(&mut self) -> NextPiece {
        let upcoming = Self::draw(&mut self.randomizer);
        std::mem::replace(&mut self.next, upcoming)
    }

    /// Discard the preview and draw a fresh one
    pub fn reroll(&mut self) {
        self.next = Self::draw(&mut self.randomizer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_take_returns_preview() {
        let mut spawner = Spawner::new(SequenceRandomizer::new(
            vec![Shape::T, Shape::O],
            vec![PieceColor::Green, PieceColor::Red],
        ));
        let first = spawner.peek();
        assert_eq!(first, NextPiece { shape: Shape::T, color: PieceColor::Green });
        assert_eq!(spawner.take(), first);
        assert_eq!(spawner.peek(), NextPiece { shape: Shape::O, color: PieceColor::Red });
    }

    #[test]
    fn test_seeded_randomizer_is_reproducible() {
        let mut a = RngRandomizer::with_seed(7);
        let mut b = RngRandomizer::with_seed(7);
        for _ in 0..50 {
            assert_eq!(a.next_shape(), b.next_shape());
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn test_random_covers_all_shapes_and_colors() {
        let mut randomizer = RngRandomizer::with_seed(42);
        let shapes: HashSet<_> = (0..500).map(|_| randomizer.next_shape()).collect();
        let colors: HashSet<_> = (0..500).map(|_| randomizer.next_color()).collect();
        assert_eq!(shapes.len(), 7);
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn test_preview_grid() {
        let next = NextPiece { shape: Shape::L, color: PieceColor::Blue };
        let grid = next.preview();
        assert_eq!(grid[2][0], Cell::Blue);
        assert_eq!(grid[2][1], Cell::Blue);
        assert_eq!(grid[2][2], Cell::Blue);
        assert_eq!(grid[1][2], Cell::Blue);
        assert_eq!(grid.iter().flatten().filter(|c| c.is_filled()).count(), 4);
    }

    #[test]
    fn test_every_shape_fits_preview() {
        for shape in Shape::all() {
            let grid = NextPiece { shape, color: PieceColor::Red }.preview();
            assert_eq!(grid.iter().flatten().filter(|c| c.is_filled()).count(), 4, "{:?}", shape);
        }
    }
}
