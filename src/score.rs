//! Scoring and placement efficiency

use serde::Serialize;

/// Points per collapsed line
pub const POINTS_PER_LINE: u64 = 100;
/// Landing bonus that counts as a well-placed piece
const IDEAL_LANDING_BONUS: i64 = 5;
/// Penalty mass above which both tallies are scaled down
const BAD_PIECES_LIMIT: f64 = 100.0;
const DECAY_DIVISOR: f64 = 4.0;

/// Score, line count and the running accuracy tallies
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Score {
    pub points: u64,
    pub lines: u32,
    /// Credit for placements that cleared or landed deep
    pub good_pieces: f64,
    /// Quadratic penalty for placements that did neither
    pub bad_pieces: f64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lock that collapsed `lines` lines, returns the points added
    pub fn add_clear(&mut self, lines: u32) -> u64 {
        let points = POINTS_PER_LINE * lines as u64;
        self.points += points;
        self.lines += lines;
        self.good_pieces += (points / 10) as f64;
        points
    }

    /// Record a lock that cleared nothing, with the piece anchored at `row`.
    /// Returns the points added.
    pub fn add_landing(&mut self, row: i32) -> u64 {
        let bonus = landing_bonus(row);
        self.points += bonus as u64;

        if bonus == IDEAL_LANDING_BONUS {
            self.good_pieces += 1.0;
        } else {
            self.bad_pieces += ((IDEAL_LANDING_BONUS - bonus) as f64).powi(2);
        }
        self.decay();

        bonus as u64
    }

    fn decay(&mut self) {
        if self.bad_pieces > BAD_PIECES_LIMIT {
            self.bad_pieces /= DECAY_DIVISOR;
            self.good_pieces /= DECAY_DIVISOR;
        }
    }

    /// Ratio of good to total placements, 1.0 while nothing went wrong
    pub fn efficiency(&self) -> f64 {
        if self.bad_pieces == 0.0 {
            return 1.0;
        }
        self.good_pieces / (self.good_pieces + self.bad_pieces)
    }

    /// Efficiency as a whole percentage, rounded down
    pub fn efficiency_percent(&self) -> u32 {
        (self.efficiency() * 100.0).floor() as u32
    }
}

/// Points for a piece that cleared nothing: a quarter of its anchor row,
/// rounded half up, never negative
fn landing_bonus(row: i32) -> i64 {
    (row as i64 + 2).div_euclid(4).max(0)
}
