//! Core game session: the tick-driven state machine tying board, pieces,
//! scoring and gravity together
//!
//! A session starts falling immediately. Each gravity step either moves the
//! active piece down or locks it; a lock clears zone segments, scores the
//! placement and spawns the previewed piece, unless the top row filled up,
//! in which case the board freezes gray and only [`Session::reset`] acts.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, PieceColor};
use crate::piece::Piece;
use crate::score::Score;
use crate::spawner::{NextPiece, PREVIEW_HEIGHT, PREVIEW_WIDTH, Randomizer, RngRandomizer, Spawner};
use crate::speed::Gravity;
use serde::Serialize;
use tracing::{debug, info};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    /// A piece is active and gravity runs
    Falling,
    /// The top row filled; waiting for a reset
    GameOver,
}

/// Commands a front-end can forward into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Reset,
}

/// What a driver tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Gravity not due yet
    Idle,
    /// The active piece moved down one row
    Fell,
    /// The active piece locked and the next one spawned
    Locked { lines_cleared: u32, points: u64 },
    /// The lock filled the top row; the game is over
    ToppedOut,
    /// Nothing happens after game over
    Halted,
}

/// An active piece as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub cells: [(i32, i32); 4],
    pub color: PieceColor,
}

/// The upcoming piece as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextView {
    pub grid: [[Cell; PREVIEW_WIDTH]; PREVIEW_HEIGHT],
    pub piece: NextPiece,
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub board: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
    pub active: Option<PieceView>,
    pub next: NextView,
    pub score: u64,
    pub lines: u32,
    /// Whole percent, 0-100
    pub efficiency: u32,
    pub tick_cycle: u32,
    pub state: GameState,
}

/// One game in progress
#[derive(Debug, Clone)]
pub struct Session<R = RngRandomizer> {
    board: Board,
    active: Option<Piece>,
    spawner: Spawner<R>,
    score: Score,
    gravity: Gravity,
    state: GameState,
}

impl Session<RngRandomizer> {
    /// Create a new session with a random seed
    pub fn new() -> Self {
        Self::with_randomizer(RngRandomizer::from_entropy())
    }

    /// Create a reproducible session
    pub fn with_seed(seed: u64) -> Self {
        Self::with_randomizer(RngRandomizer::with_seed(seed))
    }
}

impl Default for Session<RngRandomizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Randomizer> Session<R> {
    pub fn with_randomizer(randomizer: R) -> Self {
        Self::with_board(Board::new(), randomizer)
    }

    /// Start a session on a prepared board
    pub fn with_board(board: Board, randomizer: R) -> Self {
        let mut session = Self {
            board,
            active: None,
            spawner: Spawner::new(randomizer),
            score: Score::new(),
            gravity: Gravity::new(),
            state: GameState::Falling,
        };
        session.spawn();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> NextPiece {
        self.spawner.peek()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn lines(&self) -> u32 {
        self.score.lines
    }

    /// Efficiency as a whole percentage
    pub fn efficiency(&self) -> u32 {
        self.score.efficiency_percent()
    }

    pub fn tick_cycle(&self) -> u32 {
        self.gravity.tick_cycle()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Process a front-end command, returns whether it changed anything
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.try_move_left(),
            Action::MoveRight => self.try_move_right(),
            Action::SoftDrop => self.try_move_down(),
            Action::Rotate => self.try_rotate(),
            Action::Reset => {
                self.reset();
                true
            }
        }
    }

    fn with_active(&mut self, f: impl FnOnce(&mut Piece, &Board) -> bool) -> bool {
        if self.state != GameState::Falling {
            return false;
        }
        match self.active.as_mut() {
            Some(piece) => f(piece, &self.board),
            None => false,
        }
    }

    pub fn try_move_left(&mut self) -> bool {
        self.with_active(|piece, board| piece.move_left(board))
    }

    pub fn try_move_right(&mut self) -> bool {
        self.with_active(|piece, board| piece.move_right(board))
    }

    /// Soft drop one row. Never locks; a blocked piece waits for gravity.
    pub fn try_move_down(&mut self) -> bool {
        self.with_active(|piece, board| piece.move_down(board))
    }

    pub fn try_rotate(&mut self) -> bool {
        self.with_active(|piece, board| piece.rotate(board))
    }

    /// Advance one driver tick
    pub fn advance(&mut self) -> TickEvent {
        if self.state == GameState::GameOver {
            return TickEvent::Halted;
        }
        if self.gravity.tick() {
            self.gravity_step()
        } else {
            TickEvent::Idle
        }
    }

    /// Pull the active piece down one row now, locking it if it cannot move
    pub fn gravity_step(&mut self) -> TickEvent {
        if self.state == GameState::GameOver {
            return TickEvent::Halted;
        }
        let Some(mut piece) = self.active else {
            return TickEvent::Halted;
        };

        if piece.move_down(&self.board) {
            self.active = Some(piece);
            return TickEvent::Fell;
        }

        self.active = None;
        self.lock(piece)
    }

    fn lock(&mut self, piece: Piece) -> TickEvent {
        self.board.lock_piece(&piece.block_positions(), piece.color);
        debug!(
            shape = ?piece.shape,
            color = ?piece.color,
            col = piece.col,
            row = piece.row,
            "piece locked"
        );

        if !self.board.is_top_row_empty() {
            self.board.freeze();
            self.state = GameState::GameOver;
            info!(
                score = self.score.points,
                lines = self.score.lines,
                "game over"
            );
            return TickEvent::ToppedOut;
        }

        let lines_cleared = self.board.clear_zone_segments(piece.row, piece.height());
        let points = if lines_cleared > 0 {
            let points = self.score.add_clear(lines_cleared);
            self.gravity.update(self.score.lines);
            debug!(
                lines_cleared,
                total = self.score.lines,
                tick_cycle = self.gravity.tick_cycle(),
                "zone segments cleared"
            );
            points
        } else {
            self.score.add_landing(piece.row)
        };

        self.spawn();
        TickEvent::Locked {
            lines_cleared,
            points,
        }
    }

    /// Promote the previewed piece to the active one
    fn spawn(&mut self) {
        let NextPiece { shape, color } = self.spawner.take();
        self.active = Some(Piece::new(shape, color));
    }

    /// Start over with an empty board
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.score = Score::new();
        self.gravity.reset();
        self.state = GameState::Falling;
        self.spawner.reroll();
        self.spawn();
        debug!("session reset");
    }

    pub fn snapshot(&self) -> Snapshot {
        let next = self.spawner.peek();
        Snapshot {
            board: *self.board.rows(),
            active: self.active.map(|piece| PieceView {
                cells: piece.block_positions(),
                color: piece.color,
            }),
            next: NextView {
                grid: next.preview(),
                piece: next,
            },
            score: self.score.points,
            lines: self.score.lines,
            efficiency: self.score.efficiency_percent(),
            tick_cycle: self.gravity.tick_cycle(),
            state: self.state,
        }
    }
}
