use crate::grid::{Cell, Grid, PieceId};
use crate::piece::{Direction, Piece};
use crate::shape::{RandomSource, ShapeSource};

// ============================================================================
// Configuration
// ============================================================================

pub const GRID_WIDTH: i16 = 10;
pub const GRID_HEIGHT: i16 = 20;

// Timing (in milliseconds)
pub const FALL_INTERVAL_MS: u64 = 800;

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameState {
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PieceMoved,
    PieceRotated,
    PieceLocked(PieceId),
    RowsCleared(u32),
    Paused,
    Unpaused,
    GameRestarted,
    GameOver,
}

// ============================================================================
// Game
// ============================================================================

/// Drives one session: owns the grid, the active piece and the shape
/// stream, and runs the lock pipeline (clear rows, check the top row,
/// spawn the next piece) whenever a piece comes to rest. The fall cadence
/// itself belongs to the caller, which invokes [`Game::tick`] on a timer.
pub struct Game {
    pub grid: Grid,
    pub state: GameState,
    pub rows_cleared: u32,
    piece: Option<Piece>,
    source: Box<dyn ShapeSource>,
    next_id: u32,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_source(Box::new(RandomSource))
    }

    pub fn with_source(source: Box<dyn ShapeSource>) -> Self {
        Self::with_grid(Grid::new(GRID_WIDTH, GRID_HEIGHT), source)
    }

    /// Starts a session on a prepared grid (tests fill rows up front).
    pub fn with_grid(grid: Grid, source: Box<dyn ShapeSource>) -> Self {
        let mut game = Self {
            grid,
            state: GameState::Playing,
            rows_cleared: 0,
            piece: None,
            source,
            next_id: 0,
            events: Vec::new(),
        };
        game.spawn_piece();
        game
    }

    /// Fixed spawn anchor: middle column, one row above the visible grid.
    fn spawn_anchor(&self) -> Cell {
        Cell::new(self.grid.width() / 2, self.grid.height())
    }

    fn spawn_piece(&mut self) {
        let kind = self.source.next_shape();
        let id = PieceId(self.next_id);
        self.next_id += 1;
        let anchor = self.spawn_anchor();
        match Piece::spawn(&mut self.grid, id, kind, anchor) {
            Some(piece) => self.piece = Some(piece),
            None => {
                // Nowhere to put the next piece: the session is over.
                self.state = GameState::GameOver;
                self.events.push(GameEvent::GameOver);
            }
        }
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// One sideways or downward step. A rejected downward step locks the
    /// piece and runs the lock pipeline before returning.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        if piece.try_move(&mut self.grid, direction) {
            self.events.push(GameEvent::PieceMoved);
            return true;
        }
        if piece.is_locked() {
            self.finish_piece();
        }
        false
    }

    pub fn rotate_piece(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        let Some(piece) = self.piece.as_mut() else {
            return false;
        };
        if piece.try_rotate(&mut self.grid) {
            self.events.push(GameEvent::PieceRotated);
            return true;
        }
        false
    }

    /// Gravity step, invoked by the caller's fall timer.
    pub fn tick(&mut self) {
        self.move_piece(Direction::Down);
    }

    /// Player-accelerated gravity: same step, same locking.
    pub fn soft_drop(&mut self) {
        self.move_piece(Direction::Down);
    }

    /// Drops straight to rest and locks.
    pub fn hard_drop(&mut self) {
        while self.move_piece(Direction::Down) {}
    }

    /// Lock pipeline. Runs synchronously between a piece coming to rest
    /// and the next spawn, so exactly one piece is ever active and no row
    /// clear races a falling piece.
    fn finish_piece(&mut self) {
        let Some(id) = self.piece.as_ref().map(Piece::id) else {
            return;
        };
        self.events.push(GameEvent::PieceLocked(id));
        let cleared = self.grid.clear_completed_rows();
        if cleared > 0 {
            self.rows_cleared += cleared;
            self.events.push(GameEvent::RowsCleared(cleared));
        }
        if self.grid.is_top_row_filled() {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver);
        } else {
            self.spawn_piece();
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Playing => {
                self.state = GameState::Paused;
                self.events.push(GameEvent::Paused);
            }
            GameState::Paused => {
                self.state = GameState::Playing;
                self.events.push(GameEvent::Unpaused);
            }
            GameState::GameOver => {
                // Cannot pause when the game is over
            }
        }
    }

    /// New session on the same grid dimensions.
    pub fn restart(&mut self) {
        self.grid.reset();
        self.state = GameState::Playing;
        self.rows_cleared = 0;
        self.piece = None;
        self.next_id = 0;
        self.events.clear();
        self.events.push(GameEvent::GameRestarted);
        self.spawn_piece();
    }

    /// Takes and clears all pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
