//! Falling-block placement engine with a terminal front end.
//!
//! The engine is three small modules: [`grid`] stores cell occupancy and
//! clears completed rows, [`piece`] moves and rotates the active tetromino
//! against it, and [`shape`] holds the block-offset tables. [`game`] glues
//! them together for a timer-driven caller; the binary in `src/main.rs`
//! renders the whole thing with ratatui.

pub mod game;
pub mod grid;
pub mod piece;
pub mod shape;
