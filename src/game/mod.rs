//! Core Connect Four game logic: board representation, player types, the
//! rules engine, and the game state machine with immutable transitions.

mod board;
mod player;
pub mod rules;
mod state;

pub use board::{Board, Cell, Position, CENTER_COL, COLS, CONNECT_COUNT, ROWS};
pub use player::Player;
pub use rules::{apply_move, check_win, is_terminal, Direction, MoveError, WinningLine};
pub use state::{GameOutcome, GameState, GameStatus};
