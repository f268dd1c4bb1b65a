//! # Connect Four
//!
//! A Connect Four rules engine with a computer opponent. The engine is pure
//! and synchronous: boards are small `Copy` values, every move yields a new
//! board, and the AI is a depth-bounded minimax search with alpha-beta
//! pruning over a window-counting heuristic.
//!
//! ## Modules
//!
//! - [`game`] — Board, players, move application, win detection, game state
//! - [`ai`] — Agent trait, random agent, heuristic evaluator, minimax search
//! - [`session`] — Game session controller: AI turns, hints, finishing games
//! - [`record`] — Stored game records and replay
//! - [`store`] — Record and statistics storage (JSON files or in memory)
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod record;
pub mod session;
pub mod store;
