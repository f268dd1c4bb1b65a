//! Move selection: the agent trait, a uniform random agent, the window
//! heuristic, and the minimax alpha-beta search built on it.

mod agent;
pub mod heuristic;
mod minimax;
mod random;
mod strategy;

pub use agent::Agent;
pub use heuristic::{evaluate, Heuristic, WindowHeuristic};
pub use minimax::{MinimaxAgent, SearchOutcome, SearchStats, DEFAULT_SEARCH_DEPTH, WIN_SCORE};
pub use random::RandomAgent;
pub use strategy::{hint, hint_at_depth, select_move, Difficulty, Strategy};
