use serde::{Deserialize, Serialize};

use crate::game::{Board, Player};

use super::agent::Agent;
use super::minimax::{MinimaxAgent, DEFAULT_SEARCH_DEPTH};
use super::random::RandomAgent;

/// How a move gets picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniform choice among legal columns.
    Random,
    /// Minimax with alpha-beta pruning to the given number of plies.
    Search { depth: usize },
}

/// The two AI tiers offered to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub fn strategy(self, search_depth: usize) -> Strategy {
        match self {
            Difficulty::Easy => Strategy::Random,
            Difficulty::Hard => Strategy::Search {
                depth: search_depth,
            },
        }
    }

    /// Build the agent backing this tier.
    pub fn agent(self, search_depth: usize, seed: Option<u64>) -> Box<dyn Agent> {
        match self {
            Difficulty::Easy => Box::new(match seed {
                Some(seed) => RandomAgent::with_seed(seed),
                None => RandomAgent::new(),
            }),
            Difficulty::Hard => Box::new(MinimaxAgent::new(search_depth)),
        }
    }
}

/// Pick a column for `player` using `strategy`. `None` means no legal column.
pub fn select_move(board: &Board, player: Player, strategy: Strategy) -> Option<usize> {
    match strategy {
        Strategy::Random => RandomAgent::new().select_action(board, player),
        Strategy::Search { depth } => MinimaxAgent::new(depth).select_action(board, player),
    }
}

/// Suggest a move for whichever side asks, using the full-strength search.
pub fn hint(board: &Board, player: Player) -> Option<usize> {
    hint_at_depth(board, player, DEFAULT_SEARCH_DEPTH)
}

/// [`hint`] with a configured search depth.
pub fn hint_at_depth(board: &Board, player: Player, depth: usize) -> Option<usize> {
    select_move(board, player, Strategy::Search { depth })
}
