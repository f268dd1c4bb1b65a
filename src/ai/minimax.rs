use tracing::debug;

use crate::game::{apply_move, check_win, Board, Player, Position, CENTER_COL};

use super::agent::Agent;
use super::heuristic::{Heuristic, WindowHeuristic};

/// Base score for a decided game. Remaining depth is added on top so that
/// quicker wins (and slower losses) are preferred.
pub const WIN_SCORE: i64 = 1_000_000;

/// Plies searched when no depth is configured.
pub const DEFAULT_SEARCH_DEPTH: usize = 5;

/// Counters collected during one root search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Result of a root search: the chosen column and its minimax value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub column: usize,
    pub score: i64,
    pub stats: SearchStats,
}

/// Depth-bounded minimax agent with alpha-beta pruning.
///
/// Columns are searched in ascending order and the root keeps the first
/// column with the strictly greatest value, so results are deterministic.
pub struct MinimaxAgent {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    /// Create an agent searching `depth` plies (at least one).
    pub fn new(depth: usize) -> Self {
        MinimaxAgent {
            depth: depth.max(1),
            heuristic: Box::new(WindowHeuristic),
        }
    }

    pub fn with_heuristic(depth: usize, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            depth: depth.max(1),
            heuristic,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Search `board` for `player`. `None` when no column is playable.
    pub fn search(&self, board: &Board, player: Player) -> Option<SearchOutcome> {
        let legal = board.legal_columns();
        if legal.is_empty() {
            return None;
        }

        // Opening book: the centre column is the strongest first move.
        if board.is_empty() {
            return Some(SearchOutcome {
                column: CENTER_COL,
                score: 0,
                stats: SearchStats::default(),
            });
        }

        let mut stats = SearchStats::default();
        let mut best_column = legal[0];
        let mut best_score = i64::MIN;

        for &col in &legal {
            let Ok((child, pos)) = apply_move(board, col, player) else {
                continue;
            };
            let score = self.minimax(
                &child,
                pos,
                self.depth - 1,
                i64::MIN,
                i64::MAX,
                false,
                player,
                &mut stats,
            );
            if score > best_score {
                best_score = score;
                best_column = col;
            }
        }

        debug!(
            player = player.name(),
            column = best_column,
            score = best_score,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            "search finished"
        );

        Some(SearchOutcome {
            column: best_column,
            score: best_score,
            stats,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        board: &Board,
        last_move: Position,
        depth: usize,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
        ai: Player,
        stats: &mut SearchStats,
    ) -> i64 {
        stats.nodes += 1;

        if let Some(line) = check_win(board, last_move) {
            return if line.player() == ai {
                WIN_SCORE + depth as i64
            } else {
                -WIN_SCORE - depth as i64
            };
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            return self.heuristic.evaluate(board, ai);
        }

        let mover = if maximizing { ai } else { ai.other() };
        let mut value = if maximizing { i64::MIN } else { i64::MAX };

        for col in board.legal_columns() {
            let Ok((child, pos)) = apply_move(board, col, mover) else {
                continue;
            };
            let score = self.minimax(&child, pos, depth - 1, alpha, beta, !maximizing, ai, stats);

            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if alpha >= beta {
                stats.cutoffs += 1;
                break;
            }
        }

        value
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &Board, player: Player) -> Option<usize> {
        self.search(board, player).map(|outcome| outcome.column)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
