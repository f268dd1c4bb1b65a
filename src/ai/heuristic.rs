use crate::game::{Board, Cell, Player, CENTER_COL, COLS, CONNECT_COUNT, ROWS};

/// Score for a window holding four of the evaluated player's pieces.
pub const FOUR_SCORE: i64 = 1_000_000;
pub const THREE_SCORE: i64 = 100;
pub const TWO_SCORE: i64 = 10;
/// Penalty for an opponent window one piece away from a win.
pub const OPPONENT_THREE_PENALTY: i64 = 500_000;
pub const OPPONENT_TWO_PENALTY: i64 = 10;
/// Bonus per own piece in the centre column.
pub const CENTER_BONUS: i64 = 3;

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send + Sync {
    fn evaluate(&self, board: &Board, player: Player) -> i64;
}

/// Default heuristic that scans all 4-cell windows and scores threats.
///
/// An opponent three is weighted far above an own three, so the search never
/// ignores an immediate threat, but an own completed four outweighs both.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowHeuristic;

impl WindowHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> i64 {
        match (own, opp, empty) {
            (4, _, _) => FOUR_SCORE,
            (3, _, 1) => THREE_SCORE,
            (2, _, 2) => TWO_SCORE,
            (_, 3, 1) => -OPPONENT_THREE_PENALTY,
            (_, 2, 2) => -OPPONENT_TWO_PENALTY,
            _ => 0,
        }
    }

    /// Score the window starting at `(row, col)` and stepping by `(dr, dc)`.
    fn window(board: &Board, player: Player, start: (usize, usize), step: (isize, isize)) -> i64 {
        let own_cell = player.to_cell();
        let (mut own, mut opp, mut empty) = (0, 0, 0);
        for i in 0..CONNECT_COUNT as isize {
            let row = (start.0 as isize + step.0 * i) as usize;
            let col = (start.1 as isize + step.1 * i) as usize;
            match board.get(row, col) {
                Cell::Empty => empty += 1,
                c if c == own_cell => own += 1,
                _ => opp += 1,
            }
        }
        Self::score_window(own, opp, empty)
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i64 {
        let own_cell = player.to_cell();
        let span = CONNECT_COUNT - 1;

        // Center column bonus
        let mut score = (0..ROWS)
            .filter(|&row| board.get(row, CENTER_COL) == own_cell)
            .count() as i64
            * CENTER_BONUS;

        // Horizontal
        for row in 0..ROWS {
            for col in 0..COLS - span {
                score += Self::window(board, player, (row, col), (0, 1));
            }
        }

        // Vertical
        for col in 0..COLS {
            for row in 0..ROWS - span {
                score += Self::window(board, player, (row, col), (1, 0));
            }
        }

        // Diagonal (top-left to bottom-right)
        for row in 0..ROWS - span {
            for col in 0..COLS - span {
                score += Self::window(board, player, (row, col), (1, 1));
            }
        }

        // Diagonal (bottom-left to top-right)
        for row in span..ROWS {
            for col in 0..COLS - span {
                score += Self::window(board, player, (row, col), (-1, 1));
            }
        }

        score
    }
}

/// Score `board` for `player` with the default window heuristic.
pub fn evaluate(board: &Board, player: Player) -> i64 {
    WindowHeuristic.evaluate(board, player)
}
