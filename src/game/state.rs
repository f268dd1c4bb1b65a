use super::board::{Board, Position, COLS};
use super::player::Player;
use super::rules::{self, MoveError, WinningLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

impl GameOutcome {
    /// Winner code used in stored game records (0 = draw, 1 = Red, 2 = Yellow).
    pub fn code(self) -> u8 {
        match self {
            GameOutcome::Winner(player) => player.code(),
            GameOutcome::Draw => 0,
        }
    }

    pub fn from_code(code: u8) -> Option<GameOutcome> {
        match code {
            0 => Some(GameOutcome::Draw),
            other => Player::from_code(other).map(GameOutcome::Winner),
        }
    }
}

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished(GameOutcome),
}

/// One game: board, side to move, outcome, and the moves that led here.
///
/// Transitions are immutable and one-way: once an outcome is set every
/// further move fails with [`MoveError::GameOver`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    winning_line: Option<WinningLine>,
    history: Vec<Position>,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            outcome: None,
            winning_line: None,
            history: Vec::new(),
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn status(&self) -> GameStatus {
        match self.outcome {
            Some(outcome) => GameStatus::Finished(outcome),
            None => GameStatus::InProgress,
        }
    }

    /// The line that decided the game, if it was won.
    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    /// Landing positions of every move so far, oldest first.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Position> {
        self.history.last().copied()
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| self.board.is_legal_column(col))
            .collect()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let (board, position) = rules::apply_move(&self.board, column, self.current_player)?;

        let winning_line = rules::check_win(&board, position);
        let outcome = if winning_line.is_some() {
            Some(GameOutcome::Winner(self.current_player))
        } else if board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };

        let mut history = self.history.clone();
        history.push(position);

        Ok(GameState {
            board,
            // The side stays put once the game ends so callers can read who moved last.
            current_player: if outcome.is_some() {
                self.current_player
            } else {
                self.current_player.other()
            },
            outcome,
            winning_line,
            history,
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
