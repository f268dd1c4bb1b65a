use crate::game::{Board, Player};

/// Universal interface for all move-selecting agents.
pub trait Agent {
    /// Select a column for `player` to drop into on `board`.
    ///
    /// Returns `None` only when the board has no legal column left; any
    /// `Some` is guaranteed to be legal on `board`.
    fn select_action(&mut self, board: &Board, player: Player) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
