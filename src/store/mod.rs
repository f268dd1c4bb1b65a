//! Persistence of finished games and player statistics.
//!
//! [`GameStore`] is the boundary the session controller talks to. Two
//! implementations ship: [`JsonFileStore`] writes one JSON document per game
//! or player, and [`MemoryStore`] keeps everything in process.

mod json_file;
mod memory;
mod statistics;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use statistics::{GameResult, PlayerStatistics};

use crate::error::StoreError;
use crate::record::{GameMode, GameRecord};

/// Filter for [`GameStore::list_games`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameQuery {
    pub limit: usize,
    pub mode: Option<GameMode>,
    /// Only games where this id played either side.
    pub player_id: Option<String>,
}

impl Default for GameQuery {
    fn default() -> Self {
        GameQuery {
            limit: 10,
            mode: None,
            player_id: None,
        }
    }
}

impl GameQuery {
    pub fn matches(&self, record: &GameRecord) -> bool {
        if self.mode.is_some_and(|mode| mode != record.mode) {
            return false;
        }
        match &self.player_id {
            Some(id) => {
                record.player1_id.as_deref() == Some(id.as_str())
                    || record.player2_id.as_deref() == Some(id.as_str())
            }
            None => true,
        }
    }
}

/// Storage for finished games and per-player statistics.
pub trait GameStore {
    /// Validate and persist a finished game. Records that do not replay
    /// cleanly are rejected.
    fn create_game(&mut self, record: GameRecord) -> Result<GameRecord, StoreError>;

    /// Fetch a game by id.
    fn get_game(&self, id: &str) -> Result<GameRecord, StoreError>;

    /// Games matching `query`, newest first.
    fn list_games(&self, query: &GameQuery) -> Result<Vec<GameRecord>, StoreError>;

    /// Statistics for `player_id`, created empty on first access.
    fn get_statistics(&mut self, player_id: &str) -> Result<PlayerStatistics, StoreError>;

    /// Fold a finished game into `player_id`'s statistics.
    fn record_result(
        &mut self,
        player_id: &str,
        result: GameResult,
        mode: GameMode,
    ) -> Result<PlayerStatistics, StoreError>;
}

/// Sort newest first and apply the limit.
fn newest_first(mut games: Vec<GameRecord>, limit: usize) -> Vec<GameRecord> {
    games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    games.truncate(limit);
    games
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::game::GameState;
    use crate::record::{GameMode, GameRecord};

    /// A finished game: Red wins along the bottom row.
    pub fn red_win(mode: GameMode, created_at: u64) -> GameRecord {
        let state = [0, 6, 1, 6, 2, 6, 3]
            .iter()
            .fold(GameState::initial(), |s, &col| s.apply_move(col).unwrap());
        let mut record = GameRecord::from_state(&state, mode).unwrap();
        record.created_at = created_at;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::red_win;
    use super::*;

    #[test]
    fn query_matches_either_side_and_mode() {
        let record = red_win(GameMode::Local, 1).with_players(Some("ann".into()), Some("ben".into()));

        let by = |id: &str| GameQuery {
            player_id: Some(id.to_string()),
            ..GameQuery::default()
        };
        assert!(by("ann").matches(&record));
        assert!(by("ben").matches(&record));
        assert!(!by("cat").matches(&record));
        assert!(GameQuery::default().matches(&record));

        let wrong_mode = GameQuery {
            mode: Some(GameMode::AiHard),
            ..by("ann")
        };
        assert!(!wrong_mode.matches(&record));
    }
}
