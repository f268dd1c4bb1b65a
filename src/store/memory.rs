use std::collections::HashMap;

use tracing::debug;

use super::{newest_first, GameQuery, GameResult, GameStore, PlayerStatistics};
use crate::error::StoreError;
use crate::record::{GameMode, GameRecord};

/// Process-local store, used by tests and by one-off CLI runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: Vec<GameRecord>,
    statistics: HashMap<String, PlayerStatistics>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameStore for MemoryStore {
    fn create_game(&mut self, record: GameRecord) -> Result<GameRecord, StoreError> {
        record.replay()?;
        debug!(id = %record.id, mode = %record.mode, "storing game in memory");
        self.games.push(record.clone());
        Ok(record)
    }

    fn get_game(&self, id: &str) -> Result<GameRecord, StoreError> {
        self.games
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| StoreError::GameNotFound(id.to_string()))
    }

    fn list_games(&self, query: &GameQuery) -> Result<Vec<GameRecord>, StoreError> {
        // Reverse first so equal timestamps list the later insert first.
        let matching = self
            .games
            .iter()
            .rev()
            .filter(|g| query.matches(g))
            .cloned()
            .collect();
        Ok(newest_first(matching, query.limit))
    }

    fn get_statistics(&mut self, player_id: &str) -> Result<PlayerStatistics, StoreError> {
        Ok(self
            .statistics
            .entry(player_id.to_string())
            .or_insert_with(|| PlayerStatistics::new(player_id))
            .clone())
    }

    fn record_result(
        &mut self,
        player_id: &str,
        result: GameResult,
        mode: GameMode,
    ) -> Result<PlayerStatistics, StoreError> {
        let stats = self
            .statistics
            .entry(player_id.to_string())
            .or_insert_with(|| PlayerStatistics::new(player_id));
        stats.apply(result, mode);
        Ok(stats.clone())
    }
}
