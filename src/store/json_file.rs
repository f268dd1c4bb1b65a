use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::{newest_first, GameQuery, GameResult, GameStore, PlayerStatistics};
use crate::error::StoreError;
use crate::record::{GameMode, GameRecord};

const GAMES_DIR: &str = "games";
const STATISTICS_DIR: &str = "statistics";

/// Store that keeps one pretty-printed JSON file per game and per player:
///
/// ```text
/// <root>/games/<game-id>.json
/// <root>/statistics/<player-id>.json
/// ```
///
/// Files are written to a `.tmp` sibling and renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(GAMES_DIR))?;
        fs::create_dir_all(root.join(STATISTICS_DIR))?;
        info!(root = %root.display(), "opened game store");
        Ok(JsonFileStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn game_path(&self, id: &str) -> Result<PathBuf, StoreError> {
        validate_id(id)?;
        Ok(self.root.join(GAMES_DIR).join(format!("{id}.json")))
    }

    fn statistics_path(&self, player_id: &str) -> Result<PathBuf, StoreError> {
        validate_id(player_id)?;
        Ok(self.root.join(STATISTICS_DIR).join(format!("{player_id}.json")))
    }

    fn load_statistics(&self, player_id: &str) -> Result<PlayerStatistics, StoreError> {
        let path = self.statistics_path(player_id)?;
        if path.exists() {
            read_json(&path)
        } else {
            Ok(PlayerStatistics::new(player_id))
        }
    }
}

/// Ids become file names, so keep them to a safe alphabet.
fn validate_id(id: &str) -> Result<(), StoreError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

impl GameStore for JsonFileStore {
    #[instrument(skip(self, record), fields(id = %record.id))]
    fn create_game(&mut self, record: GameRecord) -> Result<GameRecord, StoreError> {
        record.replay()?;
        let path = self.game_path(&record.id)?;
        write_json(&path, &record)?;
        info!(path = %path.display(), moves = record.moves.len(), "game saved");
        Ok(record)
    }

    #[instrument(skip(self))]
    fn get_game(&self, id: &str) -> Result<GameRecord, StoreError> {
        let path = self.game_path(id)?;
        if !path.exists() {
            return Err(StoreError::GameNotFound(id.to_string()));
        }
        read_json(&path)
    }

    #[instrument(skip(self))]
    fn list_games(&self, query: &GameQuery) -> Result<Vec<GameRecord>, StoreError> {
        let mut games = Vec::new();
        for entry in fs::read_dir(self.root.join(GAMES_DIR))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_json::<GameRecord>(&path) {
                Ok(record) if query.matches(&record) => games.push(record),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "skipping unreadable game file"),
            }
        }
        debug!(found = games.len(), "listed games");
        Ok(newest_first(games, query.limit))
    }

    #[instrument(skip(self))]
    fn get_statistics(&mut self, player_id: &str) -> Result<PlayerStatistics, StoreError> {
        let path = self.statistics_path(player_id)?;
        if path.exists() {
            return read_json(&path);
        }
        let stats = PlayerStatistics::new(player_id);
        write_json(&path, &stats)?;
        debug!(player_id, "created statistics");
        Ok(stats)
    }

    #[instrument(skip(self))]
    fn record_result(
        &mut self,
        player_id: &str,
        result: GameResult,
        mode: GameMode,
    ) -> Result<PlayerStatistics, StoreError> {
        let mut stats = self.load_statistics(player_id)?;
        stats.apply(result, mode);
        write_json(&self.statistics_path(player_id)?, &stats)?;
        info!(
            player_id,
            played = stats.games_played,
            streak = stats.current_win_streak,
            "statistics updated"
        );
        Ok(stats)
    }
}
