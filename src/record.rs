//! The stored shape of a finished game, and its replay through the rules
//! engine.

use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::game::{GameOutcome, GameState, MoveError, Player};

/// How a game was played. `Online` is accepted in stored records but cannot
/// be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    Local,
    AiEasy,
    AiHard,
    Online,
}

impl GameMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Local => "local",
            GameMode::AiEasy => "ai_easy",
            GameMode::AiHard => "ai_hard",
            GameMode::Online => "online",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Local => "Local 2P",
            GameMode::AiEasy => "vs AI Easy",
            GameMode::AiHard => "vs AI Hard",
            GameMode::Online => "Online",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(GameMode::Local),
            "ai_easy" => Ok(GameMode::AiEasy),
            "ai_hard" => Ok(GameMode::AiHard),
            "online" => Ok(GameMode::Online),
            other => Err(format!(
                "unknown mode '{other}' (expected local, ai_easy, ai_hard or online)"
            )),
        }
    }
}

/// One move: 0-based column, player code (1 = Red, 2 = Yellow), 1-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub column: usize,
    pub player: u8,
    pub move_number: u32,
}

/// A completed game as it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub mode: GameMode,
    /// 0 = draw, 1 = Red, 2 = Yellow.
    pub winner: u8,
    pub moves: Vec<MoveRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player1_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2_id: Option<String>,
    /// Unix seconds.
    pub created_at: u64,
}

pub(crate) fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl GameRecord {
    /// Build a record from a finished game. Fails if the game is still going.
    pub fn from_state(state: &GameState, mode: GameMode) -> Result<Self, RecordError> {
        let outcome = state.outcome().ok_or(RecordError::GameInProgress)?;

        let mut player = Player::Red;
        let moves = state
            .history()
            .iter()
            .enumerate()
            .map(|(i, pos)| {
                let record = MoveRecord {
                    column: pos.col,
                    player: player.code(),
                    move_number: i as u32 + 1,
                };
                player = player.other();
                record
            })
            .collect();

        Ok(GameRecord {
            id: uuid::Uuid::new_v4().to_string(),
            mode,
            winner: outcome.code(),
            moves,
            duration_secs: None,
            player1_id: None,
            player2_id: None,
            created_at: unix_now(),
        })
    }

    pub fn with_players(mut self, player1_id: Option<String>, player2_id: Option<String>) -> Self {
        self.player1_id = player1_id;
        self.player2_id = player2_id;
        self
    }

    pub fn with_duration(mut self, secs: u64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Stored outcome, if the winner code is valid.
    pub fn outcome(&self) -> Result<GameOutcome, RecordError> {
        GameOutcome::from_code(self.winner).ok_or(RecordError::UnknownWinner(self.winner))
    }

    /// Replay every move through the rules engine and return the final state.
    ///
    /// The moves must alternate strictly from Red, be numbered from 1, all be
    /// legal, and end the game with the recorded winner.
    pub fn replay(&self) -> Result<GameState, RecordError> {
        let recorded = self.outcome()?;
        let mut state = GameState::initial();

        for (index, mv) in self.moves.iter().enumerate() {
            let expected_number = index as u32 + 1;
            if mv.move_number != expected_number {
                return Err(RecordError::MoveNumber {
                    index,
                    expected: expected_number,
                    found: mv.move_number,
                });
            }
            let expected_player = state.current_player();
            if mv.player != expected_player.code() {
                return Err(RecordError::TurnOrder {
                    move_number: mv.move_number,
                    expected: expected_player.code(),
                    found: mv.player,
                });
            }
            state = state
                .apply_move(mv.column)
                .map_err(|reason: MoveError| RecordError::IllegalMove {
                    move_number: mv.move_number,
                    column: mv.column,
                    reason,
                })?;
        }

        let replayed = state.outcome().ok_or(RecordError::Unfinished)?;
        if replayed != recorded {
            return Err(RecordError::WinnerMismatch {
                recorded: recorded.code(),
                replayed: replayed.code(),
            });
        }
        Ok(state)
    }
}
