use std::path::PathBuf;

use crate::game::MoveError;

/// Errors that can occur when reading or writing game records and statistics.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("game not found: {0}")]
    GameNotFound(String),

    #[error("invalid id '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidId(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors found while validating or replaying a stored game.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordError {
    #[error("game is still in progress")]
    GameInProgress,

    #[error("move {index} has number {found}, expected {expected}")]
    MoveNumber {
        index: usize,
        expected: u32,
        found: u32,
    },

    #[error("move {move_number} played by {found}, expected {expected}")]
    TurnOrder {
        move_number: u32,
        expected: u8,
        found: u8,
    },

    #[error("move {move_number} in column {column} is illegal: {reason:?}")]
    IllegalMove {
        move_number: u32,
        column: usize,
        reason: MoveError,
    },

    #[error("unknown winner code {0}")]
    UnknownWinner(u8),

    #[error("recorded winner {recorded} does not match replayed result {replayed}")]
    WinnerMismatch { recorded: u8, replayed: u8 },

    #[error("moves end before the game is decided")]
    Unfinished,
}

/// Errors raised by the game session controller.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("mode '{0}' is not supported")]
    UnsupportedMode(String),

    #[error("illegal move in column {column}: {reason:?}")]
    IllegalMove { column: usize, reason: MoveError },

    #[error("it is not the AI's turn")]
    NotAiTurn,

    #[error("waiting for the AI to move")]
    AwaitingAi,

    #[error("no legal moves remain")]
    NoLegalMoves,

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
