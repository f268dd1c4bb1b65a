use serde::{Deserialize, Serialize};

use crate::game::{GameOutcome, Player};
use crate::record::GameMode;

/// A finished game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Result of `outcome` for the player who played `side`.
    pub fn for_side(outcome: GameOutcome, side: Player) -> GameResult {
        match outcome {
            GameOutcome::Draw => GameResult::Draw,
            GameOutcome::Winner(winner) if winner == side => GameResult::Win,
            GameOutcome::Winner(_) => GameResult::Loss,
        }
    }
}

/// Running totals for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatistics {
    pub player_id: String,
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub games_draw: u32,
    pub current_win_streak: u32,
    pub longest_win_streak: u32,
    pub ai_easy_wins: u32,
    pub ai_hard_wins: u32,
}

impl PlayerStatistics {
    pub fn new(player_id: impl Into<String>) -> Self {
        PlayerStatistics {
            player_id: player_id.into(),
            games_played: 0,
            games_won: 0,
            games_lost: 0,
            games_draw: 0,
            current_win_streak: 0,
            longest_win_streak: 0,
            ai_easy_wins: 0,
            ai_hard_wins: 0,
        }
    }

    /// Fold one finished game into the totals.
    pub fn apply(&mut self, result: GameResult, mode: GameMode) {
        self.games_played += 1;
        match result {
            GameResult::Win => {
                self.games_won += 1;
                self.current_win_streak += 1;
                self.longest_win_streak = self.longest_win_streak.max(self.current_win_streak);
                match mode {
                    GameMode::AiEasy => self.ai_easy_wins += 1,
                    GameMode::AiHard => self.ai_hard_wins += 1,
                    GameMode::Local | GameMode::Online => {}
                }
            }
            GameResult::Loss => {
                self.games_lost += 1;
                self.current_win_streak = 0;
            }
            GameResult::Draw => {
                self.games_draw += 1;
                self.current_win_streak = 0;
            }
        }
    }

    /// Fraction of games won, 0.0 before any game.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.games_won as f64 / self.games_played as f64
        }
    }
}
