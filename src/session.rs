//! Game session controller: owns the current game, plays the computer side,
//! answers hint requests, and hands finished games to a [`GameStore`].

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use crate::ai::{hint_at_depth, Agent, Difficulty};
use crate::config::AiConfig;
use crate::error::SessionError;
use crate::game::{GameOutcome, GameState, Player};
use crate::record::{GameMode, GameRecord};
use crate::store::{GameResult, GameStore};

/// Side the computer plays in AI modes. The human always moves first.
pub const AI_SIDE: Player = Player::Yellow;

/// One game in progress, plus whatever is needed to finish and store it.
pub struct GameSession {
    mode: GameMode,
    state: GameState,
    config: AiConfig,
    opponent: Option<Box<dyn Agent>>,
    player_id: Option<String>,
    started_at: Instant,
}

impl GameSession {
    /// Start a game in `mode`. Online play is not available.
    #[instrument(skip(config))]
    pub fn new(mode: GameMode, config: &AiConfig) -> Result<Self, SessionError> {
        let opponent = match mode {
            GameMode::Local => None,
            GameMode::AiEasy => Some(Difficulty::Easy.agent(config.search_depth, config.seed)),
            GameMode::AiHard => Some(Difficulty::Hard.agent(config.search_depth, config.seed)),
            GameMode::Online => return Err(SessionError::UnsupportedMode(mode.to_string())),
        };
        info!(mode = %mode, "starting game session");
        Ok(GameSession {
            mode,
            state: GameState::initial(),
            config: config.clone(),
            opponent,
            player_id: None,
            started_at: Instant::now(),
        })
    }

    /// Attach the id of the human player (Red), whose statistics are updated
    /// when the game is finished.
    pub fn with_player_id(mut self, player_id: impl Into<String>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    /// Pause a front end may insert before [`GameSession::ai_turn`].
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.config.ai_delay_ms)
    }

    /// True when the computer should move next.
    pub fn is_ai_turn(&self) -> bool {
        self.opponent.is_some()
            && !self.state.is_terminal()
            && self.state.current_player() == AI_SIDE
    }

    /// Play `column` for the side to move.
    #[instrument(skip(self))]
    pub fn play(&mut self, column: usize) -> Result<&GameState, SessionError> {
        if self.is_ai_turn() {
            return Err(SessionError::AwaitingAi);
        }
        self.advance(column)
    }

    /// Let the computer move. Returns the column it chose.
    #[instrument(skip(self))]
    pub fn ai_turn(&mut self) -> Result<usize, SessionError> {
        if !self.is_ai_turn() {
            return Err(SessionError::NotAiTurn);
        }
        let player = self.state.current_player();
        let board = *self.state.board();
        let column = self
            .opponent
            .as_mut()
            .and_then(|agent| agent.select_action(&board, player))
            .ok_or(SessionError::NoLegalMoves)?;
        debug!(column, "AI selected move");
        self.advance(column)?;
        Ok(column)
    }

    /// Suggested column for the side to move, from the full search.
    pub fn hint(&self) -> Option<usize> {
        if self.state.is_terminal() {
            return None;
        }
        hint_at_depth(
            self.state.board(),
            self.state.current_player(),
            self.config.search_depth,
        )
    }

    /// Throw the current game away and start over in the same mode.
    pub fn reset(&mut self) {
        info!(mode = %self.mode, "resetting game");
        self.state = GameState::initial();
        self.started_at = Instant::now();
    }

    /// Record of the finished game.
    pub fn record(&self) -> Result<GameRecord, SessionError> {
        let record = GameRecord::from_state(&self.state, self.mode)?
            .with_players(self.player_id.clone(), None)
            .with_duration(self.started_at.elapsed().as_secs());
        Ok(record)
    }

    /// Persist the finished game and update the human player's statistics.
    ///
    /// The two writes are not atomic. The record is stored first, so if the
    /// statistics update fails the game stays stored, the error is returned,
    /// and calling `finish` again stores the game a second time under a new id.
    #[instrument(skip(self, store))]
    pub fn finish(&self, store: &mut dyn GameStore) -> Result<GameRecord, SessionError> {
        let record = store.create_game(self.record()?)?;
        if let (Some(player_id), Some(outcome)) = (&self.player_id, self.state.outcome()) {
            let result = GameResult::for_side(outcome, Player::Red);
            store.record_result(player_id, result, self.mode)?;
        }
        info!(id = %record.id, winner = record.winner, "game finished");
        Ok(record)
    }

    fn advance(&mut self, column: usize) -> Result<&GameState, SessionError> {
        let next = self
            .state
            .apply_move(column)
            .map_err(|reason| SessionError::IllegalMove { column, reason })?;
        self.state = next;

        match self.state.outcome() {
            Some(GameOutcome::Winner(player)) => info!(winner = player.name(), "game won"),
            Some(GameOutcome::Draw) => info!("game drawn"),
            None => {}
        }
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{MoveError, COLS};
    use crate::error::StoreError;
    use crate::store::{GameQuery, MemoryStore, PlayerStatistics};

    /// Stores games but refuses every statistics update.
    struct NoStatsStore(MemoryStore);

    impl GameStore for NoStatsStore {
        fn create_game(&mut self, record: GameRecord) -> Result<GameRecord, StoreError> {
            self.0.create_game(record)
        }

        fn get_game(&self, id: &str) -> Result<GameRecord, StoreError> {
            self.0.get_game(id)
        }

        fn list_games(&self, query: &GameQuery) -> Result<Vec<GameRecord>, StoreError> {
            self.0.list_games(query)
        }

        fn get_statistics(&mut self, player_id: &str) -> Result<PlayerStatistics, StoreError> {
            self.0.get_statistics(player_id)
        }

        fn record_result(
            &mut self,
            _player_id: &str,
            _result: GameResult,
            _mode: GameMode,
        ) -> Result<PlayerStatistics, StoreError> {
            Err(StoreError::Io(std::io::Error::other("statistics unavailable")))
        }
    }

    fn config() -> AiConfig {
        AiConfig {
            search_depth: 3,
            ai_delay_ms: 0,
            seed: Some(11),
        }
    }

    #[test]
    fn online_mode_is_rejected() {
        assert!(matches!(
            GameSession::new(GameMode::Online, &config()),
            Err(SessionError::UnsupportedMode(_))
        ));
    }

    #[test]
    fn local_game_alternates_sides() {
        let mut session = GameSession::new(GameMode::Local, &config()).unwrap();
        assert!(!session.is_ai_turn());
        session.play(3).unwrap();
        assert_eq!(session.state().current_player(), Player::Yellow);
        assert!(!session.is_ai_turn());
        assert!(matches!(session.ai_turn(), Err(SessionError::NotAiTurn)));
        session.play(3).unwrap();
        assert_eq!(session.state().current_player(), Player::Red);
    }

    #[test]
    fn illegal_move_leaves_state_unchanged() {
        let mut session = GameSession::new(GameMode::Local, &config()).unwrap();
        session.play(2).unwrap();
        let before = session.state().clone();
        let err = session.play(COLS).unwrap_err();
        assert!(matches!(
            err,
            SessionError::IllegalMove {
                reason: MoveError::InvalidColumn,
                ..
            }
        ));
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn ai_replies_after_human_move() {
        let mut session = GameSession::new(GameMode::AiHard, &config()).unwrap();
        session.play(3).unwrap();
        assert!(session.is_ai_turn());
        assert!(matches!(session.play(0), Err(SessionError::AwaitingAi)));

        let column = session.ai_turn().unwrap();
        assert!(column < COLS);
        assert_eq!(session.state().history().len(), 2);
        assert_eq!(session.state().current_player(), Player::Red);
    }

    #[test]
    fn hint_suggests_winning_column() {
        let mut session = GameSession::new(GameMode::Local, &config()).unwrap();
        for col in [0, 0, 1, 1, 2, 2] {
            session.play(col).unwrap();
        }
        assert_eq!(session.hint(), Some(3));
    }

    #[test]
    fn reset_starts_over() {
        let mut session = GameSession::new(GameMode::Local, &config()).unwrap();
        session.play(1).unwrap();
        session.reset();
        assert_eq!(session.state(), &GameState::initial());
    }

    #[test]
    fn record_requires_finished_game() {
        let session = GameSession::new(GameMode::Local, &config()).unwrap();
        assert!(matches!(session.record(), Err(SessionError::Record(_))));
    }

    #[test]
    fn full_ai_game_is_saved_with_statistics() {
        let mut session = GameSession::new(GameMode::AiEasy, &config())
            .unwrap()
            .with_player_id("alice");
        let mut store = MemoryStore::new();

        // The human plays the first legal column each turn.
        while !session.state().is_terminal() {
            if session.is_ai_turn() {
                session.ai_turn().unwrap();
            } else {
                let col = session.state().legal_actions()[0];
                session.play(col).unwrap();
            }
        }
        assert_eq!(session.hint(), None);

        let record = session.finish(&mut store).unwrap();
        assert_eq!(store.get_game(&record.id).unwrap(), record);
        assert_eq!(record.player1_id.as_deref(), Some("alice"));

        let replayed = record.replay().unwrap();
        assert_eq!(replayed.board(), session.state().board());

        let stats = store.get_statistics("alice").unwrap();
        assert_eq!(stats.games_played, 1);
        let expected = GameResult::for_side(session.state().outcome().unwrap(), Player::Red);
        match expected {
            GameResult::Win => assert_eq!(stats.ai_easy_wins, 1),
            GameResult::Loss => assert_eq!(stats.games_lost, 1),
            GameResult::Draw => assert_eq!(stats.games_draw, 1),
        }
    }

    #[test]
    fn failed_statistics_update_keeps_stored_game() {
        let mut session = GameSession::new(GameMode::Local, &config())
            .unwrap()
            .with_player_id("bob");
        for col in [0, 6, 1, 6, 2, 6, 3] {
            session.play(col).unwrap();
        }
        let mut store = NoStatsStore(MemoryStore::new());

        let err = session.finish(&mut store).unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::Io(_))));
        assert_eq!(store.0.len(), 1);
        assert_eq!(store.get_statistics("bob").unwrap().games_played, 0);

        // Without a player id there is no statistics write to fail.
        let mut anonymous = GameSession::new(GameMode::Local, &config()).unwrap();
        for col in [0, 6, 1, 6, 2, 6, 3] {
            anonymous.play(col).unwrap();
        }
        anonymous.finish(&mut store).unwrap();
        assert_eq!(store.0.len(), 2);
    }
}
