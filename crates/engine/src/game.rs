//! Game facade - one board plus the session judging it
//!
//! Board events are forwarded to the session as they are drained, and the
//! session's reactions are queued right behind the event that caused them.

use serde::Serialize;

use match3_core::{ConfigError, LevelConfig, SessionConfig};

use crate::board::{Board, FillReport, Phase, SwapRejection};
use crate::session::{Session, SessionState};
use crate::snapshot::GameSnapshot;
use crate::types::{BoardEvent, Coord, SessionEvent};

/// Anything a host may want to react to, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GameEvent {
    Board(BoardEvent),
    Session(SessionEvent),
}

#[derive(Debug, Clone)]
pub struct Game {
    level: LevelConfig,
    board: Board,
    session: Session,
    events: Vec<GameEvent>,
    episode_id: u32,
    started: bool,
}

impl Game {
    pub fn new(level: LevelConfig) -> Result<Self, ConfigError> {
        let board = Board::new(level.board.clone(), level.timing, level.seed)?;
        let session = Session::new(level.session);
        Ok(Self {
            level,
            board,
            session,
            events: Vec::new(),
            episode_id: 0,
            started: false,
        })
    }

    /// Build a game around an already prepared board
    pub fn with_board(board: Board, session: SessionConfig) -> Self {
        let level = LevelConfig {
            seed: board.seed(),
            board: board.config().clone(),
            timing: *board.timing(),
            session,
        };
        Self {
            level,
            board,
            session: Session::new(session),
            events: Vec::new(),
            episode_id: 0,
            started: false,
        }
    }

    /// Fill the board (unless it already holds pieces) and start the session
    pub fn start(&mut self) -> FillReport {
        if self.started {
            return FillReport::default();
        }
        self.started = true;

        let report = if self.board.grid().piece_count() == 0 {
            self.board.setup_board()
        } else {
            FillReport::default()
        };
        self.session.start();
        self.pump();
        report
    }

    /// Throw the current game away and start over on a fresh board.
    ///
    /// The piece sequence continues from where the old board left off.
    pub fn restart(&mut self) -> Result<FillReport, ConfigError> {
        let seed = self.board.seed();
        self.board = Board::new(self.level.board.clone(), self.level.timing, seed)?;
        self.session = Session::new(self.level.session);
        self.events.clear();
        self.episode_id = self.episode_id.wrapping_add(1);
        self.started = false;
        Ok(self.start())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn level(&self) -> &LevelConfig {
        &self.level
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn phase(&self) -> Phase {
        self.board.phase()
    }

    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    pub fn request_swap(&mut self, a: Coord, b: Coord) -> bool {
        self.try_swap(a, b).is_ok()
    }

    pub fn try_swap(&mut self, a: Coord, b: Coord) -> Result<(), SwapRejection> {
        if !self.session.is_playing() {
            return Err(SwapRejection::NotPlaying);
        }
        let result = self.board.try_swap(a, b);
        self.pump();
        result
    }

    pub fn click(&mut self, x: i8, y: i8) -> bool {
        self.session.is_playing() && self.board.click(x, y)
    }

    pub fn drag_to(&mut self, x: i8, y: i8) -> bool {
        self.session.is_playing() && self.board.drag_to(x, y)
    }

    pub fn release(&mut self) -> bool {
        if !self.session.is_playing() {
            self.board.cancel_selection();
            return false;
        }
        let accepted = self.board.release();
        self.pump();
        accepted
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let advanced = self.board.tick(elapsed_ms);
        self.pump();
        advanced
    }

    pub fn settle(&mut self) -> bool {
        let settled = self.board.settle();
        self.pump();
        settled
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self.episode_id, &self.board, &self.session)
    }

    fn pump(&mut self) {
        for event in self.board.drain_events() {
            self.session.apply(&event);
            self.events.push(GameEvent::Board(event));
            self.events
                .extend(self.session.drain_events().into_iter().map(GameEvent::Session));
        }
        // Reactions not tied to a board event, such as ending on start
        self.events
            .extend(self.session.drain_events().into_iter().map(GameEvent::Session));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use match3_core::{Grid, PieceTemplate, TimingConfig};
    use crate::types::MatchValue;

    fn game(rows: &[&str], moves: u32, score_goal: u32) -> Game {
        let grid = Grid::from_pattern(rows).unwrap();
        let pieces = [MatchValue::Yellow, MatchValue::Blue, MatchValue::Green, MatchValue::Red]
            .into_iter()
            .map(PieceTemplate::new)
            .collect();
        let board = Board::from_grid(grid, pieces, TimingConfig::instant(), 3).unwrap();
        let mut game = Game::with_board(board, SessionConfig { moves, score_goal });
        game.start();
        game.drain_events();
        game
    }

    fn session_events(events: &[GameEvent]) -> Vec<SessionEvent> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Session(s) => Some(*s),
                GameEvent::Board(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_new_game_fills_on_start() {
        let mut game = Game::new(LevelConfig::default()).unwrap();
        assert!(!game.started());
        assert_eq!(game.state(), SessionState::NotStarted);
        assert_eq!(
            game.try_swap(Coord::new(0, 0), Coord::new(1, 0)),
            Err(SwapRejection::NotPlaying)
        );

        let report = game.start();
        assert_eq!(report.placed, 64);
        assert_eq!(game.state(), SessionState::Playing);
        assert_eq!(game.board().grid().piece_count(), 64);
    }

    #[test]
    fn test_prepared_board_is_kept_on_start() {
        let game = game(&["YBY", "BRB", "RGR"], 5, 1000);
        assert_eq!(game.board().grid().piece(0, 0).unwrap().match_value(), MatchValue::Red);
    }

    #[test]
    fn test_matching_swap_reaches_session() {
        let mut game = game(&["YBY", "BRB", "RGR"], 5, 10_000);
        assert!(game.request_swap(Coord::new(1, 0), Coord::new(1, 1)));
        assert!(game.settle());

        let events = game.drain_events();
        let session = session_events(&events);
        assert_eq!(session[0], SessionEvent::MoveConsumed { moves_remaining: 4 });
        assert_eq!(session[1], SessionEvent::ScoreChanged { score: 60 });
        assert_eq!(game.session().moves_remaining(), 4);
        assert!(game.session().score() >= 60);

        // Move accounting follows the swap it belongs to
        let swap_idx = events
            .iter()
            .position(|e| matches!(e, GameEvent::Board(BoardEvent::SwapConsumed { .. })))
            .unwrap();
        assert!(matches!(
            events[swap_idx + 1],
            GameEvent::Session(SessionEvent::MoveConsumed { .. })
        ));
    }

    #[test]
    fn test_non_matching_swap_costs_nothing() {
        let mut game = game(&["YBGY", "BGYB", "GYBG"], 5, 10_000);
        let before = game.board().grid().clone();

        assert!(game.request_swap(Coord::new(0, 0), Coord::new(1, 0)));
        game.settle();

        assert_eq!(game.board().grid(), &before);
        assert_eq!(game.session().moves_remaining(), 5);
        assert!(session_events(&game.drain_events()).is_empty());
    }

    #[test]
    fn test_last_move_without_goal_loses() {
        let mut game = game(&["YBY", "BRB", "RGR"], 1, 10_000);
        assert!(game.request_swap(Coord::new(1, 0), Coord::new(1, 1)));
        game.settle();

        assert_eq!(game.state(), SessionState::GameOver { winner: false });
        let session = session_events(&game.drain_events());
        assert_eq!(
            &session[session.len() - 2..],
            &[SessionEvent::MovesExhausted, SessionEvent::GameOver { winner: false }]
        );
        assert_eq!(
            game.try_swap(Coord::new(0, 0), Coord::new(1, 0)),
            Err(SwapRejection::NotPlaying)
        );
    }

    #[test]
    fn test_goal_reached_wins() {
        let mut game = game(&["YBY", "BRB", "RGR"], 5, 60);
        assert!(game.request_swap(Coord::new(1, 0), Coord::new(1, 1)));
        game.settle();
        assert_eq!(game.state(), SessionState::GameOver { winner: true });
    }

    #[test]
    fn test_gestures_blocked_after_game_over() {
        let mut game = game(&["YBY", "BRB", "RGR"], 1, 10_000);
        assert!(game.click(1, 0));
        assert!(game.drag_to(1, 1));
        assert!(game.release());
        game.settle();

        assert!(game.is_game_over());
        assert!(!game.click(0, 0));
        assert!(!game.release());
    }

    #[test]
    fn test_restart_builds_fresh_episode() {
        let mut game = Game::new(LevelConfig::default()).unwrap();
        game.start();
        let first = game.snapshot();

        let report = game.restart().unwrap();
        assert_eq!(report.placed, 64);
        assert_eq!(game.episode_id(), 1);
        assert_eq!(game.state(), SessionState::Playing);
        assert_eq!(game.session().moves_remaining(), game.level().session.moves);
        assert_ne!(game.snapshot().board, first.board);
    }

    #[test]
    fn test_snapshot_reports_session() {
        let game = game(&["YBY", "BRB", "RGR"], 7, 500);
        let snap = game.snapshot();
        assert_eq!(snap.moves_remaining, 7);
        assert_eq!(snap.score_goal, 500);
        assert_eq!(snap.state, SessionState::Playing);
        assert!(snap.to_json().unwrap().contains("\"moves_remaining\":7"));
    }
}
