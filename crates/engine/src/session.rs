//! Game session - score, remaining moves and the win/lose decision
//!
//! The session never looks at the grid. It only reacts to board events:
//!
//! | Board event     | Session reaction                                     |
//! |-----------------|------------------------------------------------------|
//! | `SwapConsumed`  | one move spent, `MoveConsumed`                       |
//! | `PassScored`    | `score_sum x cascade` added, `ScoreChanged`          |
//! | `CycleFinished` | goal reached -> win, out of moves -> loss            |
//!
//! End conditions are only checked once a cascade has fully resolved, so
//! points from the last move's chain reactions always count.

use serde::Serialize;
use tracing::info;

use match3_core::{calculate_pass_score, SessionConfig};

use crate::types::{BoardEvent, SessionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    NotStarted,
    Playing,
    GameOver { winner: bool },
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    score: u32,
    moves_remaining: u32,
    events: Vec<SessionEvent>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::NotStarted,
            score: 0,
            moves_remaining: config.moves,
            events: Vec::new(),
        }
    }

    /// Begin play. A session configured with no moves (or a zero goal) ends
    /// straight away.
    pub fn start(&mut self) {
        if self.state != SessionState::NotStarted {
            return;
        }
        self.state = SessionState::Playing;
        self.check_end();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, SessionState::GameOver { .. })
    }

    /// `Some(true)` for a win, `None` while the game is undecided
    pub fn winner(&self) -> Option<bool> {
        match self.state {
            SessionState::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_goal(&self) -> u32 {
        self.config.score_goal
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// React to one board event
    pub fn apply(&mut self, event: &BoardEvent) {
        if !self.is_playing() {
            return;
        }
        match *event {
            BoardEvent::SwapConsumed { .. } => self.consume_move(),
            BoardEvent::PassScored {
                score_sum, cascade, ..
            } => self.add_score(score_sum, cascade),
            BoardEvent::CycleFinished { .. } => self.check_end(),
            _ => {}
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn consume_move(&mut self) {
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.events.push(SessionEvent::MoveConsumed {
            moves_remaining: self.moves_remaining,
        });
    }

    fn add_score(&mut self, score_sum: u32, cascade: u32) {
        let result = calculate_pass_score(score_sum, cascade);
        self.score = self.score.saturating_add(result.total);
        self.events.push(SessionEvent::ScoreChanged { score: self.score });
    }

    fn check_end(&mut self) {
        if self.score >= self.config.score_goal {
            self.events.push(SessionEvent::ScoreGoalReached {
                score: self.score,
                goal: self.config.score_goal,
            });
            self.finish(true);
        } else if self.moves_remaining == 0 {
            self.events.push(SessionEvent::MovesExhausted);
            self.finish(false);
        }
    }

    fn finish(&mut self, winner: bool) {
        info!(winner, score = self.score, moves_remaining = self.moves_remaining, "game over");
        self.state = SessionState::GameOver { winner };
        self.events.push(SessionEvent::GameOver { winner });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    const SWAP: BoardEvent = BoardEvent::SwapConsumed {
        a: Coord::new(0, 0),
        b: Coord::new(1, 0),
    };
    const CYCLE: BoardEvent = BoardEvent::CycleFinished { passes: 1 };

    fn pass(score_sum: u32, cascade: u32) -> BoardEvent {
        BoardEvent::PassScored {
            pieces: 3,
            score_sum,
            cascade,
        }
    }

    fn session(moves: u32, score_goal: u32) -> Session {
        let mut s = Session::new(SessionConfig { moves, score_goal });
        s.start();
        s.drain_events();
        s
    }

    #[test]
    fn test_not_started_ignores_events() {
        let mut s = Session::new(SessionConfig::default());
        s.apply(&SWAP);
        assert_eq!(s.state(), SessionState::NotStarted);
        assert_eq!(s.moves_remaining(), SessionConfig::default().moves);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_swap_consumes_move() {
        let mut s = session(5, 1000);
        s.apply(&SWAP);
        assert_eq!(s.moves_remaining(), 4);
        assert_eq!(
            s.drain_events(),
            vec![SessionEvent::MoveConsumed { moves_remaining: 4 }]
        );
    }

    #[test]
    fn test_cascade_multiplies_pass_score() {
        let mut s = session(5, 1000);
        s.apply(&pass(60, 1));
        s.apply(&pass(60, 2));
        assert_eq!(s.score(), 180);
        assert_eq!(
            s.drain_events(),
            vec![
                SessionEvent::ScoreChanged { score: 60 },
                SessionEvent::ScoreChanged { score: 180 },
            ]
        );
    }

    #[test]
    fn test_goal_checked_only_when_cycle_finishes() {
        let mut s = session(5, 100);
        s.apply(&SWAP);
        s.apply(&pass(120, 1));
        assert!(s.is_playing());

        s.apply(&CYCLE);
        assert_eq!(s.winner(), Some(true));
        let events = s.drain_events();
        assert_eq!(
            &events[events.len() - 2..],
            &[
                SessionEvent::ScoreGoalReached { score: 120, goal: 100 },
                SessionEvent::GameOver { winner: true },
            ]
        );
    }

    #[test]
    fn test_last_move_cascade_can_still_win() {
        let mut s = session(1, 100);
        s.apply(&SWAP);
        assert_eq!(s.moves_remaining(), 0);
        assert!(s.is_playing());
        s.apply(&pass(60, 1));
        s.apply(&pass(60, 2));
        s.apply(&CYCLE);
        assert_eq!(s.winner(), Some(true));
    }

    #[test]
    fn test_out_of_moves_loses() {
        let mut s = session(1, 10_000);
        s.apply(&SWAP);
        s.apply(&pass(60, 1));
        s.apply(&CYCLE);

        assert_eq!(s.state(), SessionState::GameOver { winner: false });
        let events = s.drain_events();
        assert_eq!(
            &events[events.len() - 2..],
            &[SessionEvent::MovesExhausted, SessionEvent::GameOver { winner: false }]
        );
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut s = session(1, 10_000);
        s.apply(&SWAP);
        s.apply(&CYCLE);
        s.drain_events();

        s.apply(&pass(100_000, 1));
        s.apply(&CYCLE);
        s.start();
        assert_eq!(s.score(), 0);
        assert_eq!(s.winner(), Some(false));
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_zero_moves_ends_on_start() {
        let mut s = Session::new(SessionConfig {
            moves: 0,
            score_goal: 100,
        });
        s.start();
        assert_eq!(s.winner(), Some(false));
    }

    #[test]
    fn test_score_saturates() {
        let mut s = session(5, u32::MAX);
        s.apply(&pass(u32::MAX, 3));
        assert_eq!(s.score(), u32::MAX);
    }
}
