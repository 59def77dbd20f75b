//! Match-3 engine - timing, events and rules on top of `match3-core`
//!
//! # Architecture
//!
//! ```text
//! host --request_swap/click/tick--> Game --> Board (phase state machine)
//!                                     |          | BoardEvent
//!                                     |          v
//!                                     +------> Session (score, moves, win/lose)
//!                                                | SessionEvent
//! host <-------------drain_events----------------+
//! ```
//!
//! Nothing here sleeps or spawns: the host decides how much time passes by
//! calling `tick`. A headless driver can call `settle` after every swap.
//!
//! # Example
//!
//! ```
//! use match3_engine::{Game, LevelConfig, hint};
//!
//! let mut game = Game::new(LevelConfig::default()).unwrap();
//! game.start();
//!
//! if let Some((a, b)) = hint::find_matching_swap(game.board().grid()) {
//!     assert!(game.request_swap(a, b));
//!     game.settle();
//!     assert_eq!(game.session().moves_remaining(), 29);
//! }
//! ```

pub mod board;
pub mod game;
pub mod hint;
pub mod session;
pub mod snapshot;

pub use match3_types as types;

pub use board::{Board, FillReport, Phase, Resolution, SwapRejection};
pub use game::{Game, GameEvent};
pub use match3_core::{BoardConfig, ConfigError, LevelConfig, SessionConfig, TimingConfig};
pub use session::{Session, SessionState};
pub use snapshot::{BoardSnapshot, CellSnapshot, GameSnapshot, PieceSnapshot};
