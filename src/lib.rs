//! Match-3 board engine (workspace facade crate).
//!
//! Re-exports the `match3::{core,engine,types}` API; the implementation lives
//! in dedicated crates under `crates/`.

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;
