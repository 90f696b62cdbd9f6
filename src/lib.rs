//! match3 (workspace facade crate).
//!
//! Re-exports the member crates under stable paths:
//! `match3::{types, core, engine}`. The implementation lives in the crates
//! under `crates/`.

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;
