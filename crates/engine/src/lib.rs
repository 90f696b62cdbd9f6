//! Session-level driving of the board engine
//!
//! - [`session`]: tap/select flow and per-session counters
//! - [`autoplay`]: deterministic headless play for simulations and benches

pub mod autoplay;
pub mod session;

pub use match3_core as core;
pub use match3_types as types;

pub use autoplay::{autoplay, autoplay_with, AutoplayReport, Strategy};
pub use session::{Session, TapError, TapOutcome};
