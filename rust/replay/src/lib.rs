//! Replay of a decoded hand, one step at a time.
//!
//! [`engine::ReplayEngine`] is the synchronous state machine: it owns the
//! cursor, the snapshot and the ticket of the single pending timer.
//! [`player::ReplayPlayer`] drives it on tokio and publishes every change on
//! a watch channel.

pub mod engine;
pub mod logging;
pub mod player;

pub use engine::{ReplayEngine, ReplayError, ReplayState, Schedule, Speed};
pub use player::{Playback, ReplayPlayer};
