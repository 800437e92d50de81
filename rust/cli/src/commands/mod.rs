//! Command handler modules for the handreel CLI.
//!
//! Each command lives in its own file and exposes one
//! `handle_COMMAND_command(...) -> Result<(), CliError>`. Output streams are
//! passed in as `&mut dyn Write` so tests can capture them.

mod cfg;
mod decode;
mod encode;
mod replay;
mod sample;
mod steps;

pub use cfg::handle_cfg_command;
pub use decode::handle_decode_command;
pub use encode::handle_encode_command;
pub use replay::{ReplayOptions, handle_replay_command};
pub use sample::handle_sample_command;
pub use steps::handle_steps_command;

use crate::error::CliError;
use handreel_engine::codec::decode;
use handreel_engine::hand::Hand;

/// Decodes a token from the command line, logging the rejection reason.
pub(crate) fn decode_token(token: &str) -> Result<Hand, CliError> {
    decode(token.trim()).map_err(|e| {
        tracing::debug!(error = %e, len = token.len(), "token rejected");
        CliError::Decode(e)
    })
}
