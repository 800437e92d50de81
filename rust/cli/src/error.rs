//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] prints
//! the error once and maps it to exit code `2`.

use std::fmt;

use handreel_engine::errors::DecodeError;
use handreel_replay::ReplayError;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (input files, stdout/stderr writes, runtime setup)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// The token could not be decoded
    Decode(DecodeError),

    /// A replay control call was rejected
    Replay(ReplayError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Decode(e) => write!(f, "Invalid token: {}", e),
            CliError::Replay(e) => write!(f, "Replay error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Decode(e) => Some(e),
            CliError::Replay(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<DecodeError> for CliError {
    fn from(error: DecodeError) -> Self {
        CliError::Decode(error)
    }
}

impl From<ReplayError> for CliError {
    fn from(error: ReplayError) -> Self {
        CliError::Replay(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn decode_errors_keep_their_source() {
        let e = CliError::from(DecodeError::UnsupportedVersion { found: "v9".into() });
        assert!(e.to_string().starts_with("Invalid token:"));
        assert!(e.source().is_some());
    }

    #[test]
    fn replay_errors_convert() {
        let e: CliError = ReplayError::UnsupportedSpeed(3.0).into();
        assert!(matches!(e, CliError::Replay(_)));
        assert!(e.to_string().contains("3"));
    }
}
