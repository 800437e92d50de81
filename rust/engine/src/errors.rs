use thiserror::Error;

use crate::action::{Chips, Seat};

/// Why a token could not be turned back into a [`Hand`](crate::hand::Hand).
///
/// Every variant is recoverable: callers typically report that the hand link
/// is invalid or from an unsupported version and decline to start playback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Unsupported token version: {found:?}")]
    UnsupportedVersion { found: String },
    #[error("Truncated {segment} segment: expected {expected} parts, found {found}")]
    TruncatedSegment {
        segment: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Malformed card in {segment}: {detail}")]
    MalformedCard {
        segment: &'static str,
        detail: String,
    },
    #[error("Seat {seat} referenced by {segment} is not seated")]
    UnknownSeat { segment: &'static str, seat: Seat },
    #[error("Invalid numeral {value:?} in {segment} (base {radix})")]
    InvalidNumeral {
        segment: &'static str,
        value: String,
        radix: u32,
    },
    #[error("Invalid text encoding in {segment}")]
    InvalidEncoding { segment: &'static str },
    #[error("Seat {seat} appears more than once")]
    DuplicateSeat { seat: Seat },
    #[error("Unknown variant code {0:?}")]
    UnknownVariant(String),
    #[error("Unknown action {0:?}")]
    UnknownAction(String),
    #[error("Winners receive {awarded} chips but the pot is {pot}")]
    PotMismatch { pot: Chips, awarded: Chips },
}
