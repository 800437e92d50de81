//! `encode`: turns hand JSON into tokens, one per line.
//!
//! The input may hold a single hand object or several whitespace-separated
//! objects (JSONL). Every hand is validated with the same checks `decode`
//! applies, so every printed token decodes again.

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;
use crate::validation::validate_hand_count;
use handreel_engine::codec::{MAX_NAME_CHARS, check_hand, encode};
use handreel_engine::hand::Hand;
use std::io::Write;

pub fn handle_encode_command(
    input: &str,
    max_hands: usize,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let content = read_text_auto(input)
        .map_err(|e| CliError::InvalidInput(format!("Failed to read {}: {}", input, e)))?;

    let hands = serde_json::Deserializer::from_str(&content)
        .into_iter::<Hand>()
        .enumerate()
        .map(|(i, parsed)| {
            parsed.map_err(|e| CliError::InvalidInput(format!("hand {}: {}", i + 1, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_hand_count(hands.len(), max_hands).map_err(CliError::InvalidInput)?;

    for (i, hand) in hands.iter().enumerate() {
        check_hand(hand)
            .map_err(|e| CliError::InvalidInput(format!("hand {} ({}): {}", i + 1, hand.id, e)))?;
        warn_truncation(hand, err)?;
        writeln!(out, "{}", encode(hand))?;
    }
    tracing::debug!(hands = hands.len(), input, "encoded hands");
    Ok(())
}

fn warn_truncation(hand: &Hand, err: &mut dyn Write) -> Result<(), CliError> {
    for p in &hand.players {
        if p.name.chars().count() > MAX_NAME_CHARS {
            ui::display_warning(
                err,
                &format!(
                    "hand {}: name of seat {} is cut to {} characters",
                    hand.id, p.seat, MAX_NAME_CHARS
                ),
            )?;
        }
    }
    Ok(())
}
