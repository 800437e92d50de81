//! `steps`: lists the replay timeline of a token.

use super::decode_token;
use crate::error::CliError;
use crate::formatters::format_step;
use handreel_engine::steps::generate_steps;
use std::io::Write;

pub fn handle_steps_command(token: &str, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let hand = decode_token(token)?;
    let steps = generate_steps(&hand);

    if json {
        let s = serde_json::to_string_pretty(&steps).map_err(std::io::Error::other)?;
        writeln!(out, "{}", s)?;
        return Ok(());
    }

    let total_ms: u64 = steps.iter().map(|s| s.delay_ms).sum();
    writeln!(out, "Hand {} ({} steps, {} ms)", hand.id, steps.len(), total_ms)?;
    for (i, step) in steps.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:>5}ms  {}",
            i + 1,
            step.delay_ms,
            format_step(step, &hand)
        )?;
    }
    Ok(())
}
