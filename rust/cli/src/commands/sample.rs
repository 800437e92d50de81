//! `sample`: tokens for seeded random hands, handy for trying `replay`.

use crate::error::CliError;
use crate::validation::validate_hand_count;
use handreel_engine::codec::encode;
use handreel_engine::sample::random_hand;
use std::io::Write;

/// Hand `i` uses seed `seed + i`. Without `--seed` a random base seed is
/// drawn and reported on stderr so the run can be repeated.
pub fn handle_sample_command(
    seed: Option<u64>,
    count: usize,
    max_hands: usize,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    validate_hand_count(count, max_hands).map_err(CliError::InvalidInput)?;
    let base = match seed {
        Some(s) => s,
        None => {
            let s = rand::random::<u64>();
            writeln!(err, "seed: {}", s)?;
            s
        }
    };
    for i in 0..count as u64 {
        writeln!(out, "{}", encode(&random_hand(base.wrapping_add(i))))?;
    }
    Ok(())
}
