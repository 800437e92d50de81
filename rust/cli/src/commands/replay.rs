//! Replay command handler.
//!
//! Decodes a token, generates its steps and walks them with the replay
//! engine, printing one line per applied step followed by the result.
//!
//! By default steps are applied back to back. With `--realtime` the tokio
//! [`ReplayPlayer`] drives the replay and each line appears after the step's
//! paced delay, scaled by `--speed`.

use super::decode_token;
use crate::error::CliError;
use crate::formatters::{format_snapshot, format_step, seat_label};
use chrono::{DateTime, Utc};
use handreel_engine::hand::Hand;
use handreel_engine::snapshot::{TableSnapshot, materialize};
use handreel_engine::steps::{ReplayStep, generate_steps};
use handreel_replay::{ReplayEngine, ReplayPlayer, ReplayState, Speed};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayOptions {
    pub speed: Speed,
    pub seek: Option<f64>,
    pub realtime: bool,
}

pub fn handle_replay_command(
    token: &str,
    options: ReplayOptions,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let hand = decode_token(token)?;
    let steps = generate_steps(&hand);

    write_header(&hand, &steps, options.speed, out)?;
    let end = if options.realtime {
        replay_realtime(&hand, steps, options, out)?
    } else {
        replay_stepwise(&hand, steps, options, out)?
    };
    write_result(&hand, &end, out)
}

fn replay_stepwise(
    hand: &Hand,
    steps: Vec<ReplayStep>,
    options: ReplayOptions,
    out: &mut dyn Write,
) -> Result<TableSnapshot, CliError> {
    let mut engine = ReplayEngine::new(steps);
    engine.set_speed(options.speed);
    if let Some(fraction) = options.seek {
        engine.seek(fraction)?;
        write_seek(engine.position(), engine.len(), engine.current_snapshot(), out)?;
    }
    while engine.state() != ReplayState::Complete {
        let index = engine.position();
        engine.step_forward()?;
        if let Some(step) = engine.steps().get(index) {
            write_step(hand, step, index, engine.len(), engine.current_snapshot(), out)?;
        }
    }
    Ok(engine.current_snapshot().clone())
}

fn replay_realtime(
    hand: &Hand,
    steps: Vec<ReplayStep>,
    options: ReplayOptions,
    out: &mut dyn Write,
) -> Result<TableSnapshot, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let player = ReplayPlayer::spawn(steps.clone());
        player.set_speed(options.speed);
        if let Some(fraction) = options.seek {
            player.seek(fraction)?;
            let at = player.playback();
            write_seek(at.position, at.len, &at.snapshot, out)?;
        }

        let mut shown = player.position();
        if player.state() != ReplayState::Complete {
            let mut rx = player.subscribe();
            player.play();
            while rx.changed().await.is_ok() {
                let playback = rx.borrow_and_update().clone();
                // Updates can coalesce; print every step applied since the last one.
                while shown < playback.position {
                    let snapshot = materialize(&steps, shown + 1);
                    write_step(hand, &steps[shown], shown, steps.len(), &snapshot, out)?;
                    out.flush()?;
                    shown += 1;
                }
                if playback.state == ReplayState::Complete {
                    break;
                }
            }
        }
        Ok::<_, CliError>(player.current_snapshot())
    })
}

fn write_header(
    hand: &Hand,
    steps: &[ReplayStep],
    speed: Speed,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    writeln!(
        out,
        "Hand {} at {} ({} {:?})",
        hand.id, hand.table_name, hand.stakes, hand.variant
    )?;
    let played: Option<DateTime<Utc>> = hand.played_at();
    if let Some(at) = played {
        writeln!(out, "Played {}", at.format("%Y-%m-%d %H:%M UTC"))?;
    }
    writeln!(out, "Speed {}, {} steps", speed, steps.len())?;
    writeln!(out, "═══════════════════════════════════════")?;
    Ok(())
}

fn write_seek(
    position: usize,
    len: usize,
    snapshot: &TableSnapshot,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    writeln!(
        out,
        "Seek to step {}/{}  {}",
        position,
        len,
        format_snapshot(snapshot)
    )?;
    Ok(())
}

fn write_step(
    hand: &Hand,
    step: &ReplayStep,
    index: usize,
    len: usize,
    snapshot: &TableSnapshot,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    writeln!(
        out,
        "[{}/{}] {}  {}",
        index + 1,
        len,
        format_step(step, hand),
        format_snapshot(snapshot)
    )?;
    Ok(())
}

fn write_result(hand: &Hand, end: &TableSnapshot, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "═══════════════════════════════════════")?;
    let awards: Vec<String> = end
        .awarded
        .iter()
        .map(|(seat, amount)| format!("{} +{}", seat_label(hand, *seat), amount))
        .collect();
    if awards.is_empty() {
        writeln!(out, "Result: pot {}", end.pot)?;
    } else {
        writeln!(out, "Result: pot {}, {}", end.pot, awards.join(", "))?;
    }
    Ok(())
}
