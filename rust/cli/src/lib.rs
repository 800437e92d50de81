//! # handreel CLI library
//!
//! Command-line surface over `handreel-engine` and `handreel-replay`:
//! encode hand JSON into URL-safe tokens, decode them back, list replay
//! steps and replay a token in the terminal.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, runs one subcommand and returns the exit
//! code. Output streams are injected so tests can capture them.
//!
//! ```
//! use std::io;
//! let args = vec!["handreel", "sample", "--seed", "42"];
//! let code = handreel_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `encode --input FILE`: Hand JSON (or JSONL, optionally `.zst`) to tokens
//! - `decode --token T`: Token to pretty hand JSON
//! - `steps --token T [--json]`: The replay timeline
//! - `replay --token T [--speed S] [--seek F] [--realtime]`: Step-by-step replay
//! - `sample [--seed N] [--count C]`: Tokens for seeded random hands
//! - `cfg`: Resolved configuration with value sources

use clap::Parser;
use std::io::Write;
#[macro_use]
mod macros;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;
pub mod validation;

use cli::{Commands, HandreelCli};
use commands::{
    ReplayOptions, handle_cfg_command, handle_decode_command, handle_encode_command,
    handle_replay_command, handle_sample_command, handle_steps_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Returns `0` on success and `2` on any error. Help and version output go
/// to `out` with exit code `0`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["encode", "decode", "steps", "replay", "sample", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HandreelCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    write_or_exit!(out, "{}", e);
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: handreel <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: handreel --help");
                    exit_code::ERROR
                }
            };
        }
    };

    match dispatch(cli.cmd, out, err) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn dispatch(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    match cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Decode { token } => handle_decode_command(&token, out),
        Commands::Steps { token, json } => handle_steps_command(&token, json, out),
        Commands::Encode { input } => {
            let cfg = load_config()?;
            handle_encode_command(&input, cfg.max_hands, out, err)
        }
        Commands::Sample { seed, count } => {
            let cfg = load_config()?;
            handle_sample_command(seed, count, cfg.max_hands, out, err)
        }
        Commands::Replay {
            token,
            speed,
            seek,
            realtime,
        } => {
            let cfg = load_config()?;
            let speed = validation::resolve_speed(speed, cfg.replay_speed())
                .map_err(CliError::InvalidInput)?;
            validation::validate_seek(seek).map_err(CliError::InvalidInput)?;
            let options = ReplayOptions {
                speed,
                seek,
                realtime: realtime || cfg.realtime,
            };
            handle_replay_command(&token, options, out)
        }
    }
}

fn load_config() -> Result<config::Config, CliError> {
    config::load().map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_capture(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args, &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout_with_success() {
        let (code, out, err) = run_capture(&["handreel", "--help"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("replay"));
        assert!(err.is_empty());
    }

    #[test]
    fn unknown_command_lists_commands() {
        let (code, _, err) = run_capture(&["handreel", "deal"]);
        assert_eq!(code, exit_code::ERROR);
        for c in ["encode", "decode", "steps", "replay", "sample", "cfg"] {
            assert!(err.contains(c), "missing {c} in {err}");
        }
    }

    #[test]
    fn bad_token_is_exit_two_with_one_error_line() {
        let (code, out, err) = run_capture(&["handreel", "decode", "--token", "!!"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(out.is_empty());
        assert_eq!(err.matches("Error:").count(), 1);
        assert!(err.contains("Invalid token"));
    }
}
