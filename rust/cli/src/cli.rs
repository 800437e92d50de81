//! Command-line argument types.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "handreel",
    version,
    about = "Encode poker hands as shareable tokens and replay them"
)]
pub struct HandreelCli {
    /// Log replay internals to stderr (RUST_LOG overrides)
    #[arg(long, global = true)]
    pub verbose: bool,
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode hand JSON (one hand, or one per line) into tokens
    Encode {
        /// Hand file (.json, .jsonl, optionally .zst), or - for stdin
        #[arg(long)]
        input: String,
    },
    /// Decode a token and print the hand as JSON
    Decode {
        #[arg(long)]
        token: String,
    },
    /// Print the replay steps of a token
    Steps {
        #[arg(long)]
        token: String,
        /// Print the steps as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Replay a token step by step
    Replay {
        #[arg(long)]
        token: String,
        /// Speed multiplier: 0.5, 1, 1.5 or 2
        #[arg(long)]
        speed: Option<f64>,
        /// Start at this fraction of the replay (0..=1)
        #[arg(long)]
        seek: Option<f64>,
        /// Wait between steps as a live replay would
        #[arg(long)]
        realtime: bool,
    },
    /// Print tokens for seeded random hands
    Sample {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
