//! `cfg`: prints the resolved configuration with the source of each value.
//!
//! # Example Output
//!
//! ```json
//! {
//!   "speed": {
//!     "value": 1.0,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "speed": {
            "value": config.speed,
            "source": sources.speed,
        },
        "realtime": {
            "value": config.realtime,
            "source": sources.realtime,
        },
        "max_hands": {
            "value": config.max_hands,
            "source": sources.max_hands,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
