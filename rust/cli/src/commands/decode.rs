use super::decode_token;
use crate::error::CliError;
use std::io::Write;

/// Prints the decoded hand as pretty JSON.
pub fn handle_decode_command(token: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let hand = decode_token(token)?;
    let json = serde_json::to_string_pretty(&hand).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json)?;
    Ok(())
}
