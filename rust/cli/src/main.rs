use clap::Parser;
use handreel_cli::cli::HandreelCli;
use handreel_replay::logging::{DEFAULT_FILTER, LogFormat, init_logging};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Logging flags are read up front; `run` reports any parse error itself.
    if let Ok(cli) = HandreelCli::try_parse_from(&args) {
        let filter = if cli.verbose { DEFAULT_FILTER } else { "warn" };
        let format = if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Plain
        };
        if let Err(e) = init_logging(filter, format) {
            eprintln!("WARNING: logging disabled: {}", e);
        }
    }

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    std::process::exit(handreel_cli::run(args, &mut out, &mut err));
}
