//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads environment configuration
//! - reads host value dumps and decodes them
//! - prints summaries or writes re-encoded output

use clap::Parser;

use crate::cli::{CheckArgs, Command, RoundtripArgs};
use crate::config::BridgeConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `flubridge` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    log::debug!("{cli:?}");

    let config = BridgeConfig::from_env()?;

    match cli.command {
        Command::Check(args) => handle_check(args, config),
        Command::Roundtrip(args) => handle_roundtrip(args, config),
    }
}

fn handle_check(args: CheckArgs, config: BridgeConfig) -> Result<(), AppError> {
    let decoded = decode_input(&args, config)?;
    println!("{}", crate::report::format_summary(&decoded));
    Ok(())
}

fn handle_roundtrip(args: RoundtripArgs, mut config: BridgeConfig) -> Result<(), AppError> {
    if !args.check.kind.is_encodable() {
        return Err(AppError::new(
            2,
            format!("A {} cannot be encoded back to the host.", args.check.kind.display_name()),
        ));
    }
    if let Some(sentinel) = args.likelihood_sentinel {
        config.encode.likelihood_sentinel = sentinel;
    }

    let decoded = decode_input(&args.check, config)?;
    let encoded = decoded
        .encode(&config.encode)
        .ok_or_else(|| AppError::new(4, "Decoded structure has no host encoding."))?;

    match &args.output {
        Some(path) => {
            crate::io::write_value_json(path, &encoded)?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{}", crate::io::value_to_json_string(&encoded)?),
    }
    Ok(())
}

fn decode_input(args: &CheckArgs, mut config: BridgeConfig) -> Result<pipeline::Decoded, AppError> {
    if args.strict_dates {
        config.decode.strict_calendar_dates = true;
    }
    let value = crate::io::read_value_json(&args.input)?;
    let decoded = pipeline::decode_as(args.kind, &value, &config.decode)?;
    Ok(decoded)
}
