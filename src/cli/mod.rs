//! Command-line parsing for the host value checker.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! conversion code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::StructureKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "flubridge", version, about = "Validate and round-trip host value dumps for the flu model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode a host value dump and print a summary.
    Check(CheckArgs),
    /// Decode a host value dump and re-encode it as JSON.
    Roundtrip(RoundtripArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CheckArgs {
    /// Which structure the dump holds.
    #[arg(short = 'k', long, value_enum)]
    pub kind: StructureKind,

    /// Host value JSON file.
    #[arg(short = 'i', long, value_name = "JSON")]
    pub input: PathBuf,

    /// Reject vaccine programmes whose dates do not match the calendar rows.
    #[arg(long)]
    pub strict_dates: bool,
}

#[derive(Debug, Parser, Clone)]
pub struct RoundtripArgs {
    #[command(flatten)]
    pub check: CheckArgs,

    /// Output file (stdout when omitted).
    #[arg(short = 'o', long, value_name = "JSON")]
    pub output: Option<PathBuf>,

    /// Value written for an uncomputed likelihood (number or NA).
    #[arg(long, value_parser = parse_sentinel_arg)]
    pub likelihood_sentinel: Option<f64>,
}

fn parse_sentinel_arg(raw: &str) -> Result<f64, String> {
    crate::config::parse_sentinel(raw).ok_or_else(|| format!("'{raw}' is not a number or NA"))
}
