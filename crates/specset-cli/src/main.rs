mod check;
mod compare;
mod config;
mod filter;
mod validate;

use config::{resolve_specifier, SpecsetConfig};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use specset_semver::{SpecifierSet, Version};
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "specset")]
#[command(about = "Check semantic versions against specifier sets", version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether versions satisfy a specifier set
    Check(check::CheckArgs),

    /// Parse a specifier set and report invalid or conflicting clauses
    Validate(validate::ValidateArgs),

    /// Compare two versions
    Compare(compare::CompareArgs),

    /// Print the versions that satisfy a specifier set
    Filter(filter::FilterArgs),
}

/// Install the logger. RUST_LOG wins over the -v flags.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Resolve and parse a specifier argument
pub(crate) fn parse_specifier(raw: &str, config: Option<&SpecsetConfig>) -> Result<SpecifierSet> {
    let specifier = resolve_specifier(raw, config)?;
    SpecifierSet::parse(&specifier)
        .with_context(|| format!("Failed to parse specifier set \"{}\"", specifier))
}

/// Parse version arguments, failing on the first malformed one
pub(crate) fn parse_versions(raw: &[String]) -> Result<Vec<Version>> {
    raw.iter()
        .map(|v| Version::parse(v).with_context(|| format!("Failed to parse version \"{}\"", v)))
        .collect()
}

/// Run a subcommand. Only commands taking a <SPECIFIER> read specset.toml.
fn dispatch(command: Commands, cwd: &Path) -> Result<i32> {
    match command {
        Commands::Compare(compare_args) => compare::execute(compare_args),
        Commands::Check(check_args) => {
            let config = SpecsetConfig::load(cwd)?;
            check::execute(check_args, config.as_ref())
        }
        Commands::Validate(validate_args) => {
            let config = SpecsetConfig::load(cwd)?;
            validate::execute(validate_args, config.as_ref())
        }
        Commands::Filter(filter_args) => {
            let config = SpecsetConfig::load(cwd)?;
            filter::execute(filter_args, config.as_ref())
        }
    }
}

fn run() -> Result<i32> {
    let args = Args::parse();
    init_logging(args.verbose);

    let cwd = std::env::current_dir()?;
    dispatch(args.command, &cwd)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
