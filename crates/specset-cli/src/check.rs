//! Check command - test versions against a specifier set.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::config::SpecsetConfig;
use crate::{parse_specifier, parse_versions};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Specifier set (e.g. ">=1.0.0, <2.0.0") or @name from specset.toml
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,

    /// Versions to check
    #[arg(value_name = "VERSIONS", required = true)]
    pub versions: Vec<String>,

    /// Only set the exit code, print nothing
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn execute(args: CheckArgs, config: Option<&SpecsetConfig>) -> Result<i32> {
    let set = parse_specifier(&args.specifier, config)?;
    let versions = parse_versions(&args.versions)?;

    let mut all_satisfied = true;
    for (raw, version) in args.versions.iter().zip(&versions) {
        let satisfied = set.contains(version);
        all_satisfied &= satisfied;

        if args.quiet {
            continue;
        }

        if satisfied {
            println!("{} {} satisfies {}", style("✓").green(), raw, set);
        } else {
            println!("{} {} does not satisfy {}", style("✗").red(), raw, set);
        }
    }

    Ok(if all_satisfied { 0 } else { 1 })
}
