//! Validate command - parse a specifier set and report conflicts.

use anyhow::Result;
use clap::Args;
use console::style;

use crate::config::{resolve_specifier, SpecsetConfig};
use specset_semver::SpecifierSet;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Specifier set (e.g. ">=1.0.0, <2.0.0") or @name from specset.toml
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,
}

pub fn execute(args: ValidateArgs, config: Option<&SpecsetConfig>) -> Result<i32> {
    let specifier = resolve_specifier(&args.specifier, config)?;

    match SpecifierSet::parse(&specifier) {
        Ok(set) => {
            println!("{} {}", style("valid:").green().bold(), set);
            for (version, operator) in set.iter() {
                println!("  {} {}", operator, version);
            }
            Ok(0)
        }
        Err(e) => {
            eprintln!("{} {}", style("invalid:").red().bold(), e);
            Ok(1)
        }
    }
}
