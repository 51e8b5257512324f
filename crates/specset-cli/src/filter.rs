//! Filter command - print the versions a specifier set admits.

use anyhow::Result;
use clap::Args;

use crate::config::SpecsetConfig;
use crate::{parse_specifier, parse_versions};

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Specifier set (e.g. ">=1.0.0, <2.0.0") or @name from specset.toml
    #[arg(value_name = "SPECIFIER")]
    pub specifier: String,

    /// Candidate versions
    #[arg(value_name = "VERSIONS", required = true)]
    pub versions: Vec<String>,

    /// Print only the highest satisfying version
    #[arg(long)]
    pub max: bool,
}

pub fn execute(args: FilterArgs, config: Option<&SpecsetConfig>) -> Result<i32> {
    let set = parse_specifier(&args.specifier, config)?;
    let versions = parse_versions(&args.versions)?;

    if args.max {
        return match set.max_satisfying(&versions) {
            Some(best) => {
                println!("{}", best);
                Ok(0)
            }
            None => {
                log::info!("No version satisfies {}", set);
                Ok(1)
            }
        };
    }

    let matching = set.filter(&versions);
    for version in &matching {
        println!("{}", version);
    }

    Ok(if matching.is_empty() { 1 } else { 0 })
}
