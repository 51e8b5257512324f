//! Compare command - three-way comparison of two versions.

use anyhow::{Context, Result};
use clap::Args;
use std::cmp::Ordering;

use specset_semver::{Operator, Version};

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Left-hand version
    #[arg(value_name = "VERSION")]
    pub left: String,

    /// Right-hand version
    #[arg(value_name = "OTHER")]
    pub right: String,

    /// Test "VERSION <op> OTHER" instead of printing -1, 0 or 1
    #[arg(long, value_name = "OPERATOR", value_parser = parse_operator)]
    pub op: Option<Operator>,
}

fn parse_operator(s: &str) -> Result<Operator, String> {
    s.parse::<Operator>().map_err(|e| e.to_string())
}

/// Parse one side of the comparison
fn parse_side(raw: &str) -> Result<Version> {
    Version::parse(raw).with_context(|| format!("Failed to parse version \"{}\"", raw))
}

/// Three-way comparison of two raw versions as -1, 0 or 1
pub(crate) fn three_way(left: &str, right: &str) -> Result<i32> {
    let left = parse_side(left)?;
    let right = parse_side(right)?;
    Ok(match left.cmp_version(&right) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    })
}

pub fn execute(args: CompareArgs) -> Result<i32> {
    if let Some(op) = args.op {
        let left = parse_side(&args.left)?;
        let right = parse_side(&args.right)?;
        let holds = op.permits(left.cmp_version(&right));
        println!("{}", holds);
        return Ok(if holds { 0 } else { 1 });
    }

    println!("{}", three_way(&args.left, &args.right)?);
    Ok(0)
}
