//! Semantic version specifier sets
//!
//! This crate parses semantic versions and comma-separated sets of comparison
//! clauses such as `>=1.0.0, <2.0.0`. A set is checked for conflicting clauses
//! when it is built and can then answer whether a version satisfies it.

mod comparator;
mod operator;
mod specifier_set;
mod version;

pub use comparator::Comparator;
pub use operator::{InvalidOperatorError, Operator};
pub use specifier_set::{SpecifierError, SpecifierSet};
pub use version::{Version, VersionError};
