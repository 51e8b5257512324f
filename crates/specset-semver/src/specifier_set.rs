//! SpecifierSet - a validated conjunction of comparison clauses

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::{Operator, Version, VersionError};

lazy_static! {
    // Clause separator, swallowing the whitespace around each comma
    static ref CLAUSE_SEPARATOR_RE: Regex = Regex::new(r"\s*,\s*").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecifierError {
    #[error("Invalid specifier: \"{0}\"")]
    InvalidSpecifier(String),
    #[error("Duplicate version: {0}")]
    DuplicateVersion(String),
    #[error("Conflicting rules: {first}, {second}")]
    Conflict { first: String, second: String },
    #[error(transparent)]
    Version(#[from] VersionError),
}

#[derive(Debug, Clone)]
struct Rule {
    operator: Operator,
    version: Version,
}

/// A set of comparison clauses that a version must all satisfy.
///
/// Rules are keyed by the literal version string of their clause, so the same
/// version cannot appear twice even under different operators. Every pair of
/// rules is cross-checked when the set is built.
#[derive(Debug, Clone)]
pub struct SpecifierSet {
    rules: IndexMap<String, Rule>,
}

impl SpecifierSet {
    /// Parse and validate a comma-separated specifier string, e.g. `>=1.0.0, <2.0.0`
    pub fn parse(specifier: &str) -> Result<Self, SpecifierError> {
        let mut rules: IndexMap<String, Rule> = IndexMap::new();

        for clause in CLAUSE_SEPARATOR_RE.split(specifier.trim()) {
            let clause = clause.trim();
            let (operator, rest) = Operator::strip_prefix(clause)
                .ok_or_else(|| SpecifierError::InvalidSpecifier(clause.to_string()))?;
            let key = rest.trim();

            if rules.contains_key(key) {
                return Err(SpecifierError::DuplicateVersion(key.to_string()));
            }

            let version = Version::parse(key)?;
            log::trace!("Parsed clause {:?} as {}{}", clause, operator, key);
            rules.insert(key.to_string(), Rule { operator, version });
        }

        let set = SpecifierSet { rules };
        set.detect_conflicts()?;
        log::debug!("Parsed specifier set \"{}\" with {} rule(s)", set, set.len());
        Ok(set)
    }

    /// Cross-check every ordered pair of rules.
    ///
    /// For rules A and B, B's version compared against A's version must land
    /// in the outcomes A's operator permits. Visiting both orders enforces each
    /// rule against the other.
    fn detect_conflicts(&self) -> Result<(), SpecifierError> {
        for (key, rule) in &self.rules {
            for (other_key, other_rule) in &self.rules {
                if key == other_key {
                    continue;
                }

                let outcome = other_rule.version.cmp_version(&rule.version);
                log::trace!(
                    "Checking {} against {}{}: {:?}",
                    other_key,
                    rule.operator,
                    key,
                    outcome
                );

                if !rule.operator.permits(outcome) {
                    let first = format!("{}{}", rule.operator, key);
                    let second = format!("{}{}", other_rule.operator, other_key);
                    log::debug!("Conflicting rules: {}, {}", first, second);
                    return Err(SpecifierError::Conflict { first, second });
                }
            }
        }

        Ok(())
    }

    /// Check whether a version satisfies every rule in the set
    pub fn contains(&self, version: &Version) -> bool {
        self.rules
            .values()
            .all(|rule| rule.operator.permits(version.cmp_version(&rule.version)))
    }

    /// Return the versions that satisfy the set, in input order
    pub fn filter<'a, I>(&self, versions: I) -> Vec<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions.into_iter().filter(|v| self.contains(v)).collect()
    }

    /// Return the highest version that satisfies the set
    pub fn max_satisfying<'a, I>(&self, versions: I) -> Option<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        versions.into_iter().filter(|v| self.contains(v)).max()
    }

    /// Get the operator of the clause naming `version`, if any
    pub fn operator_for(&self, version: &str) -> Option<Operator> {
        self.rules.get(version).map(|rule| rule.operator)
    }

    /// Iterate over `(version, operator)` pairs in clause order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Operator)> + '_ {
        self.rules.iter().map(|(key, rule)| (key.as_str(), rule.operator))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromStr for SpecifierSet {
    type Err = SpecifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SpecifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self
            .iter()
            .map(|(version, operator)| format!("{}{}", operator, version))
            .collect();
        write!(f, "{}", clauses.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(raw: &str) -> Version {
        Version::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_range() {
        let set = SpecifierSet::parse(">=1.0.0,<2.0.0").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.operator_for("1.0.0"), Some(Operator::GreaterThanOrEqual));
        assert_eq!(set.operator_for("2.0.0"), Some(Operator::LessThan));
        assert_eq!(set.operator_for("3.0.0"), None);
    }

    #[test]
    fn test_parse_with_whitespace() {
        let set = SpecifierSet::parse("  >=  1.0.0 ,\t< 2.0.0  ").unwrap();
        let rules: Vec<(&str, Operator)> = set.iter().collect();
        assert_eq!(
            rules,
            vec![
                ("1.0.0", Operator::GreaterThanOrEqual),
                ("2.0.0", Operator::LessThan)
            ]
        );
        assert_eq!(set.to_string(), ">=1.0.0, <2.0.0");
    }

    #[test]
    fn test_parse_two_char_operators() {
        let set = SpecifierSet::parse("<=1.2.3").unwrap();
        assert_eq!(set.operator_for("1.2.3"), Some(Operator::LessThanOrEqual));

        let set = SpecifierSet::parse(">=1.2.3").unwrap();
        assert_eq!(set.operator_for("1.2.3"), Some(Operator::GreaterThanOrEqual));

        let set = SpecifierSet::parse("==1.2.3").unwrap();
        assert_eq!(set.operator_for("1.2.3"), Some(Operator::Equal));

        let set = SpecifierSet::parse("!=1.2.3").unwrap();
        assert_eq!(set.operator_for("1.2.3"), Some(Operator::NotEqual));
    }

    #[test]
    fn test_parse_from_str() {
        let set: SpecifierSet = "!=1.5.0".parse().unwrap();
        assert_eq!(set.to_string(), "!=1.5.0");
    }

    #[test]
    fn test_invalid_specifier() {
        assert_eq!(
            SpecifierSet::parse("").unwrap_err(),
            SpecifierError::InvalidSpecifier(String::new())
        );
        assert_eq!(
            SpecifierSet::parse("   ").unwrap_err(),
            SpecifierError::InvalidSpecifier(String::new())
        );
        assert_eq!(
            SpecifierSet::parse("1.0.0").unwrap_err(),
            SpecifierError::InvalidSpecifier("1.0.0".to_string())
        );
        assert_eq!(
            SpecifierSet::parse(">=1.0.0, ~2.0.0").unwrap_err(),
            SpecifierError::InvalidSpecifier("~2.0.0".to_string())
        );
        assert_eq!(
            SpecifierSet::parse(">=1.0.0,").unwrap_err(),
            SpecifierError::InvalidSpecifier(String::new())
        );
        assert_eq!(
            SpecifierSet::parse("=1.0.0").unwrap_err(),
            SpecifierError::InvalidSpecifier("=1.0.0".to_string())
        );
    }

    #[test]
    fn test_invalid_specifier_message() {
        let err = SpecifierSet::parse("^1.0.0").unwrap_err();
        assert_eq!(err.to_string(), "Invalid specifier: \"^1.0.0\"");
    }

    #[test]
    fn test_duplicate_version() {
        assert_eq!(
            SpecifierSet::parse(">=1.0.0, <1.0.0").unwrap_err(),
            SpecifierError::DuplicateVersion("1.0.0".to_string())
        );
        assert_eq!(
            SpecifierSet::parse("==1.0.0,==1.0.0").unwrap_err(),
            SpecifierError::DuplicateVersion("1.0.0".to_string())
        );
        assert_eq!(
            SpecifierSet::parse("!=1.0.0, >0.1.0, <= 1.0.0").unwrap_err(),
            SpecifierError::DuplicateVersion("1.0.0".to_string())
        );
    }

    #[test]
    fn test_keys_are_literal_strings() {
        // Equal by precedence but spelled differently, so not duplicates
        let set = SpecifierSet::parse(">=1.0.0, <=1.0.0+build").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&version("1.0.0")));
        assert!(!set.contains(&version("1.0.1")));
    }

    #[test]
    fn test_malformed_version() {
        let err = SpecifierSet::parse(">=1.0").unwrap_err();
        match err {
            SpecifierError::Version(VersionError::Parse { version, .. }) => assert_eq!(version, "1.0"),
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(matches!(
            SpecifierSet::parse("<=").unwrap_err(),
            SpecifierError::Version(_)
        ));
        assert!(matches!(
            SpecifierSet::parse("<=1.2.3, >=x").unwrap_err(),
            SpecifierError::Version(_)
        ));
    }

    #[test]
    fn test_single_clause_never_conflicts() {
        for spec in ["<=1.0.0", "==1.0.0", "!=1.0.0", ">=1.0.0", ">1.0.0", "<1.0.0", "<0.0.0"] {
            assert!(SpecifierSet::parse(spec).is_ok(), "{}", spec);
        }
    }

    #[test]
    fn test_conflicting_bounds() {
        assert_eq!(
            SpecifierSet::parse(">2.0.0,<1.0.0").unwrap_err(),
            SpecifierError::Conflict {
                first: ">2.0.0".to_string(),
                second: "<1.0.0".to_string()
            }
        );
        assert!(matches!(
            SpecifierSet::parse("<1.0.0, >2.0.0").unwrap_err(),
            SpecifierError::Conflict { .. }
        ));
        assert!(matches!(
            SpecifierSet::parse(">=2.0.0, <=1.0.0").unwrap_err(),
            SpecifierError::Conflict { .. }
        ));
    }

    #[test]
    fn test_conflict_message() {
        let err = SpecifierSet::parse(">1.0.0, <0.5.0").unwrap_err();
        assert_eq!(err.to_string(), "Conflicting rules: >1.0.0, <0.5.0");
    }

    #[test]
    fn test_exact_version_conflicts() {
        assert!(matches!(
            SpecifierSet::parse("==1.0.0, ==2.0.0").unwrap_err(),
            SpecifierError::Conflict { .. }
        ));
        assert!(matches!(
            SpecifierSet::parse("==1.0.0, >=0.5.0").unwrap_err(),
            SpecifierError::Conflict { .. }
        ));
    }

    #[test]
    fn test_same_direction_bounds_conflict() {
        // The stricter bound fails the looser rule's cross-check
        assert_eq!(
            SpecifierSet::parse(">1.0.0, >2.0.0").unwrap_err(),
            SpecifierError::Conflict {
                first: ">2.0.0".to_string(),
                second: ">1.0.0".to_string()
            }
        );
        assert!(SpecifierSet::parse("<1.0.0, <2.0.0").is_err());
    }

    #[test]
    fn test_compatible_sets() {
        assert!(SpecifierSet::parse(">1.0.0, <2.0.0").is_ok());
        assert!(SpecifierSet::parse(">=1.0.0, <=1.0.1").is_ok());
        assert!(SpecifierSet::parse("!=1.5.0, !=1.5.1").is_ok());
        assert!(SpecifierSet::parse(">=1.0.0, !=1.5.0, <2.0.0").is_ok());
        assert!(SpecifierSet::parse(">=1.0.0-alpha, <1.0.0").is_ok());
    }

    #[test]
    fn test_contains() {
        let set = SpecifierSet::parse(">=1.0.0,<2.0.0").unwrap();
        assert!(set.contains(&version("1.5.0")));
        assert!(set.contains(&version("1.0.0")));
        assert!(set.contains(&version("1.9999.9999")));
        assert!(!set.contains(&version("2.0.0")));
        assert!(!set.contains(&version("0.9.9")));
        assert!(!set.contains(&version("1.0.0-beta")));
        assert!(set.contains(&version("2.0.0-alpha")));
    }

    #[test]
    fn test_contains_each_operator() {
        let v = version("1.2.3");
        assert!(SpecifierSet::parse("<=1.2.3").unwrap().contains(&v));
        assert!(SpecifierSet::parse("==1.2.3").unwrap().contains(&v));
        assert!(SpecifierSet::parse(">=1.2.3").unwrap().contains(&v));
        assert!(!SpecifierSet::parse("!=1.2.3").unwrap().contains(&v));
        assert!(!SpecifierSet::parse(">1.2.3").unwrap().contains(&v));
        assert!(!SpecifierSet::parse("<1.2.3").unwrap().contains(&v));

        assert!(SpecifierSet::parse(">1.2.2").unwrap().contains(&v));
        assert!(SpecifierSet::parse("<1.2.4").unwrap().contains(&v));
        assert!(SpecifierSet::parse("!=1.2.4").unwrap().contains(&v));
    }

    #[test]
    fn test_contains_ignores_build_metadata() {
        let set = SpecifierSet::parse("==1.2.3+build.1").unwrap();
        assert!(set.contains(&version("1.2.3")));
        assert!(set.contains(&version("1.2.3+build.2")));
    }

    #[test]
    fn test_contains_with_exclusion() {
        let set = SpecifierSet::parse(">=1.0.0, !=1.5.0, <2.0.0").unwrap();
        assert!(set.contains(&version("1.4.0")));
        assert!(!set.contains(&version("1.5.0")));
        assert!(set.contains(&version("1.5.1")));
    }

    #[test]
    fn test_filter_and_max_satisfying() {
        let versions: Vec<Version> = ["0.9.0", "1.0.0", "1.2.0", "1.1.0", "2.0.0"]
            .iter()
            .map(|v| version(v))
            .collect();
        let set = SpecifierSet::parse(">=1.0.0, <2.0.0").unwrap();

        let matching: Vec<String> = set.filter(&versions).iter().map(|v| v.to_string()).collect();
        assert_eq!(matching, vec!["1.0.0", "1.2.0", "1.1.0"]);
        assert_eq!(set.max_satisfying(&versions), Some(&versions[2]));

        let none = SpecifierSet::parse(">=3.0.0").unwrap();
        assert!(none.filter(&versions).is_empty());
        assert_eq!(none.max_satisfying(&versions), None);
    }
}
