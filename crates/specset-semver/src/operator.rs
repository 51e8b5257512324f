//! Comparison operators for specifier clauses

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Comparison operators for specifier clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Less than or equal (<=)
    LessThanOrEqual,
    /// Equal (==)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Greater than or equal (>=)
    GreaterThanOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Less than (<)
    LessThan,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid operator: {0}")]
pub struct InvalidOperatorError(pub String);

impl Operator {
    /// All operators in clause matching order.
    ///
    /// Two-character tokens come before their one-character prefixes so that
    /// `<=1.0.0` is never read as `<` followed by `=1.0.0`.
    pub const ALL: [Operator; 6] = [
        Operator::LessThanOrEqual,
        Operator::Equal,
        Operator::NotEqual,
        Operator::GreaterThanOrEqual,
        Operator::GreaterThan,
        Operator::LessThan,
    ];

    /// Parse an operator from its exact token
    pub fn from_token(s: &str) -> Result<Self, InvalidOperatorError> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| InvalidOperatorError(s.to_string()))
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
        }
    }

    /// Outcomes of `other.compare(bound)` that satisfy `<op> bound`.
    ///
    /// `Greater` means the other version orders after the bound.
    pub fn permitted_outcomes(&self) -> &'static [Ordering] {
        match self {
            Operator::LessThanOrEqual => &[Ordering::Equal, Ordering::Less],
            Operator::Equal => &[Ordering::Equal],
            Operator::NotEqual => &[Ordering::Less, Ordering::Greater],
            Operator::GreaterThanOrEqual => &[Ordering::Greater, Ordering::Equal],
            Operator::GreaterThan => &[Ordering::Greater],
            Operator::LessThan => &[Ordering::Less],
        }
    }

    /// Check whether a comparison outcome satisfies this operator
    pub fn permits(&self, outcome: Ordering) -> bool {
        self.permitted_outcomes().contains(&outcome)
    }

    /// Split a leading operator token off a clause.
    ///
    /// Returns the operator and the untrimmed remainder.
    pub fn strip_prefix(clause: &str) -> Option<(Self, &str)> {
        Self::ALL
            .iter()
            .find_map(|op| clause.strip_prefix(op.as_str()).map(|rest| (*op, rest)))
    }
}

impl FromStr for Operator {
    type Err = InvalidOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
