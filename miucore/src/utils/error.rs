use thiserror::Error;

use crate::{decision::Rejection, rules::Rule, symbol::MString};

#[derive(Debug, Error)]
pub enum MiuError {
    /// A character outside of the `M`, `I`, `U` alphabet was found while parsing.
    #[error("Invalid symbol '{symbol}' at position {position}; only 'M', 'I' and 'U' are allowed")]
    InvalidSymbol { symbol: char, position: usize },

    /// The search stopped on one of its ceilings before reaching the goal. This is not a proof
    /// that the goal is underivable.
    #[error(
        "No derivation of `{goal}` found within the search bounds ({explored} strings explored, depth {depth} reached)"
    )]
    SearchBoundExceeded {
        goal: MString,
        explored: usize,
        depth: usize,
    },

    /// The goal fails the closed-form test, so no certificate can be built for it.
    #[error("`{goal}` is not derivable: {reason}")]
    NotDerivable { goal: MString, reason: Rejection },

    /// A certificate step is not a legal rule application, or the chain is broken.
    #[error("Invalid derivation at step {index}: {reason}")]
    InvalidDerivation { index: usize, reason: String },

    /// A rule application broke the M-position or I-residue invariant.
    #[error("Invariant violated by {rule} at step {index}: {reason}")]
    InvariantViolated {
        index: usize,
        rule: Rule,
        reason: String,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    #[error("Failed to serialize: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

pub type MiuResult<T> = Result<T, MiuError>;
