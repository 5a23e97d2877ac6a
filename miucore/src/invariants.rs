//! Quantities preserved by every rule application from the axiom.
//!
//! * M-position: the string holds exactly one `M`, at index 0.
//! * I-residue: the number of `I`s modulo 3 is never 0. Rules 1, 3 and 4 keep the residue, rule 2
//!   maps `r` to `2r mod 3`.
//!
//! These are the two inductive invariants behind the soundness half of
//! [`crate::decision`]. The checks below are applied to certificates produced by the search and
//! by the constructive reduction.
use crate::{
    derivation::{Derivation, DerivationStep},
    rules::Rule,
    symbol::{MString, Symbol},
    utils::error::{MiuError, MiuResult},
};

/// Number of `I`s modulo 3.
pub fn counted_residue(s: &MString) -> u8 {
    (s.count(Symbol::I) % 3) as u8
}

/// Whether `s` holds exactly one `M`, in leading position.
pub fn primary_position_holds(s: &MString) -> bool {
    match s.split_first() {
        Some((Symbol::M, tail)) => !tail.contains(&Symbol::M),
        _ => false,
    }
}

impl Rule {
    /// Number of `I`s after one application of this rule to a string holding `count` of them.
    ///
    /// `None` for rule 3 when fewer than three `I`s are available.
    pub const fn counted_after(self, count: usize) -> Option<usize> {
        match self {
            Rule::AppendU | Rule::DropUU => Some(count),
            Rule::DoubleTail => Some(2 * count),
            Rule::CollapseIII => count.checked_sub(3),
        }
    }

    /// Residue modulo 3 of the `I` count after one application of this rule.
    pub const fn residue_after(self, residue: u8) -> u8 {
        match self {
            Rule::DoubleTail => (2 * residue) % 3,
            Rule::AppendU | Rule::CollapseIII | Rule::DropUU => residue % 3,
        }
    }
}

/// Check both invariants before and after `step`, along with the exact change of the `I` count.
///
/// `index` is the position of the step in its derivation and is only used for error reporting.
pub fn check_step(index: usize, step: &DerivationStep) -> MiuResult<()> {
    let rule = step.rule();
    let violation = |reason: String| MiuError::InvariantViolated {
        index,
        rule,
        reason,
    };

    for s in [&step.source, &step.target] {
        if !primary_position_holds(s) {
            return Err(violation(format!("`{s}` does not hold a single leading 'M'")));
        }
    }

    let before = step.source.count(Symbol::I);
    let after = step.target.count(Symbol::I);
    if rule.counted_after(before) != Some(after) {
        return Err(violation(format!("'I' count went from {before} to {after}")));
    }

    let residue_before = counted_residue(&step.source);
    let residue_after = counted_residue(&step.target);
    if residue_before == 0 || residue_after == 0 {
        return Err(violation(format!(
            "'I' residue went from {residue_before} to {residue_after}, it must never be 0"
        )));
    }
    if rule.residue_after(residue_before) != residue_after {
        return Err(violation(format!(
            "'I' residue went from {residue_before} to {residue_after}, expected {}",
            rule.residue_after(residue_before)
        )));
    }

    Ok(())
}

/// Check every step of `derivation`.
pub fn check_derivation(derivation: &Derivation) -> MiuResult<()> {
    derivation
        .steps()
        .iter()
        .enumerate()
        .try_for_each(|(index, step)| check_step(index, step))
}
