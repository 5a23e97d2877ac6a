//! Linear-time decision procedure for derivability.
//!
//! A string is derivable from `MI` if and only if
//!  1. it is non-empty and starts with `M`,
//!  2. no other position holds an `M`,
//!  3. its number of `I`s is not a multiple of 3.
//!
//! [`decide`] checks the three conditions in a single pass and never searches.
//!
//! ## Soundness (derivable implies the conditions)
//! By induction on the length of a derivation. The axiom `MI` satisfies all three (one `I`).
//! For a single step from a string satisfying them:
//!  * conditions 1 and 2: rules 1, 3 and 4 only touch `I`/`U` symbols (rule 3 and 4 patterns hold
//!    no `M`, rule 1 appends after an `I`), so the leading `M` stays and no `M` is created. Rule 2
//!    copies the tail, which holds no `M`, so the result is again `M` followed by `M`-free symbols.
//!  * condition 3: with `r` the residue of the `I` count modulo 3, rules 1 and 4 keep the count,
//!    rule 3 removes exactly three `I`s, so `r` is unchanged. Rule 2 doubles the count, mapping
//!    `r` to `2r mod 3`: 1 becomes 2 and 2 becomes 1. A non-zero residue therefore never becomes 0.
//!
//! [`crate::invariants`] turns both invariants into executable checks on individual steps.
//!
//! ## Completeness (the conditions imply derivable)
//! Let the goal be `Mx` with `n` `I`s and `u` `U`s in `x` and `c = n + 3u`. Since `n` is not a
//! multiple of 3, neither is `c`. Doubling from `MI` with rule 2 visits `MI^m` for every power of
//! two `m`, whose residues alternate between 1 and 2, so some `m >= c` has `m ≡ c (mod 3)`. The
//! surplus `m - c` is a multiple of 3: collapse it into `U`s with rule 3 (after one rule 1 if the
//! number of such `U`s would be odd), erase those `U`s pairwise with rule 4, and obtain `MI^c`.
//! Finally every `U` of `x` is produced in place from three `I`s with rule 3.
//! [`crate::reduction::construct_derivation`] implements this construction and returns the
//! resulting certificate.
use std::fmt;

use strum::EnumIs;

use crate::symbol::{MString, Symbol};

/// First condition of the closed-form test a string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The empty string.
    Empty,
    /// The first symbol is not `M`.
    MissingLeadingM,
    /// An `M` appears after the first position.
    MisplacedM { position: usize },
    /// The number of `I`s is a multiple of 3 (zero included).
    CountedMultipleOfThree { count: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Empty => write!(f, "the string is empty"),
            Rejection::MissingLeadingM => write!(f, "the string does not start with 'M'"),
            Rejection::MisplacedM { position } => {
                write!(f, "'M' appears at position {position}, only position 0 may hold it")
            }
            Rejection::CountedMultipleOfThree { count } => {
                write!(f, "the number of 'I' symbols ({count}) is a multiple of 3")
            }
        }
    }
}

/// Outcome of the decision procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIs)]
pub enum Verdict {
    /// The string is derivable; `counted` is its number of `I`s.
    Derivable { counted: usize },
    NotDerivable(Rejection),
}

impl Verdict {
    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Verdict::Derivable { .. } => None,
            Verdict::NotDerivable(rejection) => Some(*rejection),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Derivable { .. } => write!(f, "derivable"),
            Verdict::NotDerivable(rejection) => write!(f, "not derivable ({rejection})"),
        }
    }
}

/// Decide derivability of `s` in one pass over its symbols.
pub fn decide(s: &MString) -> Verdict {
    let mut symbols = s.iter();
    match symbols.next() {
        None => return Verdict::NotDerivable(Rejection::Empty),
        Some(Symbol::M) => {}
        Some(_) => return Verdict::NotDerivable(Rejection::MissingLeadingM),
    }

    let mut counted = 0usize;
    for (offset, symbol) in symbols.enumerate() {
        match symbol {
            Symbol::M => {
                return Verdict::NotDerivable(Rejection::MisplacedM {
                    position: offset + 1,
                });
            }
            Symbol::I => counted += 1,
            Symbol::U => {}
        }
    }

    if counted % 3 == 0 {
        Verdict::NotDerivable(Rejection::CountedMultipleOfThree { count: counted })
    } else {
        Verdict::Derivable { counted }
    }
}

/// Whether `s` is derivable from the axiom `MI`.
#[inline]
pub fn is_derivable(s: &MString) -> bool {
    decide(s).is_derivable()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::parse;

    fn verdict(text: &str) -> Verdict {
        decide(&parse(text).unwrap())
    }

    #[test]
    fn axiom_and_known_theorems() {
        assert_eq!(verdict("MI"), Verdict::Derivable { counted: 1 });
        assert!(verdict("MIU").is_derivable());
        assert!(verdict("MUI").is_derivable());
        assert!(verdict("MII").is_derivable());
        assert!(verdict("MUIIU").is_derivable());
    }

    #[test]
    fn mu_is_not_a_theorem() {
        assert_eq!(
            verdict("MU"),
            Verdict::NotDerivable(Rejection::CountedMultipleOfThree { count: 0 })
        );
        assert_eq!(
            verdict("MIII"),
            Verdict::NotDerivable(Rejection::CountedMultipleOfThree { count: 3 })
        );
        assert_eq!(
            verdict("M"),
            Verdict::NotDerivable(Rejection::CountedMultipleOfThree { count: 0 })
        );
    }

    #[test]
    fn misplaced_or_missing_m() {
        assert_eq!(
            verdict("IMU"),
            Verdict::NotDerivable(Rejection::MissingLeadingM)
        );
        assert_eq!(verdict(""), Verdict::NotDerivable(Rejection::Empty));
        assert_eq!(
            verdict("MIIMI"),
            Verdict::NotDerivable(Rejection::MisplacedM { position: 3 })
        );
        assert_eq!(verdict("UI").rejection(), Some(Rejection::MissingLeadingM));
    }

    #[test]
    fn display() {
        assert_eq!(verdict("MI").to_string(), "derivable");
        assert_eq!(
            verdict("MU").to_string(),
            "not derivable (the number of 'I' symbols (0) is a multiple of 3)"
        );
    }
}
