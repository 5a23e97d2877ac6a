//! Miucore: rewrite rules, bounded search and a linear-time decision procedure for the MIU
//! string-rewriting system.
//!
//! The system has three symbols (`M`, `I`, `U`), one axiom (`MI`) and four rules:
//!  1. `xI -> xIU`
//!  2. `Mx -> Mxx`
//!  3. `xIIIy -> xUy`
//!  4. `xUUy -> xy`
//!
//! A string is derivable when finitely many rule applications turn the axiom into it. The crate
//! answers that question two ways, which are tested against each other:
//!  - [`search`] explores the rewrite graph breadth-first within explicit ceilings and returns a
//!    checkable [`derivation::Derivation`] when it reaches the goal;
//!  - [`decision`] decides derivability in one pass over the string, with no search at all.
//!
//! [`reduction`] produces certificates for every string the decision procedure accepts, and
//! [`invariants`] checks the quantities every rule preserves.
//!
//! Example
//! ```
//! use miucore::prelude::*;
//!
//! let goal = parse("MUI").unwrap();
//! assert!(is_derivable(&goal));
//!
//! let certificate = construct_derivation(&goal).unwrap();
//! certificate.verify().unwrap();
//! assert_eq!(certificate.conclusion(), goal);
//!
//! assert!(!is_derivable(&parse("MU").unwrap()));
//! ```

/// Fast decision procedure.
pub mod decision;
/// Derivation certificates.
pub mod derivation;
/// Invariants preserved by the rules.
pub mod invariants;
/// Constants: environment variables and default search ceilings.
pub mod magic;
/// Certificates built without search.
pub mod reduction;
/// Single-step rewrite rules.
pub mod rules;
/// Bounded breadth-first search.
pub mod search;
/// Alphabet and strings.
pub mod symbol;
/// Configuration and error types.
pub mod utils;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::decision::{Rejection, Verdict, decide, is_derivable};
    pub use crate::derivation::{Derivation, DerivationStep};
    pub use crate::reduction::construct_derivation;
    pub use crate::rules::{Application, Rule, successors};
    pub use crate::search::{RewriteGraph, SearchLimits, Searcher, find_derivation};
    pub use crate::symbol::{MString, Symbol, format, parse};
    pub use crate::utils::error::{MiuError, MiuResult};
}
