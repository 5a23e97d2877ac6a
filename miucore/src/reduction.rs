//! Certificates without search.
//!
//! [`construct_derivation`] builds a derivation for any string accepted by
//! [`crate::decision::decide`], following the completeness argument documented there. For a goal
//! `Mx` with `n` `I`s and `u` `U`s in `x`, and `c = n + 3u`:
//!  1. rule 2 from `MI` until `MI^m` with `m >= c` and `m ≡ c (mod 3)`;
//!  2. if `(m - c) / 3` is odd, rule 1 once, so that an even number of `U`s will be produced;
//!  3. rule 3 `(m - c) / 3` times on the right end of the `I` run: `MI^c U^k` with `k` even;
//!  4. rule 4 until those `U`s are gone: `MI^c`;
//!  5. rule 3 at the offset of every `U` of `x`, from left to right.
//!
//! The certificate has `O(c)` steps. Each step stores its strings, of length at most `m + 2`.
use log::debug;

use crate::{
    decision::{Verdict, decide},
    derivation::Derivation,
    rules::{Application, Rule},
    symbol::{MString, Symbol},
    utils::error::{MiuError, MiuResult},
};

/// Build a derivation of `goal` from the axiom.
///
/// Fails with [`MiuError::NotDerivable`] when `goal` is rejected by the decision procedure.
pub fn construct_derivation(goal: &MString) -> MiuResult<Derivation> {
    let counted = match decide(goal) {
        Verdict::Derivable { counted } => counted,
        Verdict::NotDerivable(reason) => {
            return Err(MiuError::NotDerivable {
                goal: goal.clone(),
                reason,
            });
        }
    };

    let tail = &goal[1..];
    let fillers = tail.len() - counted;
    let target = counted + 3 * fillers;

    let mut derivation = Derivation::new();

    let mut pumped = 1usize;
    while pumped < target || pumped % 3 != target % 3 {
        derivation.push(Application::whole(Rule::DoubleTail))?;
        pumped *= 2;
    }

    let surplus = (pumped - target) / 3;
    let mut trailing = surplus;
    if surplus % 2 == 1 {
        derivation.push(Application::whole(Rule::AppendU))?;
        trailing += 1;
    }

    // MI^pumped [U] -> MI^target U^trailing
    for k in 1..=surplus {
        derivation.push(Application::at(Rule::CollapseIII, 1 + pumped - 3 * k))?;
    }
    for _ in 0..trailing / 2 {
        derivation.push(Application::at(Rule::DropUU, 1 + target))?;
    }

    for (offset, symbol) in tail.iter().enumerate() {
        if *symbol == Symbol::U {
            derivation.push(Application::at(Rule::CollapseIII, 1 + offset))?;
        }
    }

    debug!(
        "Constructed a derivation of `{goal}` in {} steps, pumping to {pumped} 'I's",
        derivation.len()
    );
    Ok(derivation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decision::Rejection, invariants::check_derivation, symbol::parse};

    fn construct(text: &str) -> Derivation {
        let goal = parse(text).unwrap();
        let derivation = construct_derivation(&goal).unwrap();
        assert!(derivation.proves(&goal), "bad certificate for {text}");
        check_derivation(&derivation).unwrap();
        derivation
    }

    #[test]
    fn axiom_is_immediate() {
        assert!(construct("MI").is_empty());
    }

    #[test]
    fn mui_by_doubling_then_collapsing() {
        let rules: Vec<Application> = construct("MUI")
            .steps()
            .iter()
            .map(|step| step.application)
            .collect();
        assert_eq!(
            rules,
            [
                Application::whole(Rule::DoubleTail),
                Application::whole(Rule::DoubleTail),
                Application::at(Rule::CollapseIII, 1),
            ]
        );
    }

    #[test]
    fn odd_surplus_uses_rule_one() {
        // 10 'I's: pumped to 16, surplus of 2 triples is even
        let derivation = construct("MIIIIIIIIII");
        assert!(derivation.steps().iter().all(|s| s.rule() != Rule::AppendU));

        // 'MIIIIIII' has 7 'I's: pumped to 16, surplus of 3 triples is odd
        let derivation = construct("MIIIIIII");
        assert!(derivation.steps().iter().any(|s| s.rule() == Rule::AppendU));
    }

    #[test]
    fn various_shapes() {
        for text in ["MIU", "MUUI", "MIUUU", "MUUUUUUI", "MIIUIIU", "MUIUIU"] {
            construct(text);
        }
    }

    #[test]
    fn long_goal() {
        let text = format!("M{}", "IU".repeat(50));
        let derivation = construct(&text);
        assert!(derivation.len() > 50);
    }

    #[test]
    fn rejected_goals() {
        for (text, expected) in [
            ("MU", Rejection::CountedMultipleOfThree { count: 0 }),
            ("IMU", Rejection::MissingLeadingM),
            ("MIMI", Rejection::MisplacedM { position: 2 }),
            ("", Rejection::Empty),
        ] {
            match construct_derivation(&parse(text).unwrap()) {
                Err(MiuError::NotDerivable { reason, .. }) => assert_eq!(reason, expected),
                other => panic!("unexpected result for {text}: {other:?}"),
            }
        }
    }
}
