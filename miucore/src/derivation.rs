//! Derivation certificates.
//!
//! A [`Derivation`] is a finite chain of [`DerivationStep`]s starting at the axiom `MI`. Each step
//! records its source, its target and the [`Application`] (rule and witness position) relating
//! them, so that a certificate can be re-checked independently of how it was produced.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    rules::{Application, Rule},
    symbol::MString,
    utils::error::{MiuError, MiuResult},
};

/// One rule application inside a derivation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DerivationStep {
    pub source: MString,
    pub target: MString,
    pub application: Application,
}

impl DerivationStep {
    /// Apply `application` to `source`, `None` if it does not match.
    pub fn new(source: MString, application: Application) -> Option<Self> {
        let target = application.apply(&source)?;
        Some(Self {
            source,
            target,
            application,
        })
    }

    #[inline]
    pub fn rule(&self) -> Rule {
        self.application.rule
    }

    /// Whether `application` really rewrites `source` into `target`.
    pub fn is_valid(&self) -> bool {
        self.application.apply(&self.source).as_ref() == Some(&self.target)
    }
}

/// A certificate of derivability: the ordered rule applications leading from the axiom to
/// [`Derivation::conclusion`]. The empty derivation concludes the axiom itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derivation {
    steps: Vec<DerivationStep>,
}

impl Derivation {
    /// The empty derivation, concluding the axiom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a list of steps without checking them. See [`Derivation::verify`].
    pub fn from_steps(steps: Vec<DerivationStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<DerivationStep> {
        self.steps
    }

    /// Number of rule applications.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The derived string: the last target, or the axiom if there are no steps.
    pub fn conclusion(&self) -> MString {
        self.steps
            .last()
            .map(|step| step.target.clone())
            .unwrap_or_else(MString::axiom)
    }

    /// Extend the derivation by applying `application` to the current conclusion.
    ///
    /// Fails with [`MiuError::InvalidDerivation`] if the rule does not match; the derivation is
    /// left untouched in that case.
    pub fn push(&mut self, application: Application) -> MiuResult<&MString> {
        let source = self.conclusion();
        let index = self.steps.len();
        let step = DerivationStep::new(source, application).ok_or_else(|| {
            MiuError::InvalidDerivation {
                index,
                reason: format!(
                    "{application} does not apply to `{}`",
                    self.conclusion()
                ),
            }
        })?;
        self.steps.push(step);
        Ok(&self.steps[index].target)
    }

    /// Check the whole chain: it starts at the axiom, consecutive steps connect, and every step
    /// is a legal rule application at its witness.
    pub fn verify(&self) -> MiuResult<()> {
        let mut expected = MString::axiom();
        for (index, step) in self.steps.iter().enumerate() {
            if step.source != expected {
                return Err(MiuError::InvalidDerivation {
                    index,
                    reason: format!(
                        "step starts from `{}` but the previous string is `{expected}`",
                        step.source
                    ),
                });
            }

            match step.application.apply(&step.source) {
                None => {
                    return Err(MiuError::InvalidDerivation {
                        index,
                        reason: format!(
                            "{} does not apply to `{}`",
                            step.application, step.source
                        ),
                    });
                }
                Some(target) if target != step.target => {
                    return Err(MiuError::InvalidDerivation {
                        index,
                        reason: format!(
                            "{} turns `{}` into `{target}`, not `{}`",
                            step.application, step.source, step.target
                        ),
                    });
                }
                Some(_) => {}
            }

            expected = step.target.clone();
        }
        Ok(())
    }

    /// Whether this is a valid certificate for `goal`.
    pub fn proves(&self, goal: &MString) -> bool {
        self.verify().is_ok() && &self.conclusion() == goal
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axiom = MString::axiom().to_string();
        let width = self
            .steps
            .iter()
            .map(|step| step.target.len())
            .max()
            .unwrap_or(0)
            .max(axiom.len());

        writeln!(f, "{:>4}  {axiom:<width$}  axiom", 0)?;
        for (index, step) in self.steps.iter().enumerate() {
            let target = step.target.to_string();
            writeln!(f, "{:>4}  {target:<width$}  {}", index + 1, step.application)?;
        }
        Ok(())
    }
}
