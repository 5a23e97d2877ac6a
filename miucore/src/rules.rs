//! Single-step rewrite rules of the MIU system.
//!
//! | rule | source  | target  |
//! |------|---------|---------|
//! | 1    | `xI`    | `xIU`   |
//! | 2    | `Mx`    | `Mxx`   |
//! | 3    | `xIIIy` | `xUy`   |
//! | 4    | `xUUy`  | `xy`    |
//!
//! Rules are relations rather than functions: rules 3 and 4 may match at several offsets of the
//! same string. [`Rule::applications`] lazily enumerates one [`Application`] per distinct target,
//! and [`successors`] chains the four rules into the one-step successor relation that the search
//! explores. None of these operations fail; a rule that does not match yields nothing.
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::symbol::{MString, Symbol};

const TRIPLE_I: [Symbol; 3] = [Symbol::I, Symbol::I, Symbol::I];
const DOUBLE_U: [Symbol; 2] = [Symbol::U, Symbol::U];

/// The four rewrite rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Serialize, Deserialize,
)]
pub enum Rule {
    /// Rule 1: a string ending in `I` may have a `U` appended.
    AppendU,
    /// Rule 2: the tail following the leading `M` may be duplicated.
    DoubleTail,
    /// Rule 3: any `III` may be replaced by `U`.
    CollapseIII,
    /// Rule 4: any `UU` may be deleted.
    DropUU,
}

impl Rule {
    /// Conventional rule number, from 1 to 4.
    pub const fn number(self) -> u8 {
        match self {
            Rule::AppendU => 1,
            Rule::DoubleTail => 2,
            Rule::CollapseIII => 3,
            Rule::DropUU => 4,
        }
    }

    /// Inverse of [`Rule::number`].
    pub fn from_number(number: u8) -> Option<Self> {
        Rule::iter().find(|rule| rule.number() == number)
    }

    /// Contiguous pattern matched by the positional rules (3 and 4).
    pub const fn pattern(self) -> Option<&'static [Symbol]> {
        match self {
            Rule::CollapseIII => Some(&TRIPLE_I),
            Rule::DropUU => Some(&DOUBLE_U),
            Rule::AppendU | Rule::DoubleTail => None,
        }
    }

    /// Whether an application of this rule needs a position to be unambiguous.
    #[inline]
    pub const fn is_positional(self) -> bool {
        self.pattern().is_some()
    }

    /// Lazily enumerate the applications of this rule to `source`, one per distinct target.
    pub fn applications(self, source: &MString) -> Applications<'_> {
        Applications {
            source,
            rule: self,
            cursor: 0,
        }
    }

    /// Lazily enumerate every distinct string obtained by one application of this rule.
    pub fn apply(self, source: &MString) -> impl Iterator<Item = MString> + '_ {
        self.applications(source)
            .map(move |application| application.rewrite(source))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.number())
    }
}

/// A rule together with the witness of where it applies.
///
/// `position` is the index of the first matched symbol for rules 3 and 4 (the length of the
/// prefix left untouched) and `None` for rules 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Application {
    pub rule: Rule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl Application {
    pub const fn new(rule: Rule, position: Option<usize>) -> Self {
        Self { rule, position }
    }

    /// Application of rule 1 or 2.
    pub const fn whole(rule: Rule) -> Self {
        Self::new(rule, None)
    }

    /// Application of rule 3 or 4 at `position`.
    pub const fn at(rule: Rule, position: usize) -> Self {
        Self::new(rule, Some(position))
    }

    /// Whether this application is legal on `source`.
    pub fn matches(&self, source: &MString) -> bool {
        match (self.rule, self.position) {
            (Rule::AppendU, None) => source.last() == Some(&Symbol::I),
            (Rule::DoubleTail, None) => source.first() == Some(&Symbol::M),
            (rule @ (Rule::CollapseIII | Rule::DropUU), Some(position)) => {
                let pattern = rule.pattern().unwrap_or_default();
                source
                    .get(position..)
                    .is_some_and(|rest| rest.starts_with(pattern))
            }
            _ => false,
        }
    }

    /// Apply to `source`, `None` if the rule does not match at the witness position.
    pub fn apply(&self, source: &MString) -> Option<MString> {
        self.matches(source).then(|| self.rewrite(source))
    }

    /// Rewrite `source`, which must be matched by this application.
    pub(crate) fn rewrite(&self, source: &MString) -> MString {
        match (self.rule, self.position) {
            (Rule::AppendU, _) => source.spliced(source.len(), 0, &[Symbol::U]),
            (Rule::DoubleTail, _) => source
                .iter()
                .chain(source.iter().skip(1))
                .copied()
                .collect(),
            (Rule::CollapseIII, position) => {
                source.spliced(position.unwrap_or_default(), 3, &[Symbol::U])
            }
            (Rule::DropUU, position) => source.spliced(position.unwrap_or_default(), 2, &[]),
        }
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} at {}", self.rule, position),
            None => write!(f, "{}", self.rule),
        }
    }
}

/// Iterator over the applications of one rule to one string. See [`Rule::applications`].
#[derive(Debug, Clone)]
pub struct Applications<'a> {
    source: &'a MString,
    rule: Rule,
    cursor: usize,
}

impl<'a> Iterator for Applications<'a> {
    type Item = Application;

    fn next(&mut self) -> Option<Self::Item> {
        let Some(pattern) = self.rule.pattern() else {
            // rules 1 and 2 match at most once
            if self.cursor > 0 {
                return None;
            }
            self.cursor = 1;
            let application = Application::whole(self.rule);
            return application.matches(self.source).then_some(application);
        };

        while self.cursor + pattern.len() <= self.source.len() {
            let position = self.cursor;
            self.cursor += 1;

            if &self.source[position..position + pattern.len()] != pattern {
                continue;
            }

            // Deleting `UU` anywhere inside a run of `U` gives the same string, keep the first.
            if self.rule == Rule::DropUU
                && position > 0
                && self.source[position - 1] == Symbol::U
            {
                continue;
            }

            return Some(Application::at(self.rule, position));
        }

        None
    }
}

/// One-step successors of `source` under all four rules, with the application producing each.
///
/// No two items share the same target.
pub fn successors(source: &MString) -> impl Iterator<Item = (Application, MString)> + '_ {
    Rule::iter().flat_map(move |rule| {
        rule.applications(source)
            .map(move |application| (application, application.rewrite(source)))
    })
}
