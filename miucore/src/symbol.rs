//! Alphabet and strings of the MIU system.
//!
//! An [`MString`] is an ordered sequence of [`Symbol`]s. Strings are plain values: equality,
//! ordering and hashing are those of the underlying symbol sequence.
//!
//! ```
//! use miucore::symbol::{MString, Symbol, format, parse};
//!
//! let s = parse("MIU").unwrap();
//! assert_eq!(s.as_slice(), &[Symbol::M, Symbol::I, Symbol::U]);
//! assert_eq!(format(&s), "MIU");
//! assert_eq!(MString::axiom(), parse("MI").unwrap());
//! ```
use std::{fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use strum::EnumIter;

use crate::utils::error::{MiuError, MiuResult};

/// A symbol of the MIU alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Symbol {
    /// The primary symbol. Derivable strings hold exactly one, in leading position.
    M,
    /// The counted symbol. Its number of occurrences modulo 3 decides derivability.
    I,
    /// The filler symbol, produced by rules 1 and 3 and removed in pairs by rule 4.
    U,
}

impl Symbol {
    /// Textual representation of the symbol.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Symbol::M => 'M',
            Symbol::I => 'I',
            Symbol::U => 'U',
        }
    }

    /// Parse a single character, `None` if it is not part of the alphabet.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(Symbol::M),
            'I' => Some(Symbol::I),
            'U' => Some(Symbol::U),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Number of symbols kept inline before spilling to the heap.
const INLINE_SYMBOLS: usize = 24;

/// A finite string over the MIU alphabet.
///
/// Short strings (the common case in derivations) are stored inline. The string dereferences to
/// `[Symbol]`, so slice methods (`len`, `iter`, `starts_with`, `windows`, ...) are available.
#[derive(Clone, Default)]
pub struct MString {
    symbols: SmallVec<Symbol, INLINE_SYMBOLS>,
}

impl MString {
    /// The empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// The axiom `MI`, root of every derivation.
    pub fn axiom() -> Self {
        [Symbol::M, Symbol::I].into_iter().collect()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Append a symbol at the end of the string.
    #[inline]
    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    /// Number of occurrences of `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.symbols.iter().filter(|&&s| s == symbol).count()
    }

    /// Copy of this string where `len` symbols starting at `start` are replaced by `with`.
    ///
    /// The caller guarantees `start + len <= self.len()`.
    pub(crate) fn spliced(&self, start: usize, len: usize, with: &[Symbol]) -> Self {
        self.symbols[..start]
            .iter()
            .chain(with)
            .chain(&self.symbols[start + len..])
            .copied()
            .collect()
    }
}

impl Deref for MString {
    type Target = [Symbol];

    #[inline]
    fn deref(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl FromIterator<Symbol> for MString {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl Extend<Symbol> for MString {
    fn extend<T: IntoIterator<Item = Symbol>>(&mut self, iter: T) {
        self.symbols.extend(iter);
    }
}

impl From<&[Symbol]> for MString {
    fn from(value: &[Symbol]) -> Self {
        value.iter().copied().collect()
    }
}

impl PartialEq for MString {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for MString {}

impl PartialOrd for MString {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MString {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl std::hash::Hash for MString {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl fmt::Display for MString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.iter() {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for MString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MString(\"{self}\")")
    }
}

impl FromStr for MString {
    type Err = MiuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Serialize for MString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Parse `text` into an [`MString`].
///
/// Fails with [`MiuError::InvalidSymbol`] on the first character outside of the alphabet; the
/// reported position is a character index.
pub fn parse(text: &str) -> MiuResult<MString> {
    text.chars()
        .enumerate()
        .map(|(position, c)| {
            Symbol::from_char(c).ok_or(MiuError::InvalidSymbol {
                symbol: c,
                position,
            })
        })
        .collect()
}

/// Render `s` as text. Inverse of [`parse`].
pub fn format(s: &MString) -> String {
    s.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_symbols() {
        let s = parse("MIUUI").unwrap();
        assert_eq!(
            s.as_slice(),
            &[Symbol::M, Symbol::I, Symbol::U, Symbol::U, Symbol::I]
        );
        assert_eq!(s.count(Symbol::I), 2);
        assert_eq!(s.count(Symbol::M), 1);
    }

    #[test]
    fn parse_empty() {
        let s = parse("").unwrap();
        assert!(s.is_empty());
        assert_eq!(format(&s), "");
    }

    #[test]
    fn parse_rejects_foreign_characters() {
        match parse("MIxU") {
            Err(MiuError::InvalidSymbol { symbol, position }) => {
                assert_eq!(symbol, 'x');
                assert_eq!(position, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        // lowercase is not accepted
        assert!(parse("mi").is_err());
        // position counts characters, not bytes
        assert!(matches!(
            parse("MIé"),
            Err(MiuError::InvalidSymbol { position: 2, .. })
        ));
    }

    #[test]
    fn spliced_replaces_range() {
        let s = parse("MIIIU").unwrap();
        assert_eq!(s.spliced(1, 3, &[Symbol::U]), parse("MUU").unwrap());
        assert_eq!(s.spliced(4, 1, &[]), parse("MIII").unwrap());
        assert_eq!(s.spliced(5, 0, &[Symbol::U]), parse("MIIIUU").unwrap());
    }

    #[test]
    fn long_strings_spill_to_heap() {
        let text = "MI".repeat(40);
        let s = parse(&text).unwrap();
        assert_eq!(s.len(), 80);
        assert_eq!(format(&s), text);
        assert_eq!(s.clone(), s);
    }

    #[test]
    fn ordering_follows_symbols() {
        let a = parse("MI").unwrap();
        let b = parse("MU").unwrap();
        let c = parse("MIU").unwrap();
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
        assert_eq!(format!("{a:?}"), "MString(\"MI\")");
    }
}
