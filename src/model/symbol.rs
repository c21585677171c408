//! Symbol range - the alphabet nodes are named from

use crate::{Error, Result};
use std::fmt;

/// A contiguous, inclusive range of characters usable as node symbols
///
/// Symbols double as node identity and ordering key. A symbol's slot in the
/// node table is its distance from `min`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolRange {
    min: char,
    max: char,
}

impl SymbolRange {
    /// Uppercase Latin letters
    pub const DEFAULT: SymbolRange = SymbolRange { min: 'A', max: 'Z' };

    /// Create a range, rejecting an inverted one
    pub fn new(min: char, max: char) -> Result<Self> {
        if min > max {
            return Err(Error::Config(format!(
                "symbol range is inverted: {:?} > {:?}",
                min, max
            )));
        }
        Ok(SymbolRange { min, max })
    }

    pub fn min(&self) -> char {
        self.min
    }

    pub fn max(&self) -> char {
        self.max
    }

    /// Check whether a character is a valid symbol
    pub fn contains(&self, c: char) -> bool {
        self.min <= c && c <= self.max
    }

    /// Number of table slots the range needs
    pub fn width(&self) -> usize {
        (self.max as u32 - self.min as u32) as usize + 1
    }

    /// Table slot for a symbol, `None` if it is outside the range
    pub fn index(&self, c: char) -> Option<usize> {
        if self.contains(c) {
            Some((c as u32 - self.min as u32) as usize)
        } else {
            None
        }
    }

    /// All valid symbols in ascending order
    pub fn symbols(&self) -> impl Iterator<Item = char> {
        self.min..=self.max
    }
}

impl Default for SymbolRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SymbolRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}
