//! Edge pair - one decoded `(P,C)` token

use std::fmt;

/// A parent → child relationship between two symbols
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgePair {
    /// Parent symbol
    pub parent: char,

    /// Child symbol
    pub child: char,
}

impl EdgePair {
    pub fn new(parent: char, child: char) -> Self {
        EdgePair { parent, child }
    }
}

/// Renders the pair in its wire form, without the trailing separator
impl fmt::Display for EdgePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.parent, self.child)
    }
}

impl From<(char, char)> for EdgePair {
    fn from((parent, child): (char, char)) -> Self {
        EdgePair { parent, child }
    }
}
