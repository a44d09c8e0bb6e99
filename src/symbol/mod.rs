//! A type that can represent symbols in a context-free grammar. Symbols are distinguished by their
//! IDs.

mod repr;
pub mod set;
pub mod source;

#[cfg(feature = "serde")]
use serde::Serialize;

pub use self::repr::Symbol;
pub use self::set::SymbolBitSet;
pub use self::source::SymbolSource;

/// Name under which the empty string is displayed.
pub const EPSILON: &str = "epsilon";
/// Name under which the end of input is displayed.
pub const END_MARKER: &str = "$";

/// An element of a FIRST set, a FOLLOW set, or a parse table column.
///
/// The two reserved cases are separate variants, so a grammar symbol that
/// happens to be called `epsilon` or `$` never collides with them.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Lookahead {
    /// A terminal symbol of the grammar.
    Terminal(Symbol),
    /// The empty string. Only found in FIRST sets.
    Epsilon,
    /// The end of input. Only found in FOLLOW sets and table columns.
    EndMarker,
}

impl Lookahead {
    /// Returns the terminal, if this is one.
    pub fn terminal(self) -> Option<Symbol> {
        match self {
            Lookahead::Terminal(sym) => Some(sym),
            _ => None,
        }
    }

    /// Returns the display name of this lookahead.
    pub fn name(self, source: &SymbolSource) -> &str {
        match self {
            Lookahead::Terminal(sym) => source.name(sym),
            Lookahead::Epsilon => EPSILON,
            Lookahead::EndMarker => END_MARKER,
        }
    }
}

impl From<Symbol> for Lookahead {
    fn from(sym: Symbol) -> Self {
        Lookahead::Terminal(sym)
    }
}
