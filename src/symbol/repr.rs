use std::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::Serialize;

pub type SymbolRepr = u32;
/// The first usable symbol ID.
pub const FIRST_ID: SymbolRepr = 0;
/// An ID no symbol may take.
pub const NULL_ID: SymbolRepr = !0;

/// A grammar symbol, distinguished by its ID.
///
/// The name and the terminal/nonterminal classification of a symbol live in
/// the grammar that created it.
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Symbol(NonZeroU32);

impl From<SymbolRepr> for Symbol {
    #[inline]
    fn from(id: SymbolRepr) -> Self {
        debug_assert_ne!(
            id, NULL_ID,
            "invalid conversion from a null id to non-null Symbol"
        );
        match NonZeroU32::new(id.wrapping_add(1)) {
            Some(n) => Symbol(n),
            None => unreachable!("symbol id overflow"),
        }
    }
}

impl From<Symbol> for SymbolRepr {
    #[inline]
    fn from(sym: Symbol) -> Self {
        sym.0.get().wrapping_sub(1)
    }
}

impl From<usize> for Symbol {
    #[inline]
    fn from(id: usize) -> Self {
        Symbol::from(id as SymbolRepr)
    }
}

impl From<Symbol> for usize {
    #[inline]
    fn from(sym: Symbol) -> Self {
        let id: SymbolRepr = sym.into();
        id as usize
    }
}

impl Symbol {
    /// Cast the symbol's ID to `usize`.
    #[inline]
    pub fn usize(self) -> usize {
        self.into()
    }
}
