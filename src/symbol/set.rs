//! Informs whether symbols are terminal or nonterminal.

use std::iter;

use bit_vec::BitVec;

use crate::symbol::Symbol;

/// A set of symbols in the form of a bit vector.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SymbolBitSet {
    bit_vec: BitVec,
}

/// An iterator over a symbol set.
pub struct Iter<'a> {
    iter: iter::Enumerate<bit_vec::Iter<'a>>,
}

impl SymbolBitSet {
    /// Constructs an empty `SymbolBitSet`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a `SymbolBitSet` for `num_syms` symbols, all set to `elem`.
    pub fn from_elem(num_syms: usize, elem: bool) -> Self {
        SymbolBitSet {
            bit_vec: BitVec::from_elem(num_syms, elem),
        }
    }

    /// Makes room for at least `num_syms` symbols. New entries are unset.
    pub fn reserve(&mut self, num_syms: usize) {
        let len = self.bit_vec.len();
        if num_syms > len {
            self.bit_vec.grow(num_syms - len, false);
        }
    }

    /// Set the entry for a symbol.
    pub fn set(&mut self, sym: Symbol, value: bool) {
        self.reserve(sym.usize() + 1);
        self.bit_vec.set(sym.usize(), value);
    }

    /// Checks whether a given symbol is in this set.
    pub fn has_sym(&self, sym: Symbol) -> bool {
        self.bit_vec.get(sym.usize()).unwrap_or(false)
    }

    /// Converts into a bit vector.
    pub fn into_bit_vec(self) -> BitVec {
        self.bit_vec
    }

    /// Iterates over symbols in the set.
    pub fn iter(&self) -> Iter {
        Iter {
            iter: self.bit_vec.iter().enumerate(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Symbol;
    fn next(&mut self) -> Option<Self::Item> {
        for (id, is_present) in &mut self.iter {
            if is_present {
                return Some(Symbol::from(id));
            }
        }
        None
    }
}
