//! Source

use std::collections::HashMap;

use crate::symbol::repr::{SymbolRepr, FIRST_ID, NULL_ID};
use crate::symbol::Symbol;

/// A source of numeric symbols that remembers the name of every symbol it
/// handed out.
#[derive(Clone, Debug, Default)]
pub struct SymbolSource {
    names: Vec<String>,
    ids: HashMap<String, Symbol>,
}

impl SymbolSource {
    /// Creates a source of numeric symbols with an empty symbol space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol with the given name, generating it first if the
    /// name was never seen.
    pub fn intern(&mut self, name: &str) -> Symbol {
        if let Some(&sym) = self.ids.get(name) {
            return sym;
        }
        let id = FIRST_ID + self.names.len() as SymbolRepr;
        debug_assert_ne!(id, NULL_ID, "ran out of Symbol space?");
        let sym = Symbol::from(id);
        self.names.push(name.to_owned());
        self.ids.insert(name.to_owned(), sym);
        sym
    }

    /// Looks up a symbol by name.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.ids.get(name).copied()
    }

    /// Returns the name of a symbol generated by this source.
    pub fn name(&self, sym: Symbol) -> &str {
        &self.names[sym.usize()]
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.names.len()
    }

    /// Returns a name derived from `base` that no symbol uses yet: `base'`,
    /// then `base''` and so on.
    pub fn fresh_name(&self, base: &str) -> String {
        let mut candidate = format!("{}'", base);
        while self.ids.contains_key(&candidate) {
            candidate.push('\'');
        }
        candidate
    }

    /// Iterates over all symbols in the order they were generated.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.names.len()).map(Symbol::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_stable() {
        let mut source = SymbolSource::new();
        let e = source.intern("E");
        let t = source.intern("T");
        assert_ne!(e, t);
        assert_eq!(source.intern("E"), e);
        assert_eq!(source.name(t), "T");
        assert_eq!(source.num_syms(), 2);
    }

    #[test]
    fn fresh_name_escalates_primes() {
        let mut source = SymbolSource::new();
        source.intern("E");
        assert_eq!(source.fresh_name("E"), "E'");
        source.intern("E'");
        assert_eq!(source.fresh_name("E"), "E''");
        source.intern("E''");
        assert_eq!(source.fresh_name("E"), "E'''");
        assert_eq!(source.fresh_name("T"), "T'");
    }
}
