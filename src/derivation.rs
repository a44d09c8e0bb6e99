//! Relations between nonterminals, in the form of bit matrices.

use bit_matrix::BitMatrix;

use crate::grammar::Cfg;
use crate::symbol::{Symbol, SymbolBitSet};

/// Computes the set of nullable nonterminals, which derive the empty string.
///
/// If all symbols on the RHS are nullable, the LHS is also nullable.
pub fn nullable_set(grammar: &Cfg) -> SymbolBitSet {
    let mut nullable = SymbolBitSet::from_elem(grammar.num_syms(), false);
    let mut changed = true;
    while changed {
        changed = false;
        for rule in grammar.rules() {
            if nullable.has_sym(rule.lhs) {
                continue;
            }
            if rule.rhs.iter().all(|&sym| nullable.has_sym(sym)) {
                nullable.set(rule.lhs, true);
                changed = true;
            }
        }
    }
    nullable
}

/// The relation "A can begin with B", where B is the first symbol of an
/// alternative of A once every nullable symbol before it is skipped. The
/// relation is transitively closed.
pub struct LeftCorners {
    matrix: BitMatrix,
}

impl LeftCorners {
    /// Computes left corners of all nonterminals.
    pub fn new(grammar: &Cfg) -> Self {
        let nullable = nullable_set(grammar);
        let num_syms = grammar.num_syms();
        let mut matrix = BitMatrix::new(num_syms, num_syms);
        for rule in grammar.rules() {
            for &sym in &rule.rhs {
                matrix.set(rule.lhs.usize(), sym.usize(), true);
                if !nullable.has_sym(sym) {
                    break;
                }
            }
        }
        matrix.transitive_closure();
        LeftCorners { matrix }
    }

    /// Checks whether `lhs` can begin with `sym`.
    pub fn has(&self, lhs: Symbol, sym: Symbol) -> bool {
        self.matrix[(lhs.usize(), sym.usize())]
    }

    /// Returns nonterminals that can begin with themselves.
    pub fn left_recursive<'a>(&'a self, grammar: &'a Cfg) -> impl Iterator<Item = Symbol> + 'a {
        grammar
            .nonterminals()
            .iter()
            .copied()
            .filter(move |&nt| self.has(nt, nt))
    }
}

/// The relation "A derives a string containing B", transitively closed.
pub struct Reachability {
    matrix: BitMatrix,
}

impl Reachability {
    /// Computes reachability between all symbols.
    pub fn new(grammar: &Cfg) -> Self {
        let num_syms = grammar.num_syms();
        let mut matrix = BitMatrix::new(num_syms, num_syms);
        for rule in grammar.rules() {
            for &sym in &rule.rhs {
                matrix.set(rule.lhs.usize(), sym.usize(), true);
            }
        }
        matrix.transitive_closure();
        Reachability { matrix }
    }

    /// Checks whether `from` derives a string containing `to`.
    pub fn reaches(&self, from: Symbol, to: Symbol) -> bool {
        self.matrix[(from.usize(), to.usize())]
    }
}

impl Cfg {
    /// Checks whether any nonterminal can begin with itself, directly or
    /// through a chain of other nonterminals.
    pub fn is_left_recursive(&self) -> bool {
        LeftCorners::new(self).left_recursive(self).next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indirect_left_recursion_through_nullable_prefix() {
        let mut cfg = Cfg::new();
        let [s, a, b] = ["S", "A", "B"].map(|name| cfg.nonterminal(name));
        let [x, y] = ["x", "y"].map(|name| cfg.terminal(name));
        cfg.rule(s)
            .rhs([b, a, x])
            .rule(a)
            .rhs([s, y])
            .rhs([y])
            .rule(b)
            .rhs([]);

        let corners = LeftCorners::new(&cfg);
        assert!(corners.has(s, a));
        assert!(corners.has(a, s));
        assert_eq!(corners.left_recursive(&cfg).collect::<Vec<_>>(), vec![s, a]);
        assert!(cfg.is_left_recursive());
    }

    #[test]
    fn right_recursion_is_not_left_recursion() {
        let mut cfg = Cfg::new();
        let e = cfg.nonterminal("E");
        let [id, plus] = ["id", "+"].map(|name| cfg.terminal(name));
        cfg.rule(e).rhs([id, plus, e]).rhs([id]);

        assert!(!cfg.is_left_recursive());
        assert!(Reachability::new(&cfg).reaches(e, plus));
    }
}
