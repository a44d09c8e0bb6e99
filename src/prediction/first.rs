//! FIRST sets.

use std::collections::BTreeMap;

use log::trace;

use crate::grammar::Cfg;
use crate::prediction::{PerSymbolSets, PredictSet, PredictSets};
use crate::symbol::{Lookahead, Symbol, SymbolBitSet};

/// FIRST sets.
#[derive(Clone, Debug)]
pub struct FirstSets {
    map: PerSymbolSets,
    terminal_set: SymbolBitSet,
}

impl FirstSets {
    /// Compute all FIRST sets of the grammar.
    ///
    /// Every terminal starts out with itself and every nonterminal with the
    /// empty set. Each pass over the rules unions FIRST of the right-hand
    /// side into FIRST of the left-hand side, until a pass adds nothing.
    /// The sets only grow and are bounded, so the loop terminates.
    pub fn new(grammar: &Cfg) -> Self {
        let mut map = BTreeMap::new();
        for terminal in grammar.terminals() {
            map.insert(terminal, PredictSet::from([Lookahead::Terminal(terminal)]));
        }
        for &nonterminal in grammar.nonterminals() {
            map.insert(nonterminal, PredictSet::new());
        }
        let mut this = FirstSets {
            map,
            terminal_set: grammar.terminal_set().clone(),
        };

        let mut changed = true;
        let mut passes = 0;
        while changed {
            changed = false;
            for rule in grammar.rules() {
                let lookahead = this.first_set_for_string(&rule.rhs[..]);
                let first_set = this.map.entry(rule.lhs).or_default();
                let prev_cardinality = first_set.len();
                first_set.extend(lookahead);
                changed |= first_set.len() != prev_cardinality;
            }
            passes += 1;
        }
        trace!("FIRST sets stable after {} passes", passes);

        this
    }

    /// Calculates a FIRST set for a string of symbols.
    ///
    /// A terminal ends the scan. A nonterminal contributes its set without
    /// epsilon, and the scan goes on past it only if it is nullable.
    /// Epsilon is included when every symbol is nullable, including for
    /// the empty string.
    pub fn first_set_for_string(&self, string: &[Symbol]) -> PredictSet {
        let mut result = PredictSet::new();
        for &sym in string {
            if self.terminal_set.has_sym(sym) {
                result.insert(Lookahead::Terminal(sym));
                return result;
            }
            let mut nullable = false;
            match self.map.get(&sym) {
                None => {
                    // A nonterminal with no rules. Its FIRST set is empty.
                }
                Some(set) => {
                    for &lookahead in set {
                        if lookahead == Lookahead::Epsilon {
                            nullable = true;
                        } else {
                            result.insert(lookahead);
                        }
                    }
                }
            }
            if !nullable {
                return result;
            }
        }
        result.insert(Lookahead::Epsilon);
        result
    }

    /// Checks whether the symbol derives the empty string.
    pub fn is_nullable(&self, sym: Symbol) -> bool {
        self.map
            .get(&sym)
            .map_or(false, |set| set.contains(&Lookahead::Epsilon))
    }

    /// Iterates over the FIRST sets of nonterminals, in the grammar's
    /// display order.
    pub fn nonterminal_sets<'a>(
        &'a self,
        grammar: &'a Cfg,
    ) -> impl Iterator<Item = (Symbol, &'a PredictSet)> + 'a {
        grammar
            .nonterminals()
            .iter()
            .filter_map(move |&nt| self.map.get(&nt).map(|set| (nt, set)))
    }
}

impl PredictSets for FirstSets {
    /// Returns a reference to FIRST sets.
    fn predict_sets(&self) -> &PerSymbolSets {
        &self.map
    }
}
