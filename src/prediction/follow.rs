//! FOLLOW sets.

use std::collections::BTreeMap;

use log::trace;

use crate::grammar::Cfg;
use crate::prediction::{FirstSets, PerSymbolSets, PredictSet, PredictSets};
use crate::symbol::{Lookahead, Symbol};

/// FOLLOW sets.
#[derive(Clone, Debug)]
pub struct FollowSets {
    /// Mapping from nonterminals to FOLLOW sets.
    map: PerSymbolSets,
}

impl FollowSets {
    /// Compute all FOLLOW sets of the grammar.
    ///
    /// FOLLOW of the start symbol is seeded with the end marker. Each pass
    /// walks every right-hand side from the back, carrying the set of
    /// lookaheads that may follow the current position, until a pass adds
    /// nothing.
    pub fn new(grammar: &Cfg, start_sym: Symbol, first_sets: &FirstSets) -> Self {
        let mut this = FollowSets {
            map: BTreeMap::new(),
        };

        for &nonterminal in grammar.nonterminals() {
            this.map.insert(nonterminal, PredictSet::new());
        }
        this.map
            .entry(start_sym)
            .or_default()
            .insert(Lookahead::EndMarker);

        let mut changed = true;
        let mut passes = 0;
        while changed {
            changed = false;
            for rule in grammar.rules() {
                let mut follow_set = this.map.get(&rule.lhs).cloned().unwrap_or_default();

                for &sym in rule.rhs.iter().rev() {
                    if grammar.is_terminal(sym) {
                        follow_set.clear();
                        follow_set.insert(Lookahead::Terminal(sym));
                    } else {
                        let followed = this.map.entry(sym).or_default();
                        let prev_cardinality = followed.len();
                        followed.extend(follow_set.iter().copied());
                        changed |= prev_cardinality != followed.len();

                        if !first_sets.is_nullable(sym) {
                            follow_set.clear();
                        }
                        if let Some(first_set) = first_sets.get(sym) {
                            follow_set.extend(
                                first_set
                                    .iter()
                                    .copied()
                                    .filter(|&lookahead| lookahead != Lookahead::Epsilon),
                            );
                        }
                    }
                }
            }
            passes += 1;
        }
        trace!("FOLLOW sets stable after {} passes", passes);

        this
    }

    /// Iterates over the FOLLOW sets in the grammar's display order.
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

impl PredictSets for FollowSets {
    /// Returns a reference to FOLLOW sets.
    fn predict_sets(&self) -> &PerSymbolSets {
        &self.map
    }
}
