//! The LL(1) parse table.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::derivation::Reachability;
use crate::grammar::{Cfg, CfgRule};
use crate::prediction::{FirstSets, FollowSets, PredictSets};
use crate::symbol::{Lookahead, Symbol};

/// LL(1) parse table.
///
/// Every cell holds at most one rule. When two rules compete for a cell, the
/// one written last stays in the table and the overwrite is recorded as a
/// conflict.
#[derive(Clone, Debug)]
pub struct LlParseTable {
    map: BTreeMap<LlParseTableKey, usize>,
    rules: Vec<CfgRule>,
    conflicts: Vec<LlConflict>,
    columns: Vec<Lookahead>,
}

/// A cell coordinate of the table.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub struct LlParseTableKey {
    /// The row.
    pub nonterminal: Symbol,
    /// The column, which is a terminal or the end marker.
    pub lookahead: Lookahead,
}

/// Two rules that were both predicted for one cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LlConflict {
    /// The row.
    pub nonterminal: Symbol,
    /// The column.
    pub lookahead: Lookahead,
    /// The rule that was overwritten.
    pub previous: CfgRule,
    /// The rule that remains in the cell.
    pub chosen: CfgRule,
}

/// Container for classifying nonterminals as LL(1) or context-free.
#[derive(Debug, Eq, PartialEq)]
pub struct LlClassification {
    classes: BTreeMap<Symbol, LlNonterminalClass>,
}

/// A nonterminal class.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LlNonterminalClass {
    /// LL(1) class.
    Ll1,
    /// Context-free class.
    ContextFree,
}

impl LlParseTable {
    /// Creates an LL parse table.
    pub fn new(grammar: &Cfg, first: &FirstSets, follow: &FollowSets) -> Self {
        let mut this = LlParseTable {
            map: BTreeMap::new(),
            rules: grammar.rules().cloned().collect(),
            conflicts: vec![],
            columns: grammar
                .terminals()
                .map(Lookahead::Terminal)
                .chain(Some(Lookahead::EndMarker))
                .collect(),
        };
        // LlParseTable[A,a] contains the rule A → w if and only if
        // a is in FIRST(w) or
        // epsilon is in FIRST(w) and a is in FOLLOW(A).
        for (rule_idx, rule) in grammar.rules().enumerate() {
            let rhs_first_set = first.first_set_for_string(&rule.rhs[..]);
            for &lookahead in &rhs_first_set {
                if lookahead != Lookahead::Epsilon {
                    this.insert(grammar, rule.lhs, lookahead, rule_idx);
                }
            }
            if rhs_first_set.contains(&Lookahead::Epsilon) {
                if let Some(lhs_follow_set) = follow.get(rule.lhs) {
                    for &lookahead in lhs_follow_set {
                        this.insert(grammar, rule.lhs, lookahead, rule_idx);
                    }
                }
            }
        }
        debug!(
            "parse table has {} cells and {} conflicts",
            this.map.len(),
            this.conflicts.len()
        );
        this
    }

    fn insert(&mut self, grammar: &Cfg, nonterminal: Symbol, lookahead: Lookahead, rule_idx: usize) {
        let key = LlParseTableKey {
            nonterminal,
            lookahead,
        };
        match self.map.insert(key, rule_idx) {
            Some(previous_idx) if previous_idx != rule_idx => {
                let previous = self.rules[previous_idx].clone();
                let chosen = self.rules[rule_idx].clone();
                warn!(
                    "LL(1) conflict at [{}, {}]: `{}` replaces `{}`",
                    grammar.name(nonterminal),
                    lookahead.name(grammar.sym_source()),
                    grammar.stringify_rule(chosen.lhs, &chosen.rhs),
                    grammar.stringify_rule(previous.lhs, &previous.rhs),
                );
                self.conflicts.push(LlConflict {
                    nonterminal,
                    lookahead,
                    previous,
                    chosen,
                });
            }
            _ => {}
        }
    }

    /// Returns the rule predicted for the nonterminal on the lookahead.
    pub fn get(&self, nonterminal: Symbol, lookahead: Lookahead) -> Option<&CfgRule> {
        let key = LlParseTableKey {
            nonterminal,
            lookahead,
        };
        self.map.get(&key).map(|&rule_idx| &self.rules[rule_idx])
    }

    /// Iterates over occupied cells in row order.
    pub fn cells(&self) -> impl Iterator<Item = (LlParseTableKey, &CfgRule)> + '_ {
        self.map
            .iter()
            .map(move |(&key, &rule_idx)| (key, &self.rules[rule_idx]))
    }

    /// Returns every overwrite that happened while the table was built.
    pub fn conflicts(&self) -> &[LlConflict] {
        &self.conflicts[..]
    }

    /// Checks whether the grammar is LL(1).
    pub fn is_ll1(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Returns the columns: terminals in grammar order, then the end marker.
    pub fn columns(&self) -> &[Lookahead] {
        &self.columns[..]
    }

    /// Classifies nonterminals as LL(1) or context-free.
    ///
    /// A nonterminal is context-free if one of its cells had a conflict, or
    /// if it derives a string containing a context-free nonterminal.
    pub fn classify(&self, grammar: &Cfg) -> LlClassification {
        let mut result = LlClassification {
            classes: grammar
                .nonterminals()
                .iter()
                .map(|&nt| (nt, LlNonterminalClass::Ll1))
                .collect(),
        };
        for conflict in &self.conflicts {
            result
                .classes
                .insert(conflict.nonterminal, LlNonterminalClass::ContextFree);
        }
        let conflicted: Vec<Symbol> = result
            .classes
            .iter()
            .filter(|&(_, &class)| class == LlNonterminalClass::ContextFree)
            .map(|(&nt, _)| nt)
            .collect();
        let reachability = Reachability::new(grammar);
        for (&nonterminal, class) in result.classes.iter_mut() {
            if conflicted
                .iter()
                .any(|&other| reachability.reaches(nonterminal, other))
            {
                *class = LlNonterminalClass::ContextFree;
            }
        }
        result
    }
}

impl LlClassification {
    /// Access classes.
    pub fn classes(&self) -> &BTreeMap<Symbol, LlNonterminalClass> {
        &self.classes
    }

    /// Returns the class of one nonterminal.
    pub fn class(&self, nonterminal: Symbol) -> Option<LlNonterminalClass> {
        self.classes.get(&nonterminal).copied()
    }
}
