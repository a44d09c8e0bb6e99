//! Elimination of direct and indirect left recursion.
//!
//! Nonterminals are processed in display order `A1 .. An`. Every alternative
//! of `Ai` that begins with an earlier `Aj` gets `Aj`'s already rewritten
//! alternatives substituted for that leading `Aj`. What remains is direct
//! left recursion, which is rewritten into right recursion through a fresh
//! nonterminal `Ai'`:
//!
//! ```text
//! A -> A α1 | .. | A αn | β1 | .. | βm
//! ```
//!
//! becomes
//!
//! ```text
//! A  -> β1 A' | .. | βm A'
//! A' -> α1 A' | .. | αn A' | epsilon
//! ```

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::grammar::Cfg;
use crate::symbol::Symbol;

type Alternatives = Vec<Vec<Symbol>>;

/// Returns a weak equivalent of the grammar with no left-recursive
/// nonterminals.
///
/// Grammars with cycles of nonterminals that derive only each other are a
/// degenerate case; the result may still be left recursive, which
/// [`Cfg::is_left_recursive`] detects.
pub fn eliminate_left_recursion(grammar: &Cfg) -> Cfg {
    let order = grammar.nonterminals().to_vec();
    let mut result = grammar.without_rules();
    let mut alternatives: BTreeMap<Symbol, Alternatives> = order
        .iter()
        .map(|&nt| (nt, grammar.alternatives(nt).map(<[Symbol]>::to_vec).collect()))
        .collect();

    for (i, &ai) in order.iter().enumerate() {
        for &aj in &order[..i] {
            substitute_leading(&mut alternatives, ai, aj);
        }
        let current = alternatives.remove(&ai).unwrap_or_default();
        let (ai_alternatives, tail) = split_direct_recursion(&mut result, ai, current);
        alternatives.insert(ai, ai_alternatives);
        if let Some((tail_sym, tail_alternatives)) = tail {
            alternatives.insert(tail_sym, tail_alternatives);
        }
    }

    for &lhs in result.nonterminals().to_vec().iter() {
        if let Some(rhss) = alternatives.remove(&lhs) {
            for rhs in rhss {
                result.add_rule(lhs, rhs);
            }
        }
    }
    result
}

/// Replaces every alternative `aj γ` of `ai` with `δ γ` for each alternative
/// `δ` of `aj`.
fn substitute_leading(alternatives: &mut BTreeMap<Symbol, Alternatives>, ai: Symbol, aj: Symbol) {
    let Some(current) = alternatives.get(&ai) else {
        return;
    };
    if !current.iter().any(|rhs| rhs.first() == Some(&aj)) {
        return;
    }
    let aj_alternatives = alternatives.get(&aj).cloned().unwrap_or_default();
    let mut updated = Vec::with_capacity(current.len());
    for rhs in current {
        if rhs.first() == Some(&aj) {
            for delta in &aj_alternatives {
                let mut substituted = delta.clone();
                substituted.extend_from_slice(&rhs[1..]);
                updated.push(substituted);
            }
        } else {
            updated.push(rhs.clone());
        }
    }
    alternatives.insert(ai, updated);
}

/// Splits off direct left recursion of `ai`. Returns the new alternatives of
/// `ai` and, if `ai` was left recursive, the fresh nonterminal with its
/// alternatives.
fn split_direct_recursion(
    grammar: &mut Cfg,
    ai: Symbol,
    current: Alternatives,
) -> (Alternatives, Option<(Symbol, Alternatives)>) {
    let (alpha, beta): (Alternatives, Alternatives) = current
        .into_iter()
        .partition(|rhs| rhs.first() == Some(&ai));
    if alpha.is_empty() {
        return (beta, None);
    }

    let tail = grammar.fresh_nonterminal(ai);
    debug!(
        "removing direct left recursion of {} through {}",
        grammar.name(ai),
        grammar.name(tail)
    );
    if beta.is_empty() {
        warn!(
            "every alternative of {} is left recursive; it derives no string",
            grammar.name(ai)
        );
    }

    let ai_alternatives = beta
        .into_iter()
        .map(|mut rhs| {
            rhs.push(tail);
            rhs
        })
        .collect();

    let mut tail_alternatives: Alternatives = vec![];
    for rhs in alpha {
        if rhs.len() == 1 {
            warn!("dropping the cycle {} -> {}", grammar.name(ai), grammar.name(ai));
            continue;
        }
        let mut rest = rhs[1..].to_vec();
        rest.push(tail);
        tail_alternatives.push(rest);
    }
    tail_alternatives.push(vec![]);

    (ai_alternatives, Some((tail, tail_alternatives)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cycle_is_dropped() {
        let mut cfg = Cfg::new();
        let a = cfg.nonterminal("A");
        let x = cfg.terminal("x");
        cfg.rule(a).rhs([a]).rhs([a, x]).rhs([x]);

        let result = eliminate_left_recursion(&cfg);
        assert_eq!(result.stringify_to_bnf(), "A -> x A'\nA' -> x A' | epsilon\n");
    }
}
