//! Left factoring.
//!
//! Alternatives of one nonterminal that begin with the same symbol are
//! replaced by a single alternative `prefix A'`, where the fresh nonterminal
//! `A'` derives the remainders. Passes repeat, including over the fresh
//! nonterminals, until no nonterminal has two alternatives with a common
//! first symbol.

use log::debug;

use crate::grammar::Cfg;
use crate::symbol::Symbol;

/// Returns a left-factored weak equivalent of the grammar.
pub fn left_factor(grammar: &Cfg) -> Cfg {
    let mut current = grammar.clone();
    let mut pass = 1;
    loop {
        let (next, factored) = factor_pass(&current);
        current = next;
        if !factored {
            break;
        }
        debug!("left factoring pass {} introduced new nonterminals", pass);
        pass += 1;
    }
    current
}

/// A group of alternatives sharing their first symbol. Epsilon
/// alternatives form groups of their own, with no prefix.
struct PrefixGroup<'a> {
    prefix: Option<Symbol>,
    members: Vec<&'a [Symbol]>,
}

fn factor_pass(grammar: &Cfg) -> (Cfg, bool) {
    let mut result = grammar.without_rules();
    let mut factored = false;

    for &lhs in grammar.nonterminals() {
        for group in group_by_prefix(grammar, lhs) {
            match group.prefix {
                Some(prefix) if group.members.len() > 1 => {
                    let factor = result.fresh_nonterminal(lhs);
                    debug!(
                        "factoring `{}` out of {} alternatives of {} into {}",
                        grammar.name(prefix),
                        group.members.len(),
                        grammar.name(lhs),
                        result.name(factor),
                    );
                    result.add_rule(lhs, vec![prefix, factor]);
                    for rhs in group.members {
                        result.add_rule(factor, rhs[1..].to_vec());
                    }
                    factored = true;
                }
                _ => {
                    for rhs in group.members {
                        result.add_rule(lhs, rhs.to_vec());
                    }
                }
            }
        }
    }

    (result, factored)
}

/// Groups alternatives by first symbol. Groups keep the order in which
/// their first member appears, and exact duplicates are merged.
fn group_by_prefix(grammar: &Cfg, lhs: Symbol) -> Vec<PrefixGroup<'_>> {
    let mut groups: Vec<PrefixGroup> = vec![];
    for rhs in grammar.alternatives(lhs) {
        if groups.iter().any(|group| group.members.contains(&rhs)) {
            debug!("dropping duplicate alternative {}", grammar.stringify_rule(lhs, rhs));
            continue;
        }
        let prefix = rhs.first().copied();
        let existing = prefix.and_then(|prefix| {
            groups
                .iter()
                .position(|group| group.prefix == Some(prefix))
        });
        match existing {
            Some(idx) => groups[idx].members.push(rhs),
            None => groups.push(PrefixGroup {
                prefix,
                members: vec![rhs],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_alternatives_are_not_grouped() {
        let mut cfg = Cfg::new();
        let a = cfg.nonterminal("A");
        let x = cfg.terminal("x");
        cfg.rule(a).rhs([]).rhs([x]).rhs([]);

        let factored = left_factor(&cfg);
        assert_eq!(factored.stringify_to_bnf(), "A -> epsilon | x\n");
    }
}
