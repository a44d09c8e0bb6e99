//! Reading grammars and candidate input from text.
//!
//! A grammar is written one nonterminal per line:
//!
//! ```text
//! # comment
//! E -> T E'
//! E' -> + T E' | epsilon
//! ```
//!
//! Symbols are separated by whitespace, alternatives by `|`. An empty
//! alternative, or one spelled `epsilon` or `ε`, derives the empty string.
//! The first left-hand side is the start symbol. Symbols that never appear
//! on a left-hand side are terminals.

use std::collections::HashSet;

use log::debug;

use crate::error::GrammarError;
use crate::grammar::Cfg;
use crate::symbol::{END_MARKER, EPSILON};

const ARROW: &str = "->";

/// Loads grammars from text.
pub trait CfgLoadExt: Sized {
    /// Parses grammar text.
    fn load(text: &str) -> Result<Self, GrammarError>;
}

impl CfgLoadExt for Cfg {
    fn load(text: &str) -> Result<Cfg, GrammarError> {
        load_grammar(text)
    }
}

/// Returns lines worth reading with their one-indexed numbers. Blank lines
/// and lines starting with `#` are skipped.
pub fn candidate_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

struct RuleLine<'a> {
    line: usize,
    lhs: &'a str,
    alternatives: Vec<Vec<&'a str>>,
}

fn is_epsilon(word: &str) -> bool {
    word == EPSILON || word == "ε"
}

fn parse_line(line: usize, text: &str) -> Result<RuleLine<'_>, GrammarError> {
    let syntax = |reason: &str| GrammarError::Syntax {
        line,
        reason: reason.to_owned(),
    };
    let (lhs, rhs) = text
        .split_once(ARROW)
        .ok_or_else(|| syntax("expected `->`"))?;
    let mut lhs_words = lhs.split_whitespace();
    let lhs = match (lhs_words.next(), lhs_words.next()) {
        (Some(lhs), None) => lhs,
        (None, _) => return Err(syntax("missing left-hand side")),
        (Some(_), Some(_)) => return Err(syntax("left-hand side must be a single symbol")),
    };
    let alternatives = rhs
        .split('|')
        .map(|alt| alt.split_whitespace().filter(|word| !is_epsilon(word)).collect())
        .collect();
    Ok(RuleLine {
        line,
        lhs,
        alternatives,
    })
}

/// Parses grammar text into a grammar.
pub fn load_grammar(text: &str) -> Result<Cfg, GrammarError> {
    let rule_lines = candidate_lines(text)
        .map(|(line, text)| parse_line(line, text))
        .collect::<Result<Vec<_>, _>>()?;

    for rule_line in &rule_lines {
        let words = Some(rule_line.lhs)
            .into_iter()
            .chain(rule_line.alternatives.iter().flatten().copied());
        for word in words {
            if word == END_MARKER || is_epsilon(word) {
                return Err(GrammarError::ReservedName(word.to_owned()));
            }
        }
        if rule_line.lhs.contains('|') {
            return Err(GrammarError::Syntax {
                line: rule_line.line,
                reason: "`|` in left-hand side".to_owned(),
            });
        }
    }

    let lhs_names: HashSet<&str> = rule_lines.iter().map(|rule_line| rule_line.lhs).collect();
    let mut cfg = Cfg::new();
    for rule_line in &rule_lines {
        cfg.nonterminal(rule_line.lhs);
    }
    for rule_line in &rule_lines {
        let lhs = cfg.nonterminal(rule_line.lhs);
        for alternative in &rule_line.alternatives {
            let rhs = alternative
                .iter()
                .map(|&word| {
                    if lhs_names.contains(word) {
                        cfg.nonterminal(word)
                    } else {
                        cfg.terminal(word)
                    }
                })
                .collect();
            cfg.add_rule(lhs, rhs);
        }
    }
    debug!(
        "loaded {} rules over {} symbols",
        cfg.rules().count(),
        cfg.num_syms()
    );
    cfg.validate()?;
    Ok(cfg)
}
