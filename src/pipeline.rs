//! The driver that turns a grammar into a parse table and parses candidate
//! lines with it.

use log::{debug, info};

use crate::derivation::LeftCorners;
use crate::error::GrammarError;
use crate::grammar::Cfg;
use crate::left_factor::left_factor;
use crate::left_recursion::eliminate_left_recursion;
use crate::ll::LlParseTable;
use crate::parser::{Parser, RecoveryPolicy, Verdict};
use crate::prediction::{FirstSets, FollowSets};
use crate::report::{Event, Sink, Stage};
use crate::symbol::Symbol;

/// A grammar prepared for predictive parsing, with its analysis.
#[derive(Clone, Debug)]
pub struct Analysis {
    grammar: Cfg,
    start: Symbol,
    first: FirstSets,
    follow: FollowSets,
    table: LlParseTable,
}

/// Counts of parsed lines.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    /// Lines parsed.
    pub lines: usize,
    /// Lines that did not parse successfully.
    pub failed: usize,
}

impl Analysis {
    /// Left factors the grammar, eliminates left recursion, then computes
    /// FIRST and FOLLOW sets and the parse table. Each result is reported.
    pub fn new(grammar: &Cfg, sink: &mut dyn Sink) -> Result<Self, GrammarError> {
        grammar.validate()?;
        sink.emit(Event::GrammarSnapshot {
            stage: Stage::Original,
            grammar,
        });

        let factored = left_factor(grammar);
        sink.emit(Event::GrammarSnapshot {
            stage: Stage::LeftFactored,
            grammar: &factored,
        });

        let grammar = eliminate_left_recursion(&factored);
        sink.emit(Event::GrammarSnapshot {
            stage: Stage::LeftRecursionEliminated,
            grammar: &grammar,
        });
        let start = grammar.validate()?;

        let left_recursive: Vec<Symbol> = LeftCorners::new(&grammar)
            .left_recursive(&grammar)
            .collect();
        if !left_recursive.is_empty() {
            sink.emit(Event::StillLeftRecursive {
                grammar: &grammar,
                nonterminals: &left_recursive,
            });
        }

        let first = FirstSets::new(&grammar);
        sink.emit(Event::FirstSets {
            grammar: &grammar,
            first: &first,
        });
        let follow = FollowSets::new(&grammar, start, &first);
        sink.emit(Event::FollowSets {
            grammar: &grammar,
            follow: &follow,
        });

        let table = LlParseTable::new(&grammar, &first, &follow);
        for conflict in table.conflicts() {
            sink.emit(Event::Conflict {
                grammar: &grammar,
                conflict,
            });
        }
        sink.emit(Event::ParseTable {
            grammar: &grammar,
            table: &table,
        });
        info!(
            "grammar has {} nonterminals after transformation, LL(1): {}",
            grammar.nonterminals().len(),
            table.is_ll1()
        );

        Ok(Analysis {
            grammar,
            start,
            first,
            follow,
            table,
        })
    }

    /// Returns the transformed grammar.
    pub fn grammar(&self) -> &Cfg {
        &self.grammar
    }

    /// Returns the start symbol.
    pub fn start(&self) -> Symbol {
        self.start
    }

    /// Returns FIRST sets.
    pub fn first_sets(&self) -> &FirstSets {
        &self.first
    }

    /// Returns FOLLOW sets.
    pub fn follow_sets(&self) -> &FollowSets {
        &self.follow
    }

    /// Returns the parse table.
    pub fn table(&self) -> &LlParseTable {
        &self.table
    }

    /// Creates a parser for one line.
    pub fn parser<'a>(&'a self, policy: RecoveryPolicy, input: &'a str) -> Parser<'a> {
        Parser::new(
            &self.grammar,
            self.start,
            &self.table,
            &self.follow,
            policy,
            input,
        )
    }

    /// Parses one line, reporting its trace and verdict.
    pub fn parse_line(
        &self,
        line_no: usize,
        input: &str,
        policy: RecoveryPolicy,
        sink: &mut dyn Sink,
    ) -> Verdict {
        sink.emit(Event::LineStart {
            line_no,
            text: input,
        });
        let (verdict, errors) = self.parser(policy, input).run(line_no, sink);
        debug!("line {}: {:?} with {} errors", line_no, verdict, errors);
        sink.emit(Event::LineVerdict {
            line_no,
            verdict,
            errors,
        });
        verdict
    }

    /// Parses numbered lines, then reports and returns the counts.
    pub fn parse_lines<'a, I>(&self, lines: I, policy: RecoveryPolicy, sink: &mut dyn Sink) -> Summary
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut summary = Summary::default();
        for (line_no, input) in lines {
            let verdict = self.parse_line(line_no, input, policy, sink);
            summary.lines += 1;
            if !verdict.is_success() {
                summary.failed += 1;
            }
        }
        sink.emit(Event::Summary {
            lines: summary.lines,
            failed: summary.failed,
        });
        summary
    }
}
