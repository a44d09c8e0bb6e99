//! Text rendering of events, for the console and for report files.

use std::io::{self, Write};

use itertools::Itertools;
use log::error;
use prettytable::Table;

use crate::grammar::Cfg;
use crate::ll::LlParseTable;
use crate::parser::{Action, RejectReason, Step, Verdict};
use crate::prediction::PredictSet;
use crate::report::{Event, Sink};
use crate::symbol::SymbolSource;

fn set_to_string(set: &PredictSet, source: &SymbolSource) -> String {
    format!("{{ {} }}", set.iter().map(|la| la.name(source)).join(", "))
}

/// Describes an action taken by the parser.
pub fn describe_action(grammar: &Cfg, action: &Action<'_>) -> String {
    match *action {
        Action::Start => "start".to_owned(),
        Action::Match(sym) => format!("match `{}`", grammar.name(sym)),
        Action::Expand(rule) => format!("apply {}", grammar.stringify_rule(rule.lhs, &rule.rhs)),
        Action::Accept => "accept".to_owned(),
        Action::MismatchPop(sym) => format!("pop `{}` and skip token", grammar.name(sym)),
        Action::SkipToken(_) => "skip token".to_owned(),
        Action::FollowRecovery(rule) => format!(
            "recover with {}",
            grammar.stringify_rule(rule.lhs, &rule.rhs)
        ),
        Action::LeftoverInput => "stop".to_owned(),
    }
}

/// Describes a verdict.
pub fn describe_verdict(verdict: Verdict, errors: usize) -> String {
    match verdict {
        Verdict::Accepted => "parsed successfully".to_owned(),
        Verdict::AcceptedWithErrors => format!("contained {} syntax errors", errors),
        Verdict::Rejected(RejectReason::LeftoverInput) => {
            format!("rejected, input left over ({} errors)", errors)
        }
        Verdict::Rejected(RejectReason::TooManyErrors) => {
            format!("too many consecutive errors, gave up ({} errors)", errors)
        }
        Verdict::Rejected(RejectReason::StepLimit) => {
            format!("step limit reached, gave up ({} errors)", errors)
        }
    }
}

fn describe_step(grammar: &Cfg, step: &Step<'_>) -> String {
    format!(
        "[{}] | {} | {}",
        step.stack.iter().map(|sym| sym.name(grammar)).join(" "),
        step.remaining.join(" "),
        describe_action(grammar, &step.action)
    )
}

/// Describes an event in text. Sets and tables take several lines.
pub fn describe(event: &Event<'_>) -> String {
    match *event {
        Event::GrammarSnapshot { stage, grammar } => {
            format!("{}:\n{}", stage.title(), grammar.stringify_to_bnf())
        }
        Event::FirstSets { grammar, first } => {
            let mut result = "FIRST sets:\n".to_owned();
            for (nt, set) in first.nonterminal_sets(grammar) {
                result.push_str(&format!(
                    "FIRST({}) = {}\n",
                    grammar.name(nt),
                    set_to_string(set, grammar.sym_source())
                ));
            }
            result
        }
        Event::FollowSets { grammar, follow } => {
            let mut result = "FOLLOW sets:\n".to_owned();
            for (nt, set) in follow.nonterminal_sets(grammar) {
                result.push_str(&format!(
                    "FOLLOW({}) = {}\n",
                    grammar.name(nt),
                    set_to_string(set, grammar.sym_source())
                ));
            }
            result
        }
        Event::ParseTable { grammar, table } => {
            format!("LL(1) parse table:\n{}", parse_table_grid(grammar, table))
        }
        Event::Conflict { grammar, conflict } => format!(
            "warning: LL(1) conflict at [{}, {}]: {} replaced by {}",
            grammar.name(conflict.nonterminal),
            conflict.lookahead.name(grammar.sym_source()),
            grammar.stringify_rule(conflict.previous.lhs, &conflict.previous.rhs),
            grammar.stringify_rule(conflict.chosen.lhs, &conflict.chosen.rhs),
        ),
        Event::StillLeftRecursive {
            grammar,
            nonterminals,
        } => format!(
            "warning: still left recursive: {}",
            nonterminals.iter().map(|&nt| grammar.name(nt)).join(", ")
        ),
        Event::LineStart { line_no, text } => format!("line {}: {}", line_no, text),
        Event::ParseStep { grammar, step, .. } => describe_step(grammar, step),
        Event::SyntaxError {
            grammar,
            line_no,
            error,
        } => format!("syntax error (line {}): {}", line_no, error.describe(grammar)),
        Event::UnrecognizedCharacter { line_no, token } => format!(
            "warning (line {}): unrecognized character `{}` at {}",
            line_no, token.lexeme, token.span.start
        ),
        Event::LineVerdict {
            line_no,
            verdict,
            errors,
        } => format!("line {}: {}", line_no, describe_verdict(verdict, errors)),
        Event::Summary { lines, failed } => format!(
            "{} lines parsed, {} successful, {} with errors",
            lines,
            lines - failed,
            failed
        ),
    }
}

/// Lays out the table as a grid with one row per nonterminal and one column
/// per terminal, then `$`. Empty cells have no entry.
pub fn parse_table_grid(grammar: &Cfg, table: &LlParseTable) -> Table {
    let source = grammar.sym_source();
    let mut grid = Table::new();
    grid.add_row(
        ["".to_owned()]
            .into_iter()
            .chain(table.columns().iter().map(|la| la.name(source).to_owned()))
            .collect(),
    );
    for &nt in grammar.nonterminals() {
        grid.add_row(
            [grammar.name(nt).to_owned()]
                .into_iter()
                .chain(table.columns().iter().map(|&la| {
                    table
                        .get(nt, la)
                        .map(|rule| grammar.stringify_rhs(&rule.rhs))
                        .unwrap_or_default()
                }))
                .collect(),
        );
    }
    grid
}

/// Writes events as text. Parse steps of a line are collected into a table
/// that is written when the line's verdict arrives.
pub struct TextSink<W> {
    out: W,
    trace: Option<Table>,
    failed: bool,
}

impl<W: Write> TextSink<W> {
    /// Creates a sink writing to `out`.
    pub fn new(out: W) -> Self {
        TextSink {
            out,
            trace: None,
            failed: false,
        }
    }

    /// Checks whether any write failed.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.trim_end())
    }

    fn emit_inner(&mut self, event: Event<'_>) -> io::Result<()> {
        match event {
            Event::LineStart { .. } => {
                let mut trace = Table::new();
                trace.set_titles(["Stack", "Input", "Action"].into_iter().collect());
                self.trace = Some(trace);
                self.write(&describe(&event))
            }
            Event::ParseStep { grammar, step, .. } => {
                if let Some(ref mut trace) = self.trace {
                    trace.add_row(
                        [
                            step.stack.iter().map(|sym| sym.name(grammar)).join(" "),
                            step.remaining.join(" "),
                            describe_action(grammar, &step.action),
                        ]
                        .into_iter()
                        .collect(),
                    );
                    Ok(())
                } else {
                    self.write(&describe(&event))
                }
            }
            Event::LineVerdict { .. } => {
                if let Some(trace) = self.trace.take() {
                    write!(self.out, "{}", trace)?;
                }
                self.write(&describe(&event))?;
                writeln!(self.out)
            }
            _ => {
                self.write(&describe(&event))?;
                if let Event::GrammarSnapshot { .. }
                | Event::FirstSets { .. }
                | Event::FollowSets { .. }
                | Event::ParseTable { .. } = event
                {
                    writeln!(self.out)?;
                }
                Ok(())
            }
        }
    }
}

impl<W: Write> Sink for TextSink<W> {
    fn emit(&mut self, event: Event<'_>) {
        if self.failed {
            return;
        }
        if let Err(err) = self.emit_inner(event) {
            error!("cannot write report: {}", err);
            self.failed = true;
        }
    }
}
