//! Structured events describing an analysis and the parses that use it.
//!
//! Every stage reports to a [`Sink`] passed in by the caller. Rendering is
//! left to the sink.

use crate::grammar::Cfg;
use crate::lexer::Token;
use crate::ll::{LlConflict, LlParseTable};
use crate::parser::{Step, SyntaxError, Verdict};
use crate::prediction::{FirstSets, FollowSets};
use crate::symbol::Symbol;

/// Points in the pipeline where the grammar is reported.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Stage {
    /// The grammar as loaded.
    Original,
    /// After left factoring.
    LeftFactored,
    /// After left recursion elimination.
    LeftRecursionEliminated,
}

impl Stage {
    /// A title for the stage.
    pub fn title(self) -> &'static str {
        match self {
            Stage::Original => "Original grammar",
            Stage::LeftFactored => "Grammar after left factoring",
            Stage::LeftRecursionEliminated => "Grammar after left recursion elimination",
        }
    }
}

/// An observation made by the analysis or by the parser.
#[derive(Clone, Debug)]
pub enum Event<'a> {
    /// The grammar after a stage.
    GrammarSnapshot {
        stage: Stage,
        grammar: &'a Cfg,
    },
    /// FIRST sets of the final grammar.
    FirstSets {
        grammar: &'a Cfg,
        first: &'a FirstSets,
    },
    /// FOLLOW sets of the final grammar.
    FollowSets {
        grammar: &'a Cfg,
        follow: &'a FollowSets,
    },
    /// The complete parse table.
    ParseTable {
        grammar: &'a Cfg,
        table: &'a LlParseTable,
    },
    /// Two rules were predicted for one cell.
    Conflict {
        grammar: &'a Cfg,
        conflict: &'a LlConflict,
    },
    /// Left recursion elimination left these nonterminals left recursive.
    StillLeftRecursive {
        grammar: &'a Cfg,
        nonterminals: &'a [Symbol],
    },
    /// Parsing of a candidate line begins.
    LineStart {
        line_no: usize,
        text: &'a str,
    },
    /// The parser made a transition.
    ParseStep {
        grammar: &'a Cfg,
        line_no: usize,
        step: &'a Step<'a>,
    },
    /// The parser found a syntax error.
    SyntaxError {
        grammar: &'a Cfg,
        line_no: usize,
        error: &'a SyntaxError<'a>,
    },
    /// The tokenizer met a character it does not know.
    UnrecognizedCharacter {
        line_no: usize,
        token: &'a Token<'a>,
    },
    /// Parsing of a candidate line ended.
    LineVerdict {
        line_no: usize,
        verdict: Verdict,
        errors: usize,
    },
    /// All candidate lines were parsed.
    Summary {
        lines: usize,
        failed: usize,
    },
}

/// A receiver of events.
pub trait Sink {
    /// Receives an event.
    fn emit(&mut self, event: Event<'_>);
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, event: Event<'_>) {
        (**self).emit(event)
    }
}

/// A sink that drops every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn emit(&mut self, _event: Event<'_>) {}
}

/// A sink that keeps a one-line description of every event.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// Descriptions, in the order events arrived.
    pub lines: Vec<String>,
    /// Verdicts, in the order lines were parsed.
    pub verdicts: Vec<Verdict>,
}

impl Recorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether some recorded description contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl Sink for Recorder {
    fn emit(&mut self, event: Event<'_>) {
        if let Event::LineVerdict { verdict, .. } = event {
            self.verdicts.push(verdict);
        }
        self.lines.push(crate::render::describe(&event));
    }
}

impl<S: Sink> Sink for Option<S> {
    fn emit(&mut self, event: Event<'_>) {
        if let Some(sink) = self {
            sink.emit(event)
        }
    }
}

/// A sink that passes every event to two sinks.
#[derive(Clone, Debug, Default)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: Sink, B: Sink> Sink for Tee<A, B> {
    fn emit(&mut self, event: Event<'_>) {
        self.0.emit(event.clone());
        self.1.emit(event);
    }
}
