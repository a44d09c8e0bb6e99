//! The table-driven predictive parser with panic-mode recovery.

use log::{trace, warn};

use crate::grammar::{Cfg, CfgRule};
use crate::lexer::{next_token, Token, TokenKind, Tokenizer};
use crate::ll::LlParseTable;
use crate::prediction::{FollowSets, PredictSets};
use crate::report::{Event, Sink};
use crate::symbol::{Lookahead, Symbol};

/// How the parser recovers from syntax errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RecoveryPolicy {
    /// Number of consecutive errors after which a line is abandoned.
    pub max_error_streak: usize,
    /// On a missing table entry, try a rule predicted by the nonterminal's
    /// FOLLOW set before skipping the token.
    pub follow_recovery: bool,
    /// Upper bound on transitions per line.
    pub max_steps: Option<usize>,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            max_error_streak: 10,
            follow_recovery: true,
            max_steps: Some(10_000),
        }
    }
}

/// An element of the parse stack.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StackSymbol {
    /// A terminal or nonterminal.
    Grammar(Symbol),
    /// The bottom of the stack.
    EndMarker,
}

impl StackSymbol {
    /// Returns the display name.
    pub fn name(self, grammar: &Cfg) -> &str {
        match self {
            StackSymbol::Grammar(sym) => grammar.name(sym),
            StackSymbol::EndMarker => crate::symbol::END_MARKER,
        }
    }
}

/// What one transition did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Action<'a> {
    /// The initial configuration, before any transition.
    Start,
    /// A terminal on the stack matched the lookahead.
    Match(Symbol),
    /// A nonterminal was replaced by the right-hand side of a rule.
    Expand(&'a CfgRule),
    /// The end marker matched the end of input.
    Accept,
    /// A terminal on the stack did not match; it was popped and the
    /// lookahead skipped.
    MismatchPop(Symbol),
    /// A nonterminal had no rule for the lookahead, which was skipped.
    SkipToken(Symbol),
    /// A nonterminal had no rule for the lookahead and was expanded with a
    /// rule predicted by one of its FOLLOW terminals instead.
    FollowRecovery(&'a CfgRule),
    /// The stack emptied before the input.
    LeftoverInput,
}

/// The kind of a syntax error.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SyntaxErrorKind {
    /// Expected a terminal.
    Mismatch {
        /// The terminal on top of the stack.
        expected: Symbol,
    },
    /// No table entry for the nonterminal and lookahead.
    NoEntry {
        /// The nonterminal on top of the stack.
        nonterminal: Symbol,
    },
    /// Input remains after the stack emptied.
    LeftoverInput,
}

/// A syntax error in a candidate line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyntaxError<'a> {
    /// What went wrong.
    pub kind: SyntaxErrorKind,
    /// The lookahead at the time.
    pub found: Token<'a>,
}

impl<'a> SyntaxError<'a> {
    /// Formats the error with symbol names.
    pub fn describe(&self, grammar: &Cfg) -> String {
        match self.kind {
            SyntaxErrorKind::Mismatch { expected } => format!(
                "expected `{}`, but found `{}`",
                grammar.name(expected),
                self.found.name
            ),
            SyntaxErrorKind::NoEntry { nonterminal } => format!(
                "no production for [{}, {}]",
                grammar.name(nonterminal),
                self.found.name
            ),
            SyntaxErrorKind::LeftoverInput => {
                format!("stack empty but input remains: `{}`", self.found.name)
            }
        }
    }
}

/// One transition of the parser, with the configuration it left behind.
#[derive(Clone, Debug)]
pub struct Step<'a> {
    /// Stack contents, top first.
    pub stack: Vec<StackSymbol>,
    /// The current lookahead.
    pub lookahead: Token<'a>,
    /// Names of the lookahead and of every token after it, ending with `$`.
    pub remaining: Vec<&'a str>,
    /// The transition taken.
    pub action: Action<'a>,
    /// The syntax error reported by this transition.
    pub error: Option<SyntaxError<'a>>,
    /// Consecutive errors so far.
    pub error_streak: usize,
}

/// Why a line was rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RejectReason {
    /// The stack emptied while input remained.
    LeftoverInput,
    /// The error streak reached its cap.
    TooManyErrors,
    /// The step bound was reached.
    StepLimit,
}

/// State of the parsing machine.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseState {
    /// Transitions remain.
    Running,
    /// The end marker was matched.
    Accepted,
    /// Parsing stopped early.
    Rejected(RejectReason),
}

/// The outcome of parsing one line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Verdict {
    /// Accepted with no errors.
    Accepted,
    /// Reached acceptance after recovering from errors.
    AcceptedWithErrors,
    /// Parsing stopped early.
    Rejected(RejectReason),
}

impl Verdict {
    /// A line succeeds only if it was accepted without errors.
    pub fn is_success(self) -> bool {
        self == Verdict::Accepted
    }
}

/// A predictive parser for one line of input.
///
/// The parser is an iterator over its transitions. The first item describes
/// the initial configuration; the last one is the transition that accepted
/// or rejected the line.
pub struct Parser<'a> {
    grammar: &'a Cfg,
    table: &'a LlParseTable,
    follow: &'a FollowSets,
    policy: RecoveryPolicy,
    tokens: Tokenizer<'a, Cfg>,
    lookahead: Token<'a>,
    stack: Vec<StackSymbol>,
    state: ParseState,
    started: bool,
    steps: usize,
    errors: usize,
    error_streak: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser with the start symbol on the stack.
    pub fn new(
        grammar: &'a Cfg,
        start: Symbol,
        table: &'a LlParseTable,
        follow: &'a FollowSets,
        policy: RecoveryPolicy,
        input: &'a str,
    ) -> Self {
        let (lookahead, cursor) = next_token(input, 0, grammar);
        warn_if_unknown(&lookahead);
        Parser {
            grammar,
            table,
            follow,
            policy,
            tokens: Tokenizer::at(input, cursor, grammar),
            lookahead,
            stack: vec![StackSymbol::EndMarker, StackSymbol::Grammar(start)],
            state: ParseState::Running,
            started: false,
            steps: 0,
            errors: 0,
            error_streak: 0,
        }
    }

    /// Returns the verdict, once parsing has stopped.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.state {
            ParseState::Running => None,
            ParseState::Accepted if self.errors == 0 => Some(Verdict::Accepted),
            ParseState::Accepted => Some(Verdict::AcceptedWithErrors),
            ParseState::Rejected(reason) => Some(Verdict::Rejected(reason)),
        }
    }

    /// Returns the state of the machine.
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Returns the number of syntax errors reported so far.
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Runs the parser to completion, reporting every step to the sink.
    pub fn run(mut self, line_no: usize, sink: &mut dyn Sink) -> (Verdict, usize) {
        let grammar = self.grammar;
        let mut last_unknown = None;
        while let Some(step) = self.next() {
            if step.lookahead.kind == TokenKind::Unknown
                && last_unknown.as_ref() != Some(&step.lookahead.span)
            {
                last_unknown = Some(step.lookahead.span.clone());
                sink.emit(Event::UnrecognizedCharacter {
                    line_no,
                    token: &step.lookahead,
                });
            }
            sink.emit(Event::ParseStep {
                grammar,
                line_no,
                step: &step,
            });
            if let Some(ref error) = step.error {
                sink.emit(Event::SyntaxError {
                    grammar,
                    line_no,
                    error,
                });
            }
        }
        let verdict = self
            .verdict()
            .unwrap_or(Verdict::Rejected(RejectReason::StepLimit));
        (verdict, self.errors)
    }

    fn lookahead(&self) -> Option<Lookahead> {
        if self.lookahead.is_end() {
            Some(Lookahead::EndMarker)
        } else {
            self.grammar
                .symbol(self.lookahead.name)
                .filter(|&sym| self.grammar.is_terminal(sym))
                .map(Lookahead::Terminal)
        }
    }

    fn advance(&mut self) {
        if self.lookahead.is_end() {
            return;
        }
        if let Some(token) = self.tokens.next() {
            warn_if_unknown(&token);
            self.lookahead = token;
        }
    }

    fn push_rhs(&mut self, rule: &CfgRule) {
        self.stack
            .extend(rule.rhs.iter().rev().map(|&sym| StackSymbol::Grammar(sym)));
    }

    fn error(&mut self, kind: SyntaxErrorKind) -> Option<SyntaxError<'a>> {
        self.errors += 1;
        self.error_streak += 1;
        if self.error_streak >= self.policy.max_error_streak {
            self.state = ParseState::Rejected(RejectReason::TooManyErrors);
        }
        Some(SyntaxError {
            kind,
            found: self.lookahead.clone(),
        })
    }

    /// Finds a rule for `nonterminal` predicted by a terminal of its FOLLOW
    /// set.
    fn follow_rule(&self, nonterminal: Symbol) -> Option<&'a CfgRule> {
        let table = self.table;
        let follow = self.follow;
        follow
            .get(nonterminal)?
            .iter()
            .find_map(|&lookahead| table.get(nonterminal, lookahead))
    }

    fn transition(&mut self) -> (Action<'a>, Option<SyntaxError<'a>>) {
        let lookahead = self.lookahead();
        let Some(top) = self.stack.pop() else {
            self.state = ParseState::Rejected(RejectReason::LeftoverInput);
            return (Action::LeftoverInput, None);
        };
        match top {
            StackSymbol::EndMarker => {
                if lookahead == Some(Lookahead::EndMarker) {
                    self.state = ParseState::Accepted;
                    (Action::Accept, None)
                } else {
                    self.errors += 1;
                    self.state = ParseState::Rejected(RejectReason::LeftoverInput);
                    let error = SyntaxError {
                        kind: SyntaxErrorKind::LeftoverInput,
                        found: self.lookahead.clone(),
                    };
                    (Action::LeftoverInput, Some(error))
                }
            }
            StackSymbol::Grammar(sym) if self.grammar.is_terminal(sym) => {
                if lookahead == Some(Lookahead::Terminal(sym)) {
                    self.advance();
                    self.error_streak = 0;
                    (Action::Match(sym), None)
                } else {
                    let error = self.error(SyntaxErrorKind::Mismatch { expected: sym });
                    self.advance();
                    (Action::MismatchPop(sym), error)
                }
            }
            StackSymbol::Grammar(sym) => {
                let table = self.table;
                if let Some(rule) = lookahead.and_then(|la| table.get(sym, la)) {
                    self.push_rhs(rule);
                    self.error_streak = 0;
                    return (Action::Expand(rule), None);
                }
                let error = self.error(SyntaxErrorKind::NoEntry { nonterminal: sym });
                let recovery = if self.policy.follow_recovery {
                    self.follow_rule(sym)
                } else {
                    None
                };
                match recovery {
                    Some(rule) => {
                        self.push_rhs(rule);
                        (Action::FollowRecovery(rule), error)
                    }
                    None => {
                        self.stack.push(top);
                        self.advance();
                        (Action::SkipToken(sym), error)
                    }
                }
            }
        }
    }

    fn snapshot(&self, action: Action<'a>, error: Option<SyntaxError<'a>>) -> Step<'a> {
        let remaining = if self.lookahead.is_end() {
            vec![self.lookahead.name]
        } else {
            Some(self.lookahead.name)
                .into_iter()
                .chain(self.tokens.clone().map(|token| token.name))
                .collect()
        };
        Step {
            stack: self.stack.iter().rev().copied().collect(),
            lookahead: self.lookahead.clone(),
            remaining,
            action,
            error,
            error_streak: self.error_streak,
        }
    }
}

impl<'a> Iterator for Parser<'a> {
    type Item = Step<'a>;

    fn next(&mut self) -> Option<Step<'a>> {
        if !self.started {
            self.started = true;
            return Some(self.snapshot(Action::Start, None));
        }
        if self.state != ParseState::Running {
            return None;
        }
        if self.policy.max_steps.map_or(false, |max| self.steps >= max) {
            warn!("giving up after {} steps", self.steps);
            self.state = ParseState::Rejected(RejectReason::StepLimit);
            return None;
        }
        self.steps += 1;
        let (action, error) = self.transition();
        trace!("step {}: {:?}", self.steps, action);
        Some(self.snapshot(action, error))
    }
}

fn warn_if_unknown(token: &Token<'_>) {
    if token.kind == TokenKind::Unknown {
        warn!("unrecognized character `{}`", token.lexeme);
    }
}
