//! Definitions of the context-free grammar type and its rules.

use std::fmt::{self, Write};

use itertools::Itertools;
use log::trace;

use crate::error::GrammarError;
use crate::symbol::{Symbol, SymbolBitSet, SymbolSource, END_MARKER, EPSILON};

/// Context-free grammar type.
///
/// Terminals and nonterminals are disjoint. A symbol is classified when it
/// is created and keeps that class for the lifetime of the grammar and of
/// every grammar derived from it by a transformation.
#[derive(Clone, Debug, Default)]
pub struct Cfg {
    /// The symbol source.
    sym_source: SymbolSource,
    /// The set of terminal symbols.
    terminals: SymbolBitSet,
    /// Nonterminals in display order.
    nonterminals: Vec<Symbol>,
    /// The array of rules.
    rules: Vec<CfgRule>,
    /// The start symbol.
    start: Option<Symbol>,
}

/// Standard grammar rule representation.
///
/// An empty right-hand side is an epsilon alternative.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CfgRule {
    /// The rule's left-hand side symbol.
    pub lhs: Symbol,
    /// The rule's right-hand side symbols.
    pub rhs: Vec<Symbol>,
}

impl CfgRule {
    /// Creates a new rule.
    pub fn new(lhs: Symbol, rhs: Vec<Symbol>) -> Self {
        CfgRule { lhs, rhs }
    }

    /// Whether the rule derives the empty string directly.
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

/// The rule builder.
pub struct RuleBuilder<'a> {
    grammar: &'a mut Cfg,
    lhs: Option<Symbol>,
}

impl<'a> RuleBuilder<'a> {
    /// Starts building a new rule with the given LHS.
    pub fn rule(mut self, lhs: Symbol) -> Self {
        self.lhs = Some(lhs);
        self
    }

    /// Adds a rule alternative to the grammar. An empty slice adds an
    /// epsilon alternative.
    pub fn rhs<Sr>(self, syms: Sr) -> Self
    where
        Sr: AsRef<[Symbol]>,
    {
        if let Some(lhs) = self.lhs {
            self.grammar.add_rule(lhs, syms.as_ref().to_vec());
        }
        self
    }
}

impl Cfg {
    /// Creates an empty context-free grammar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the symbol source, which holds symbol names.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Returns the name of a symbol.
    pub fn name(&self, sym: Symbol) -> &str {
        self.sym_source.name(sym)
    }

    /// Looks up a symbol by name.
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.sym_source.get(name)
    }

    /// Returns the terminal with the given name, creating it if needed.
    ///
    /// A name that already belongs to a nonterminal keeps its class.
    pub fn terminal(&mut self, name: &str) -> Symbol {
        if let Some(sym) = self.sym_source.get(name) {
            debug_assert!(
                self.is_terminal(sym),
                "`{}` is already a nonterminal",
                name
            );
            return sym;
        }
        let sym = self.sym_source.intern(name);
        self.terminals.set(sym, true);
        sym
    }

    /// Returns the nonterminal with the given name, creating it if needed.
    ///
    /// A name that already belongs to a terminal keeps its class.
    pub fn nonterminal(&mut self, name: &str) -> Symbol {
        if let Some(sym) = self.sym_source.get(name) {
            debug_assert!(
                !self.is_terminal(sym),
                "`{}` is already a terminal",
                name
            );
            return sym;
        }
        let sym = self.sym_source.intern(name);
        self.terminals.reserve(self.num_syms());
        self.nonterminals.push(sym);
        sym
    }

    /// Generates a new nonterminal named after `base` with enough primes to
    /// make the name unique. It is displayed right after `base` and the
    /// nonterminals previously derived from it.
    pub fn fresh_nonterminal(&mut self, base: Symbol) -> Symbol {
        let name = self.sym_source.fresh_name(self.name(base));
        let sym = self.sym_source.intern(&name);
        self.terminals.reserve(self.num_syms());
        let base_name = self.name(base).to_owned();
        let mut pos = self
            .nonterminals
            .iter()
            .position(|&nt| nt == base)
            .map_or(self.nonterminals.len(), |pos| pos + 1);
        while pos < self.nonterminals.len() {
            let next = self.name(self.nonterminals[pos]);
            let is_derived = next.len() > base_name.len()
                && next.starts_with(&base_name)
                && next[base_name.len()..].chars().all(|c| c == '\'');
            if !is_derived {
                break;
            }
            pos += 1;
        }
        self.nonterminals.insert(pos, sym);
        trace!("fresh nonterminal {} for {}", name, base_name);
        sym
    }

    /// Checks whether the symbol is a terminal.
    pub fn is_terminal(&self, sym: Symbol) -> bool {
        self.terminals.has_sym(sym)
    }

    /// Checks whether the symbol is a nonterminal.
    pub fn is_nonterminal(&self, sym: Symbol) -> bool {
        sym.usize() < self.num_syms() && !self.is_terminal(sym)
    }

    /// Returns the set of terminal symbols.
    pub fn terminal_set(&self) -> &SymbolBitSet {
        &self.terminals
    }

    /// Iterates over terminals in the order they were created.
    pub fn terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.terminals.iter()
    }

    /// Returns nonterminals in display order.
    pub fn nonterminals(&self) -> &[Symbol] {
        &self.nonterminals[..]
    }

    /// Assigns the start symbol.
    pub fn set_start(&mut self, start: Symbol) {
        self.start = Some(start);
    }

    /// Returns the start symbol, if one was assigned.
    pub fn start(&self) -> Option<Symbol> {
        self.start
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        RuleBuilder {
            grammar: self,
            lhs: Some(lhs),
        }
    }

    /// Adds a rule. The first rule ever added fixes the start symbol unless
    /// one was assigned already.
    pub fn add_rule(&mut self, lhs: Symbol, rhs: Vec<Symbol>) {
        debug_assert!(self.is_nonterminal(lhs));
        if self.start.is_none() {
            self.start = Some(lhs);
        }
        self.rules.push(CfgRule::new(lhs, rhs));
    }

    /// Returns an iterator over all rules.
    pub fn rules(&self) -> impl Iterator<Item = &CfgRule> + Clone {
        self.rules.iter()
    }

    /// Returns the alternatives of one nonterminal, in insertion order.
    pub fn alternatives(&self, lhs: Symbol) -> impl Iterator<Item = &[Symbol]> + '_ {
        self.rules
            .iter()
            .filter(move |rule| rule.lhs == lhs)
            .map(|rule| &rule.rhs[..])
    }

    /// Creates a grammar with the same symbols and start symbol, but no
    /// rules. Transformations build their output on top of it.
    pub fn without_rules(&self) -> Cfg {
        Cfg {
            sym_source: self.sym_source.clone(),
            terminals: self.terminals.clone(),
            nonterminals: self.nonterminals.clone(),
            rules: vec![],
            start: self.start,
        }
    }

    /// Checks that the grammar can be analyzed and returns its start
    /// symbol.
    pub fn validate(&self) -> Result<Symbol, GrammarError> {
        let start = self.start.ok_or(GrammarError::NoStartSymbol)?;
        if self.is_terminal(start) {
            return Err(GrammarError::StartIsTerminal(self.name(start).to_owned()));
        }
        if let Some(sym) = self.sym_source.symbols().find(|&sym| self.name(sym) == END_MARKER) {
            return Err(GrammarError::ReservedName(self.name(sym).to_owned()));
        }
        let used = self
            .rules
            .iter()
            .flat_map(|rule| rule.rhs.iter().copied())
            .chain(Some(start));
        for sym in used {
            if self.is_nonterminal(sym) && self.alternatives(sym).next().is_none() {
                return Err(GrammarError::UndefinedNonterminal(self.name(sym).to_owned()));
            }
        }
        Ok(start)
    }

    /// Formats an alternative, writing `epsilon` for the empty one.
    pub fn stringify_rhs(&self, rhs: &[Symbol]) -> String {
        if rhs.is_empty() {
            EPSILON.to_owned()
        } else {
            rhs.iter().map(|&sym| self.name(sym)).join(" ")
        }
    }

    /// Formats a rule as `lhs -> rhs`.
    pub fn stringify_rule(&self, lhs: Symbol, rhs: &[Symbol]) -> String {
        format!("{} -> {}", self.name(lhs), self.stringify_rhs(rhs))
    }

    /// Formats the grammar in the same `A -> x | y` notation the loader
    /// reads, one nonterminal per line in display order.
    pub fn stringify_to_bnf(&self) -> String {
        let mut result = String::new();
        for &lhs in &self.nonterminals {
            let mut alternatives = self.alternatives(lhs).peekable();
            if alternatives.peek().is_none() {
                continue;
            }
            let rhs = alternatives.map(|rhs| self.stringify_rhs(rhs)).join(" | ");
            let _ = writeln!(result, "{} -> {}", self.name(lhs), rhs);
        }
        result
    }
}

impl fmt::Display for Cfg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.stringify_to_bnf())
    }
}
