//! Errors that stop a run. Everything else, such as LL(1) conflicts or
//! syntax errors in candidate input, is reported as a value.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A grammar that cannot be analyzed.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum GrammarError {
    /// The grammar has no rules, so there is no start symbol.
    #[error("the grammar has no start symbol")]
    NoStartSymbol,

    /// The start symbol is a terminal.
    #[error("start symbol `{0}` is not a nonterminal")]
    StartIsTerminal(String),

    /// A nonterminal is used but has no alternatives.
    #[error("nonterminal `{0}` has no alternatives")]
    UndefinedNonterminal(String),

    /// A symbol uses a name reserved for the end marker.
    #[error("`{0}` is reserved and cannot be used as a grammar symbol")]
    ReservedName(String),

    /// A line of grammar text could not be read.
    #[error("line {line}: {reason}")]
    Syntax {
        /// One-indexed line number.
        line: usize,
        /// Human-readable reason.
        reason: String,
    },
}

/// Failures at the boundary of the command-line tool.
#[derive(Error, Debug)]
pub enum Error {
    /// A file could not be opened, read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// The file in question.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The grammar file does not describe a usable grammar.
    #[error("{}: {source}", path.display())]
    Grammar {
        /// The grammar file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: GrammarError,
    },
}

impl Error {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
