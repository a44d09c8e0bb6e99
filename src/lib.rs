//! Library for turning context-free grammars into LL(1) form and parsing
//! with the result.
//!
//! A grammar is left factored and freed of left recursion. FIRST and FOLLOW
//! sets of the outcome drive the construction of a parse table, which a
//! predictive parser with panic-mode recovery uses to check input lines.
//! Every stage reports what it did to a [`report::Sink`].

#![deny(
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![cfg_attr(test, allow(missing_docs))]

pub mod derivation;
pub mod error;
mod grammar;
pub mod left_factor;
pub mod left_recursion;
pub mod lexer;
pub mod ll;
pub mod load;
pub mod parser;
mod pipeline;
pub mod prediction;
pub mod render;
pub mod report;
pub mod symbol;

pub use crate::error::{Error, GrammarError};
pub use crate::grammar::{Cfg, CfgRule, RuleBuilder};
pub use crate::left_factor::left_factor;
pub use crate::left_recursion::eliminate_left_recursion;
pub use crate::ll::LlParseTable;
pub use crate::load::{candidate_lines, load_grammar, CfgLoadExt};
pub use crate::parser::{Parser, RecoveryPolicy, Verdict};
pub use crate::pipeline::{Analysis, Summary};
pub use crate::symbol::{Lookahead, Symbol};
