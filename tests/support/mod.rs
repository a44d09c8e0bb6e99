#![allow(dead_code)]

use std::collections::BTreeSet;

use cfg_ll1::prediction::PredictSet;
use cfg_ll1::{load_grammar, Cfg};

pub const LEFT_RECURSIVE_EXPR: &str = "
E -> E + T | T
T -> id
";

pub const EXPR: &str = "
E -> T E'
E' -> + T E' | epsilon
T -> F T'
T' -> * F T' | epsilon
F -> ( E ) | id
";

pub const DANGLING_ELSE: &str = "
S -> i E t S S' | a
S' -> e S | epsilon
E -> b
";

pub fn load(text: &str) -> Cfg {
    load_grammar(text).unwrap()
}

pub fn sym(cfg: &Cfg, name: &str) -> cfg_ll1::Symbol {
    cfg.symbol(name)
        .unwrap_or_else(|| panic!("no symbol named {}", name))
}

pub fn names(cfg: &Cfg, set: &PredictSet) -> BTreeSet<String> {
    set.iter()
        .map(|la| la.name(cfg.sym_source()).to_owned())
        .collect()
}

pub fn name_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|&name| name.to_owned()).collect()
}

pub fn assert_bnf(cfg: &Cfg, expected: &str) {
    assert_eq!(cfg.stringify_to_bnf(), expected.trim_start());
}
