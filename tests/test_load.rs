use cfg_ll1::{load_grammar, candidate_lines, Cfg, CfgLoadExt, GrammarError};
use test_case::test_case;

mod support;

#[test]
fn test_alternatives_and_comments() {
    let cfg = Cfg::load("# statements\n\nS -> x S\nS -> y | \n").unwrap();
    support::assert_bnf(&cfg, "S -> x S | y | epsilon\n");
}

#[test]
fn test_start_symbol_and_classes() {
    let cfg = support::load("B -> b A\nA -> a");
    let [a, b] = ["A", "B"].map(|name| support::sym(&cfg, name));
    assert_eq!(cfg.start(), Some(b));
    assert!(cfg.is_nonterminal(a));
    assert!(cfg.is_terminal(support::sym(&cfg, "a")));
    assert_eq!(cfg.nonterminals(), &[b, a]);
}

#[test_case("S -> epsilon", "S -> epsilon\n" ; "epsilon word")]
#[test_case("S -> a | ε", "S -> a | epsilon\n" ; "epsilon sign")]
#[test_case("S -> a epsilon b", "S -> a b\n" ; "epsilon inside")]
fn test_epsilon_spellings(text: &str, expected: &str) {
    support::assert_bnf(&support::load(text), expected);
}

#[test_case("S a b", GrammarError::Syntax { line: 1, reason: "expected `->`".to_owned() } ; "missing arrow")]
#[test_case("S -> a\n -> b", GrammarError::Syntax { line: 2, reason: "missing left-hand side".to_owned() } ; "missing lhs")]
#[test_case("S T -> a", GrammarError::Syntax { line: 1, reason: "left-hand side must be a single symbol".to_owned() } ; "two lhs symbols")]
#[test_case("S -> a $", GrammarError::ReservedName("$".to_owned()) ; "end marker")]
#[test_case("# nothing\n", GrammarError::NoStartSymbol ; "no rules")]
fn test_errors(text: &str, expected: GrammarError) {
    assert_eq!(load_grammar(text).unwrap_err(), expected);
}

#[test]
fn test_candidate_lines() {
    let lines: Vec<_> = candidate_lines("a b\n\n# skip\n  c  \n").collect();
    assert_eq!(lines, [(1, "a b"), (4, "c")]);
}
