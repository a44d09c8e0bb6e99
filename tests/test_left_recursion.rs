use cfg_ll1::derivation::LeftCorners;
use cfg_ll1::eliminate_left_recursion;
use test_case::test_case;

mod support;

#[test]
fn test_direct_left_recursion() {
    let cfg = support::load(support::LEFT_RECURSIVE_EXPR);
    assert!(cfg.is_left_recursive());
    let result = eliminate_left_recursion(&cfg);
    support::assert_bnf(&result, "E -> T E'\nE' -> + T E' | epsilon\nT -> id\n");
}

#[test]
fn test_several_recursive_alternatives() {
    let cfg = support::load(
        "E -> E + T | E - T | T
         T -> T * F | F
         F -> ( E ) | id",
    );
    let result = eliminate_left_recursion(&cfg);
    support::assert_bnf(
        &result,
        "E -> T E'
E' -> + T E' | - T E' | epsilon
T -> F T'
T' -> * F T' | epsilon
F -> ( E ) | id
",
    );
}

#[test]
fn test_indirect_left_recursion() {
    let cfg = support::load("S -> A a | b\nA -> A c | S d | epsilon");
    let result = eliminate_left_recursion(&cfg);
    support::assert_bnf(
        &result,
        "S -> A a | b\nA -> b d A' | A'\nA' -> c A' | a d A' | epsilon\n",
    );
}

#[test]
fn test_indirect_chain_uses_rewritten_alternatives() {
    let cfg = support::load("A -> B x | y\nB -> C z\nC -> A w | v");
    let corners = LeftCorners::new(&cfg);
    let recursive: Vec<_> = corners.left_recursive(&cfg).collect();
    assert_eq!(recursive.len(), 3);

    let result = eliminate_left_recursion(&cfg);
    support::assert_bnf(
        &result,
        "A -> B x | y\nB -> C z\nC -> y w C' | v C'\nC' -> z x w C' | epsilon\n",
    );
}

#[test]
fn test_grammar_without_recursion_is_unchanged() {
    let cfg = support::load(support::EXPR);
    let result = eliminate_left_recursion(&cfg);
    assert_eq!(result.stringify_to_bnf(), cfg.stringify_to_bnf());
}

#[test_case(support::LEFT_RECURSIVE_EXPR ; "direct")]
#[test_case("S -> A a | b\nA -> A c | S d | epsilon" ; "indirect")]
#[test_case("A -> B x | y\nB -> C z\nC -> A w | v" ; "chain")]
#[test_case("L -> L , x | x" ; "list")]
#[test_case("S -> S S | a" ; "doubled")]
fn test_no_left_recursion_remains(grammar: &str) {
    let result = eliminate_left_recursion(&support::load(grammar));
    assert!(!result.is_left_recursive(), "{}", result);
}
