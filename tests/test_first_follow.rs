use cfg_ll1::derivation::nullable_set;
use cfg_ll1::prediction::{FirstSets, FollowSets, PredictSets};
use cfg_ll1::Lookahead;
use test_case::test_case;

mod support;

#[test_case("E", &["(", "id"] ; "first of E")]
#[test_case("E'", &["+", "epsilon"] ; "first of E tail")]
#[test_case("T", &["(", "id"] ; "first of T")]
#[test_case("T'", &["*", "epsilon"] ; "first of T tail")]
#[test_case("F", &["(", "id"] ; "first of F")]
fn test_first_sets(nonterminal: &str, expected: &[&str]) {
    let cfg = support::load(support::EXPR);
    let first = FirstSets::new(&cfg);
    let set = first.get(support::sym(&cfg, nonterminal)).unwrap();
    assert_eq!(support::names(&cfg, set), support::name_set(expected));
}

#[test_case("E", &[")", "$"] ; "follow of E")]
#[test_case("E'", &[")", "$"] ; "follow of E tail")]
#[test_case("T", &["+", ")", "$"] ; "follow of T")]
#[test_case("T'", &["+", ")", "$"] ; "follow of T tail")]
#[test_case("F", &["*", "+", ")", "$"] ; "follow of F")]
fn test_follow_sets(nonterminal: &str, expected: &[&str]) {
    let cfg = support::load(support::EXPR);
    let start = cfg.start().unwrap();
    let first = FirstSets::new(&cfg);
    let follow = FollowSets::new(&cfg, start, &first);
    let set = follow.get(support::sym(&cfg, nonterminal)).unwrap();
    assert_eq!(support::names(&cfg, set), support::name_set(expected));
}

#[test]
fn test_terminal_first_set_is_itself() {
    let cfg = support::load(support::EXPR);
    let first = FirstSets::new(&cfg);
    let plus = support::sym(&cfg, "+");
    let set = first.get(plus).unwrap();
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![Lookahead::Terminal(plus)]);
}

#[test]
fn test_first_of_string() {
    let cfg = support::load(support::EXPR);
    let first = FirstSets::new(&cfg);
    let [e1, t1, star] = ["E'", "T'", "*"].map(|name| support::sym(&cfg, name));

    let both_nullable = first.first_set_for_string(&[t1, e1]);
    assert_eq!(
        support::names(&cfg, &both_nullable),
        support::name_set(&["*", "+", "epsilon"])
    );

    let stops_at_terminal = first.first_set_for_string(&[e1, star, e1]);
    assert_eq!(
        support::names(&cfg, &stops_at_terminal),
        support::name_set(&["+", "*"])
    );

    let empty = first.first_set_for_string(&[]);
    assert_eq!(empty.into_iter().collect::<Vec<_>>(), vec![Lookahead::Epsilon]);
}

#[test_case(support::EXPR ; "expression")]
#[test_case("S -> A B c\nA -> a | epsilon\nB -> A A" ; "nullable chain")]
#[test_case("S -> A a | b\nA -> b d A' | A'\nA' -> c A' | a d A' | epsilon" ; "nullable through tail")]
fn test_epsilon_in_first_iff_nullable(grammar: &str) {
    let cfg = support::load(grammar);
    let first = FirstSets::new(&cfg);
    let nullable = nullable_set(&cfg);
    for &nt in cfg.nonterminals() {
        assert_eq!(first.is_nullable(nt), nullable.has_sym(nt), "{}", cfg.name(nt));
    }
}

#[test]
fn test_nullable_chain() {
    let cfg = support::load("S -> A B c\nA -> a | epsilon\nB -> A A");
    let start = cfg.start().unwrap();
    let first = FirstSets::new(&cfg);
    let follow = FollowSets::new(&cfg, start, &first);
    let [s, a, b] = ["S", "A", "B"].map(|name| support::sym(&cfg, name));

    assert_eq!(
        support::names(&cfg, first.get(s).unwrap()),
        support::name_set(&["a", "c"])
    );
    assert!(first.is_nullable(b));
    assert_eq!(
        support::names(&cfg, follow.get(a).unwrap()),
        support::name_set(&["a", "c"])
    );
    assert_eq!(
        support::names(&cfg, follow.get(b).unwrap()),
        support::name_set(&["c"])
    );
    assert_eq!(
        support::names(&cfg, follow.get(s).unwrap()),
        support::name_set(&["$"])
    );
}

#[test]
fn test_epsilon_never_in_follow() {
    let cfg = support::load("S -> A B\nA -> a | epsilon\nB -> b | epsilon");
    let start = cfg.start().unwrap();
    let first = FirstSets::new(&cfg);
    let follow = FollowSets::new(&cfg, start, &first);
    for (_, set) in follow.nonterminal_sets(&cfg) {
        assert!(!set.contains(&Lookahead::Epsilon));
    }
}
