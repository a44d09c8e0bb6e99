use std::collections::BTreeMap;

use cfg_ll1::ll::{LlNonterminalClass, LlParseTable};
use cfg_ll1::prediction::{FirstSets, FollowSets, PredictSets};
use cfg_ll1::report::NullSink;
use cfg_ll1::{Analysis, Cfg, Lookahead};

mod support;

fn build(cfg: &Cfg) -> LlParseTable {
    let first = FirstSets::new(cfg);
    let follow = FollowSets::new(cfg, cfg.start().unwrap(), &first);
    LlParseTable::new(cfg, &first, &follow)
}

fn cell(cfg: &Cfg, table: &LlParseTable, nonterminal: &str, terminal: &str) -> Option<String> {
    let lookahead = if terminal == "$" {
        Lookahead::EndMarker
    } else {
        Lookahead::Terminal(support::sym(cfg, terminal))
    };
    table
        .get(support::sym(cfg, nonterminal), lookahead)
        .map(|rule| cfg.stringify_rhs(&rule.rhs))
}

#[test]
fn test_transformed_expression_table() {
    let analysis = Analysis::new(&support::load(support::LEFT_RECURSIVE_EXPR), &mut NullSink).unwrap();
    let cfg = analysis.grammar();
    let table = analysis.table();

    assert!(table.conflicts().is_empty());
    assert_eq!(cell(cfg, table, "E", "id").as_deref(), Some("T E'"));
    assert_eq!(cell(cfg, table, "E'", "+").as_deref(), Some("+ T E'"));
    assert_eq!(cell(cfg, table, "E'", "$").as_deref(), Some("epsilon"));
    assert_eq!(cell(cfg, table, "T", "id").as_deref(), Some("id"));
    assert_eq!(cell(cfg, table, "E", "+"), None);
    assert_eq!(cell(cfg, table, "T", "$"), None);

    let columns: Vec<_> = table
        .columns()
        .iter()
        .map(|la| la.name(cfg.sym_source()))
        .collect();
    assert_eq!(columns, ["+", "id", "$"]);
}

#[test]
fn test_factored_grammar_has_no_conflicts() {
    let analysis = Analysis::new(&support::load("A -> a | a b"), &mut NullSink).unwrap();
    let cfg = analysis.grammar();
    let table = analysis.table();

    support::assert_bnf(cfg, "A -> a A'\nA' -> epsilon | b\n");
    assert!(table.is_ll1());
    assert_eq!(cell(cfg, table, "A", "a").as_deref(), Some("a A'"));
    assert_eq!(cell(cfg, table, "A'", "b").as_deref(), Some("b"));
    assert_eq!(cell(cfg, table, "A'", "$").as_deref(), Some("epsilon"));
}

#[test]
fn test_unfactored_grammar_conflicts() {
    let cfg = support::load("A -> a | a b");
    let table = build(&cfg);
    assert_eq!(table.conflicts().len(), 1);
    assert_eq!(cell(&cfg, &table, "A", "a").as_deref(), Some("a b"));
}

#[test]
fn test_last_write_wins() {
    let cfg = support::load(support::DANGLING_ELSE);
    let table = build(&cfg);

    let conflicts = table.conflicts();
    assert_eq!(conflicts.len(), 1);
    let conflict = &conflicts[0];
    assert_eq!(cfg.name(conflict.nonterminal), "S'");
    assert_eq!(conflict.lookahead.name(cfg.sym_source()), "e");
    assert_eq!(cfg.stringify_rhs(&conflict.previous.rhs), "e S");
    assert_eq!(cfg.stringify_rhs(&conflict.chosen.rhs), "epsilon");
    assert_eq!(cell(&cfg, &table, "S'", "e").as_deref(), Some("epsilon"));
    assert_eq!(cell(&cfg, &table, "S'", "$").as_deref(), Some("epsilon"));
}

#[test]
fn test_classification() {
    let cfg = support::load(support::DANGLING_ELSE);
    let table = build(&cfg);
    let classification = table.classify(&cfg);

    let mut map = BTreeMap::new();
    map.insert(support::sym(&cfg, "S"), LlNonterminalClass::ContextFree);
    map.insert(support::sym(&cfg, "S'"), LlNonterminalClass::ContextFree);
    map.insert(support::sym(&cfg, "E"), LlNonterminalClass::Ll1);

    assert_eq!(classification.classes(), &map);
}

#[test]
fn test_cells_agree_with_first_and_follow() {
    let cfg = support::load(support::EXPR);
    let first = FirstSets::new(&cfg);
    let follow = FollowSets::new(&cfg, cfg.start().unwrap(), &first);
    let table = LlParseTable::new(&cfg, &first, &follow);

    let mut cells = 0;
    for (key, rule) in table.cells() {
        let rhs_first = first.first_set_for_string(&rule.rhs);
        let in_follow = follow
            .get(key.nonterminal)
            .map_or(false, |set| set.contains(&key.lookahead));
        assert!(
            rhs_first.contains(&key.lookahead)
                || (rhs_first.contains(&Lookahead::Epsilon) && in_follow)
        );
        cells += 1;
    }
    assert_eq!(cells, 13);
}
