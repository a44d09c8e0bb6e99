use cfg_ll1::render::TextSink;
use cfg_ll1::report::{NullSink, Recorder};
use cfg_ll1::{candidate_lines, Analysis, Cfg, GrammarError, RecoveryPolicy, Summary, Verdict};

mod support;

#[test]
fn test_reports_every_stage() {
    let mut recorder = Recorder::new();
    let analysis = Analysis::new(&support::load(support::LEFT_RECURSIVE_EXPR), &mut recorder).unwrap();

    assert!(recorder.contains("Original grammar:\nE -> E + T | T\nT -> id\n"));
    assert!(recorder.contains("Grammar after left factoring:\nE -> E + T | T\n"));
    assert!(recorder.contains("Grammar after left recursion elimination:\nE -> T E'\nE' -> + T E' | epsilon\n"));
    assert!(recorder.contains("FIRST(T) = { id }"));
    assert!(recorder.contains("FIRST(E') = { +, epsilon }"));
    assert!(recorder.contains("FOLLOW(T) = { +, $ }"));
    assert!(recorder.contains("LL(1) parse table:"));
    assert!(!recorder.contains("conflict"));
    assert!(!recorder.contains("still left recursive"));
    assert!(analysis.table().is_ll1());
    assert_eq!(analysis.grammar().name(analysis.start()), "E");
}

#[test]
fn test_conflicts_are_reported() {
    let mut recorder = Recorder::new();
    Analysis::new(&support::load(support::DANGLING_ELSE), &mut recorder).unwrap();
    assert!(recorder.contains("warning: LL(1) conflict at [S', e]: S' -> e S replaced by S' -> epsilon"));
}

#[test]
fn test_summary() {
    let analysis = Analysis::new(&support::load(support::LEFT_RECURSIVE_EXPR), &mut NullSink).unwrap();
    let input = "# candidates\nid + id\n\nid )\nid id\n";
    let mut recorder = Recorder::new();
    let summary = analysis.parse_lines(candidate_lines(input), RecoveryPolicy::default(), &mut recorder);

    assert_eq!(summary, Summary { lines: 3, failed: 2 });
    assert_eq!(
        recorder.verdicts,
        [
            Verdict::Accepted,
            Verdict::Rejected(cfg_ll1::parser::RejectReason::LeftoverInput),
            Verdict::Rejected(cfg_ll1::parser::RejectReason::LeftoverInput),
        ]
    );
    assert!(recorder.contains("line 2: id + id"));
    assert!(recorder.contains("line 2: parsed successfully"));
    assert!(recorder.contains("line 4: rejected, input left over"));
    assert!(recorder.contains("3 lines parsed, 1 successful, 2 with errors"));
}

#[test]
fn test_empty_grammar_is_an_error() {
    let result = Analysis::new(&Cfg::new(), &mut NullSink);
    assert_eq!(result.err(), Some(GrammarError::NoStartSymbol));
}

#[test]
fn test_text_report() {
    let analysis = Analysis::new(&support::load(support::LEFT_RECURSIVE_EXPR), &mut NullSink).unwrap();
    let mut sink = TextSink::new(vec![]);
    analysis.parse_line(1, "id + id", RecoveryPolicy::default(), &mut sink);
    assert!(!sink.has_failed());

    let text = String::from_utf8(sink.into_inner()).unwrap();
    assert!(text.contains("line 1: id + id"));
    assert!(text.contains("apply E -> T E'"));
    assert!(text.contains("match `+`"));
    assert!(text.contains("line 1: parsed successfully"));
}

#[test]
fn test_left_recursion_through_nullable_prefix_is_reported() {
    let mut recorder = Recorder::new();
    let analysis = Analysis::new(&support::load("S -> A S b | c\nA -> epsilon | a"), &mut recorder).unwrap();
    assert!(recorder.contains("warning: still left recursive: S"));
    assert!(!analysis.table().is_ll1());

    let verdict = analysis.parse_line(1, "a c b", RecoveryPolicy::default(), &mut NullSink);
    assert_eq!(verdict, Verdict::Accepted);
}
