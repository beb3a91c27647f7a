// tests/plan.rs

use osh::command::{ContinuationPolicy, InputSource, OutputSink};
use osh::exec::plan::{links_forward, segments};
use osh::parser::parse_command_line;
use osh::types::ExecutionMode;
use osh_test_utils::builders::wired_stage;

#[test]
fn test_links_follow_pipes() {
    let stages = parse_command_line("a | b ; c && d | e").unwrap();

    let links: Vec<bool> = (0..stages.len()).map(|i| links_forward(&stages, i)).collect();
    assert_eq!(links, vec![true, false, false, true, false]);
}

#[test]
fn test_reader_side_alone_creates_a_link() {
    let stages = vec![
        wired_stage(
            "a",
            &[],
            InputSource::Inherit,
            OutputSink::File("f".into()),
            ContinuationPolicy::Always,
        ),
        wired_stage(
            "b",
            &[],
            InputSource::Pipe,
            OutputSink::Inherit,
            ContinuationPolicy::Sequential,
        ),
    ];

    assert!(links_forward(&stages, 0));
    assert!(!links_forward(&stages, 1));
}

#[test]
fn test_sequential_mode_isolates_every_stage() {
    let stages = parse_command_line("a | b | c ; d").unwrap();

    assert_eq!(
        segments(&stages, ExecutionMode::Sequential),
        vec![0..1, 1..2, 2..3, 3..4]
    );
}

#[test]
fn test_concurrent_mode_groups_pipe_runs() {
    let stages = parse_command_line("a | b | c ; d && e | f").unwrap();

    assert_eq!(
        segments(&stages, ExecutionMode::Concurrent),
        vec![0..3, 3..4, 4..6]
    );
}

#[test]
fn test_trailing_pipe_output_does_not_extend_past_end() {
    let stages = vec![wired_stage(
        "a",
        &[],
        InputSource::Inherit,
        OutputSink::Pipe,
        ContinuationPolicy::Sequential,
    )];

    assert!(links_forward(&stages, 0));
    assert_eq!(segments(&stages, ExecutionMode::Concurrent), vec![0..1]);
}

#[test]
fn test_no_stages_no_segments() {
    assert!(segments(&[], ExecutionMode::Concurrent).is_empty());
}

#[test]
fn test_conditional_policy_closes_a_concurrent_segment() {
    let piped = |program: &str, policy| {
        wired_stage(program, &[], InputSource::Pipe, OutputSink::Pipe, policy)
    };
    let stages = vec![
        piped("a", ContinuationPolicy::Sequential),
        piped("b", ContinuationPolicy::OnSuccess),
        piped("c", ContinuationPolicy::Always),
        piped("d", ContinuationPolicy::OnFail),
        piped("e", ContinuationPolicy::Sequential),
    ];

    assert!((0..4).all(|i| links_forward(&stages, i)));
    assert_eq!(
        segments(&stages, ExecutionMode::Concurrent),
        vec![0..2, 2..4, 4..5]
    );
}
