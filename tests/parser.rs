// tests/parser.rs

use std::path::Path;

use osh::command::{ContinuationPolicy, InputMode, InputSource, OutputMode, OutputSink};
use osh::parser::lexer::{Token, tokenize};
use osh::parser::{ParseError, parse_command_line};

#[test]
fn test_tokenize_splits_operators_without_spaces() {
    let tokens = tokenize("echo hi>out|wc -c&&true||false;ls>>log<in");
    let word = |w: &str| Token::Word(w.to_string());

    assert_eq!(
        tokens,
        vec![
            word("echo"),
            word("hi"),
            Token::Great,
            word("out"),
            Token::Pipe,
            word("wc"),
            word("-c"),
            Token::And,
            word("true"),
            Token::Or,
            word("false"),
            Token::Semi,
            word("ls"),
            Token::DoubleGreat,
            word("log"),
            Token::Less,
            word("in"),
        ]
    );
}

#[test]
fn test_single_command_with_arguments() {
    let stages = parse_command_line("  ls -l   -a /tmp ").unwrap();

    assert_eq!(stages.len(), 1);
    assert_eq!(stages[0].program(), "ls");
    assert_eq!(stages[0].arguments(), ["-l", "-a", "/tmp"]);
    assert_eq!(stages[0].input_mode(), InputMode::Inherit);
    assert_eq!(stages[0].output_mode(), OutputMode::Inherit);
    assert_eq!(stages[0].policy(), ContinuationPolicy::Sequential);
}

#[test]
fn test_pipe_wires_both_sides() {
    let stages = parse_command_line("echo hi | wc -c").unwrap();

    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0].output(), &OutputSink::Pipe);
    assert_eq!(stages[0].input(), &InputSource::Inherit);
    assert_eq!(stages[0].policy(), ContinuationPolicy::Sequential);
    assert_eq!(stages[1].input(), &InputSource::Pipe);
    assert_eq!(stages[1].output(), &OutputSink::Inherit);
}

#[test]
fn test_operators_select_policy_of_left_stage() {
    let stages = parse_command_line("a && b || c ; d").unwrap();
    let policies: Vec<_> = stages.iter().map(|s| s.policy()).collect();

    assert_eq!(
        policies,
        vec![
            ContinuationPolicy::OnSuccess,
            ContinuationPolicy::OnFail,
            ContinuationPolicy::Always,
            ContinuationPolicy::Sequential,
        ]
    );
}

#[test]
fn test_redirections_anywhere_in_stage() {
    let stages = parse_command_line("sort < in.txt -r >> out.txt").unwrap();

    assert_eq!(stages[0].program(), "sort");
    assert_eq!(stages[0].arguments(), ["-r"]);
    assert_eq!(stages[0].input_path(), Some(Path::new("in.txt")));
    assert_eq!(stages[0].output_mode(), OutputMode::Append);
    assert_eq!(stages[0].output_path(), Some(Path::new("out.txt")));
}

#[test]
fn test_input_file_then_pipe_then_output_file() {
    let stages = parse_command_line("cat < a | wc -l > b").unwrap();

    assert_eq!(stages[0].input(), &InputSource::File("a".into()));
    assert_eq!(stages[0].output(), &OutputSink::Pipe);
    assert_eq!(stages[1].input(), &InputSource::Pipe);
    assert_eq!(stages[1].output(), &OutputSink::File("b".into()));
}

#[test]
fn test_trailing_semicolon_is_allowed() {
    let stages = parse_command_line("echo done ;").unwrap();

    assert_eq!(stages.len(), 1);
    assert_eq!(stages[0].policy(), ContinuationPolicy::Always);
}

#[test]
fn test_paths_are_only_set_for_file_modes() {
    let stages = parse_command_line("a | b > out").unwrap();

    assert_eq!(stages[0].input_path(), None);
    assert_eq!(stages[0].output_path(), None);
    assert_eq!(stages[1].input_path(), None);
    assert_eq!(stages[1].output_path(), Some(Path::new("out")));
}

#[test]
fn test_parse_errors() {
    let cases = [
        ("", ParseError::EmptyInput),
        ("   ", ParseError::EmptyInput),
        ("| wc", ParseError::UnexpectedOperator("|".to_string())),
        ("a && && b", ParseError::UnexpectedOperator("&&".to_string())),
        ("; ls", ParseError::UnexpectedOperator(";".to_string())),
        ("ls |", ParseError::TrailingOperator("|".to_string())),
        ("ls &&", ParseError::TrailingOperator("&&".to_string())),
        ("ls ||", ParseError::TrailingOperator("||".to_string())),
        ("ls >", ParseError::MissingRedirectTarget(">".to_string())),
        ("ls > | wc", ParseError::MissingRedirectTarget(">".to_string())),
        ("cat <", ParseError::MissingRedirectTarget("<".to_string())),
        ("> out", ParseError::MissingCommand),
        ("ls ; > out", ParseError::MissingCommand),
        ("cat < a < b", ParseError::DuplicateInput("cat".to_string())),
        ("ls > a >> b", ParseError::DuplicateOutput("ls".to_string())),
        ("ls | cat < f", ParseError::ConflictingInput("cat".to_string())),
        ("ls > f | wc", ParseError::ConflictingOutput("ls".to_string())),
        ("sleep 10 &", ParseError::BackgroundUnsupported),
    ];

    for (line, expected) in cases {
        assert_eq!(parse_command_line(line), Err(expected), "line: {line:?}");
    }
}

#[test]
fn test_parse_error_messages_are_readable() {
    let err = parse_command_line("ls |").unwrap_err();
    assert_eq!(err.to_string(), "syntax error: `|` must be followed by a command");

    let err = parse_command_line("sleep 1 &").unwrap_err();
    assert!(err.to_string().contains("not supported"));
}
