// tests/config_loading.rs

use std::io::Write;

use clap::Parser;
use tempfile::NamedTempFile;

use osh::cli::CliArgs;
use osh::config::{ConfigFile, load_and_validate, load_or_default};
use osh::effective_config;
use osh::errors::OshError;
use osh::types::ExecutionMode;
use osh_test_utils::builders::ConfigFileBuilder;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_defaults_without_file() {
    let cfg = ConfigFile::default();

    assert_eq!(cfg.shell.prompt, "osh> ");
    assert_eq!(cfg.shell.interactive_limit, 25);
    assert_eq!(cfg.shell.execution_mode, ExecutionMode::Concurrent);
}

#[test]
fn test_full_shell_section() {
    let file = config_file(
        r#"
[shell]
prompt = "$ "
interactive_limit = 3
execution_mode = "sequential"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.shell.prompt, "$ ");
    assert_eq!(cfg.shell.interactive_limit, 3);
    assert_eq!(cfg.shell.execution_mode, ExecutionMode::Sequential);
}

#[test]
fn test_partial_section_keeps_defaults() {
    let file = config_file("[shell]\nprompt = \"> \"\n");

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.shell.prompt, "> ");
    assert_eq!(cfg.shell.interactive_limit, 25);
}

#[test]
fn test_zero_interactive_limit_returns_config_error() {
    let file = config_file("[shell]\ninteractive_limit = 0\n");

    match load_and_validate(file.path()) {
        Err(OshError::ConfigError(msg)) => assert!(msg.contains("interactive_limit")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_unknown_execution_mode_returns_toml_error() {
    let file = config_file("[shell]\nexecution_mode = \"parallel\"\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(OshError::TomlError(_))
    ));
}

#[test]
fn test_unknown_key_returns_toml_error() {
    let file = config_file("[shell]\npromt = \"typo\"\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(OshError::TomlError(_))
    ));
}

#[test]
fn test_explicit_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    assert!(matches!(
        load_or_default(Some(missing.as_path())),
        Err(OshError::IoError(_))
    ));
}

#[test]
fn test_cli_overrides_config() {
    let file = config_file("[shell]\nexecution_mode = \"concurrent\"\ninteractive_limit = 9\n");
    let path = file.path().to_str().unwrap();

    let args = CliArgs::parse_from([
        "osh",
        "--config",
        path,
        "--execution-mode",
        "sequential",
        "--max-commands",
        "2",
    ]);
    let cfg = effective_config(&args).unwrap();

    assert_eq!(cfg.shell.execution_mode, ExecutionMode::Sequential);
    assert_eq!(cfg.shell.interactive_limit, 2);
}

#[test]
fn test_cli_batch_flag() {
    let args = CliArgs::parse_from(["osh", "-t"]);
    assert!(args.batch);

    let args = CliArgs::parse_from(["osh"]);
    assert!(!args.batch);
    assert!(CliArgs::try_parse_from(["osh", "--max-commands", "0"]).is_err());
}

#[test]
fn test_builder_produces_validated_config() {
    let cfg = ConfigFileBuilder::new()
        .prompt("% ")
        .interactive_limit(4)
        .execution_mode(ExecutionMode::Sequential)
        .build();

    assert_eq!(cfg.shell.prompt, "% ");
    assert_eq!(cfg.shell.interactive_limit, 4);
    assert_eq!(cfg.shell.execution_mode, ExecutionMode::Sequential);
}

#[test]
fn test_execution_mode_parsing_via_cli_and_toml() {
    let args = CliArgs::parse_from(["osh", "--execution-mode", "concurrent"]);
    assert_eq!(args.execution_mode, Some(ExecutionMode::Concurrent));
    assert!(CliArgs::try_parse_from(["osh", "--execution-mode", "both"]).is_err());

    let file = config_file("[shell]\nexecution_mode = \"both\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(OshError::TomlError(_))
    ));
}
