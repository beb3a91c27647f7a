// src/parser/mod.rs

//! Turns one input line into an ordered sequence of [`CommandDescriptor`]s.
//!
//! Grammar (no quoting, no expansion):
//!
//! ```text
//! line     := stage (operator stage)* [";"]
//! operator := "|" | "&&" | "||" | ";"
//! stage    := word+ with any of  "<" file  ">" file  ">>" file
//! ```
//!
//! The operator *after* a stage picks that stage's continuation policy:
//! `&&` → `OnSuccess`, `||` → `OnFail`, `;` → `Always`, `|` and end of line
//! → `Sequential`. A `|` also turns the left stage's output and the right
//! stage's input into pipes.

pub mod lexer;

use thiserror::Error;
use tracing::trace;

use crate::command::{CommandDescriptor, ContinuationPolicy, InputSource, OutputSink};
use lexer::{Token, tokenize};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command line")]
    EmptyInput,

    #[error("syntax error near unexpected token `{0}`")]
    UnexpectedOperator(String),

    #[error("syntax error: `{0}` must be followed by a command")]
    TrailingOperator(String),

    #[error("syntax error: redirection without a command")]
    MissingCommand,

    #[error("syntax error: `{0}` expects a file name")]
    MissingRedirectTarget(String),

    #[error("ambiguous redirect: more than one input source for `{0}`")]
    DuplicateInput(String),

    #[error("ambiguous redirect: more than one output sink for `{0}`")]
    DuplicateOutput(String),

    #[error("ambiguous redirect: `{0}` reads from both a pipe and a file")]
    ConflictingInput(String),

    #[error("ambiguous redirect: `{0}` writes to both a file and a pipe")]
    ConflictingOutput(String),

    #[error("background jobs (`&`) are not supported")]
    BackgroundUnsupported,

    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

/// Parse a raw line into descriptors.
///
/// On success the sequence is never empty.
pub fn parse_command_line(line: &str) -> Result<Vec<CommandDescriptor>, ParseError> {
    let tokens = tokenize(line);
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut stages = Vec::new();
    let mut draft = StageDraft::default();
    let mut last_operator: Option<Token> = None;
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        match token {
            Token::Word(word) => draft.words.push(word),
            Token::Amp => return Err(ParseError::BackgroundUnsupported),
            Token::Less | Token::Great | Token::DoubleGreat => {
                let target = match tokens.next() {
                    Some(Token::Word(target)) => target,
                    _ => return Err(ParseError::MissingRedirectTarget(token.as_str().to_string())),
                };
                draft.redirect(&token, target)?;
            }
            Token::Pipe | Token::And | Token::Or | Token::Semi => {
                let policy = match token {
                    Token::And => ContinuationPolicy::OnSuccess,
                    Token::Or => ContinuationPolicy::OnFail,
                    Token::Semi => ContinuationPolicy::Always,
                    _ => ContinuationPolicy::Sequential,
                };
                let piped = token == Token::Pipe;
                let finished = std::mem::replace(&mut draft, StageDraft::new(piped));
                stages.push(finished.finish(&token, policy, piped)?);
                last_operator = Some(token);
            }
        }
    }

    if draft.words.is_empty() {
        return match last_operator {
            _ if !draft.is_blank() => Err(ParseError::MissingCommand),
            Some(Token::Semi) => Ok(stages),
            Some(op) => Err(ParseError::TrailingOperator(op.as_str().to_string())),
            None => Err(ParseError::EmptyInput),
        };
    }

    stages.push(draft.finish_last()?);
    trace!(stages = stages.len(), "parsed command line");
    Ok(stages)
}

/// A stage being accumulated from tokens.
#[derive(Debug, Default)]
struct StageDraft {
    words: Vec<String>,
    piped_in: bool,
    input: Option<InputSource>,
    output: Option<OutputSink>,
}

impl StageDraft {
    fn new(piped_in: bool) -> Self {
        Self {
            piped_in,
            ..Self::default()
        }
    }

    fn is_blank(&self) -> bool {
        self.words.is_empty() && self.input.is_none() && self.output.is_none()
    }

    fn label(&self) -> String {
        self.words.first().cloned().unwrap_or_default()
    }

    fn redirect(&mut self, op: &Token, target: String) -> Result<(), ParseError> {
        match op {
            Token::Less => {
                if self.piped_in {
                    return Err(ParseError::ConflictingInput(self.label()));
                }
                if self.input.is_some() {
                    return Err(ParseError::DuplicateInput(self.label()));
                }
                self.input = Some(InputSource::File(target.into()));
            }
            Token::Great | Token::DoubleGreat => {
                if self.output.is_some() {
                    return Err(ParseError::DuplicateOutput(self.label()));
                }
                self.output = Some(if *op == Token::Great {
                    OutputSink::File(target.into())
                } else {
                    OutputSink::Append(target.into())
                });
            }
            _ => unreachable!("redirect called with a non-redirection token"),
        }
        Ok(())
    }

    fn finish(
        mut self,
        op: &Token,
        policy: ContinuationPolicy,
        piped_out: bool,
    ) -> Result<CommandDescriptor, ParseError> {
        if self.words.is_empty() {
            return Err(ParseError::UnexpectedOperator(op.as_str().to_string()));
        }
        if piped_out {
            if self.output.is_some() {
                return Err(ParseError::ConflictingOutput(self.label()));
            }
            self.output = Some(OutputSink::Pipe);
        }
        self.build(policy)
    }

    fn finish_last(self) -> Result<CommandDescriptor, ParseError> {
        self.build(ContinuationPolicy::Sequential)
    }

    fn build(self, policy: ContinuationPolicy) -> Result<CommandDescriptor, ParseError> {
        let input = match self.input {
            Some(input) => input,
            None if self.piped_in => InputSource::Pipe,
            None => InputSource::Inherit,
        };

        let mut words = self.words.into_iter();
        let program = words.next().unwrap_or_default();

        CommandDescriptor::builder(program)
            .args(words)
            .input(input)
            .output(self.output.unwrap_or_default())
            .policy(policy)
            .build()
            .map_err(|e| ParseError::InvalidCommand(e.to_string()))
    }
}
