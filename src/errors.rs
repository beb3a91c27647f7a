// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::parser::ParseError;

#[derive(Error, Debug)]
pub enum OshError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("invalid command: {0}")]
    InvalidDescriptor(String),

    /// Process creation itself failed (resource exhaustion). Fatal to the
    /// current input line.
    #[error("failed to spawn '{program}': {source}")]
    SpawnFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to allocate pipe: {0}")]
    PipeFailure(#[source] std::io::Error),

    #[error("failed waiting for '{program}': {source}")]
    WaitFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, OshError>;
