// src/config/model.rs

use serde::Deserialize;

use crate::types::ExecutionMode;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [shell]
/// prompt = "osh> "
/// interactive_limit = 25
/// execution_mode = "concurrent"
/// ```
///
/// Every section and key is optional.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub shell: ShellSection,
}

/// `[shell]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellSection {
    /// Printed before each line in interactive mode.
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Maximum number of lines read in interactive mode.
    #[serde(default = "default_interactive_limit")]
    pub interactive_limit: usize,

    /// `"sequential"` or `"concurrent"`.
    #[serde(default)]
    pub execution_mode: ExecutionMode,
}

fn default_prompt() -> String {
    "osh> ".to_string()
}

fn default_interactive_limit() -> usize {
    25
}

impl Default for ShellSection {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            interactive_limit: default_interactive_limit(),
            execution_mode: ExecutionMode::default(),
        }
    }
}

/// Validated configuration.
///
/// Only obtainable through `TryFrom<RawConfigFile>` (see `validate.rs`) or
/// [`ConfigFile::default`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub shell: ShellSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(shell: ShellSection) -> Self {
        Self { shell }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(ShellSection::default())
    }
}
