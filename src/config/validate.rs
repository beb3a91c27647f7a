// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{OshError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::OshError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.shell))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.shell.interactive_limit == 0 {
        return Err(OshError::ConfigError(
            "[shell].interactive_limit must be >= 1 (got 0)".to_string(),
        ));
    }

    if cfg.shell.prompt.contains('\n') {
        return Err(OshError::ConfigError(
            "[shell].prompt must not contain a newline".to_string(),
        ));
    }

    Ok(())
}
