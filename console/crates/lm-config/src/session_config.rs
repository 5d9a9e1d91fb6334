use crate::{ConfigError, ConfigErrorResult, DEFAULT_TOKEN_FILE};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File holding the admin bearer token, relative to the config directory
    pub token_file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: String::from(DEFAULT_TOKEN_FILE),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.token_file.trim().is_empty() {
            return Err(ConfigError::session("session.token_file cannot be empty"));
        }

        if Path::new(&self.token_file).is_absolute() || self.token_file.contains("..") {
            return Err(ConfigError::session(
                "session.token_file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
