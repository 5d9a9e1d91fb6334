use crate::{CliError, CliResult, Session};

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

/// Keeps the admin token between `lm` invocations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. A missing or blank file means signed out.
    pub fn load(&self) -> CliResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CliError::session(&self.path, e)),
        }
    }

    /// Build a session from the stored token.
    pub fn restore(&self) -> CliResult<Session> {
        let session = Session::new();
        if let Some(token) = self.load()? {
            debug!("Restored session from {}", self.path.display());
            session.set(token);
        }
        Ok(session)
    }

    pub fn save(&self, token: &str) -> CliResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CliError::session(parent, e))?;
        }

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .map_err(|e| CliError::session(&self.path, e))?;
        file.write_all(token.as_bytes())
            .map_err(|e| CliError::session(&self.path, e))?;
        Ok(())
    }

    pub fn clear(&self) -> CliResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CliError::session(&self.path, e)),
        }
    }

    /// Mirror the in-memory session to disk.
    pub fn sync(&self, session: &Session) -> CliResult<()> {
        match session.token() {
            Some(token) => self.save(&token),
            None => self.clear(),
        }
    }
}
