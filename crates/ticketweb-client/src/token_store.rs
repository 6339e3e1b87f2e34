//! Saved-credential storage.
//!
//! The client reads the saved token once at startup to seed its
//! configuration. Writing it back on login and clearing it on logout is the
//! caller's decision.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::ClientError;

/// File name of the saved credential inside the config directory.
pub const TOKEN_FILE_NAME: &str = "access_token";

/// Persistent home for the bearer credential.
pub trait TokenStore: Send + Sync {
    /// Saved credential. `None` if nothing is saved.
    fn load(&self) -> Result<Option<String>, ClientError>;

    /// Replace the saved credential.
    fn save(&self, token: &str) -> Result<(), ClientError>;

    /// Forget the saved credential. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), ClientError>;
}

fn store_error(err: &io::Error) -> ClientError {
    ClientError::TokenStore { reason: err.to_string() }
}

/// Credential kept in a single plain-text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/ticketweb/access_token`. `None` if the platform has no
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ticketweb").join(TOKEN_FILE_NAME))
    }

    /// File holding the credential.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_owned()))
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(store_error(&err)),
        }
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| store_error(&e))?;
        }
        fs::write(&self.path, token).map_err(|e| store_error(&e))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(store_error(&err)),
        }
    }
}

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Store pre-seeded with `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.token.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
