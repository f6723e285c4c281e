//! Token storage in a plain file, the CLI's durable slot.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use session::{StorageError, TokenStore};

/// Default location relative to `$HOME`.
pub const DEFAULT_TOKEN_FILE: &str = ".openlab/token";

/// `$HOME/.openlab/token`, or `./.openlab/token` without a home directory.
#[must_use]
pub fn default_token_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_TOKEN_FILE)
}

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn backend(op: &'static str, err: &std::io::Error) -> StorageError {
    StorageError::Backend { op, message: err.to_string() }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw.trim().to_owned()).filter(|t| !t.is_empty())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(backend("read", &e)),
        }
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| backend("write", &e))?;
        }
        std::fs::write(&self.path, token).map_err(|e| backend("write", &e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(backend("remove", &e)),
        }
    }
}

#[cfg(test)]
#[path = "token_file_test.rs"]
mod tests;
