//! Durable storage for the bearer credential.
//!
//! At most one credential is live per store. Nothing here tracks expiry; an
//! expired token is only discovered when the server rejects it.

use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::{CashMeError, Result};

/// Fixed storage key; the credential file name inside the token directory.
pub const TOKEN_KEY: &str = "authToken";

/// An opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A credential must be non-empty and free of whitespace and control
/// characters, so every store returns exactly what was set.
fn check_credential(credential: &Credential) -> Result<()> {
    let token = credential.as_str();
    if token.is_empty() {
        return Err(CashMeError::Validation("credential is empty".into()));
    }
    if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(CashMeError::Validation(
            "credential contains whitespace or control characters".into(),
        ));
    }
    Ok(())
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Persists and retrieves the bearer credential.
pub trait TokenStore: Send + Sync {
    /// The stored credential, if any.
    fn get(&self) -> Option<Credential>;

    /// Replace the stored credential. Empty credentials and ones containing
    /// whitespace are rejected with `Validation`.
    fn set(&self, credential: &Credential) -> Result<()>;

    /// Remove the stored credential. Never fails; storage errors are logged.
    fn clear(&self);
}

/// Credential kept in a single file `<dir>/authToken`; survives restarts.
///
/// On unix the file is created with mode `0600`. Contents are returned
/// verbatim; a file that does not hold a valid credential reads as absent.
///
/// Not synchronized across processes: two processes writing the same file
/// race and the last write wins.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<Credential> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let credential = Credential::new(contents);
                match check_credential(&credential) {
                    Ok(()) => Some(credential),
                    Err(e) => {
                        warn!(path = %self.path.display(), error = %e, "ignoring malformed stored token");
                        None
                    }
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read stored token");
                None
            }
        }
    }

    fn set(&self, credential: &Credential) -> Result<()> {
        check_credential(credential)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write-then-rename so a reader never sees a truncated token.
        let tmp = self.path.with_extension("tmp");
        write_private(&tmp, credential.as_str())?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "token stored");
        Ok(())
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "token cleared"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to clear stored token"),
        }
    }
}

/// Write `contents` to a fresh file readable only by the owner.
#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    // The mode only applies on creation, so drop any leftover file first.
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

/// In-process store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(credential: Credential) -> Self {
        Self {
            token: Mutex::new(Some(credential)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<Credential> {
        self.token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn set(&self, credential: &Credential) -> Result<()> {
        check_credential(credential)?;
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let c = Credential::new("super-secret");
        assert!(!format!("{c:?}").contains("super-secret"));
    }

    #[test]
    fn test_memory_store_set_get_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());

        store.set(&Credential::new("abc")).unwrap();
        assert_eq!(store.get(), Some(Credential::new("abc")));

        store.set(&Credential::new("def")).unwrap();
        assert_eq!(store.get(), Some(Credential::new("def")));

        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_memory_store_rejects_malformed_credentials() {
        let store = MemoryTokenStore::new();
        for bad in ["", "abc\n", " abc", "a b", "abc\u{7}"] {
            assert!(matches!(
                store.set(&Credential::new(bad)),
                Err(CashMeError::Validation(_))
            ));
        }
        assert!(store.get().is_none());
    }

    #[test]
    fn test_file_store_path_uses_fixed_key() {
        let store = FileTokenStore::new("/tmp/cashme-test");
        assert!(store.path().ends_with(TOKEN_KEY));
    }
}
