use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use super::{Session, SessionUser};
use crate::error::ClientResult;

pub const TOKEN_FILE: &str = "token";
pub const USER_FILE: &str = "user.json";

/// Durable persistence of exactly two values: the bearer token and the user profile.
///
/// Implementations never expose a partial pair. `load` returns `None` unless
/// both values are present and readable; a half-written or corrupt pair is
/// treated as a logged-out state and cleared.
pub trait CredentialStore: Send + Sync {
    fn save(&self, token: &str, user: &SessionUser) -> ClientResult<()>;

    fn load(&self) -> Option<Session>;

    /// Remove both values. Idempotent and infallible from the caller's view.
    fn clear(&self);

    fn token(&self) -> Option<String> {
        self.load().map(|s| s.token().to_string())
    }
}

/// File-backed store: `<dir>/token` and `<dir>/user.json`.
pub struct FileCredentialStore {
    dir: PathBuf,
    // Serializes save/load/clear inside one process so reads observe prior writes
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write through a temp file and rename so readers never see a torn value.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let tmp = self.dir.join(format!(".{}.tmp", Uuid::new_v4().simple()));
        {
            let mut file = private_options().open(&tmp)?;
            file.write_all(contents)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
    }

    fn remove_quiet(path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("failed to remove {}: {}", path.display(), e),
        }
    }

    fn clear_locked(&self) {
        // Token first: without it the pair already reads as absent
        Self::remove_quiet(&self.token_path());
        Self::remove_quiet(&self.user_path());
    }

    fn read_optional(path: &Path) -> io::Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, token: &str, user: &SessionUser) -> ClientResult<()> {
        let _guard = self.guard();
        fs::create_dir_all(&self.dir)?;

        let user_json = serde_json::to_string_pretty(user)?;

        // Drop the old token before touching the profile; the new token lands
        // last, so every intermediate state reads as "absent".
        Self::remove_quiet(&self.token_path());
        let result = self
            .write_atomic(&self.user_path(), user_json.as_bytes())
            .and_then(|_| self.write_atomic(&self.token_path(), token.as_bytes()));

        if let Err(e) = result {
            self.clear_locked();
            return Err(e.into());
        }

        tracing::debug!("credentials saved to {}", self.dir.display());
        Ok(())
    }

    fn load(&self) -> Option<Session> {
        let _guard = self.guard();

        let token = Self::read_optional(&self.token_path());
        let user = Self::read_optional(&self.user_path());

        match (token, user) {
            (Ok(None), Ok(None)) => None,
            (Ok(Some(token)), Ok(Some(user_json))) => {
                let token = token.trim().to_string();
                if token.is_empty() {
                    tracing::warn!("stored token is empty; discarding credentials");
                    self.clear_locked();
                    return None;
                }
                match serde_json::from_str::<SessionUser>(&user_json) {
                    Ok(user) => Some(Session::new(token, user)),
                    Err(e) => {
                        tracing::warn!("stored user profile is unreadable ({}); discarding credentials", e);
                        self.clear_locked();
                        None
                    }
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("failed to read stored credentials: {}", e);
                None
            }
            _ => {
                tracing::warn!("partial credentials found; discarding");
                self.clear_locked();
                None
            }
        }
    }

    fn clear(&self) {
        let _guard = self.guard();
        self.clear_locked();
    }
}

/// Options for a fresh file that is owner-only from the moment it exists.
fn private_options() -> fs::OpenOptions {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

/// Process-local store for embedders and tests.
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<Session>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, token: &str, user: &SessionUser) -> ClientResult<()> {
        *self.slot() = Some(Session::new(token, user.clone()));
        Ok(())
    }

    fn load(&self) -> Option<Session> {
        self.slot().clone()
    }

    fn clear(&self) {
        *self.slot() = None;
    }
}
