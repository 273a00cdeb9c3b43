//! Session state and its persistence.
//!
//! # Design
//! - Model the session as an explicit `Anonymous | Authenticated` value instead of
//!   loosely-typed key presence.
//! - Persist through a small string key/value trait so the browser, the CLI and
//!   tests share one mapping onto the `user`, `token` and `Username` keys.
//! - A half-written session loads as anonymous.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use myflix_api_models::User;

use crate::error::StoreError;

/// Storage key holding the JSON-encoded cached user.
pub const USER_KEY: &str = "user";
/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the username (redundant with `user.Username`).
pub const USERNAME_KEY: &str = "Username";

/// Every key a persisted session may occupy.
pub const SESSION_KEYS: [&str; 3] = [USER_KEY, TOKEN_KEY, USERNAME_KEY];

/// Identity and credential cached after a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedSession {
    /// Locally cached copy of the account.
    pub user: User,
    /// Bearer token attached to authenticated calls.
    pub token: String,
}

/// Client-side authentication state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Session {
    /// Nobody is logged in; identity-scoped calls must not be issued.
    #[default]
    Anonymous,
    /// A user is logged in.
    Authenticated(AuthenticatedSession),
}

impl Session {
    /// Build an authenticated session, dropping the password from the cache.
    #[must_use]
    pub fn authenticated(user: &User, token: impl Into<String>) -> Self {
        Self::Authenticated(AuthenticatedSession {
            user: user.without_password(),
            token: token.into(),
        })
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Cached user, if logged in.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(session) => Some(&session.user),
            Self::Anonymous => None,
        }
    }

    /// Bearer token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Authenticated(session) => Some(session.token.as_str()),
            Self::Anonymous => None,
        }
    }

    /// Username of the cached user, if logged in.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.user().map(|user| user.username.as_str())
    }

    /// Whether `movie_id` is in the cached favourites. False when anonymous.
    #[must_use]
    pub fn is_favourite(&self, movie_id: &str) -> bool {
        self.user().is_some_and(|user| user.has_favourite(movie_id))
    }
}

/// String key/value storage a session is persisted into.
pub trait SessionBackend {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-process backend used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored key, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.lock().remove(key);
        Ok(())
    }
}

impl<B: SessionBackend + ?Sized> SessionBackend for &B {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Maps a [`Session`] onto the fixed storage keys of a backend.
#[derive(Debug)]
pub struct SessionStore<B> {
    backend: B,
}

impl<B: SessionBackend> SessionStore<B> {
    /// Wrap a backend.
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Borrow the underlying backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Load the persisted session.
    ///
    /// Both `user` and `token` must be present and `user` must decode;
    /// anything less is reported as [`Session::Anonymous`].
    ///
    /// # Errors
    /// Returns [`StoreError`] only when the backend itself fails.
    pub fn load(&self) -> Result<Session, StoreError> {
        let user = self.backend.read(USER_KEY)?;
        let token = self.backend.read(TOKEN_KEY)?;
        match (user, token) {
            (Some(user), Some(token)) if !token.trim().is_empty() => {
                match serde_json::from_str::<User>(&user) {
                    Ok(user) => Ok(Session::authenticated(&user, token)),
                    Err(err) => {
                        tracing::warn!(error = %err, "cached user is unreadable; treating session as anonymous");
                        Ok(Session::Anonymous)
                    }
                }
            }
            (None, None) => Ok(Session::Anonymous),
            _ => {
                tracing::warn!("persisted session is incomplete; treating session as anonymous");
                Ok(Session::Anonymous)
            }
        }
    }

    /// Persist `session`. An anonymous session clears the keys.
    ///
    /// # Errors
    /// Returns [`StoreError`] when encoding or the backend fails.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        match session {
            Session::Anonymous => self.clear(),
            Session::Authenticated(auth) => {
                self.save_user(&auth.user)?;
                self.backend.write(TOKEN_KEY, &auth.token)?;
                tracing::debug!(username = %auth.user.username, "session persisted");
                Ok(())
            }
        }
    }

    /// Rewrite the cached user (and the redundant username key).
    ///
    /// # Errors
    /// Returns [`StoreError`] when encoding or the backend fails.
    pub fn save_user(&self, user: &User) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&user.without_password())?;
        self.backend.write(USER_KEY, &encoded)?;
        self.backend.write(USERNAME_KEY, &user.username)?;
        Ok(())
    }

    /// Remove every session key.
    ///
    /// # Errors
    /// Returns the first backend failure; remaining keys are still attempted.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(err) = self.backend.remove(key) {
                tracing::warn!(key, error = %err, "failed to remove session key");
                first_error.get_or_insert(err);
            }
        }
        tracing::debug!("session cleared");
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileBackend;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use std::collections::BTreeMap;
    use std::fs;
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    use tempfile::NamedTempFile;

    use super::SessionBackend;
    use crate::error::StoreError;

    /// Backend persisting every key into one JSON object file.
    #[derive(Clone, Debug)]
    pub struct FileBackend {
        path: PathBuf,
    }

    impl FileBackend {
        /// Use `path` as the session file. The file is created on first write.
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// Location of the session file.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
            match fs::read(&self.path) {
                Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
                Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(err) => Err(err.into()),
            }
        }

        fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
            let dir = match self.path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => {
                    fs::create_dir_all(parent)?;
                    parent
                }
                _ => Path::new("."),
            };
            let encoded = serde_json::to_vec_pretty(entries)?;
            // Staged beside the target, then renamed over it. tempfile creates it 0600 on unix.
            let mut staged = NamedTempFile::new_in(dir)?;
            staged.write_all(&encoded)?;
            staged.as_file().sync_all()?;
            staged.persist(&self.path).map_err(|err| err.error)?;
            Ok(())
        }
    }

    impl SessionBackend for FileBackend {
        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.read_all()?.remove(key))
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
            let mut entries = self.read_all()?;
            entries.insert(key.to_string(), value.to_string());
            self.write_all(&entries)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            let mut entries = self.read_all()?;
            if entries.remove(key).is_some() {
                self.write_all(&entries)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Some("u1".into()),
            username: "ada".into(),
            password: Some("hash".into()),
            email: "ada@example.com".into(),
            birthday: None,
            favourite_movies: vec!["m1".into(), "m3".into()],
        }
    }

    #[test]
    fn anonymous_session_has_no_identity() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.username().is_none());
        assert!(!session.is_favourite("m1"));
    }

    #[test]
    fn authenticated_session_strips_password() {
        let session = Session::authenticated(&sample_user(), "tok");
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.username(), Some("ada"));
        assert!(session.user().is_some_and(|user| user.password.is_none()));
        assert!(session.is_favourite("m3"));
        assert!(!session.is_favourite("m2"));
    }

    #[test]
    fn save_writes_exactly_the_session_keys() -> Result<(), StoreError> {
        let store = SessionStore::new(MemoryBackend::new());
        store.save(&Session::authenticated(&sample_user(), "tok"))?;

        assert_eq!(store.backend().keys(), vec!["Username", "token", "user"]);
        assert_eq!(store.backend().read(TOKEN_KEY)?.as_deref(), Some("tok"));
        assert_eq!(store.backend().read(USERNAME_KEY)?.as_deref(), Some("ada"));
        let cached = store.backend().read(USER_KEY)?.unwrap_or_default();
        assert!(!cached.contains("Password"));

        let loaded = store.load()?;
        assert_eq!(loaded, Session::authenticated(&sample_user(), "tok"));
        Ok(())
    }

    #[test]
    fn clear_removes_every_key() -> Result<(), StoreError> {
        let store = SessionStore::new(MemoryBackend::new());
        store.save(&Session::authenticated(&sample_user(), "tok"))?;
        store.clear()?;
        assert!(store.backend().keys().is_empty());
        assert_eq!(store.load()?, Session::Anonymous);
        Ok(())
    }

    #[test]
    fn incomplete_or_corrupt_sessions_load_as_anonymous() -> Result<(), StoreError> {
        let backend = MemoryBackend::new();
        backend.write(TOKEN_KEY, "tok")?;
        assert_eq!(SessionStore::new(&backend).load()?, Session::Anonymous);

        backend.write(USER_KEY, "{not json")?;
        assert_eq!(SessionStore::new(&backend).load()?, Session::Anonymous);

        backend.write(USER_KEY, r#"{"Username":"ada"}"#)?;
        backend.write(TOKEN_KEY, "  ")?;
        assert_eq!(SessionStore::new(&backend).load()?, Session::Anonymous);
        Ok(())
    }

    #[test]
    fn saving_anonymous_clears() -> Result<(), StoreError> {
        let store = SessionStore::new(MemoryBackend::new());
        store.save(&Session::authenticated(&sample_user(), "tok"))?;
        store.save(&Session::Anonymous)?;
        assert!(store.backend().keys().is_empty());
        Ok(())
    }

    #[test]
    fn file_backend_round_trips_through_disk() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("session.json");

        let store = SessionStore::new(FileBackend::new(&path));
        assert_eq!(store.load()?, Session::Anonymous);
        store.save(&Session::authenticated(&sample_user(), "tok"))?;
        assert!(path.exists());

        let reopened = SessionStore::new(FileBackend::new(&path));
        assert_eq!(reopened.load()?.token(), Some("tok"));

        reopened.clear()?;
        let raw: BTreeMap<String, String> = serde_json::from_slice(&std::fs::read(&path)?)?;
        assert!(raw.is_empty());
        Ok(())
    }

    #[test]
    fn file_backend_replaces_file_and_leaves_no_staging_files()
    -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"{\"stale\": \"entry\", \"token\": \"old\"}")?;

        let backend = FileBackend::new(&path);
        backend.write(TOKEN_KEY, "tok")?;
        assert_eq!(backend.read(TOKEN_KEY)?.as_deref(), Some("tok"));
        assert_eq!(backend.read("stale")?.as_deref(), Some("entry"));

        let names: Vec<_> = std::fs::read_dir(dir.path())?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect::<Result<_, _>>()?;
        assert_eq!(names, vec![std::ffi::OsString::from("session.json")]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn file_backend_keeps_the_token_owner_only() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        SessionStore::new(FileBackend::new(&path))
            .save(&Session::authenticated(&sample_user(), "tok"))?;

        let mode = std::fs::metadata(&path)?.permissions().mode();
        assert_eq!(mode & 0o077, 0);
        Ok(())
    }
}
