//! Session-aware facade over [`ApiClient`].
//!
//! # Design
//! - One instance per app boot; the UI shares it through `Rc`, the CLI owns it.
//! - The in-memory session sits behind a mutex that is never held across an await.
//! - Favourite writes are confirm-then-apply: the cache changes only after the
//!   server acknowledged the write, and prefers the server's copy when echoed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use myflix_api_models::{
    Credentials, Director, Genre, Movie, MovieId, Registration, User, UserUpdate,
};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::profile::ProfileView;
use crate::session::{Session, SessionBackend, SessionStore};

/// Effect of [`Myflix::toggle_favourite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FavouriteChange {
    /// The movie was added to the favourites.
    Added,
    /// The movie was removed from the favourites.
    Removed,
}

/// API client bound to a persisted session.
#[derive(Debug)]
pub struct Myflix<B> {
    api: ApiClient,
    store: SessionStore<B>,
    session: Mutex<Session>,
}

impl<B: SessionBackend> Myflix<B> {
    /// Bind `api` to the session persisted in `backend`.
    ///
    /// # Errors
    /// Returns [`ApiError::Storage`] when the backend cannot be read.
    pub fn new(api: ApiClient, backend: B) -> Result<Self, ApiError> {
        let store = SessionStore::new(backend);
        let session = store.load()?;
        Ok(Self {
            api,
            store,
            session: Mutex::new(session),
        })
    }

    /// Underlying HTTP client.
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Session persistence layer.
    pub const fn store(&self) -> &SessionStore<B> {
        &self.store
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.lock().clone()
    }

    /// Whether a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_authenticated()
    }

    /// Create an account. Does not log in.
    ///
    /// # Errors
    /// Returns [`ApiError`] when the request fails or is rejected.
    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let user = self.api.register(registration).await?;
        tracing::info!(username = %user.username, "account registered");
        Ok(user.without_password())
    }

    /// Log in and persist `user`, `token` and `Username`.
    ///
    /// # Errors
    /// Returns [`ApiError`] when the request fails or the session cannot be stored.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let response = self.api.login(credentials).await?;
        let session = Session::authenticated(&response.user, response.token);
        self.store.save(&session)?;
        *self.lock() = session;
        tracing::info!(username = %response.user.username, "logged in");
        Ok(response.user.without_password())
    }

    /// Forget the session locally.
    ///
    /// # Errors
    /// Returns [`ApiError::Storage`] when the persisted keys cannot be removed;
    /// the in-memory session is anonymous either way.
    pub fn logout(&self) -> Result<(), ApiError> {
        *self.lock() = Session::Anonymous;
        self.store.clear()?;
        Ok(())
    }

    /// Full catalog.
    ///
    /// # Errors
    /// Returns [`ApiError::NotAuthenticated`] without a session, otherwise any request failure.
    pub async fn movies(&self) -> Result<Vec<Movie>, ApiError> {
        let token = self.token()?;
        self.api.movies(&token).await
    }

    /// One movie by title.
    ///
    /// # Errors
    /// Returns [`ApiError::NotAuthenticated`] without a session, otherwise any request failure.
    pub async fn movie(&self, title: &str) -> Result<Movie, ApiError> {
        let token = self.token()?;
        self.api.movie(&token, title).await
    }

    /// Director details by name.
    ///
    /// # Errors
    /// Returns [`ApiError::NotAuthenticated`] without a session, otherwise any request failure.
    pub async fn director(&self, name: &str) -> Result<Director, ApiError> {
        let token = self.token()?;
        self.api.director(&token, name).await
    }

    /// Genre details by name.
    ///
    /// # Errors
    /// Returns [`ApiError::NotAuthenticated`] without a session, otherwise any request failure.
    pub async fn genre(&self, name: &str) -> Result<Genre, ApiError> {
        let token = self.token()?;
        self.api.genre(&token, name).await
    }

    /// Fetch the logged-in account and refresh the cached copy with it.
    ///
    /// # Errors
    /// Returns [`ApiError::NotAuthenticated`] without a session, otherwise any
    /// request or storage failure.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let (token, username) = self.identity()?;
        let user = self.api.user(&token, &username).await?;
        let fresh = user.without_password();
        self.apply_to_cached_user(&username, |cached| *cached = fresh)?;
        Ok(user.without_password())
    }

    /// Server-side favourites of the logged-in account.
    ///
    /// # Errors
    /// Same as [`Self::current_user`].
    pub async fn favourites(&self) -> Result<Vec<MovieId>, ApiError> {
        Ok(self.current_user().await?.favourite_movies)
    }

    /// Whether `movie_id` is in the cached favourites. Never touches the network.
    pub fn is_favourite(&self, movie_id: &str) -> bool {
        self.lock().is_favourite(movie_id)
    }

    /// Add `movie_id` to the favourites once the server confirms.
    ///
    /// # Errors
    /// Returns [`ApiError`] when not logged in or the write fails; the cache is
    /// left untouched in that case.
    pub async fn add_favourite(&self, movie_id: &str) -> Result<(), ApiError> {
        let (token, username) = self.identity()?;
        let echoed = self.api.add_favourite(&token, &username, movie_id).await?;
        self.apply_to_cached_user(&username, |cached| match echoed {
            Some(server) => *cached = server.without_password(),
            None => {
                if !cached.has_favourite(movie_id) {
                    cached.favourite_movies.push(movie_id.to_string());
                }
            }
        })?;
        tracing::info!(movie_id, "favourite added");
        Ok(())
    }

    /// Remove `movie_id` from the favourites once the server confirms.
    ///
    /// # Errors
    /// Returns [`ApiError`] when not logged in or the write fails; the cache is
    /// left untouched in that case.
    pub async fn remove_favourite(&self, movie_id: &str) -> Result<(), ApiError> {
        let (token, username) = self.identity()?;
        let echoed = self
            .api
            .remove_favourite(&token, &username, movie_id)
            .await?;
        self.apply_to_cached_user(&username, |cached| match echoed {
            Some(server) => *cached = server.without_password(),
            None => cached.favourite_movies.retain(|id| id != movie_id),
        })?;
        tracing::info!(movie_id, "favourite removed");
        Ok(())
    }

    /// Remove `movie_id` when it is a favourite, add it otherwise.
    ///
    /// # Errors
    /// Same as [`Self::add_favourite`] / [`Self::remove_favourite`].
    pub async fn toggle_favourite(&self, movie_id: &str) -> Result<FavouriteChange, ApiError> {
        if self.is_favourite(movie_id) {
            self.remove_favourite(movie_id).await?;
            Ok(FavouriteChange::Removed)
        } else {
            self.add_favourite(movie_id).await?;
            Ok(FavouriteChange::Added)
        }
    }

    /// Write the editable profile fields and cache the server's answer.
    ///
    /// # Errors
    /// Returns [`ApiError`] when not logged in, the write fails or the cache
    /// cannot be stored.
    pub async fn update_user(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let (token, username) = self.identity()?;
        let user = self.api.update_user(&token, &username, update).await?;
        let fresh = user.without_password();
        self.apply_to_cached_user(&username, |cached| *cached = fresh)?;
        tracing::info!(username = %user.username, "profile updated");
        Ok(user.without_password())
    }

    /// Delete the account and clear the session.
    ///
    /// The session is cleared whether or not the server accepted the deletion,
    /// so callers must report a returned error: the account may still exist.
    ///
    /// # Errors
    /// Returns the deletion failure, or a storage failure while clearing.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let outcome = match self.identity() {
            Ok((token, username)) => self.api.delete_user(&token, &username).await,
            Err(err) => Err(err),
        };
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "account deletion failed; clearing local session anyway");
        }
        let cleared = self.logout();
        outcome.and(cleared)
    }

    /// Fetch the account, then the catalog, and join them.
    ///
    /// # Errors
    /// Returns the first failing request.
    pub async fn load_profile(&self) -> Result<ProfileView, ApiError> {
        let user = self.current_user().await?;
        let catalog = self.movies().await?;
        Ok(ProfileView::new(user, &catalog))
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn token(&self) -> Result<String, ApiError> {
        self.lock()
            .token()
            .map(str::to_string)
            .ok_or(ApiError::NotAuthenticated)
    }

    fn identity(&self) -> Result<(String, String), ApiError> {
        let session = self.lock();
        match (session.token(), session.username()) {
            (Some(token), Some(username)) => Ok((token.to_string(), username.to_string())),
            _ => Err(ApiError::NotAuthenticated),
        }
    }

    /// Mutate and persist the cached user if `username` is still logged in.
    fn apply_to_cached_user(
        &self,
        username: &str,
        update: impl FnOnce(&mut User),
    ) -> Result<(), ApiError> {
        let mut session = self.lock();
        let Session::Authenticated(auth) = &mut *session else {
            tracing::debug!(username, "session ended before the response arrived");
            return Ok(());
        };
        if auth.user.username != username {
            tracing::debug!(username, "session changed before the response arrived");
            return Ok(());
        }
        let mut user = auth.user.clone();
        update(&mut user);
        self.store.save_user(&user)?;
        auth.user = user;
        Ok(())
    }
}
