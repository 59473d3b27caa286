//! Session store: single source of truth for "who is logged in".
//!
//! [`Session`] owns the in-memory identity and is the only writer of the
//! three persisted keys; restore, login, and logout are its only mutators.
//! The gateway's silent token refresh never touches the identity; only
//! the access token changes on refresh.
//!
//! [`SessionContext`] wraps the store for the UI, mirroring the identity
//! into a reactive signal after every mutation so route guards and the
//! navbar always agree with the store.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::net::api;
use crate::net::gateway::{ApiError, Transport, error_message};
use crate::net::types::{LoginResponse, UserProfile};
use crate::storage::{ACCESS_TOKEN_KEY, KeyValueStorage, REFRESH_TOKEN_KEY, USER_DATA_KEY};

/// Authenticated session over persisted tokens and an in-memory identity.
///
/// A session is authenticated exactly when the in-memory identity is set;
/// persisted tokens without a readable identity do not count.
pub struct Session {
    storage: Rc<dyn KeyValueStorage>,
    transport: Rc<dyn Transport>,
    user: RefCell<Option<UserProfile>>,
}

impl Session {
    pub fn new(storage: Rc<dyn KeyValueStorage>, transport: Rc<dyn Transport>) -> Self {
        Self {
            storage,
            transport,
            user: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        self.user.borrow().clone()
    }

    /// Restore a persisted session at application start. No network call.
    ///
    /// Needs both a persisted access token and a readable serialized
    /// profile. A present token with missing or unreadable profile data is
    /// a broken session and purges all three keys; with no token at all,
    /// persisted state is left untouched.
    pub fn restore(&self) {
        let Some(_token) = self.storage.get(ACCESS_TOKEN_KEY) else {
            return;
        };
        match self
            .storage
            .get(USER_DATA_KEY)
            .map(|data| serde_json::from_str::<UserProfile>(&data))
        {
            Some(Ok(user)) => {
                *self.user.borrow_mut() = Some(user);
            }
            Some(Err(e)) => {
                log::warn!("persisted user data unreadable, discarding session: {e}");
                self.clear_persisted();
            }
            None => {
                self.clear_persisted();
            }
        }
    }

    /// Log in with the given credentials.
    ///
    /// On a response carrying tokens and a profile, persists all three
    /// keys and sets the in-memory identity. A response missing either
    /// leaves the session unauthenticated with nothing persisted; the raw
    /// envelope is returned either way so callers can inspect it.
    ///
    /// # Errors
    ///
    /// Propagates whatever the auth endpoint raised (invalid credentials
    /// arrive as a 400 status error).
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = api::login(self.transport.as_ref(), username, password).await?;

        if let (Some(tokens), Some(user)) = (&response.tokens, &response.user) {
            self.storage.set(ACCESS_TOKEN_KEY, &tokens.access);
            self.storage.set(REFRESH_TOKEN_KEY, &tokens.refresh);
            if let Ok(serialized) = serde_json::to_string(user) {
                self.storage.set(USER_DATA_KEY, &serialized);
            }
            *self.user.borrow_mut() = Some(user.clone());
        }

        Ok(response)
    }

    /// Log out: best-effort remote blacklist, unconditional local clear.
    ///
    /// A failing logout endpoint is logged and swallowed; the persisted
    /// keys and in-memory identity are always cleared so the old session
    /// cannot silently resume.
    pub async fn logout(&self) {
        if let Some(refresh) = self.storage.get(REFRESH_TOKEN_KEY) {
            if let Err(e) = api::logout(self.transport.as_ref(), &refresh).await {
                log::warn!("remote logout failed: {}", error_message(&e));
            }
        }
        self.clear_persisted();
        *self.user.borrow_mut() = None;
    }

    fn clear_persisted(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_DATA_KEY);
    }
}

/// Reactive mirror of the session for the component tree.
///
/// `loading` is true until the startup restore has run, so guards don't
/// redirect before the persisted session has been read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Application-scoped session handle provided via context at the app root.
///
/// The store itself is single-threaded (`Rc`), so it lives in a
/// local-storage arena slot; the handle stays `Copy` and can be captured
/// by any reactive closure.
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: StoredValue<Rc<Session>, LocalStorage>,
    pub state: RwSignal<SessionState>,
}

impl SessionContext {
    #[must_use]
    pub fn new(session: Rc<Session>) -> Self {
        Self {
            session: StoredValue::new_local(session),
            state: RwSignal::new(SessionState::default()),
        }
    }

    /// Restore the persisted session and publish the result.
    pub fn restore(&self) {
        let session = self.session.get_value();
        session.restore();
        self.publish(&session);
    }

    /// Log in and publish the resulting identity.
    ///
    /// # Errors
    ///
    /// Propagates the auth endpoint's error.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let session = self.session.get_value();
        let result = session.login(username, password).await;
        self.publish(&session);
        result
    }

    /// Log out and publish the cleared state.
    pub async fn logout(&self) {
        let session = self.session.get_value();
        session.logout().await;
        self.publish(&session);
    }

    fn publish(&self, session: &Session) {
        self.state.set(SessionState {
            user: session.current_user(),
            loading: false,
        });
    }
}

/// Get the session context. Panics outside the provider.
#[must_use]
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
