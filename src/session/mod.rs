//! Session State
//!
//! Holds the signed-in user and the two "current record" selectors. The
//! user is mirrored into a durable key-value entry so a reload keeps the
//! session.

pub mod storage;

#[cfg(feature = "native")]
pub use storage::FileStore;
pub use storage::{KeyValueStore, MemoryStore, SessionError, SessionResult};

use crate::store::{RecordId, RecordStore, User};

/// Durable key holding the JSON-serialized current user
pub const SESSION_KEY: &str = "medfiles_user";

/// Shared password accepted for every demo account
pub const SHARED_SECRET: &str = "teste123";

/// Why a sign-in attempt was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    UnknownEmail,
    WrongPassword,
}

/// Check credentials against the store.
///
/// Succeeds only if the e-mail belongs to a known user and the password
/// equals [`SHARED_SECRET`].
pub fn authenticate(store: &RecordStore, email: &str, password: &str) -> Result<User, AuthFailure> {
    let user = store
        .find_user_by_email(email)
        .ok_or(AuthFailure::UnknownEmail)?;
    if password != SHARED_SECRET {
        return Err(AuthFailure::WrongPassword);
    }
    Ok(user.clone())
}

/// Signed-in user plus current record selectors
#[derive(Debug)]
pub struct SessionState<S: KeyValueStore> {
    storage: S,
    user: Option<User>,
    current_prescription: Option<RecordId>,
    current_medication: Option<RecordId>,
}

impl<S: KeyValueStore> SessionState<S> {
    /// Empty session over the given backend. Call [`restore`](Self::restore)
    /// to pick up a persisted user.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            user: None,
            current_prescription: None,
            current_medication: None,
        }
    }

    /// Load the persisted user, if any.
    ///
    /// An unreadable entry, or a backend whose contents cannot be parsed,
    /// is dropped and treated as signed out.
    pub fn restore(&mut self) -> SessionResult<Option<&User>> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(raw) => raw,
            Err(SessionError::Serialization(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable session storage");
                self.storage.remove(SESSION_KEY)?;
                None
            }
            Err(e) => return Err(e),
        };
        self.user = match raw {
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable session entry");
                    self.storage.remove(SESSION_KEY)?;
                    None
                }
            },
            None => None,
        };
        Ok(self.user.as_ref())
    }

    /// Store the user in memory and in the durable entry
    pub fn sign_in(&mut self, user: User) -> SessionResult<()> {
        let json = serde_json::to_string(&user)?;
        self.storage.set(SESSION_KEY, &json)?;
        tracing::info!(email = %user.email, "User signed in");
        self.user = Some(user);
        Ok(())
    }

    /// Clear memory state and the durable entry
    pub fn sign_out(&mut self) -> SessionResult<()> {
        self.storage.remove(SESSION_KEY)?;
        if let Some(user) = self.user.take() {
            tracing::info!(email = %user.email, "User signed out");
        }
        self.current_prescription = None;
        self.current_medication = None;
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_prescription(&self) -> Option<RecordId> {
        self.current_prescription
    }

    pub fn set_current_prescription(&mut self, id: Option<RecordId>) {
        self.current_prescription = id;
    }

    pub fn current_medication(&self) -> Option<RecordId> {
        self.current_medication
    }

    pub fn set_current_medication(&mut self, id: Option<RecordId>) {
        self.current_medication = id;
    }

    /// Access the backend
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
