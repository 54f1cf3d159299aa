use thiserror::Error;

use crate::domain::{AuthSession, Credentials, SessionUser, UserRole};
use crate::ports::{AuthPort, PortError, SessionStorePort};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("please fill in {0}")]
    MissingField(&'static str),
    #[error("sign-in failed: {0}")]
    SignIn(String),
    #[error("session storage failed: {0}")]
    Storage(String),
}

/// Signed-in state of the app, persisted through a [`SessionStorePort`].
pub struct SessionContext<S: SessionStorePort> {
    store: S,
    current: Option<AuthSession>,
}

impl<S: SessionStorePort> SessionContext<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
        }
    }

    /// Loads a previously persisted session. A corrupt store leaves the context signed out.
    pub fn restore(store: S) -> Self {
        let current = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "could not restore session");
                None
            }
        };
        Self { store, current }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> Option<&AuthSession> {
        self.current.as_ref()
    }

    pub fn current_user(&self) -> Option<&SessionUser> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user()
            .is_some_and(|user| user.role == UserRole::Admin)
    }

    pub fn sign_in(&mut self, session: AuthSession) -> Result<(), SessionError> {
        self.store
            .save(&session)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        tracing::info!(user = %session.user.email, "signed in");
        self.current = Some(session);
        Ok(())
    }

    pub fn sign_out(&mut self) -> Result<(), SessionError> {
        self.current = None;
        self.store
            .clear()
            .map_err(|e| SessionError::Storage(e.to_string()))
    }

    pub fn login<A: AuthPort>(
        &mut self,
        auth: &A,
        credentials: &Credentials,
    ) -> Result<&SessionUser, SessionError> {
        validate_credentials(credentials)?;
        let session = auth
            .login(credentials)
            .map_err(|e| sign_in_error(&e))?;
        self.sign_in(session)?;
        self.current_user()
            .ok_or_else(|| SessionError::Storage("session vanished after sign-in".to_owned()))
    }
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), SessionError> {
    if credentials.email.trim().is_empty() {
        return Err(SessionError::MissingField("email"));
    }
    if credentials.password.is_empty() {
        return Err(SessionError::MissingField("password"));
    }
    Ok(())
}

/// Maps a failed login call to what the sign-in form shows. Bad credentials stay generic.
pub fn sign_in_error(error: &PortError) -> SessionError {
    let message = match error {
        PortError::Rejected(_) | PortError::NotFound(_) => "invalid email or password".to_owned(),
        other => other.user_message(),
    };
    SessionError::SignIn(message)
}
