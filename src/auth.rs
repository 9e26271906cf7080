//! Authentication gate
//!
//! The authentication token and username live in durable storage. The gate
//! never caches them: every call re-reads storage, so a login or logout in
//! another part of the application is seen by the next gated action.
//!
//! Callers take an `AuthContext` snapshot at the moment an action is invoked
//! and hand it to the update loop inside the action message.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use thiserror::Error;

use crate::services::{LoginRequest, RegisterRequest, RemoteServices, ServiceError};
use crate::storage::KeyValueStore;

/// Durable storage key for the authentication token
pub const TOKEN_KEY: &str = "token";
/// Durable storage key for the signed-in username
pub const USERNAME_KEY: &str = "username";

const GENERIC_SERVER_ERROR: &str = "Server error, please try again.";
const INVALID_CREDENTIALS: &str = "Invalid credentials!";
const MIN_PASSWORD_LEN: usize = 8;

/// Snapshot of the caller's identity at invocation time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    token: Option<String>,
    username: Option<String>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, username: Option<String>) -> Self {
        Self {
            token: Some(token.into()),
            username,
        }
    }

    /// A non-empty token is the sole authorization check
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Form input rejected before any request is made
    #[error("{0}")]
    Invalid(String),

    /// The backend refused the request
    #[error("{0}")]
    Rejected(String),

    /// Credentials could not be stored locally
    #[error("failed to store credentials: {0}")]
    Storage(String),
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$")
            .expect("email pattern is valid")
    })
}

fn username_pattern() -> &'static Regex {
    static USERNAME: OnceLock<Regex> = OnceLock::new();
    USERNAME.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_.-]{5,30}$").expect("username pattern is valid"))
}

fn validate_email(email: &str) -> Result<(), AuthError> {
    if !email_pattern().is_match(email) {
        return Err(AuthError::Invalid("Invalid email format".to_string()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Invalid(
            "Password must be at least 8 characters long".to_string(),
        ));
    }
    Ok(())
}

/// Check a login form before submitting it
pub fn validate_login(email: &str, password: &str) -> Result<(), AuthError> {
    validate_email(email)?;
    validate_password(password)
}

/// Check a registration form before submitting it
pub fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), AuthError> {
    validate_email(email)?;
    if !username_pattern().is_match(username) {
        return Err(AuthError::Invalid(
            "Username must be 5-30 characters and contain only letters, numbers, '.', '_' or '-'"
                .to_string(),
        ));
    }
    validate_password(password)
}

/// Reads and writes the durable credential pair
#[derive(Clone)]
pub struct AuthGate {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

impl AuthGate {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to read {} from credential store: {}", key, e);
                None
            }
        }
    }

    /// Read the current identity from storage
    pub fn snapshot(&self) -> AuthContext {
        AuthContext {
            token: self.read(TOKEN_KEY),
            username: self.read(USERNAME_KEY),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    pub fn current_username(&self) -> Option<String> {
        self.read(USERNAME_KEY)
    }

    /// Store a credential pair issued by the backend
    pub fn sign_in(&self, token: &str, username: &str) -> Result<(), AuthError> {
        self.store
            .set(TOKEN_KEY, token)
            .and_then(|_| self.store.set(USERNAME_KEY, username))
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        tracing::info!("Signed in as {}", username);
        Ok(())
    }

    /// Forget the stored credentials
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.store
            .remove(TOKEN_KEY)
            .and_then(|_| self.store.remove(USERNAME_KEY))
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Validate, submit and store a login
    pub async fn login(
        &self,
        services: &dyn RemoteServices,
        email: &str,
        password: &str,
    ) -> Result<AuthContext, AuthError> {
        validate_login(email, password)?;

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = services.login(&request).await.map_err(|e| match e {
            ServiceError::Rejected { .. } => AuthError::Rejected(INVALID_CREDENTIALS.to_string()),
            ServiceError::Transport(detail) => {
                tracing::debug!("Login transport failure: {}", detail);
                AuthError::Rejected(GENERIC_SERVER_ERROR.to_string())
            }
        })?;

        self.sign_in(&response.token, &response.username)?;
        Ok(self.snapshot())
    }

    /// Validate and submit a registration
    ///
    /// Registration does not sign the user in; the caller sends them to the
    /// login page afterwards.
    pub async fn register(
        &self,
        services: &dyn RemoteServices,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        validate_registration(username, email, password)?;

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        services.register(&request).await.map_err(|e| match e {
            ServiceError::Rejected {
                message: Some(msg), ..
            } => AuthError::Rejected(msg),
            ServiceError::Rejected { message: None, .. } => {
                AuthError::Rejected(GENERIC_SERVER_ERROR.to_string())
            }
            ServiceError::Transport(detail) => {
                tracing::debug!("Register transport failure: {}", detail);
                AuthError::Rejected(GENERIC_SERVER_ERROR.to_string())
            }
        })?;

        tracing::info!("Registered {}", username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn gate() -> AuthGate {
        AuthGate::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_anonymous_without_token() {
        let gate = gate();
        assert!(!gate.is_authenticated());
        assert_eq!(gate.current_username(), None);
        assert_eq!(gate.snapshot(), AuthContext::anonymous());
    }

    #[test]
    fn test_sign_in_and_out() {
        let gate = gate();
        gate.sign_in("tok", "alice").unwrap();
        assert!(gate.is_authenticated());
        assert_eq!(gate.current_username().as_deref(), Some("alice"));

        gate.sign_out().unwrap();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_snapshot_rereads_storage() {
        let store = Arc::new(MemoryStore::new());
        let gate = AuthGate::new(store.clone());
        assert!(!gate.snapshot().is_authenticated());

        store.set(TOKEN_KEY, "external-login").unwrap();
        assert!(gate.snapshot().is_authenticated());
    }

    #[test]
    fn test_empty_token_is_anonymous() {
        let ctx = AuthContext::authenticated("", None);
        assert!(!ctx.is_authenticated());
    }

    #[test]
    fn test_validate_login() {
        assert!(validate_login("a@b.co", "password1").is_ok());
        assert_eq!(
            validate_login("not-an-email", "password1"),
            Err(AuthError::Invalid("Invalid email format".to_string()))
        );
        assert_eq!(
            validate_login("a@b.co", "short"),
            Err(AuthError::Invalid(
                "Password must be at least 8 characters long".to_string()
            ))
        );
    }

    #[test]
    fn test_validate_registration_username() {
        assert!(validate_registration("alice_1", "a@b.co", "password1").is_ok());
        assert!(validate_registration("bob", "a@b.co", "password1").is_err());
        assert!(validate_registration("has space", "a@b.co", "password1").is_err());
        assert!(validate_registration(&"x".repeat(31), "a@b.co", "password1").is_err());
    }
}
