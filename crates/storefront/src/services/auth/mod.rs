//! Authentication service.
//!
//! Owns signup and login against the injected user store. Password hashing
//! is delegated to argon2; the rest of the storefront only ever sees the
//! session-stored [`CurrentUser`](crate::models::CurrentUser).

mod error;

pub use error::AuthError;

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::models::User;
use crate::store::{StoreError, UserStore};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
pub struct AuthService {
    users: Arc<dyn UserStore>,
}

impl AuthService {
    /// Create a new authentication service over a user store.
    #[must_use]
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Sign up a new (non-staff) user and return the created record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` / `WeakPassword` /
    /// `PasswordMismatch` on validation failure and `UsernameTaken` if the
    /// name is already registered. Nothing is persisted on failure.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        password_confirm: &str,
    ) -> Result<User, AuthError> {
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch);
        }
        self.register(username, password, false).await
    }

    /// Register a user with an explicit staff flag.
    ///
    /// Used by signup and by the startup admin seed.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::signup`], minus the confirmation check.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        is_staff: bool,
    ) -> Result<User, AuthError> {
        validate_username(username)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(username, &password_hash, is_staff)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Store(other),
            })?;

        Ok(user)
    }

    /// Log in with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown
    /// or the password is wrong.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .get_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(user)
    }
}

/// Validate a username.
fn validate_username(username: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::InvalidUsername(
            "username must not be empty".to_owned(),
        ));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(AuthError::InvalidUsername(
            "username must not contain whitespace".to_owned(),
        ));
    }
    Ok(())
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password with argon2 and a fresh salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::Hash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(password_hash).map_err(|_| AuthError::Hash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryUsers;

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryUsers::new()))
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let auth = service();
        let user = auth
            .signup("amira", "correct horse", "correct horse")
            .await
            .unwrap();
        assert!(!user.is_staff);

        let logged_in = auth.login("amira", "correct horse").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let auth = service();
        auth.signup("amira", "correct horse", "correct horse")
            .await
            .unwrap();
        let err = auth.login("amira", "wrong horse!").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let auth = service();
        let err = auth.login("nobody", "whatever1").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_signup_duplicate_username() {
        let auth = service();
        auth.signup("amira", "correct horse", "correct horse")
            .await
            .unwrap();
        let err = auth
            .signup("amira", "other password", "other password")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UsernameTaken));
    }

    #[tokio::test]
    async fn test_signup_password_mismatch() {
        let auth = service();
        let err = auth
            .signup("amira", "correct horse", "wrong horse!")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_signup_short_password() {
        let auth = service();
        let err = auth.signup("amira", "short", "short").await.unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
    }

    #[tokio::test]
    async fn test_register_staff() {
        let auth = service();
        let user = auth.register("root", "long enough", true).await.unwrap();
        assert!(user.is_staff);
    }
}
