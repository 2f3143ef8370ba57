//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors from the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username/password combination is wrong.
    ///
    /// Deliberately indistinguishable between "no such user" and "wrong
    /// password".
    #[error("invalid login details")]
    InvalidCredentials,

    /// The username is already registered.
    #[error("username already taken")]
    UsernameTaken,

    /// The password does not meet requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// The two password fields did not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The username is empty or malformed.
    #[error("{0}")]
    InvalidUsername(String),

    /// The user store failed.
    #[error("user store error: {0}")]
    Store(#[from] StoreError),

    /// Password hashing failed.
    #[error("password hashing failed")]
    Hash,
}
