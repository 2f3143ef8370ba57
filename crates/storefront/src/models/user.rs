//! User domain types.
//!
//! Users are owned by the identity service; the rest of the storefront only
//! reads the session-stored [`super::CurrentUser`].

use chrono::{DateTime, Utc};

use clementine_core::UserId;

/// A storefront user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name (unique).
    pub username: String,
    /// Argon2 hash of the user's password.
    pub password_hash: String,
    /// Whether the user may manage the product catalog.
    pub is_staff: bool,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
}
