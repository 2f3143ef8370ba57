//! Session-related types.
//!
//! Types stored in the session: the logged-in identity and the cart.

use serde::{Deserialize, Serialize};

use clementine_core::UserId;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's ID in the identity store.
    pub id: UserId,
    /// Login name, for display.
    pub username: String,
    /// Whether the user passes the admin guard.
    pub is_staff: bool,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the cart (product ID -> quantity).
    pub const CART: &str = "cart";
}
