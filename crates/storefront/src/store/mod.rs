//! Persistence seams for the storefront.
//!
//! Persistence mechanics are an external collaborator: the workflows only
//! see these traits, injected through
//! [`AppState`](crate::state::AppState) rather than reached through
//! ambient globals. The in-memory implementations in [`memory`] are the
//! default backing and the test harness.
//!
//! Each operation is atomic at the single-record level; no cross-record
//! transactions are offered or needed by the workflows.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use clementine_core::{OrderReference, ProductId};

use crate::models::{NewProduct, Order, Product, User};

pub use memory::{MemoryCatalog, MemoryOrders, MemoryUsers};

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The backing store failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persistence for [`Product`] records.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List all products.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Look up a product by ID. `Ok(None)` if absent.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Persist a new product, assigning its ID.
    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError>;

    /// Replace an existing product's data. `Ok(None)` if `id` is absent.
    async fn update(&self, id: ProductId, new: NewProduct)
    -> Result<Option<Product>, StoreError>;

    /// Delete a product. Returns `false` if `id` was absent.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;
}

/// Persistence for placed [`Order`]s, keyed by confirmation reference.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a placed order.
    async fn insert(&self, order: Order) -> Result<(), StoreError>;

    /// Look up an order by its confirmation reference.
    async fn get(&self, reference: OrderReference) -> Result<Option<Order>, StoreError>;
}

/// Persistence for [`User`] records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by login name.
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Create a user. Fails with [`StoreError::Conflict`] if the username
    /// is taken.
    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        is_staff: bool,
    ) -> Result<User, StoreError>;
}
