//! In-memory store implementations.
//!
//! Backed by `RwLock`ed maps; IDs are assigned sequentially. Reads and
//! writes are atomic per record, which is all the workflows require.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use clementine_core::{OrderReference, ProductId, UserId};

use super::{CatalogStore, OrderStore, StoreError, UserStore};
use crate::models::{NewProduct, Order, Product, User};

/// In-memory catalog store.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    inner: RwLock<CatalogInner>,
}

#[derive(Debug, Default)]
struct CatalogInner {
    products: BTreeMap<ProductId, Product>,
    next_id: i64,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.products.values().cloned().collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.products.get(&id).cloned())
    }

    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = ProductId::new(inner.next_id);
        let product = new.into_product(id);
        inner.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        new: NewProduct,
    ) -> Result<Option<Product>, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.products.contains_key(&id) {
            return Ok(None);
        }
        let product = new.into_product(id);
        inner.products.insert(id, product.clone());
        Ok(Some(product))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.products.remove(&id).is_some())
    }
}

/// In-memory order store.
#[derive(Debug, Default)]
pub struct MemoryOrders {
    orders: RwLock<HashMap<OrderReference, Order>>,
}

impl MemoryOrders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrders {
    async fn insert(&self, order: Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().await;
        orders.insert(order.reference, order);
        Ok(())
    }

    async fn get(&self, reference: OrderReference) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders.get(&reference).cloned())
    }
}

/// In-memory user store.
#[derive(Debug, Default)]
pub struct MemoryUsers {
    inner: RwLock<UsersInner>,
}

#[derive(Debug, Default)]
struct UsersInner {
    users: HashMap<String, User>,
    next_id: i64,
}

impl MemoryUsers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(username).cloned())
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        is_staff: bool,
    ) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(username) {
            return Err(StoreError::Conflict("username already exists".to_owned()));
        }
        inner.next_id += 1;
        let user = User {
            id: UserId::new(inner.next_id),
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            is_staff,
            created_at: Utc::now(),
        };
        inner.users.insert(username.to_owned(), user.clone());
        Ok(user)
    }
}
