//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::auth::AuthService;
use crate::store::{CatalogStore, MemoryCatalog, MemoryOrders, MemoryUsers, OrderStore, UserStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Stores are injected here (never reached
/// through globals), so tests and the binary can pick their own backings.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
    auth: AuthService,
}

impl AppState {
    /// Create application state over explicit stores.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Arc<dyn CatalogStore>,
        orders: Arc<dyn OrderStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                orders,
                auth: AuthService::new(users),
            }),
        }
    }

    /// Create application state backed entirely by in-memory stores.
    #[must_use]
    pub fn in_memory(config: StorefrontConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryCatalog::new()),
            Arc::new(MemoryOrders::new()),
            Arc::new(MemoryUsers::new()),
        )
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &dyn CatalogStore {
        self.inner.catalog.as_ref()
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &dyn OrderStore {
        self.inner.orders.as_ref()
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }
}
