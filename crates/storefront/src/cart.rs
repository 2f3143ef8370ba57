//! Cart manager.
//!
//! The cart is a session-stored mapping from string-encoded product ID to
//! quantity. Only identifiers are stored (not denormalized product data),
//! so a listing always reflects current catalog prices - at the cost of
//! failing outright when a product was deleted while still in a cart.
//!
//! Invariant: no stored quantity is ever <= 0. `update` with a
//! non-positive quantity removes the entry instead.
//!
//! Concurrent requests from the same session are last-write-wins; there is
//! no conflict detection (an accepted limitation, not a bug).

use std::collections::BTreeMap;

use serde::Serialize;
use tower_sessions::Session;

use clementine_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::{Product, session_keys};
use crate::store::CatalogStore;

/// Raw cart contents as stored in the session.
pub type CartContents = BTreeMap<String, u32>;

/// One cart entry resolved against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

/// Read the cart from the session. Missing cart reads as empty.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn contents(session: &Session) -> Result<CartContents> {
    Ok(session
        .get::<CartContents>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Write the cart back to the session.
async fn save(session: &Session, cart: &CartContents) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Add one unit of `product_id` to the cart.
///
/// Creates the entry at quantity 1 if absent, otherwise increments. No
/// existence check against the catalog happens here; stale entries are
/// caught at listing/checkout time.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn add(session: &Session, product_id: &str) -> Result<()> {
    let mut cart = contents(session).await?;
    *cart.entry(product_id.to_owned()).or_insert(0) += 1;
    save(session, &cart).await
}

/// Remove `product_id` from the cart. No-op if absent.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn remove(session: &Session, product_id: &str) -> Result<()> {
    let mut cart = contents(session).await?;
    if cart.remove(product_id).is_some() {
        save(session, &cart).await?;
    }
    Ok(())
}

/// Set the quantity for `product_id`.
///
/// If the entry is present and `quantity > 0`, sets it. If present and
/// `quantity <= 0`, removes it. If absent, no-op.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn update(session: &Session, product_id: &str, quantity: i64) -> Result<()> {
    let mut cart = contents(session).await?;
    if !cart.contains_key(product_id) {
        return Ok(());
    }
    if quantity > 0 {
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        cart.insert(product_id.to_owned(), quantity);
    } else {
        cart.remove(product_id);
    }
    save(session, &cart).await
}

/// Empty the cart (the key stays, holding an empty map).
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn clear(session: &Session) -> Result<()> {
    save(session, &CartContents::new()).await
}

/// Resolve every cart entry against the catalog.
///
/// This is a hard failure on stale entries: any key that no longer matches
/// an existing product fails the whole listing with `NotFound`.
///
/// # Errors
///
/// Returns `AppError::NotFound` for a stale entry, `AppError::Store` if
/// the catalog fails, `AppError::Session` if the session store fails.
pub async fn list(session: &Session, catalog: &dyn CatalogStore) -> Result<Vec<CartLine>> {
    let cart = contents(session).await?;
    resolve(&cart, catalog).await
}

/// Resolve already-read cart contents against the catalog.
pub(crate) async fn resolve(
    cart: &CartContents,
    catalog: &dyn CatalogStore,
) -> Result<Vec<CartLine>> {
    let mut lines = Vec::with_capacity(cart.len());
    for (key, &quantity) in cart {
        let product = lookup(key, catalog).await?;
        lines.push(CartLine { product, quantity });
    }
    Ok(lines)
}

/// Resolve one string-encoded product ID, treating an unparseable key the
/// same as a missing product.
async fn lookup(key: &str, catalog: &dyn CatalogStore) -> Result<Product> {
    let id = key
        .parse::<ProductId>()
        .map_err(|_| AppError::NotFound(format!("product {key}")))?;
    catalog
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {key}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use super::*;
    use crate::models::NewProduct;
    use crate::store::MemoryCatalog;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    async fn seeded_catalog() -> (MemoryCatalog, Product) {
        let catalog = MemoryCatalog::new();
        let product = catalog
            .insert(NewProduct {
                name: "Tea".to_owned(),
                price: "4.00".parse().unwrap(),
                description: "Loose leaf".to_owned(),
                image: crate::models::product::DEFAULT_IMAGE.to_owned(),
            })
            .await
            .unwrap();
        (catalog, product)
    }

    #[tokio::test]
    async fn test_add_twice_yields_quantity_two() {
        let session = session();
        cart_add_n(&session, "1", 2).await;
        let cart = contents(&session).await.unwrap();
        assert_eq!(cart.get("1"), Some(&2));
    }

    async fn cart_add_n(session: &Session, id: &str, n: usize) {
        for _ in 0..n {
            add(session, id).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_remove_absent_key_is_noop() {
        let session = session();
        add(&session, "1").await.unwrap();
        remove(&session, "2").await.unwrap();
        let cart = contents(&session).await.unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("1"), Some(&1));
    }

    #[tokio::test]
    async fn test_update_sets_positive_quantity() {
        let session = session();
        add(&session, "1").await.unwrap();
        update(&session, "1", 5).await.unwrap();
        assert_eq!(contents(&session).await.unwrap().get("1"), Some(&5));
    }

    #[tokio::test]
    async fn test_update_zero_and_negative_remove_entry() {
        for quantity in [0, -1] {
            let session = session();
            add(&session, "1").await.unwrap();
            update(&session, "1", quantity).await.unwrap();
            assert!(contents(&session).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_update_absent_key_is_noop() {
        let session = session();
        update(&session, "9", 5).await.unwrap();
        assert!(contents(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quantities_never_non_positive() {
        // Arbitrary operation sequence; the invariant holds throughout.
        let session = session();
        add(&session, "1").await.unwrap();
        add(&session, "2").await.unwrap();
        update(&session, "1", -3).await.unwrap();
        update(&session, "2", 4).await.unwrap();
        add(&session, "1").await.unwrap();
        update(&session, "3", 0).await.unwrap();
        let cart = contents(&session).await.unwrap();
        assert!(cart.values().all(|&q| q > 0));
        assert_eq!(cart.get("1"), Some(&1));
        assert_eq!(cart.get("2"), Some(&4));
    }

    #[tokio::test]
    async fn test_clear_leaves_empty_cart() {
        let session = session();
        add(&session, "1").await.unwrap();
        clear(&session).await.unwrap();
        assert!(contents(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_resolves_products() {
        let (catalog, product) = seeded_catalog().await;
        let session = session();
        add(&session, &product.id.to_string()).await.unwrap();
        add(&session, &product.id.to_string()).await.unwrap();

        let lines = list(&session, &catalog).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product, product);
        assert_eq!(lines[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_list_fails_on_deleted_product() {
        let (catalog, product) = seeded_catalog().await;
        let session = session();
        add(&session, &product.id.to_string()).await.unwrap();
        catalog.delete(product.id).await.unwrap();

        let err = list(&session, &catalog).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_fails_on_unparseable_key() {
        let (catalog, _) = seeded_catalog().await;
        let session = session();
        add(&session, "not-an-id").await.unwrap();

        let err = list(&session, &catalog).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_add_does_not_check_catalog() {
        let session = session();
        // No catalog involved at all; add always succeeds.
        add(&session, "12345").await.unwrap();
        assert_eq!(contents(&session).await.unwrap().get("12345"), Some(&1));
    }
}
