//! Checkout workflow.
//!
//! Reads the cart, resolves it against the catalog, computes line totals
//! and the order total, and on submission persists an [`Order`] keyed by a
//! fresh confirmation reference and clears the cart.
//!
//! There is no atomicity between "compute total" and "clear cart": the
//! cart belongs to a single session and each request is handled
//! independently, so no external race is expected and none is guarded
//! against.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use tower_sessions::Session;

use clementine_core::OrderReference;

use crate::cart;
use crate::error::{AppError, Result};
use crate::models::{Order, OrderLine, Product};
use crate::store::{CatalogStore, OrderStore};

/// One resolved checkout line.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutLine {
    pub product: Product,
    pub quantity: u32,
    /// `price * quantity`.
    pub line_total: Decimal,
}

/// Resolved cart with totals, ready for display or submission.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutPreview {
    pub lines: Vec<CheckoutLine>,
    pub order_total: Decimal,
}

/// Resolve the cart into lines and totals without mutating anything.
///
/// # Errors
///
/// Returns `AppError::NotFound` if any cart entry references a product
/// that no longer exists.
pub async fn preview(session: &Session, catalog: &dyn CatalogStore) -> Result<CheckoutPreview> {
    let resolved = cart::list(session, catalog).await?;

    let lines: Vec<CheckoutLine> = resolved
        .into_iter()
        .map(|line| CheckoutLine {
            line_total: line.product.price.times(line.quantity),
            product: line.product,
            quantity: line.quantity,
        })
        .collect();

    let order_total = lines.iter().map(|line| line.line_total).sum();

    Ok(CheckoutPreview { lines, order_total })
}

/// Place the order.
///
/// Precondition: the cart is non-empty. On success the order is persisted
/// under a fresh confirmation reference and the cart is cleared.
///
/// # Errors
///
/// Returns `AppError::EmptyCart` if the cart is empty (the cart is left
/// unchanged) and `AppError::NotFound` under the same conditions as
/// [`preview`].
pub async fn submit(
    session: &Session,
    catalog: &dyn CatalogStore,
    orders: &dyn OrderStore,
) -> Result<OrderReference> {
    let contents = cart::contents(session).await?;
    if contents.is_empty() {
        return Err(AppError::EmptyCart);
    }

    // Re-resolve everything; a product deleted since the preview still
    // fails the submission.
    let resolved = cart::resolve(&contents, catalog).await?;

    let lines: Vec<OrderLine> = resolved
        .into_iter()
        .map(|line| OrderLine {
            product_id: line.product.id,
            name: line.product.name,
            quantity: line.quantity,
            unit_price: line.product.price,
            line_total: line.product.price.times(line.quantity),
        })
        .collect();
    let total = lines.iter().map(|line| line.line_total).sum();

    let reference = OrderReference::generate();
    orders
        .insert(Order {
            reference,
            lines,
            total,
            placed_at: Utc::now(),
        })
        .await?;

    cart::clear(session).await?;

    tracing::info!(%reference, %total, "order placed");
    Ok(reference)
}

/// Look up a placed order by its confirmation reference.
///
/// Confirmation content is derived from the order that was actually
/// submitted, never from sample data.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the reference is unknown.
pub async fn confirmation(orders: &dyn OrderStore, reference: OrderReference) -> Result<Order> {
    orders
        .get(reference)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {reference}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore, Session};

    use super::*;
    use crate::models::NewProduct;
    use crate::store::{MemoryCatalog, MemoryOrders};

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    async fn seed(catalog: &MemoryCatalog, name: &str, price: &str) -> Product {
        catalog
            .insert(NewProduct {
                name: name.to_owned(),
                price: price.parse().unwrap(),
                description: format!("{name} description"),
                image: crate::models::product::DEFAULT_IMAGE.to_owned(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_preview_totals() {
        // Cart {A: 2, B: 1} with price(A)=10.00, price(B)=20.00 -> 40.00.
        let catalog = MemoryCatalog::new();
        let a = seed(&catalog, "A", "10.00").await;
        let b = seed(&catalog, "B", "20.00").await;

        let session = session();
        cart::add(&session, &a.id.to_string()).await.unwrap();
        cart::add(&session, &a.id.to_string()).await.unwrap();
        cart::add(&session, &b.id.to_string()).await.unwrap();

        let preview = preview(&session, &catalog).await.unwrap();
        assert_eq!(preview.order_total, Decimal::new(4000, 2));
        let line_a = preview
            .lines
            .iter()
            .find(|line| line.product.id == a.id)
            .unwrap();
        assert_eq!(line_a.line_total, Decimal::new(2000, 2));
    }

    #[tokio::test]
    async fn test_preview_fails_on_stale_entry() {
        let catalog = MemoryCatalog::new();
        let a = seed(&catalog, "A", "10.00").await;

        let session = session();
        cart::add(&session, &a.id.to_string()).await.unwrap();
        catalog.delete(a.id).await.unwrap();

        let err = preview(&session, &catalog).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_submit_empty_cart_fails_and_leaves_cart_unchanged() {
        let catalog = MemoryCatalog::new();
        let orders = MemoryOrders::new();
        let session = session();

        let err = submit(&session, &catalog, &orders).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyCart));
        assert!(cart::contents(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_clears_cart_and_persists_order() {
        let catalog = MemoryCatalog::new();
        let orders = MemoryOrders::new();
        let a = seed(&catalog, "A", "10.00").await;

        let session = session();
        cart::add(&session, &a.id.to_string()).await.unwrap();
        cart::add(&session, &a.id.to_string()).await.unwrap();

        let reference = submit(&session, &catalog, &orders).await.unwrap();

        // Cart is cleared; subsequent listing is empty.
        assert!(cart::list(&session, &catalog).await.unwrap().is_empty());

        // Confirmation content is the submitted order, not sample data.
        let order = confirmation(&orders, reference).await.unwrap();
        assert_eq!(order.reference, reference);
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].name, "A");
        assert_eq!(order.lines[0].quantity, 2);
        assert_eq!(order.total, Decimal::new(2000, 2));
    }

    #[tokio::test]
    async fn test_submit_fails_on_stale_entry() {
        let catalog = MemoryCatalog::new();
        let orders = MemoryOrders::new();
        let a = seed(&catalog, "A", "10.00").await;

        let session = session();
        cart::add(&session, &a.id.to_string()).await.unwrap();
        catalog.delete(a.id).await.unwrap();

        let err = submit(&session, &catalog, &orders).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        // Failed submission does not clear the cart.
        assert_eq!(cart::contents(&session).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmation_unknown_reference() {
        let orders = MemoryOrders::new();
        let err = confirmation(&orders, OrderReference::generate())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
