//! HTTP route handlers for the storefront.
//!
//! Responses are structured JSON; page rendering is out of scope, so the
//! "view" endpoints return the data a renderer would be handed. Successful
//! POSTs answer with a `303 See Other` redirect, mirroring the classic
//! form-post flow.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Index
//!
//! # Products
//! GET  /products/                   - Product listing
//! GET  /product/{id}/               - Product detail (404 if absent)
//!
//! # Product management (staff only; non-staff are redirected away)
//! POST /product/create/             - Create product
//! POST /product/{id}/update/        - Update product (404 if absent)
//! GET  /product/{id}/delete/        - Deletion confirmation view
//! POST /product/{id}/delete/        - Perform deletion (404 if absent)
//!
//! # Cart
//! GET|POST /cart/                   - Raw cart contents
//! POST /add_to_cart/                - Add one unit (body: product_id)
//! POST /remove_from_cart/           - Remove entry (body: product_id)
//! POST /update_cart/                - Set quantity (body: product_id, quantity)
//! GET  /get_cart/                   - Cart resolved against the catalog
//!
//! # Checkout
//! GET  /checkout/                   - Preview with line and order totals
//! POST /checkout/                   - Redirect (307) to /place_order/
//! POST /place_order/                - Submit; redirect to confirmation
//! GET  /order_confirmation/{reference}/ - Confirmation content
//!
//! # Auth
//! POST /signup/                     - Create account and log in
//! POST /login/                      - Log in
//! POST /logout/                     - Log out
//! GET  /profile/                    - Current user (requires login)
//! GET  /is_logged_in/               - {"is_logged_in": bool}
//! ```

pub mod admin_products;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Index view.
async fn index() -> Json<Value> {
    Json(json!({ "name": "clementine", "status": "ok" }))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        // Product routes
        .route("/products/", get(products::list))
        .route("/product/{id}/", get(products::detail))
        // Product management (staff only)
        .route("/product/create/", post(admin_products::create))
        .route("/product/{id}/update/", post(admin_products::update))
        .route(
            "/product/{id}/delete/",
            get(admin_products::confirm_delete).post(admin_products::delete),
        )
        // Cart routes
        .route("/cart/", get(cart::view).post(cart::view))
        .route("/add_to_cart/", post(cart::add))
        .route("/remove_from_cart/", post(cart::remove))
        .route("/update_cart/", post(cart::update))
        .route("/get_cart/", get(cart::resolved))
        // Checkout routes
        .route(
            "/checkout/",
            get(checkout::preview).post(checkout::proceed),
        )
        .route("/place_order/", post(checkout::place_order))
        .route(
            "/order_confirmation/{reference}/",
            get(checkout::confirmation),
        )
        // Auth routes
        .route("/signup/", post(auth::signup))
        .route("/login/", post(auth::login))
        .route("/logout/", post(auth::logout))
        .route("/profile/", get(auth::profile))
        .route("/is_logged_in/", get(auth::is_logged_in))
}

/// Assemble the full application: routes, session layer, and state.
///
/// Used by both the binary and the integration tests.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes())
        .layer(create_session_layer())
        .with_state(state)
}
