//! Cart route handlers.
//!
//! Thin HTTP shims over the [`cart`](crate::cart) manager. Mutations
//! answer with redirects (add returns to the catalog, the rest to the
//! cart view); the resolved listing is under `/get_cart/`.

use axum::{
    Form, Json,
    extract::State,
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart;
use crate::error::Result;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    /// Defaults to 1 when not supplied.
    pub quantity: Option<i64>,
}

/// Raw cart contents (product ID -> quantity), unresolved.
#[instrument(skip(session))]
pub async fn view(session: Session) -> Result<Json<cart::CartContents>> {
    let contents = cart::contents(&session).await?;
    Ok(Json(contents))
}

/// Add one unit of a product to the cart.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<AddToCartForm>) -> Result<Redirect> {
    cart::add(&session, &form.product_id).await?;
    Ok(Redirect::to("/products/"))
}

/// Remove a product from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    cart::remove(&session, &form.product_id).await?;
    Ok(Redirect::to("/cart/"))
}

/// Set a product's quantity in the cart.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    cart::update(&session, &form.product_id, form.quantity.unwrap_or(1)).await?;
    Ok(Redirect::to("/cart/"))
}

/// Cart resolved against the catalog; 404 on a stale entry.
#[instrument(skip(state, session))]
pub async fn resolved(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<cart::CartLine>>> {
    let lines = cart::list(&session, state.catalog()).await?;
    Ok(Json(lines))
}
