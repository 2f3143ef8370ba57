//! Checkout route handlers.

use axum::{
    Json,
    extract::{Path, State},
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;

use clementine_core::OrderReference;

use crate::checkout;
use crate::error::Result;
use crate::models::Order;
use crate::state::AppState;

/// Checkout preview: resolved lines plus the order total.
#[instrument(skip(state, session))]
pub async fn preview(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<checkout::CheckoutPreview>> {
    let preview = checkout::preview(&session, state.catalog()).await?;
    Ok(Json(preview))
}

/// POST on the checkout page hands over to order placement.
///
/// 307 so the POST method is preserved across the redirect.
#[instrument]
pub async fn proceed() -> Redirect {
    Redirect::temporary("/place_order/")
}

/// Submit the order and redirect to its confirmation.
#[instrument(skip(state, session))]
pub async fn place_order(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let reference = checkout::submit(&session, state.catalog(), state.orders()).await?;
    Ok(Redirect::to(&format!("/order_confirmation/{reference}/")))
}

/// Confirmation content for a placed order; 404 on an unknown reference.
#[instrument(skip(state))]
pub async fn confirmation(
    State(state): State<AppState>,
    Path(reference): Path<OrderReference>,
) -> Result<Json<Order>> {
    let order = checkout::confirmation(state.orders(), reference).await?;
    Ok(Json(order))
}
