//! Admin product management handlers.
//!
//! Every mutating handler takes the [`RequireStaff`] extractor; callers
//! failing the guard are redirected to the product list before the handler
//! body runs, so the catalog is never touched.
//!
//! Deletion is two-phase: GET returns a confirmation view of the product,
//! only POST performs the deletion.

use axum::{
    Form, Json,
    extract::{Path, State},
    response::Redirect,
};
use tracing::instrument;

use clementine_core::ProductId;

use crate::error::{AppError, Result};
use crate::forms::ProductForm;
use crate::middleware::RequireStaff;
use crate::models::Product;
use crate::state::AppState;

/// Create a product.
#[instrument(skip(state, form), fields(user = %staff.username))]
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let new = form.validate().map_err(AppError::Validation)?;
    let product = state.catalog().insert(new).await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok(Redirect::to("/products/"))
}

/// Update a product; 404 if absent.
#[instrument(skip(state, form), fields(user = %staff.username))]
pub async fn update(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    // 404 before validation: an absent record is not a form problem.
    if state.catalog().get(id).await?.is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    let new = form.validate().map_err(AppError::Validation)?;
    state
        .catalog()
        .update(id, new)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    tracing::info!(product_id = %id, "product updated");
    Ok(Redirect::to("/products/"))
}

/// Deletion confirmation view: the product that a POST would delete.
#[instrument(skip(state), fields(user = %staff.username))]
pub async fn confirm_delete(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = state
        .catalog()
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}

/// Delete a product; 404 if absent.
#[instrument(skip(state), fields(user = %staff.username))]
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<ProductId>,
) -> Result<Redirect> {
    if !state.catalog().delete(id).await? {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    tracing::info!(product_id = %id, "product deleted");
    Ok(Redirect::to("/products/"))
}
