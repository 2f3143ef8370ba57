//! Product domain types.

use serde::{Deserialize, Serialize};

use clementine_core::{Price, ProductId};

/// Image path used when no product image was supplied.
pub const DEFAULT_IMAGE: &str = "products/default.jpg";

/// A catalog product.
///
/// Owned by the catalog store; created, updated, and deleted only through
/// the admin product workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned unique ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price (non-negative, fixed-point).
    pub price: Price,
    /// Long-form description.
    pub description: String,
    /// Image reference (path into the media store).
    pub image: String,
}

/// Validated product data, ready to be persisted.
///
/// Produced by form validation; the catalog store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image: String,
}

impl NewProduct {
    /// Attach a store-assigned ID, producing a full [`Product`].
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            image: self.image,
        }
    }
}
