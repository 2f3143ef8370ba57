//! Product form validation.
//!
//! Validation is explicit: a form either becomes a [`NewProduct`] or a list
//! of per-field errors for redisplay. Nothing is persisted on failure.

use serde::Deserialize;

use clementine_core::Price;

use crate::error::FieldError;
use crate::models::{NewProduct, product::DEFAULT_IMAGE};

/// Raw product form data, as submitted.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    /// Optional image reference; defaults to the sentinel path.
    pub image: Option<String>,
}

impl ProductForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns every field error at once (not just the first), so the
    /// whole form can be redisplayed.
    pub fn validate(self) -> Result<NewProduct, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "name must not be empty"));
        }

        let price = match self.price.parse::<Price>() {
            Ok(price) => Some(price),
            Err(e) => {
                errors.push(FieldError::new("price", e.to_string()));
                None
            }
        };

        let description = self.description.trim();
        if description.is_empty() {
            errors.push(FieldError::new(
                "description",
                "description must not be empty",
            ));
        }

        let image = match self.image {
            Some(image) if !image.trim().is_empty() => image,
            _ => DEFAULT_IMAGE.to_owned(),
        };

        match (price, errors.is_empty()) {
            (Some(price), true) => Ok(NewProduct {
                name: name.to_owned(),
                price,
                description: description.to_owned(),
                image,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, price: &str, description: &str) -> ProductForm {
        ProductForm {
            name: name.to_owned(),
            price: price.to_owned(),
            description: description.to_owned(),
            image: None,
        }
    }

    #[test]
    fn test_valid_form() {
        let product = form("Tea", "4.50", "Loose leaf").validate().unwrap();
        assert_eq!(product.name, "Tea");
        assert_eq!(product.price, "4.50".parse().unwrap());
        assert_eq!(product.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_explicit_image_kept() {
        let mut raw = form("Tea", "4.50", "Loose leaf");
        raw.image = Some("products/tea.jpg".to_owned());
        let product = raw.validate().unwrap();
        assert_eq!(product.image, "products/tea.jpg");
    }

    #[test]
    fn test_non_numeric_price_names_the_field() {
        let errors = form("Tea", "cheap", "Loose leaf").validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn test_negative_price_rejected() {
        let errors = form("Tea", "-4.50", "Loose leaf").validate().unwrap_err();
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn test_all_errors_reported_at_once() {
        let errors = form("", "oops", " ").validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["name", "price", "description"]);
    }
}
