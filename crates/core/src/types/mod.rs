//! Core types for Clementine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod reference;

pub use id::*;
pub use price::{Price, PriceError};
pub use reference::OrderReference;
