//! Order domain types.
//!
//! An order is written once at checkout submission and read back by the
//! confirmation view. There is no fulfilment state machine here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clementine_core::{OrderReference, Price, ProductId};

/// One line of a placed order.
///
/// Product data is denormalized at submission time so the confirmation view
/// shows what the customer actually paid, even if the product changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Decimal,
}

/// A placed order, keyed by its confirmation reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub reference: OrderReference,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}
