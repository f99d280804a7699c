use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderengine_core::{OrderError, OrderResult, ValueObject};

/// Product identifier as carried on a line item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order line: product, quantity, unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    product_id: ProductId,
    quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    unit_price: Decimal,
}

impl ValueObject for LineItem {}

impl LineItem {
    /// Create a line item. The unit price must not be negative and
    /// `quantity * unit_price` must fit in a `Decimal`.
    pub fn new(product_id: ProductId, quantity: u32, unit_price: Decimal) -> OrderResult<Self> {
        if unit_price < Decimal::ZERO {
            return Err(OrderError::invalid_argument(format!(
                "unit_price must not be negative (product {product_id}, got {unit_price})"
            )));
        }

        let item = Self {
            product_id,
            quantity,
            unit_price,
        };
        item.line_total().map_err(|_| {
            OrderError::invalid_argument(format!(
                "line total overflows (product {product_id}, {quantity} x {unit_price})"
            ))
        })?;

        Ok(item)
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// `quantity * unit_price`.
    pub fn line_total(&self) -> OrderResult<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .ok_or_else(|| {
                OrderError::invalid_operation(format!(
                    "line total overflows for product {}",
                    self.product_id
                ))
            })
    }
}
