use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderengine_core::{OrderError, OrderResult};

use crate::line_item::LineItem;
use crate::order_number::OrderNumber;

/// Customer identifier the order is placed for.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u32);

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order lifecycle, derived from the processing flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Unprocessed,
    Processed,
    Rejected,
}

/// A sales order.
///
/// Serializes its fields in declaration order, which is the shape external
/// renderers rely on. `order_number` is present if and only if `is_processed`
/// is set; only [`OrderProcessor`](crate::OrderProcessor) sets either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    customer_id: CustomerId,
    line_items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    applicable_tax: Decimal,
    order_number: Option<OrderNumber>,
    is_processed: bool,
    is_valid: bool,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            customer_id: CustomerId::default(),
            line_items: Vec::new(),
            applicable_tax: Decimal::ZERO,
            order_number: None,
            is_processed: false,
            is_valid: true,
        }
    }
}

impl Order {
    /// Create an unprocessed order with the given lines.
    pub fn new(customer_id: CustomerId, line_items: Vec<LineItem>) -> Self {
        Self {
            customer_id,
            line_items,
            ..Self::default()
        }
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn applicable_tax(&self) -> Decimal {
        self.applicable_tax
    }

    pub fn order_number(&self) -> Option<&OrderNumber> {
        self.order_number.as_ref()
    }

    pub fn is_processed(&self) -> bool {
        self.is_processed
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn status(&self) -> OrderStatus {
        if self.is_processed {
            OrderStatus::Processed
        } else if !self.is_valid {
            OrderStatus::Rejected
        } else {
            OrderStatus::Unprocessed
        }
    }

    /// Sum of `quantity * unit_price` over all lines.
    ///
    /// Fails with `InvalidOperation` when the sum does not fit in a `Decimal`.
    pub fn total(&self) -> OrderResult<Decimal> {
        self.line_items.iter().try_fold(Decimal::ZERO, |total, item| {
            total.checked_add(item.line_total()?).ok_or_else(|| {
                OrderError::invalid_operation(format!(
                    "order total overflows for customer {}",
                    self.customer_id
                ))
            })
        })
    }

    pub fn set_customer(&mut self, customer_id: CustomerId) {
        self.customer_id = customer_id;
    }

    pub fn push_line_item(&mut self, item: LineItem) {
        self.line_items.push(item);
    }

    /// Overwrites any previously computed tax.
    pub fn set_applicable_tax(&mut self, tax: Decimal) {
        self.applicable_tax = tax;
    }

    pub(crate) fn set_valid(&mut self, valid: bool) {
        self.is_valid = valid;
    }

    pub(crate) fn mark_processed(&mut self, number: OrderNumber) {
        self.order_number = Some(number);
        self.is_processed = true;
    }
}
