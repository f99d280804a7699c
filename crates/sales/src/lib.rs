//! Sales order engine.
//!
//! Deterministic domain logic for building, taxing, validating and processing
//! a single sales order (no IO, no storage). The [`OrderBuilder`] is the fluent
//! entry point; [`OrderProcessor`] serves callers that validate on their own.

pub mod builder;
pub mod line_item;
pub mod order;
pub mod order_number;
pub mod processor;
pub mod tax;
pub mod validation;

pub use builder::OrderBuilder;
pub use line_item::{LineItem, ProductId};
pub use order::{CustomerId, Order, OrderStatus};
pub use order_number::{OrderNumber, OrderNumberSource, RandomOrderNumbers};
pub use processor::OrderProcessor;
pub use tax::{FlatRateTax, TaxStrategy, TaxStrategyKind};
pub use validation::{ValidationOutcome, Validator, ValidatorSet};
