//! Fluent order builder.
//!
//! ```ignore
//! let mut builder = OrderBuilder::initialize();
//! builder
//!     .with_customer(CustomerId(56789))
//!     .with_tax_strategy(FlatRateTax::alternate())
//!     .add_validator("positive_tax", |o: &Order| o.applicable_tax() > Decimal::ZERO)
//!     .add_line_item(LineItem::new(ProductId(123), 8, dec!(143))?)
//!     .process()?;
//! let order = builder.order();
//! ```
//!
//! Every configuration call mutates the builder in place and hands it back, so
//! a failed fallible call leaves everything registered so far untouched.

use std::borrow::Cow;

use orderengine_core::{OrderError, OrderResult};

use crate::line_item::LineItem;
use crate::order::{CustomerId, Order};
use crate::processor::OrderProcessor;
use crate::tax::{FlatRateTax, TaxStrategy};
use crate::validation::{Validator, ValidatorSet};

#[derive(Debug)]
pub struct OrderBuilder {
    order: Option<Order>,
    tax_strategy: Box<dyn TaxStrategy>,
    validators: ValidatorSet,
    processor: OrderProcessor,
}

impl OrderBuilder {
    /// Builder with an empty order, the standard tax strategy, the structural
    /// validator and a randomly seeded processor.
    pub fn initialize() -> Self {
        Self::initialize_with(OrderProcessor::default())
    }

    /// Like [`OrderBuilder::initialize`], with an injected processor.
    pub fn initialize_with(processor: OrderProcessor) -> Self {
        Self {
            order: Some(Order::default()),
            ..Self::empty_with(processor)
        }
    }

    /// Builder that holds no order yet. Processing it fails until an order is
    /// started by `with_customer` or `add_line_item`.
    pub fn empty() -> Self {
        Self::empty_with(OrderProcessor::default())
    }

    fn empty_with(processor: OrderProcessor) -> Self {
        Self {
            order: None,
            tax_strategy: Box::new(FlatRateTax::standard()),
            validators: ValidatorSet::with_defaults(),
            processor,
        }
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn into_order(self) -> Option<Order> {
        self.order
    }

    pub fn tax_strategy(&self) -> &dyn TaxStrategy {
        self.tax_strategy.as_ref()
    }

    pub fn validators(&self) -> &ValidatorSet {
        &self.validators
    }

    fn order_mut(&mut self) -> &mut Order {
        self.order.get_or_insert_with(Order::default)
    }

    pub fn with_customer(&mut self, customer_id: CustomerId) -> &mut Self {
        self.order_mut().set_customer(customer_id);
        self
    }

    pub fn add_line_item(&mut self, item: LineItem) -> &mut Self {
        self.order_mut().push_line_item(item);
        self
    }

    /// Replace the active tax strategy.
    pub fn with_tax_strategy(&mut self, strategy: impl TaxStrategy + 'static) -> &mut Self {
        self.tax_strategy = Box::new(strategy);
        self
    }

    /// Replace the active tax strategy with one that may be absent (e.g. the
    /// result of a lookup). An absent strategy is rejected and the current one
    /// is kept.
    pub fn try_with_tax_strategy(
        &mut self,
        strategy: Option<Box<dyn TaxStrategy>>,
    ) -> OrderResult<&mut Self> {
        let strategy =
            strategy.ok_or_else(|| OrderError::invalid_argument("tax strategy is required"))?;
        self.tax_strategy = strategy;
        Ok(self)
    }

    pub fn add_validator<F>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> &mut Self
    where
        F: Fn(&Order) -> bool + 'static,
    {
        self.validators.push(Validator::new(name, predicate));
        self
    }

    /// Register a validator that may be absent. An absent validator is rejected
    /// and the registered set is left as it was.
    pub fn try_add_validator(&mut self, validator: Option<Validator>) -> OrderResult<&mut Self> {
        let validator =
            validator.ok_or_else(|| OrderError::invalid_argument("validator is required"))?;
        self.validators.push(validator);
        Ok(self)
    }

    /// Apply tax, validate and, if valid, assign an order number.
    ///
    /// Fails with `InvalidOperation` when there is no order, when the order
    /// has already been processed, or when its total overflows. In every
    /// failing case the order is left as it was. A rejected order is not an error: it comes
    /// back with `is_valid == false` and no order number.
    pub fn process(&mut self) -> OrderResult<&mut Self> {
        let order = self
            .order
            .as_mut()
            .ok_or_else(|| OrderError::invalid_operation("processing not provided an order"))?;

        if order.is_processed() {
            return Err(OrderError::invalid_operation(format!(
                "order {} is already processed",
                order.order_number().map(|n| n.as_str()).unwrap_or_default()
            )));
        }

        let total = order.total()?;

        if self.tax_strategy.applies(order) {
            self.tax_strategy.calculate(order);
            tracing::debug!(
                strategy = self.tax_strategy.name(),
                total = %total,
                applicable_tax = %order.applicable_tax(),
                "tax applied"
            );
        }

        order.set_valid(true);
        let outcome = self.validators.evaluate(order);
        order.set_valid(outcome.is_valid());

        if order.is_valid() {
            self.processor.process(order);
            tracing::info!(
                customer_id = %order.customer_id(),
                order_number = order.order_number().map(|n| n.as_str()).unwrap_or_default(),
                lines = order.line_items().len(),
                "order processed"
            );
        } else {
            tracing::warn!(
                customer_id = %order.customer_id(),
                failed = ?outcome.failed(),
                evaluated = outcome.evaluated(),
                "order rejected by validation"
            );
        }

        Ok(self)
    }
}

impl Default for OrderBuilder {
    fn default() -> Self {
        Self::initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::ProductId;
    use crate::order::OrderStatus;
    use crate::order_number::OrderNumber;
    use crate::tax::TaxStrategyKind;
    use crate::validation;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn fixed_processor() -> OrderProcessor {
        OrderProcessor::new(|| OrderNumber::from_sequence(500))
    }

    fn line(product: u32, quantity: u32, price: Decimal) -> LineItem {
        LineItem::new(ProductId(product), quantity, price).unwrap()
    }

    #[test]
    fn initialize_seeds_empty_order_standard_tax_and_default_validator() {
        let builder = OrderBuilder::initialize();
        let order = builder.order().unwrap();

        assert!(order.line_items().is_empty());
        assert_eq!(builder.tax_strategy().name(), "standard");
        assert_eq!(builder.validators().names().collect::<Vec<_>>(), vec![validation::STRUCTURAL]);
    }

    #[test]
    fn process_without_order_is_invalid_operation() {
        let mut builder = OrderBuilder::empty();
        let err = builder.process().unwrap_err();
        match err {
            OrderError::InvalidOperation(msg) if msg.contains("not provided an order") => {}
            _ => panic!("Expected InvalidOperation when no order is present"),
        }
    }

    #[test]
    fn empty_builder_starts_an_order_on_first_line() {
        let mut builder = OrderBuilder::empty();
        builder.add_line_item(line(1, 1, dec!(5)));
        assert_eq!(builder.order().unwrap().line_items().len(), 1);
        assert!(builder.process().is_ok());
    }

    #[test]
    fn large_order_is_taxed_and_processed() {
        let mut builder = OrderBuilder::initialize_with(fixed_processor());
        builder
            .with_customer(CustomerId(56789))
            .with_tax_strategy(FlatRateTax::alternate())
            .add_validator("positive_tax", |o: &Order| o.applicable_tax() > Decimal::ZERO)
            .add_line_item(line(123, 8, dec!(143)))
            .add_line_item(line(456, 25, dec!(373)))
            .process()
            .unwrap();

        let order = builder.order().unwrap();
        assert_eq!(order.customer_id(), CustomerId(56789));
        assert_eq!(order.applicable_tax(), dec!(1570.35));
        assert!(order.is_valid());
        assert!(order.is_processed());
        assert_eq!(order.order_number().map(OrderNumber::as_str), Some("O500"));
    }

    #[test]
    fn failing_validator_rejects_order() {
        let mut builder = OrderBuilder::initialize_with(fixed_processor());
        builder
            .add_validator("positive_tax", |o: &Order| o.applicable_tax() > Decimal::ZERO)
            .add_line_item(line(1, 2, dec!(10)))
            .process()
            .unwrap();

        let order = builder.order().unwrap();
        assert_eq!(order.applicable_tax(), Decimal::ZERO);
        assert!(!order.is_valid());
        assert!(!order.is_processed());
        assert!(order.order_number().is_none());
        assert_eq!(order.status(), OrderStatus::Rejected);
    }

    #[test]
    fn rejected_order_can_be_processed_after_edits() {
        let mut builder = OrderBuilder::initialize_with(fixed_processor());
        builder
            .try_add_validator(validation::builtin(validation::HAS_LINE_ITEMS))
            .unwrap()
            .process()
            .unwrap();
        assert_eq!(builder.order().unwrap().status(), OrderStatus::Rejected);

        builder.add_line_item(line(1, 1, dec!(1))).process().unwrap();
        assert_eq!(builder.order().unwrap().status(), OrderStatus::Processed);
    }

    #[test]
    fn processing_twice_is_invalid_operation() {
        let mut builder = OrderBuilder::initialize_with(fixed_processor());
        builder.process().unwrap();

        let err = builder.process().unwrap_err();
        assert!(matches!(err, OrderError::InvalidOperation(ref msg) if msg.contains("O500")));
        assert_eq!(builder.order().unwrap().order_number().map(OrderNumber::as_str), Some("O500"));
    }

    #[test]
    fn overflowing_total_is_invalid_operation_and_leaves_order() {
        let mut builder = OrderBuilder::initialize_with(fixed_processor());
        builder
            .add_line_item(line(1, 1, Decimal::MAX))
            .add_line_item(line(2, 1, Decimal::MAX));

        let err = builder.process().unwrap_err();

        assert!(matches!(err, OrderError::InvalidOperation(ref msg) if msg.contains("overflows")));
        let order = builder.order().unwrap();
        assert_eq!(order.applicable_tax(), Decimal::ZERO);
        assert!(!order.is_processed());
        assert!(order.order_number().is_none());
    }

    #[test]
    fn validator_names_can_be_built_at_runtime() {
        let mut builder = OrderBuilder::initialize_with(fixed_processor());
        for limit in [10u32, 20] {
            builder.add_validator(format!("at_most_{limit}_lines"), move |o: &Order| {
                o.line_items().len() <= limit as usize
            });
        }

        assert_eq!(
            builder.validators().names().collect::<Vec<_>>(),
            vec![validation::STRUCTURAL, "at_most_10_lines", "at_most_20_lines"]
        );
        builder.process().unwrap();
        assert!(builder.order().unwrap().is_processed());
    }

    #[test]
    fn absent_validator_is_invalid_argument_and_leaves_state() {
        let mut builder = OrderBuilder::initialize();
        let before = builder.validators().len();

        let err = builder.try_add_validator(None).unwrap_err();

        assert!(matches!(err, OrderError::InvalidArgument(_)));
        assert_eq!(builder.validators().len(), before);
    }

    #[test]
    fn absent_strategy_is_invalid_argument_and_keeps_current() {
        let mut builder = OrderBuilder::initialize();
        builder.with_tax_strategy(FlatRateTax::alternate());

        let err = builder.try_with_tax_strategy(None).unwrap_err();

        assert!(matches!(err, OrderError::InvalidArgument(_)));
        assert_eq!(builder.tax_strategy().name(), "alternate");
    }

    #[test]
    fn last_strategy_wins() {
        let mut builder = OrderBuilder::initialize_with(fixed_processor());
        builder
            .add_line_item(line(1, 20, dec!(100)))
            .with_tax_strategy(FlatRateTax::alternate())
            .try_with_tax_strategy(Some(TaxStrategyKind::Standard.into_strategy()))
            .unwrap()
            .process()
            .unwrap();

        assert_eq!(builder.order().unwrap().applicable_tax(), dec!(200));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 300,
            ..ProptestConfig::default()
        })]

        /// Property: after processing, processed <=> valid <=> number assigned,
        /// and validity is the AND of every registered validator.
        #[test]
        fn processed_iff_valid(
            verdicts in prop::collection::vec(any::<bool>(), 0..6),
            lines in prop::collection::vec((0u32..40, 0i64..5_000), 0..4),
            seed in any::<u64>()
        ) {
            let mut builder = OrderBuilder::initialize_with(OrderProcessor::seeded(seed));
            for (quantity, cents) in &lines {
                builder.add_line_item(line(1, *quantity, Decimal::new(*cents, 2)));
            }
            for verdict in &verdicts {
                let verdict = *verdict;
                builder.add_validator("fixed", move |_: &Order| verdict);
            }

            builder.process().unwrap();
            let order = builder.order().unwrap();

            let expected_valid = verdicts.iter().all(|v| *v);
            prop_assert_eq!(order.is_valid(), expected_valid);
            prop_assert_eq!(order.is_processed(), order.is_valid());
            prop_assert_eq!(order.order_number().is_some(), order.is_processed());
        }
    }
}
