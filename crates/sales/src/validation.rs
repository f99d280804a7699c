//! Order validators.
//!
//! Validators are named predicates over an [`Order`]. A [`ValidatorSet`] runs
//! every one of them in registration order, even after one has failed, and
//! the order is valid only if all of them pass.

use std::borrow::Cow;

use rust_decimal::Decimal;

use crate::order::Order;

type Predicate = Box<dyn Fn(&Order) -> bool>;

/// A named predicate an order must satisfy to be processed.
pub struct Validator {
    name: Cow<'static, str>,
    predicate: Predicate,
}

impl Validator {
    pub fn new<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&Order) -> bool + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check(&self, order: &Order) -> bool {
        (self.predicate)(order)
    }

    /// Seeded into every builder.
    ///
    /// Checks that the order number and the processed flag agree.
    pub fn structural() -> Self {
        Self::new(STRUCTURAL, |order: &Order| {
            order.order_number().is_some() == order.is_processed()
        })
    }

    /// `applicable_tax > 0`.
    pub fn positive_tax() -> Self {
        Self::new(POSITIVE_TAX, |order: &Order| order.applicable_tax() > Decimal::ZERO)
    }

    /// At least one line item.
    pub fn has_line_items() -> Self {
        Self::new(HAS_LINE_ITEMS, |order: &Order| !order.line_items().is_empty())
    }
}

impl core::fmt::Debug for Validator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Validator").field("name", &self.name).finish_non_exhaustive()
    }
}

pub const STRUCTURAL: &str = "structural";
pub const POSITIVE_TAX: &str = "positive_tax";
pub const HAS_LINE_ITEMS: &str = "has_line_items";

/// Look up a built-in validator by name.
pub fn builtin(name: &str) -> Option<Validator> {
    match name.trim() {
        STRUCTURAL => Some(Validator::structural()),
        POSITIVE_TAX => Some(Validator::positive_tax()),
        HAS_LINE_ITEMS => Some(Validator::has_line_items()),
        _ => None,
    }
}

/// Result of running a [`ValidatorSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    evaluated: usize,
    failed: Vec<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of validators that ran.
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// Names of the validators that rejected the order, in registration order.
    pub fn failed(&self) -> &[String] {
        &self.failed
    }
}

/// Ordered collection of validators.
#[derive(Debug, Default)]
pub struct ValidatorSet {
    validators: Vec<Validator>,
}

impl ValidatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding only the structural validator.
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        set.push(Validator::structural());
        set
    }

    pub fn push(&mut self, validator: Validator) {
        self.validators.push(validator);
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.iter().map(Validator::name)
    }

    /// Run every validator against the order. Does not stop at the first failure.
    pub fn evaluate(&self, order: &Order) -> ValidationOutcome {
        self.validators
            .iter()
            .fold(ValidationOutcome::default(), |mut outcome, validator| {
                outcome.evaluated += 1;
                if !validator.check(order) {
                    outcome.failed.push(validator.name().to_string());
                }
                outcome
            })
    }
}
