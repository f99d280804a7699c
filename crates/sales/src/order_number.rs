//! Order number assignment.
//!
//! Numbers come from an injected [`OrderNumberSource`] so tests (and callers
//! that need reproducible output) can pin them with a seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use orderengine_core::ValueObject;

/// Leading character of every order number.
pub const ORDER_NUMBER_PREFIX: char = 'O';

/// Half-open range the numeric part is drawn from.
pub const ORDER_NUMBER_RANGE: core::ops::Range<u16> = 100..999;

/// Rendered order number, e.g. `O417`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl ValueObject for OrderNumber {}

impl OrderNumber {
    pub fn from_sequence(sequence: u16) -> Self {
        Self(format!("{ORDER_NUMBER_PREFIX}{sequence}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part, if the number was produced by [`OrderNumber::from_sequence`].
    pub fn sequence(&self) -> Option<u16> {
        self.0.strip_prefix(ORDER_NUMBER_PREFIX)?.parse().ok()
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Supplies order numbers to the processor.
pub trait OrderNumberSource {
    fn next_order_number(&mut self) -> OrderNumber;
}

impl<F> OrderNumberSource for F
where
    F: FnMut() -> OrderNumber,
{
    fn next_order_number(&mut self) -> OrderNumber {
        self()
    }
}

/// Draws the numeric part uniformly from [`ORDER_NUMBER_RANGE`].
#[derive(Debug, Clone)]
pub struct RandomOrderNumbers<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomOrderNumbers<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOrderNumbers<StdRng> {
    /// Deterministic sequence: the same seed always yields the same numbers.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> OrderNumberSource for RandomOrderNumbers<R> {
    fn next_order_number(&mut self) -> OrderNumber {
        OrderNumber::from_sequence(self.rng.random_range(ORDER_NUMBER_RANGE))
    }
}
