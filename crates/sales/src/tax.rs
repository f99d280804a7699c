//! Tax strategies.
//!
//! A strategy decides whether tax applies to an order and, if so, computes it.
//! The builder holds one as `Box<dyn TaxStrategy>` and can swap it at any time
//! before processing.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderengine_core::OrderError;

use crate::order::Order;

/// Pluggable tax policy.
pub trait TaxStrategy: core::fmt::Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Whether this strategy taxes the order. Must not mutate anything.
    fn applies(&self, order: &Order) -> bool;

    /// Compute the tax and store it on the order, replacing any earlier value.
    ///
    /// An order whose total overflows is left untouched; the builder refuses
    /// to process such orders before any strategy runs.
    fn calculate(&self, order: &mut Order);
}

/// Flat percentage of the order total, charged only above a threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRateTax {
    name: &'static str,
    rate: Decimal,
    threshold: Decimal,
}

impl FlatRateTax {
    /// Orders must total strictly more than this to be taxed.
    pub const DEFAULT_THRESHOLD: Decimal = Decimal::ONE_THOUSAND;

    /// 10% above the default threshold.
    pub fn standard() -> Self {
        Self {
            name: "standard",
            rate: Decimal::new(10, 2),
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    /// 15% above the default threshold.
    pub fn alternate() -> Self {
        Self {
            name: "alternate",
            rate: Decimal::new(15, 2),
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

}

impl Default for FlatRateTax {
    fn default() -> Self {
        Self::standard()
    }
}

impl TaxStrategy for FlatRateTax {
    fn name(&self) -> &str {
        self.name
    }

    fn applies(&self, order: &Order) -> bool {
        order.total().is_ok_and(|total| total > self.threshold)
    }

    fn calculate(&self, order: &mut Order) {
        let tax = order.total().ok().and_then(|total| total.checked_mul(self.rate));
        if let Some(tax) = tax {
            order.set_applicable_tax(tax);
        }
    }
}

/// Named selection of the built-in strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxStrategyKind {
    #[default]
    Standard,
    Alternate,
}

impl TaxStrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaxStrategyKind::Standard => "standard",
            TaxStrategyKind::Alternate => "alternate",
        }
    }

    pub fn into_strategy(self) -> Box<dyn TaxStrategy> {
        match self {
            TaxStrategyKind::Standard => Box::new(FlatRateTax::standard()),
            TaxStrategyKind::Alternate => Box::new(FlatRateTax::alternate()),
        }
    }
}

impl FromStr for TaxStrategyKind {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(TaxStrategyKind::Standard),
            "alternate" => Ok(TaxStrategyKind::Alternate),
            other => Err(OrderError::invalid_argument(format!(
                "unknown tax strategy: {other:?}"
            ))),
        }
    }
}
