//! Order engine demo: builds a sample order through either the fluent builder
//! or the direct processor path and renders the result.

pub mod config;
pub mod render;

use anyhow::Context;
use rust_decimal::Decimal;

use orderengine_core::OrderError;
use orderengine_sales::{
    CustomerId, LineItem, Order, OrderBuilder, OrderProcessor, ProductId, TaxStrategy, Validator,
    validation,
};

pub use config::{ConfigError, DemoConfig, DemoMode};
pub use render::{OutputFormat, RenderError};

/// Build, process and render the sample order described by `config`.
pub fn run(config: &DemoConfig) -> anyhow::Result<String> {
    let order = match config.mode {
        DemoMode::Fluent => fluent_order(config)?,
        DemoMode::Direct => direct_order(config)?,
    };

    tracing::info!(
        mode = ?config.mode,
        status = ?order.status(),
        applicable_tax = %order.applicable_tax(),
        "demo order finalized"
    );

    render::render(&order, config.output).context("rendering order")
}

fn processor(config: &DemoConfig) -> OrderProcessor {
    match config.seed {
        Some(seed) => OrderProcessor::seeded(seed),
        None => OrderProcessor::default(),
    }
}

/// Customer 56789 ordering two large lines through the builder chain.
pub fn fluent_order(config: &DemoConfig) -> anyhow::Result<Order> {
    let mut builder = OrderBuilder::initialize_with(processor(config));
    builder
        .with_customer(CustomerId(56789))
        .try_with_tax_strategy(Some(config.tax_strategy().into_strategy()))?;

    for name in &config.validators {
        builder
            .try_add_validator(validation::builtin(name))
            .with_context(|| format!("unknown validator {name:?}"))?;
    }

    builder
        .add_line_item(LineItem::new(ProductId(123), 8, Decimal::from(143))?)
        .add_line_item(LineItem::new(ProductId(456), 25, Decimal::from(373))?)
        .process()?;

    builder
        .into_order()
        .ok_or_else(|| OrderError::invalid_operation("builder holds no order").into())
}

/// Customer 93834 built by hand: tax, structural check, then the processor.
pub fn direct_order(config: &DemoConfig) -> anyhow::Result<Order> {
    let mut order = Order::new(
        CustomerId(93834),
        vec![
            LineItem::new(ProductId(123), 252, Decimal::new(299, 2))?,
            LineItem::new(ProductId(234), 125, Decimal::new(399, 2))?,
        ],
    );

    let tax = config.tax_strategy().into_strategy();
    if tax.applies(&order) {
        tax.calculate(&mut order);
    }

    if Validator::structural().check(&order) {
        processor(config).process(&mut order);
    }

    Ok(order)
}
