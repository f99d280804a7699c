//! `orderengine-core` — shared building blocks for the order engine.
//!
//! This crate contains **pure domain** primitives (no IO, no logging setup).

pub mod error;
pub mod value_object;

pub use error::{OrderError, OrderResult};
pub use value_object::ValueObject;
