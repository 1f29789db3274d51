//! Core types for Copper Cup.

pub mod price;

pub use price::{DEFAULT_CURRENCY, Price};
