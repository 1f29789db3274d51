//! Copper Cup Core - Shared types library.
//!
//! This crate provides common types used across the Copper Cup components:
//! - `storefront` - Public-facing menu and ordering service
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Money and price types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
