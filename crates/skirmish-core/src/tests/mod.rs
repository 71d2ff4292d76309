//! Crate-level tests that drive whole combats.
//!
//! # Test Structure
//!
//! - `determinism.rs`: same seed, same combat
//! - `integration.rs`: end-to-end combats and rule scenarios
//! - `properties.rs`: proptest properties of the damage pipeline and the driver
//! - `helpers.rs`: actor and combat factories

mod helpers;
mod integration;
mod properties;

pub use helpers::*;
