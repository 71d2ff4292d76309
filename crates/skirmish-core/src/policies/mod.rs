//! Built-in policies.
//!
//! This module contains the stock implementations registered by
//! [`PolicyCatalog::default_catalog`](crate::policy::PolicyCatalog::default_catalog):
//!
//! - [`strategy`]: `standard`, `full_attack`, `cautious` and `support`
//! - [`targeting`]: `lowest_health`, `highest_health`, `random`,
//!   `highest_threat` and `protect_ally`

pub mod strategy;
pub mod targeting;

pub use strategy::{Cautious, FullAttack, Standard, Support};
pub use targeting::{HighestHealth, HighestThreat, LowestHealth, ProtectAlly, RandomTarget};
