//! Error types for combat construction.
//!
//! Only configuration problems are errors. Everything that can happen once a
//! combat is running (no target, an unavailable action, both teams falling)
//! is a normal outcome and shows up in the action log instead.

use thiserror::Error;

use crate::entity::TeamSide;

/// Reasons a combat refuses to start.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A team was given without actors.
    #[error("{side} has no actors")]
    EmptyTeam {
        /// The empty side.
        side: TeamSide,
    },

    /// Initiative DC below zero.
    #[error("initiative DC must be non-negative, got {0}")]
    NegativeInitiativeDc(i32),

    /// A round cap of zero would never let a round run.
    #[error("max_rounds must be at least 1, got {0}")]
    InvalidMaxRounds(u32),

    /// Rule constants that break the turn loop.
    #[error("invalid rule constants: {0}")]
    InvalidRules(String),

    /// An actor references a strategy id the catalog does not know.
    #[error("actor '{actor}' uses unknown strategy '{strategy}'")]
    UnknownStrategy {
        /// Actor name.
        actor: String,
        /// Unresolved strategy id.
        strategy: String,
    },

    /// An actor references a targeting id the catalog does not know.
    #[error("actor '{actor}' uses unknown targeting '{targeting}'")]
    UnknownTargeting {
        /// Actor name.
        actor: String,
        /// Unresolved targeting id.
        targeting: String,
    },

    /// A template failed validation.
    #[error("actor '{actor}' is invalid: {reason}")]
    InvalidActor {
        /// Actor name.
        actor: String,
        /// What failed.
        reason: String,
    },

    /// A scenario document could not be parsed.
    #[error("scenario: {0}")]
    Scenario(String),
}

/// Result type for combat construction.
pub type Result<T> = std::result::Result<T, ConfigError>;
