//! # fuzzy-rule-engine
//!
//! Mamdani-style fuzzy inference for game AI and control logic.
//!
//! ## Overview
//!
//! A fuzzy system maps crisp inputs to crisp outputs through a fixed,
//! programmer-authored rule base:
//!
//! - **Membership**: Piecewise-linear shapes (singleton, triangle, trapezoid, shoulders)
//! - **Propositions**: AND / OR / hedge trees stored in an arena
//! - **Rules**: Antecedent → consequent couplings with max-accumulation
//! - **Variables**: Fuzzification plus mean-of-maximum and centroid defuzzification
//! - **System**: Variable registry and the fuzzify → fire → defuzzify cycle
//!
//! ## Quick Start
//!
//! ```rust
//! use fuzzy_rule_engine::prelude::*;
//!
//! # fn main() -> fuzzy_rule_engine::Result<()> {
//! let mut system = InferenceSystem::default();
//!
//! let temperature = system.add_variable("temperature")?;
//! let cold = temperature.add_trapezoid_set(-10.0, -10.0, 10.0, 20.0)?;
//! let hot = temperature.add_trapezoid_set(15.0, 25.0, 40.0, 40.0)?;
//!
//! let speed = system.add_variable("speed")?;
//! let low = speed.add_singleton_set(10.0)?;
//! let high = speed.add_singleton_set(90.0)?;
//!
//! let (if_cold, then_low) = (system.term(cold)?, system.term(low)?);
//! system.add_rule(if_cold, then_low)?;
//! let (if_hot, then_high) = (system.term(hot)?, system.term(high)?);
//! system.add_rule(if_hot, then_high)?;
//!
//! system.fuzzify("temperature", 17.5)?;
//! let fan = system.defuzzify_mean_max("speed")?;
//! assert!((fan - 50.0).abs() < 0.001);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod membership;
pub mod proposition;
pub mod rule;
pub mod system;
pub mod variable;

/// Error types for fuzzy inference operations
#[derive(Debug, thiserror::Error)]
pub enum FuzzyError {
    #[error("Variable id must not be empty")]
    EmptyVariableId,

    #[error("Variable already registered: {0}")]
    DuplicateVariable(String),

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Unknown set {index} on variable {variable}")]
    UnknownSet { variable: String, index: usize },

    #[error("Unknown proposition handle: {0}")]
    UnknownProposition(u32),

    #[error("Composite holds at most {max} terms, got {got}")]
    CompositeOverflow { max: usize, got: usize },

    #[error("Invalid membership shape: {0}")]
    InvalidShape(String),

    #[error("Centroid defuzzification requires at least one sample")]
    ZeroSampleCount,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for fuzzy inference operations
pub type Result<T> = std::result::Result<T, FuzzyError>;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{FuzzyError, Result};

    pub use crate::config::EngineConfig;

    pub use crate::membership::{MembershipFunction, Shape};

    pub use crate::proposition::{
        DomStore, Proposition, PropositionArena, PropositionId, SetRef, MAX_TERMS,
    };

    pub use crate::rule::Rule;

    pub use crate::variable::{Variable, VariableId};

    pub use crate::system::{InferenceSystem, VariableRegistry};
}
