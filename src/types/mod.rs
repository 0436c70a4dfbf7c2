//! Core domain types for the resolution engine.
//!
//! This module contains the feature-state tree, the dependency-spec grammar,
//! and the caller-facing config object, designed to encode the wire shapes
//! via serde rather than ad-hoc duck typing.

pub mod config;
pub mod path;
pub mod spec;
pub mod state;

// Re-export commonly used types at the module level
pub use config::PreprocessConfig;
pub use path::FeaturePath;
pub use spec::{Condition, DependencySpec, DependencyValue, Descriptor};
pub use state::{FeatureMap, FeatureValue};
