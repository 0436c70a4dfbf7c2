//! Feature-dependency resolution and deterministic ordering for preprocess
//! configuration maps.
//!
//! Given a sparse map of enabled feature flags and a declarative dependency
//! specification (dotted paths, conditional descriptors, grouped
//! alternatives), this crate auto-enables every feature required by an
//! already-enabled feature — copying the demanded granularity of default
//! value from a donor config — and produces a dependency-first ordering of
//! the active top-level features.

pub mod engine;
pub mod graph;
pub mod types;

pub use engine::{init, merge, EngineError};
pub use graph::{OrderError, Resolution, ResolveError};
pub use types::{DependencySpec, FeatureMap, FeaturePath, FeatureValue, PreprocessConfig};
