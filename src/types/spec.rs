//! The declarative dependency specification.
//!
//! Callers author the spec as plain data: for each feature, a list whose
//! elements are dotted path strings, `{condition, value}` objects, or nested
//! arrays of the same. The closed grammar below replaces the original
//! array-nesting bookkeeping with explicit variants.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::path::FeaturePath;

/// One dependency descriptor in a feature's dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Descriptor {
    /// An unconditional requirement on a feature or nested sub-option.
    Path(FeaturePath),

    /// A requirement that only applies while `condition` holds against the
    /// live feature state.
    Conditional {
        condition: Condition,
        value: DependencyValue,
    },

    /// A structural grouping of further descriptors. Grouping carries no
    /// semantics of its own; members are processed as if spliced into the
    /// surrounding list.
    Group(Vec<Descriptor>),
}

/// The gate on a conditional descriptor: one path, or any of several
/// alternatives (logical OR, short-circuit in list order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    Path(FeaturePath),
    AnyOf(Vec<FeaturePath>),
}

/// The payload of a conditional descriptor: a plain requirement path, or a
/// nested group evaluated with the usual rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DependencyValue {
    Path(FeaturePath),
    Group(Vec<Descriptor>),
}

/// Mapping from feature name to its dependency descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencySpec(pub IndexMap<String, Vec<Descriptor>>);

impl DependencySpec {
    pub fn new() -> Self {
        DependencySpec(IndexMap::new())
    }

    /// Iterates over `(feature, descriptors)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Descriptor>)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
