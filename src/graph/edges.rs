//! Flattening the dependency specification into a directed edge list.
//!
//! One traversal serves both consumers: the resolver wants full dotted
//! targets so it can copy exactly the demanded sub-options, the orderer only
//! cares about top-level feature names. Only the emitted granularity differs.

use crate::types::{DependencySpec, DependencyValue, Descriptor, FeatureMap, FeaturePath};

use super::condition::condition_holds;

/// How much of a dependency target to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeGranularity {
    /// Emit the full dotted path as written in the spec.
    FullPath,
    /// Reduce every target to its first segment (top-level feature name).
    FirstLevel,
}

/// A directed dependency edge: `feature` requires `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub feature: String,
    pub target: FeaturePath,
}

impl Edge {
    pub fn new(feature: impl Into<String>, target: impl Into<FeaturePath>) -> Self {
        Edge {
            feature: feature.into(),
            target: target.into(),
        }
    }
}

/// Flattens the spec into a list of edges, in discovery order.
///
/// Conditional descriptors contribute edges only while their condition holds
/// against `state`; groups are spliced in place. Duplicate edges are
/// preserved — consumers must tolerate them.
pub fn extract_edges(
    spec: &DependencySpec,
    state: &FeatureMap,
    granularity: EdgeGranularity,
) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (feature, descriptors) in spec.iter() {
        collect(feature, descriptors, state, granularity, &mut edges);
    }
    edges
}

fn collect(
    feature: &str,
    descriptors: &[Descriptor],
    state: &FeatureMap,
    granularity: EdgeGranularity,
    edges: &mut Vec<Edge>,
) {
    for descriptor in descriptors {
        match descriptor {
            Descriptor::Path(path) => emit(feature, path, granularity, edges),
            Descriptor::Group(members) => collect(feature, members, state, granularity, edges),
            Descriptor::Conditional { condition, value } => {
                if condition_holds(condition, state) {
                    match value {
                        DependencyValue::Path(path) => emit(feature, path, granularity, edges),
                        DependencyValue::Group(members) => {
                            collect(feature, members, state, granularity, edges)
                        }
                    }
                }
            }
        }
    }
}

fn emit(feature: &str, path: &FeaturePath, granularity: EdgeGranularity, edges: &mut Vec<Edge>) {
    let target = match granularity {
        EdgeGranularity::FullPath => path.clone(),
        EdgeGranularity::FirstLevel => path.to_first_level(),
    };
    edges.push(Edge::new(feature, target));
}
