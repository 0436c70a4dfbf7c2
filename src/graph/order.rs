//! Deterministic dependency-first ordering of active features.
//!
//! Kahn's algorithm over the active top-level feature names and the
//! first-level edge set, emitting dependencies before their dependents.
//! Ties break on the input order of the node list, so the result is stable
//! for a given state map.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::types::{DependencySpec, FeatureMap};

use super::edges::{extract_edges, EdgeGranularity};

/// Errors that can occur while ordering features.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The dependency edges form a cycle among active features. A false
    /// ordering would be worse than failing loudly.
    #[error("cyclic dependency among active features: {members:?}")]
    Cycle { members: Vec<String> },
}

/// Orders the given active top-level features so that every feature appears
/// after all features it depends on.
///
/// Edges are re-extracted at first-level granularity against the resolved
/// state, and only edges with both endpoints in `nodes` constrain the order;
/// references to inactive or unknown features are ignored. Duplicate edges
/// collapse to one constraint.
///
/// # Errors
///
/// `Cycle` if the constraining edges contain a cycle; the payload lists the
/// features that could not be ordered, in input order.
pub fn order_features(
    nodes: &[String],
    spec: &DependencySpec,
    state: &FeatureMap,
) -> Result<Vec<String>, OrderError> {
    let n = nodes.len();
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    // deps[a] = the distinct nodes a depends on.
    let mut deps: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    for edge in extract_edges(spec, state, EdgeGranularity::FirstLevel) {
        if let (Some(&from), Some(&to)) = (
            index.get(edge.feature.as_str()),
            index.get(edge.target.first()),
        ) {
            deps[from].insert(to);
        }
    }

    let mut pending: Vec<usize> = deps.iter().map(HashSet::len).collect();
    let mut emitted = vec![false; n];
    let mut ordered = Vec::with_capacity(n);

    while ordered.len() < n {
        // First node (input order) whose dependencies are all emitted.
        let Some(next) = (0..n).find(|&i| !emitted[i] && pending[i] == 0) else {
            let members = (0..n)
                .filter(|&i| !emitted[i])
                .map(|i| nodes[i].clone())
                .collect();
            return Err(OrderError::Cycle { members });
        };
        emitted[next] = true;
        ordered.push(nodes[next].clone());
        for i in 0..n {
            if !emitted[i] && deps[i].contains(&next) {
                pending[i] -= 1;
            }
        }
    }

    Ok(ordered)
}
