//! Fixed-point dependency resolution.
//!
//! Whenever an active feature requires a feature that is not yet active, the
//! resolver activates it, copying the demanded granularity of default value
//! from the read-only defaults donor. Activations can flip conditions and
//! expose new edges, so the edge list is re-extracted between passes until a
//! pass activates nothing.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::types::{DependencySpec, FeatureMap, FeatureValue};

use super::edges::{extract_edges, Edge, EdgeGranularity};

/// Errors that can occur during dependency resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The fixed-point loop exceeded its safety bound. Every well-formed
    /// spec terminates long before this; tripping it means an activation
    /// failed to grow the active set.
    #[error("dependency resolution did not reach a fixed point within {limit} passes")]
    IterationLimit { limit: usize },
}

/// What a resolution pass changed: the top-level features that were
/// auto-activated, in activation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Names of the top-level features the resolver activated.
    pub resolved: Vec<String>,
}

impl Resolution {
    /// Number of auto-activated features.
    pub fn count(&self) -> usize {
        self.resolved.len()
    }
}

/// Runs dependency resolution to a fixed point, mutating `state` in place.
///
/// `defaults` is the donor of values for anything newly activated and is
/// never mutated. Unresolvable references (the donor lacks the target, or
/// holds it disabled) are silently skipped — they can never fire. Cyclic
/// declarations among already-active features simply produce no further
/// activations; cycles only become an error at the ordering stage.
///
/// # Errors
///
/// `IterationLimit` if the loop fails to settle within the safety bound
/// (edge count x feature count), which a monotone activation step never hits.
pub fn resolve(
    state: &mut FeatureMap,
    defaults: &FeatureMap,
    spec: &DependencySpec,
) -> Result<Resolution, ResolveError> {
    let mut resolved = Vec::new();
    // Features this call activated partially; only these may later be
    // upgraded or merged into. Caller-authored entries are never revised.
    let mut partials: HashSet<String> = HashSet::new();

    let initial_edges = extract_edges(spec, state, EdgeGranularity::FullPath);
    let limit = (initial_edges.len() + 1) * (defaults.len() + 1);

    let mut passes = 0usize;
    loop {
        let edges = extract_edges(spec, state, EdgeGranularity::FullPath);
        let mut changed = false;
        for edge in &edges {
            if apply_edge(edge, state, defaults, &mut partials, &mut resolved) {
                changed = true;
            }
        }
        if !changed {
            break;
        }
        passes += 1;
        if passes > limit {
            return Err(ResolveError::IterationLimit { limit });
        }
    }

    Ok(Resolution { resolved })
}

/// Applies one edge against the live state. Returns true if the state changed.
fn apply_edge(
    edge: &Edge,
    state: &mut FeatureMap,
    defaults: &FeatureMap,
    partials: &mut HashSet<String>,
    resolved: &mut Vec<String>,
) -> bool {
    if !state.is_active(&edge.feature) {
        return false;
    }

    let first = edge.target.first();
    if first.is_empty() {
        return false;
    }
    let rest: Vec<&str> = edge.target.segments().skip(1).collect();

    // The donor must hold the target actively, or the edge can never fire.
    let default_entry = match defaults.get(first) {
        Some(value) if value.is_active() => value,
        _ => return false,
    };

    if !state.is_active(first) {
        // Fresh activation: absent entries and explicitly disabled entries
        // are both overwritten with the demanded slice of the default.
        let Some(value) = default_subtree(default_entry, &rest) else {
            return false;
        };
        let partial = !rest.is_empty() && matches!(value, FeatureValue::Partial(_));
        state.insert(first, value);
        if partial {
            partials.insert(first.to_string());
        }
        resolved.push(first.to_string());
        debug!(feature = %edge.feature, dependency = first, "auto-enabled dependency");
        return true;
    }

    // Already active. Only subtrees this resolver created may be revised.
    if !partials.contains(first) {
        return false;
    }

    if rest.is_empty() {
        // A full demand upgrades the partial subtree to the complete default.
        partials.remove(first);
        state.insert(first, default_entry.clone());
        debug!(feature = %edge.feature, dependency = first, "upgraded partial to full default");
        return true;
    }

    // A deeper demand merges the missing chain into the existing partial.
    let Some(subtree) = default_subtree(default_entry, &rest) else {
        return false;
    };
    match state.get_mut(first) {
        Some(existing) => merge_missing(existing, &subtree),
        None => false,
    }
}

/// Builds the slice of a default value demanded by the remaining path
/// segments: the chain of demanded keys with the donor's value at the end.
///
/// A fully enabled default covers any sub-demand. Returns `None` when the
/// demanded chain does not exist in the donor.
fn default_subtree(default: &FeatureValue, segments: &[&str]) -> Option<FeatureValue> {
    if segments.is_empty() {
        return Some(default.clone());
    }
    match default {
        FeatureValue::Enabled => Some(FeatureValue::Enabled),
        FeatureValue::Disabled => None,
        FeatureValue::Partial(map) => {
            let child = map.get(segments[0])?;
            let inner = default_subtree(child, &segments[1..])?;
            let mut sub = FeatureMap::new();
            sub.insert(segments[0], inner);
            Some(FeatureValue::Partial(sub))
        }
    }
}

/// Inserts keys of `incoming` that are missing from `existing`, recursively.
/// Existing entries always win. Returns true if anything was inserted.
fn merge_missing(existing: &mut FeatureValue, incoming: &FeatureValue) -> bool {
    let (FeatureValue::Partial(existing), FeatureValue::Partial(incoming)) = (existing, incoming)
    else {
        return false;
    };
    let mut changed = false;
    for (key, value) in incoming.0.iter() {
        match existing.get_mut(key) {
            Some(current) => {
                if merge_missing(current, value) {
                    changed = true;
                }
            }
            None => {
                existing.insert(key.clone(), value.clone());
                changed = true;
            }
        }
    }
    changed
}
