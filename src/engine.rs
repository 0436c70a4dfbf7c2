//! Entry points composing resolution and ordering over config objects.
//!
//! Two scenarios: initializing a single configuration from scratch, and
//! merging a partial user configuration against a complete default
//! configuration (the donor of default values for anything auto-enabled).
//! Both mutate the config in place and overwrite `preprocessFeatures`.

use thiserror::Error;
use tracing::debug;

use crate::graph::{order_features, resolve, OrderError, Resolution, ResolveError};
use crate::types::{DependencySpec, FeatureMap, PreprocessConfig};

/// Errors surfaced by the entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Initializes a single configuration from scratch.
///
/// `config.preprocess` serves as both the live state and its own defaults
/// donor (a snapshot is taken before resolution mutates it). The dependency
/// spec is read from `config.preprocess_dependencies`; without one, no
/// resolution runs and `preprocess_features` is the state map's key set in
/// insertion order.
///
/// # Errors
///
/// Propagates a cycle among active features, or the resolver's safety-bound
/// failure on a malformed spec.
pub fn init(config: &mut PreprocessConfig) -> Result<Resolution, EngineError> {
    let defaults = config.preprocess.clone();
    let spec = config.preprocess_dependencies.clone();
    let (features, resolution) = run(&mut config.preprocess, &defaults, spec.as_ref())?;
    config.preprocess_features = Some(features);
    Ok(resolution)
}

/// Merges a partial configuration against a complete default configuration.
///
/// The live state is `config.preprocess`; default values for auto-enabled
/// features come from `default_config.preprocess`; the dependency spec is
/// read from `default_config.preprocess_dependencies` (the merged config
/// need not carry its own copy). Sets `config.preprocess_features` and
/// returns which top-level features were auto-resolved.
///
/// # Errors
///
/// Propagates a cycle among active features, or the resolver's safety-bound
/// failure on a malformed spec.
pub fn merge(
    config: &mut PreprocessConfig,
    default_config: &PreprocessConfig,
) -> Result<Resolution, EngineError> {
    let spec = default_config.preprocess_dependencies.as_ref();
    let (features, resolution) = run(&mut config.preprocess, &default_config.preprocess, spec)?;
    config.preprocess_features = Some(features);
    debug!(
        count = resolution.count(),
        resolved = ?resolution.resolved,
        "resolved preprocess dependencies"
    );
    Ok(resolution)
}

fn run(
    state: &mut FeatureMap,
    defaults: &FeatureMap,
    spec: Option<&DependencySpec>,
) -> Result<(Vec<String>, Resolution), EngineError> {
    let Some(spec) = spec.filter(|spec| !spec.is_empty()) else {
        // Degenerate case: an absent or empty spec means no resolution and
        // no ordering constraints; the feature list is the state map's key
        // set in insertion order.
        return Ok((state.keys().cloned().collect(), Resolution::default()));
    };

    let resolution = resolve(state, defaults, spec)?;
    let active = state.active_names();
    let features = order_features(&active, spec, state)?;
    Ok((features, resolution))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(value: serde_json::Value) -> PreprocessConfig {
        serde_json::from_value(value).expect("valid config")
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    mod init_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn resolves_against_its_own_state_as_donor() {
            let mut cfg = config(serde_json::json!({
                "preprocess": {"a": true, "b": false},
                "preprocessDependencies": {"a": ["b"]}
            }));

            let resolution = init(&mut cfg).unwrap();

            // The donor snapshot holds b: false, so the edge is unresolvable.
            assert!(!cfg.preprocess.is_active("b"));
            assert_eq!(resolution.count(), 0);
            assert_eq!(cfg.preprocess_features, Some(names(&["a"])));
        }

        #[test]
        fn orders_features_already_present() {
            let mut cfg = config(serde_json::json!({
                "preprocess": {"a": true, "b": true},
                "preprocessDependencies": {"a": ["b"]}
            }));

            init(&mut cfg).unwrap();

            assert_eq!(cfg.preprocess_features, Some(names(&["b", "a"])));
        }

        #[test]
        fn without_spec_features_are_the_key_set() {
            let mut cfg = config(serde_json::json!({
                "preprocess": {"c": true, "a": false, "b": true}
            }));

            init(&mut cfg).unwrap();

            assert_eq!(cfg.preprocess_features, Some(names(&["c", "a", "b"])));
        }
    }

    mod merge_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn enables_dependency_from_defaults_and_orders() {
            let mut cfg = config(serde_json::json!({"preprocess": {"a": true}}));
            let defaults = config(serde_json::json!({
                "preprocess": {"a": true, "b": true},
                "preprocessDependencies": {"a": ["b"]}
            }));

            let resolution = merge(&mut cfg, &defaults).unwrap();

            assert!(cfg.preprocess.is_active("b"));
            assert_eq!(resolution.resolved, names(&["b"]));
            assert_eq!(cfg.preprocess_features, Some(names(&["b", "a"])));
        }

        #[test]
        fn copies_only_the_demanded_sub_option() {
            let mut cfg = config(serde_json::json!({"preprocess": {"a": true}}));
            let defaults = config(serde_json::json!({
                "preprocess": {"a": true, "b": {"x": true, "y": true}},
                "preprocessDependencies": {"a": ["b.x"]}
            }));

            merge(&mut cfg, &defaults).unwrap();

            let expected: PreprocessConfig = config(serde_json::json!({
                "preprocess": {"a": true, "b": {"x": true}},
                "preprocessFeatures": ["b", "a"]
            }));
            assert_eq!(cfg, expected);
        }

        #[test]
        fn conditional_dependency_fires_when_condition_holds() {
            let mut cfg =
                config(serde_json::json!({"preprocess": {"a": true, "b": {"x": true}}}));
            let defaults = config(serde_json::json!({
                "preprocess": {"a": true, "b": {"x": true}, "c": true},
                "preprocessDependencies": {"a": [{"condition": "b.x", "value": "c"}]}
            }));

            let resolution = merge(&mut cfg, &defaults).unwrap();

            assert!(cfg.preprocess.is_active("c"));
            assert_eq!(resolution.resolved, names(&["c"]));
        }

        #[test]
        fn conditional_dependency_stays_dormant_otherwise() {
            let mut cfg = config(serde_json::json!({"preprocess": {"a": true}}));
            let defaults = config(serde_json::json!({
                "preprocess": {"a": true, "c": true},
                "preprocessDependencies": {"a": [{"condition": "nonexistent", "value": "c"}]}
            }));

            let resolution = merge(&mut cfg, &defaults).unwrap();

            assert!(cfg.preprocess.get("c").is_none());
            assert_eq!(resolution.count(), 0);
        }

        #[test]
        fn cycle_among_active_features_fails_loudly() {
            let mut cfg = config(serde_json::json!({"preprocess": {"a": true}}));
            let defaults = config(serde_json::json!({
                "preprocess": {"a": true, "b": true},
                "preprocessDependencies": {"a": ["b"], "b": ["a"]}
            }));

            let result = merge(&mut cfg, &defaults);

            assert!(matches!(
                result,
                Err(EngineError::Order(OrderError::Cycle { .. }))
            ));
        }

        #[test]
        fn empty_spec_degenerates_to_key_set() {
            // The key set, not the active set: disabled entries stay listed.
            let mut cfg = config(serde_json::json!({
                "preprocess": {"a": true, "b": false, "c": true}
            }));
            let defaults = config(serde_json::json!({
                "preprocess": {"a": true, "b": true, "c": true},
                "preprocessDependencies": {}
            }));

            let resolution = merge(&mut cfg, &defaults).unwrap();

            assert_eq!(resolution.count(), 0);
            assert_eq!(cfg.preprocess_features, Some(names(&["a", "b", "c"])));
        }

        #[test]
        fn absent_spec_performs_no_resolution() {
            let mut cfg = config(serde_json::json!({"preprocess": {"b": true, "a": true}}));
            let defaults = config(serde_json::json!({"preprocess": {"a": true, "b": true}}));

            let resolution = merge(&mut cfg, &defaults).unwrap();

            assert_eq!(resolution.count(), 0);
            assert_eq!(cfg.preprocess_features, Some(names(&["b", "a"])));
        }

        #[test]
        fn transitive_resolution_reports_each_feature_once() {
            let mut cfg = config(serde_json::json!({"preprocess": {"a": true}}));
            let defaults = config(serde_json::json!({
                "preprocess": {"a": true, "b": true, "c": true},
                "preprocessDependencies": {"a": ["b"], "b": ["c", "c"]}
            }));

            let resolution = merge(&mut cfg, &defaults).unwrap();

            assert_eq!(resolution.resolved, names(&["b", "c"]));
            assert_eq!(cfg.preprocess_features, Some(names(&["c", "b", "a"])));
        }

        #[test]
        fn merging_twice_is_stable() {
            let mut cfg = config(serde_json::json!({"preprocess": {"a": true}}));
            let defaults = config(serde_json::json!({
                "preprocess": {"a": true, "b": {"x": true}},
                "preprocessDependencies": {"a": ["b.x"]}
            }));

            merge(&mut cfg, &defaults).unwrap();
            let settled = cfg.clone();
            let second = merge(&mut cfg, &defaults).unwrap();

            assert_eq!(cfg, settled);
            assert_eq!(second.count(), 0);
        }
    }
}
