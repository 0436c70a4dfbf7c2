//! The caller-facing configuration object.

use serde::{Deserialize, Serialize};

use super::spec::DependencySpec;
use super::state::FeatureMap;

/// A preprocess configuration, as authored by the caller.
///
/// The engine mutates `preprocess` in place (entries are added, never
/// removed) and overwrites `preprocess_features` with the computed ordering
/// on every call. `preprocess_dependencies` is read-only input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreprocessConfig {
    /// Map of feature name to enablement (boolean or nested sub-options).
    #[serde(default)]
    pub preprocess: FeatureMap,

    /// The dependency specification. Optional; without it no resolution is
    /// performed and the feature list degenerates to the state map's keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocess_dependencies: Option<DependencySpec>,

    /// Dependency-first ordering of the active top-level features. Output
    /// only; overwritten on every engine call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocess_features: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn camel_case_wire_keys() {
        let config: PreprocessConfig = serde_json::from_value(serde_json::json!({
            "preprocess": {"a": true},
            "preprocessDependencies": {"a": ["b"]}
        }))
        .unwrap();
        assert!(config.preprocess.is_active("a"));
        assert!(config.preprocess_dependencies.is_some());
        assert!(config.preprocess_features.is_none());
    }

    #[test]
    fn missing_sections_default() {
        let config: PreprocessConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(config.preprocess.is_empty());
        assert!(config.preprocess_dependencies.is_none());
    }

    #[test]
    fn features_serialize_under_camel_case_key() {
        let config = PreprocessConfig {
            preprocess_features: Some(vec!["b".to_string(), "a".to_string()]),
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["preprocessFeatures"], serde_json::json!(["b", "a"]));
    }
}
