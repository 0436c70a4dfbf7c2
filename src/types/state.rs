//! Feature-state trees.
//!
//! The caller-facing wire shape for a feature entry is either a bare boolean
//! ("fully enabled" / "disabled") or a nested map of sub-options. Internally
//! that duck typing is replaced with a closed recursive variant so the
//! evaluator and resolver are total over the type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The value of one feature entry: fully enabled, disabled, or enabled with
/// an explicit set of sub-options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FeatureValueRepr", into = "FeatureValueRepr")]
pub enum FeatureValue {
    /// The feature is enabled in full (`true` on the wire).
    Enabled,
    /// The feature is explicitly disabled (`false` on the wire).
    Disabled,
    /// The feature is enabled with a specific set of sub-options.
    Partial(FeatureMap),
}

impl FeatureValue {
    /// Returns true if this value counts as "active": enabled in full or
    /// with sub-options. `Disabled` is the only inactive value.
    pub fn is_active(&self) -> bool {
        !matches!(self, FeatureValue::Disabled)
    }

    /// Returns the nested sub-option map, if this value carries one.
    pub fn as_map(&self) -> Option<&FeatureMap> {
        match self {
            FeatureValue::Partial(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(flag: bool) -> Self {
        if flag {
            FeatureValue::Enabled
        } else {
            FeatureValue::Disabled
        }
    }
}

/// Wire representation: a boolean or a nested map.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FeatureValueRepr {
    Flag(bool),
    Options(FeatureMap),
}

impl From<FeatureValueRepr> for FeatureValue {
    fn from(repr: FeatureValueRepr) -> Self {
        match repr {
            FeatureValueRepr::Flag(flag) => flag.into(),
            FeatureValueRepr::Options(map) => FeatureValue::Partial(map),
        }
    }
}

impl From<FeatureValue> for FeatureValueRepr {
    fn from(value: FeatureValue) -> Self {
        match value {
            FeatureValue::Enabled => FeatureValueRepr::Flag(true),
            FeatureValue::Disabled => FeatureValueRepr::Flag(false),
            FeatureValue::Partial(map) => FeatureValueRepr::Options(map),
        }
    }
}

/// A tree of feature entries keyed by name.
///
/// Key iteration order is insertion order, which is the stable order the
/// rest of the crate relies on (ordering tie-breaks, the degenerate
/// no-dependency-spec feature list).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap(pub IndexMap<String, FeatureValue>);

impl FeatureMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        FeatureMap(IndexMap::new())
    }

    /// Looks up the entry for a feature name.
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.0.get(name)
    }

    /// Looks up the entry for a feature name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FeatureValue> {
        self.0.get_mut(name)
    }

    /// Inserts or replaces the entry for a feature name.
    pub fn insert(&mut self, name: impl Into<String>, value: FeatureValue) {
        self.0.insert(name.into(), value);
    }

    /// Returns true if the named feature is present and active.
    pub fn is_active(&self, name: &str) -> bool {
        self.get(name).is_some_and(FeatureValue::is_active)
    }

    /// Iterates over feature names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Returns the feature names that are currently active, in insertion order.
    pub fn active_names(&self) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, value)| value.is_active())
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, FeatureValue)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (S, FeatureValue)>>(iter: I) -> Self {
        FeatureMap(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
