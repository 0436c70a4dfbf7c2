//! Newtype wrapper for dotted feature paths.
//!
//! A `FeaturePath` identifies a feature or a nested sub-option of a feature,
//! e.g. `"sourcemaps"` or `"sass.compress"`. The first segment always names a
//! top-level feature; deeper segments select sub-options.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dotted path into the feature-state tree (e.g. `"sass.compress"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturePath(pub String);

impl FeaturePath {
    /// Creates a new path from a string.
    ///
    /// Note: This does not validate the format. An empty string is a valid
    /// (never-resolvable) path.
    pub fn new(s: impl Into<String>) -> Self {
        FeaturePath(s.into())
    }

    /// Returns the full path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first segment, i.e. the top-level feature this path names.
    pub fn first(&self) -> &str {
        self.0.split('.').next().unwrap_or("")
    }

    /// Iterates over the path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns true if the path names a top-level feature with no sub-option.
    pub fn is_top_level(&self) -> bool {
        !self.0.contains('.')
    }

    /// Returns the path reduced to its first segment.
    pub fn to_first_level(&self) -> FeaturePath {
        FeaturePath(self.first().to_string())
    }
}

impl fmt::Display for FeaturePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for FeaturePath {
    fn from(s: String) -> Self {
        FeaturePath(s)
    }
}

impl From<&str> for FeaturePath {
    fn from(s: &str) -> Self {
        FeaturePath(s.to_string())
    }
}
