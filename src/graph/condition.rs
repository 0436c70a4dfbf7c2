//! Condition evaluation against the live feature state.
//!
//! Pure predicates. Malformed or unreachable paths are never errors; they
//! simply do not hold.

use crate::types::{Condition, FeatureMap, FeaturePath, FeatureValue};

/// Walk cursor over the state tree: a nested map, or a leaf value reached
/// before the path was fully consumed.
enum Node<'a> {
    Map(&'a FeatureMap),
    Leaf(&'a FeatureValue),
}

/// Returns true if the condition currently holds against `state`.
///
/// A list of alternatives is a logical OR, short-circuiting in list order.
pub fn condition_holds(condition: &Condition, state: &FeatureMap) -> bool {
    match condition {
        Condition::Path(path) => path_holds(path, state),
        Condition::AnyOf(paths) => paths.iter().any(|path| path_holds(path, state)),
    }
}

/// Returns true if a single dotted path currently holds against `state`.
///
/// The walk descends segment by segment:
/// - at a non-terminal segment, an absent or explicitly disabled entry fails,
///   and so does reaching a leaf (there is nothing left to traverse);
/// - at the terminal segment on a map, presence of any non-disabled value
///   (including a nested sub-option map) satisfies the path;
/// - at the terminal segment on a leaf, only full enablement satisfies it —
///   a fully enabled feature implies all of its sub-options.
pub fn path_holds(path: &FeaturePath, state: &FeatureMap) -> bool {
    let segments: Vec<&str> = path.segments().collect();
    let last = segments.len() - 1;

    let mut node = Node::Map(state);
    for (i, segment) in segments.iter().enumerate() {
        let terminal = i == last;
        match node {
            Node::Map(map) => match map.get(segment) {
                None | Some(FeatureValue::Disabled) => return false,
                Some(value) => {
                    if terminal {
                        return true;
                    }
                    node = match value {
                        FeatureValue::Partial(inner) => Node::Map(inner),
                        leaf => Node::Leaf(leaf),
                    };
                }
            },
            Node::Leaf(value) => {
                return terminal && matches!(value, FeatureValue::Enabled);
            }
        }
    }
    false
}
