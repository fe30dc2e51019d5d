//! Deep merging of configuration trees.
//!
//! Trees assembled from different prefixes are folded into one document in
//! fetch order. Later sources win on scalar or shape conflicts, so the merge
//! is not commutative.

use tracing::trace;

use crate::node::{ConfigNode, Mapping};

/// Overlay `layer` onto `target`, updating `target` in place.
///
/// Behaviour:
/// - Two mappings merge key by key, recursively.
/// - Two sequences concatenate: `target`'s elements, then `layer`'s.
/// - Any other combination replaces `target` with `layer`.
///
/// # Examples
///
/// ```rust
/// use param_config::{ConfigNode, merge_nodes};
/// use serde_json::json;
///
/// let mut acc = ConfigNode::from(json!({"a": {"x": 1}, "tags": ["one"]}));
/// merge_nodes(&mut acc, ConfigNode::from(json!({"a": {"y": 2}, "tags": ["two"]})));
/// assert_eq!(
///     acc,
///     ConfigNode::from(json!({"a": {"x": 1, "y": 2}, "tags": ["one", "two"]}))
/// );
/// ```
pub fn merge_nodes(target: &mut ConfigNode, layer: ConfigNode) {
    match (target, layer) {
        (ConfigNode::Mapping(dest), ConfigNode::Mapping(src)) => merge_mappings(dest, src),
        (ConfigNode::Sequence(dest), ConfigNode::Sequence(src)) => dest.extend(src),
        (slot, replacement) => *slot = replacement,
    }
}

/// Merge every entry of `src` into `dest` following [`merge_nodes`].
pub fn merge_mappings(dest: &mut Mapping, src: Mapping) {
    for (key, value) in src {
        match dest.get_mut(&key) {
            Some(existing) => {
                trace!(key = %key, existing = existing.kind(), incoming = value.kind(), "merging key");
                merge_nodes(existing, value);
            }
            None => {
                dest.insert(key, value);
            }
        }
    }
}
