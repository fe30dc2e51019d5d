//! Assembly of flat parameter listings into nested trees.
//!
//! Parameters are grouped by the first segment of their path relative to the
//! prefix (see [`Levels`]). Each named level then becomes a scalar, a
//! sequence or a nested mapping:
//!
//! - a single value stored at the level itself is emitted as that value;
//! - several children that all sit directly below the level are emitted as a
//!   sequence, in key order;
//! - anything else is walked segment by segment into nested mappings.
//!
//! Parameters whose relative path is empty form the root level. A lone root
//! parameter is emitted under its last segment; several are collected into a
//! sequence under [`ROOT_ITEMS_KEY`].
//!
//! While walking paths, a segment that already holds a non-mapping value and
//! is then used as a parent is replaced by a fresh mapping; the earlier value
//! is discarded.

use tracing::debug;

use crate::node::{ConfigNode, Mapping};
use crate::source::Parameter;
use crate::value::parse_json_value;

mod level;

pub use level::{ChildKey, Level, Levels};

/// Key holding root-level values when there is more than one.
pub const ROOT_ITEMS_KEY: &str = "items";

/// Builds the tree for one prefix.
///
/// `params` should be sorted by key so that sequence order and conflict
/// resolution are reproducible.
///
/// # Examples
///
/// ```rust
/// use param_config::{ConfigNode, Parameter, assemble_tree};
/// use serde_json::json;
///
/// let params = [
///     Parameter::new("/app/user/profile/name", "\"Ann\""),
///     Parameter::new("/app/user/profile/age", "30"),
/// ];
/// let tree = assemble_tree(&params, "/app", true);
/// assert_eq!(
///     ConfigNode::Mapping(tree),
///     ConfigNode::from(json!({"user": {"profile": {"name": "Ann", "age": 30}}}))
/// );
/// ```
#[must_use]
pub fn assemble_tree(params: &[Parameter], base: &str, strip_prefix: bool) -> Mapping {
    let mut result = Mapping::new();
    if params.is_empty() {
        return result;
    }
    let levels = Levels::group(params, base, strip_prefix);
    emit_root(&mut result, &levels);
    for (key, level) in &levels.named {
        let node = emit_level(key, level);
        result.insert(key.clone(), node);
    }
    result
}

fn emit_root(result: &mut Mapping, levels: &Levels<'_>) {
    if levels.root.len() > 1 {
        let items = levels
            .root
            .values()
            .map(|param| parse_json_value(&param.value))
            .collect();
        result.insert(ROOT_ITEMS_KEY.to_owned(), ConfigNode::Sequence(items));
    } else {
        for (name, param) in &levels.root {
            result.insert(name.clone(), parse_json_value(&param.value));
        }
    }
}

fn emit_level(key: &str, level: &Level<'_>) -> ConfigNode {
    if let Some(param) = level.get(&ChildKey::Here).filter(|_| level.len() == 1) {
        return parse_json_value(&param.value);
    }
    if is_sequence_level(level) {
        debug!(level = key, children = level.len(), "emitting level as sequence");
        return ConfigNode::Sequence(
            level
                .values()
                .map(|param| parse_json_value(&param.value))
                .collect(),
        );
    }
    let mut nested = Mapping::new();
    for (child, param) in level {
        insert_path(&mut nested, child.as_path(), parse_json_value(&param.value));
    }
    ConfigNode::Mapping(nested)
}

/// Whether a level's children form a sequence: more than one child, and
/// every child sits directly below the level.
#[must_use]
pub fn is_sequence_level(level: &Level<'_>) -> bool {
    level.len() > 1 && level.keys().all(|child| child.depth() == 0)
}

/// Writes `value` at the `/`-separated `path` below `root`, creating
/// intermediate mappings and replacing non-mapping values in the way.
pub fn insert_path(root: &mut Mapping, path: &str, value: ConfigNode) {
    let (parents, leaf) = match path.rsplit_once('/') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };
    let mut current = root;
    for segment in parents.into_iter().flat_map(|p| p.split('/')) {
        let slot = current
            .entry(segment.to_owned())
            .or_insert_with(ConfigNode::empty_mapping);
        if slot.as_mapping().is_none() {
            debug!(path, segment, replaced = slot.kind(), "replacing value with mapping");
            *slot = ConfigNode::empty_mapping();
        }
        let Some(next) = slot.as_mapping_mut() else {
            return;
        };
        current = next;
    }
    current.insert(leaf.to_owned(), value);
}

#[cfg(test)]
mod tests;
