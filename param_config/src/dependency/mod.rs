//! Dependency ordering of typed schema entries.
//!
//! Schema documents carry a `types` sequence of definitions whose fields and
//! field arguments name other types through `ofType`. Reordering that
//! sequence so each definition follows the definitions it references lets
//! consumers register types in a single pass. Only the `types` sequence is
//! touched; sibling keys such as `query` pass through unchanged.

use tracing::debug;

use crate::error::{BuildError, BuildResult};
use crate::node::{ConfigNode, Mapping};

mod entry;
mod graph;

pub use entry::{Argument, Field, TypedEntry};
pub use graph::DependencyGraph;

/// Key of the sequence reordered by [`sort_types_by_dependency`].
pub const TYPES_KEY: &str = "types";

/// Reorders the `types` sequence of `document` so every referenced type
/// precedes the types that reference it.
///
/// # Examples
///
/// ```rust
/// use param_config::{ConfigNode, sort_types_by_dependency};
/// use serde_json::json;
///
/// let mut document = ConfigNode::from(json!({
///     "types": [
///         {"name": "Post", "fields": [{"name": "author", "ofType": "User"}]},
///         {"name": "User", "fields": [{"name": "id", "ofType": "ID"}]}
///     ],
///     "query": {"name": "Query"}
/// }));
/// if let ConfigNode::Mapping(map) = &mut document {
///     sort_types_by_dependency(map)?;
/// }
/// let names: Vec<_> = document
///     .get("types")
///     .and_then(ConfigNode::as_sequence)
///     .into_iter()
///     .flatten()
///     .filter_map(|entry| entry.get("name").and_then(ConfigNode::as_str))
///     .collect();
/// assert_eq!(names, ["User", "Post"]);
/// # Ok::<_, param_config::BuildError>(())
/// ```
///
/// # Errors
///
/// Returns [`BuildError::MalformedSchema`] when `types` is missing, is not a
/// sequence, or holds an entry that cannot be read, and
/// [`BuildError::CyclicDependency`] when the references form a cycle. The
/// document is left unchanged on error.
pub fn sort_types_by_dependency(document: &mut Mapping) -> BuildResult<()> {
    let items = match document.get(TYPES_KEY) {
        Some(ConfigNode::Sequence(items)) => items,
        Some(other) => {
            return Err(BuildError::malformed_schema(
                TYPES_KEY,
                format!("expected a sequence of type definitions, found a {}", other.kind()),
            ));
        }
        None => {
            return Err(BuildError::malformed_schema(
                TYPES_KEY,
                "document has no type definitions",
            ));
        }
    };
    let entries = items
        .iter()
        .enumerate()
        .map(|(index, node)| TypedEntry::from_node(index, node))
        .collect::<BuildResult<Vec<_>>>()?;
    let graph = DependencyGraph::from_entries(&entries)?;
    let order = graph.topological_order()?;
    debug!(
        types = graph.node_count(),
        edges = graph.edge_count(),
        "sorted type definitions by dependency"
    );

    if let Some(ConfigNode::Sequence(items)) = document.get_mut(TYPES_KEY) {
        let mut slots: Vec<Option<ConfigNode>> = std::mem::take(items).into_iter().map(Some).collect();
        *items = order
            .iter()
            .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
            .collect();
    }
    Ok(())
}
