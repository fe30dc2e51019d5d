//! Closed configuration tree produced by assembly and merging.
//!
//! Every structural level of an assembled document is either a [`Mapping`]
//! or a sequence. Parsed JSON and YAML values are lifted into the same shape
//! when they enter the tree, so objects decoded from a parameter value merge
//! with mappings built from parameter paths.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Number, Value};

/// Keyed level of a configuration tree.
pub type Mapping = BTreeMap<String, ConfigNode>;

/// Leaf value of a configuration tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Explicit `null`.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Integer or finite floating point number.
    Number(Number),
    /// `NaN` or an infinity, which only YAML values can carry. JSON output
    /// writes these as `null`.
    NonFinite(f64),
    /// Text, including values that failed to parse as anything richer.
    String(String),
}

/// A node in an assembled configuration document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// Leaf value.
    Scalar(Scalar),
    /// Keyed level whose keys are the path segments observed there.
    Mapping(Mapping),
    /// Ordered collection.
    Sequence(Vec<ConfigNode>),
}

impl ConfigNode {
    /// An empty mapping, the identity element for [`crate::merge_nodes`].
    #[must_use]
    pub const fn empty_mapping() -> Self {
        Self::Mapping(BTreeMap::new())
    }

    /// A string leaf.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    /// Returns the mapping when this node is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Returns the mapping mutably when this node is one.
    pub const fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    /// Returns the elements when this node is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Sequence(items) => Some(items),
            Self::Scalar(_) | Self::Mapping(_) => None,
        }
    }

    /// Returns the text of a string leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Looks up `key` when this node is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Short name of the node's shape, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
        }
    }
}

impl From<Value> for ConfigNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(flag) => Self::Scalar(Scalar::Bool(flag)),
            Value::Number(number) => Self::Scalar(Scalar::Number(number)),
            Value::String(text) => Self::Scalar(Scalar::String(text)),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => Self::Null,
            Scalar::Bool(flag) => Self::Bool(flag),
            Scalar::Number(number) => Self::Number(number),
            Scalar::NonFinite(_) => Self::Null,
            Scalar::String(text) => Self::String(text),
        }
    }
}

impl From<ConfigNode> for Value {
    fn from(node: ConfigNode) -> Self {
        match node {
            ConfigNode::Scalar(scalar) => scalar.into(),
            ConfigNode::Sequence(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            ConfigNode::Mapping(map) => Self::Object(
                map.into_iter()
                    .map(|(key, child)| (key, Self::from(child)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests;
