//! Assemble nested configuration documents from hierarchical parameter paths.
//!
//! Parameter stores hold flat key/value pairs whose keys are slash-delimited
//! paths such as `/app/schema/types/User`. This crate fetches every parameter
//! under one or more prefixes and folds them into a single document:
//!
//! - [`assemble_tree`] groups keys by their first segment and turns each
//!   group into a scalar, a sequence or a nested mapping.
//! - [`assemble_rules`] reads YAML values directly below a prefix into a
//!   flat rules document.
//! - [`merge_mappings`] layers the documents of successive prefixes.
//! - [`sort_types_by_dependency`] reorders a schema's `types` so every type
//!   follows the types it references.
//!
//! [`ConfigBuilder`] ties these together over any [`ParameterSource`] and
//! encodes the result as JSON or YAML.

mod assemble;
mod builder;
mod cli;
mod dependency;
mod encode;
mod error;
mod merge;
mod node;
mod options;
pub mod path;
mod rules;
pub mod source;
pub mod value;

pub use assemble::{
    ChildKey, Level, Levels, ROOT_ITEMS_KEY, assemble_tree, insert_path, is_sequence_level,
};
pub use builder::ConfigBuilder;
pub use cli::BuildArgs;
pub use dependency::{
    Argument, DependencyGraph, Field, TYPES_KEY, TypedEntry, sort_types_by_dependency,
};
pub use encode::OutputFormat;
pub use error::{BuildError, BuildResult, FetchResultExt, SourceError};
pub use merge::{merge_mappings, merge_nodes};
pub use node::{ConfigNode, Mapping, Scalar};
pub use options::{BuildOptions, OptionsEnv};
pub use rules::assemble_rules;
pub use source::{FetchContext, MemoryStore, Parameter, ParameterSource};
