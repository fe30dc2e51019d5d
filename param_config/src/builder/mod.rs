//! Orchestration of fetch, assembly, merge, sort and encode.
//!
//! A build walks the requested prefixes in order. Each prefix is fetched,
//! sorted by key and assembled into a tree (or a rules document), and the
//! result is merged into the accumulated document. Schema builds may then
//! reorder the `types` sequence before the document is encoded. Any failure
//! aborts the whole build.

use tracing::{debug, info_span};

use crate::assemble::assemble_tree;
use crate::dependency::sort_types_by_dependency;
use crate::error::{BuildResult, FetchResultExt};
use crate::merge::merge_mappings;
use crate::node::{ConfigNode, Mapping};
use crate::options::BuildOptions;
use crate::rules::assemble_rules;
use crate::source::{FetchContext, Parameter, ParameterSource};

/// Builds configuration documents from a [`ParameterSource`].
///
/// The builder holds no state besides its source; every call fetches fresh
/// parameters and assembles a private document.
///
/// # Examples
///
/// ```rust
/// use param_config::{ConfigBuilder, FetchContext, MemoryStore};
///
/// let store = MemoryStore::from_pairs([
///     ("/app/schema/types/User", r#"{"name": "User"}"#),
///     ("/app/schema/types/Post", r#"{"name": "Post", "fields": [{"ofType": "User"}]}"#),
///     ("/app/schema/query", r#"{"name": "Query"}"#),
/// ]);
/// let builder = ConfigBuilder::new(store);
/// let bytes = builder.build_json_from_prefix(&FetchContext::new(), "/app/schema", true)?;
/// let doc: serde_json::Value = serde_json::from_slice(&bytes).expect("valid JSON");
/// assert_eq!(doc["types"][0]["name"], "User");
/// assert_eq!(doc["types"][1]["name"], "Post");
/// # Ok::<_, param_config::BuildError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ConfigBuilder<S> {
    source: S,
}

impl<S: ParameterSource> ConfigBuilder<S> {
    /// Create a builder reading from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns the parameter source.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Builds and encodes the document described by `options`.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::BuildError`] raised while fetching,
    /// assembling, sorting or encoding.
    pub fn build_from_prefixes(
        &self,
        cx: &FetchContext,
        options: &BuildOptions,
    ) -> BuildResult<Vec<u8>> {
        let document = self.build_document(cx, options)?;
        options.output_format().encode(&document)
    }

    /// Builds a single prefix as indented JSON with keys relative to it.
    ///
    /// # Errors
    ///
    /// See [`Self::build_from_prefixes`].
    pub fn build_json_from_prefix(
        &self,
        cx: &FetchContext,
        prefix: &str,
        sort_by_dependencies: bool,
    ) -> BuildResult<Vec<u8>> {
        self.build_from_prefixes(cx, &BuildOptions::json(prefix, sort_by_dependencies))
    }

    /// Builds a single prefix as a YAML rules document.
    ///
    /// Dependency sorting does not apply to rules documents, so
    /// `sort_by_dependencies` has no effect; it is accepted for symmetry with
    /// [`Self::build_json_from_prefix`].
    ///
    /// # Errors
    ///
    /// See [`Self::build_from_prefixes`].
    pub fn build_yaml_from_prefix(
        &self,
        cx: &FetchContext,
        prefix: &str,
        sort_by_dependencies: bool,
    ) -> BuildResult<Vec<u8>> {
        self.build_from_prefixes(cx, &BuildOptions::yaml(prefix, sort_by_dependencies))
    }

    /// Builds the document described by `options` without encoding it.
    ///
    /// # Errors
    ///
    /// Returns the first [`crate::BuildError`] raised while fetching,
    /// assembling or sorting.
    pub fn build_document(
        &self,
        cx: &FetchContext,
        options: &BuildOptions,
    ) -> BuildResult<ConfigNode> {
        let mut document = Mapping::new();
        for prefix in &options.prefixes {
            let _span = info_span!("prefix", prefix = %prefix).entered();
            let params = self.fetch_sorted(cx, prefix)?;
            let tree = if options.yaml_rules {
                assemble_rules(&params, prefix, options.strip_prefix)?
            } else {
                assemble_tree(&params, prefix, options.strip_prefix)
            };
            merge_mappings(&mut document, tree);
        }

        if options.sort_by_dependencies {
            if options.yaml_rules {
                debug!("dependency sorting does not apply to rules documents");
            } else {
                sort_types_by_dependency(&mut document)?;
            }
        }
        Ok(ConfigNode::Mapping(document))
    }

    fn fetch_sorted(&self, cx: &FetchContext, prefix: &str) -> BuildResult<Vec<Parameter>> {
        let mut params = self
            .source
            .fetch_parameters_under_path(cx, prefix)
            .for_prefix(prefix)?;
        params.sort_by(|a, b| a.key.cmp(&b.key));
        debug!(prefix, count = params.len(), "fetched parameters");
        Ok(params)
    }
}
