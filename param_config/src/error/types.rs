//! Primary error enum for document builds.

use figment::Error as FigmentError;
use thiserror::Error;

/// Failure reported by a parameter source.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a document build.
///
/// A build either returns a complete document or one of these; partial
/// output is never produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The parameter source failed while listing a prefix.
    #[error("failed to fetch parameters under '{path}': {source}")]
    SourceFetch {
        /// Prefix that was being fetched.
        path: String,
        /// Underlying error reported by the source.
        #[source]
        source: SourceError,
    },

    /// A rules value was neither a YAML mapping nor a YAML sequence.
    #[error("failed to parse '{key}' as a YAML mapping or sequence: {reason}")]
    ValueParse {
        /// Full key of the offending parameter.
        key: String,
        /// Decoder diagnostics for both attempts.
        reason: String,
    },

    /// A nested path was found where rules documents require flat keys.
    #[error("nested parameters are not supported for YAML rules: {key}")]
    UnsupportedNesting {
        /// Full key of the offending parameter.
        key: String,
    },

    /// Two parameters produced the same top-level rule key.
    #[error("duplicate rule key: {key}")]
    DuplicateKey {
        /// Rule key that was produced twice.
        key: String,
    },

    /// The type definitions reference each other in a cycle.
    #[error("cyclic dependency among type definitions: {}", .participants.join(", "))]
    CyclicDependency {
        /// Names of the types that could not be ordered.
        participants: Vec<String>,
    },

    /// The document lacks the structure needed for dependency sorting.
    #[error("malformed schema at '{path}': {message}")]
    MalformedSchema {
        /// Location inside the document, for example `types[2]`.
        path: String,
        /// Explanation of what was expected.
        message: String,
    },

    /// JSON encoding of the finished document failed.
    #[error("failed to encode JSON output: {0}")]
    JsonEncode(#[from] serde_json::Error),

    /// YAML encoding of the finished document failed.
    #[error("failed to encode YAML output: {0}")]
    YamlEncode(#[from] serde_yaml::Error),

    /// Build options could not be extracted from their providers.
    #[error("failed to load build options: {0}")]
    Options(#[from] Box<FigmentError>),
}
