//! Constructors for `BuildError` variants that carry context.

use super::{BuildError, SourceError};

impl BuildError {
    /// Construct a fetch error for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use param_config::BuildError;
    /// let e = BuildError::source_fetch("/app", std::io::Error::other("boom"));
    /// assert!(matches!(e, BuildError::SourceFetch { .. }));
    /// assert!(e.to_string().contains("/app"));
    /// ```
    #[must_use]
    pub fn source_fetch(path: impl Into<String>, source: impl Into<SourceError>) -> Self {
        Self::SourceFetch {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Construct a value parse error for the parameter `key`.
    #[must_use]
    pub fn value_parse(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValueParse {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Construct a schema shape error at `path`.
    #[must_use]
    pub fn malformed_schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSchema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the key, prefix or type names the error is about.
    ///
    /// Encoding and option failures have no single subject and return an
    /// empty list.
    #[must_use]
    pub fn subjects(&self) -> Vec<&str> {
        match self {
            Self::SourceFetch { path, .. } | Self::MalformedSchema { path, .. } => vec![path.as_str()],
            Self::ValueParse { key, .. }
            | Self::UnsupportedNesting { key }
            | Self::DuplicateKey { key } => vec![key.as_str()],
            Self::CyclicDependency { participants } => {
                participants.iter().map(String::as_str).collect()
            }
            Self::JsonEncode(_) | Self::YamlEncode(_) | Self::Options(_) => Vec::new(),
        }
    }
}
