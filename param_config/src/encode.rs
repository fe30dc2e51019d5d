//! Serialization of finished documents.

use std::fmt;

use crate::error::BuildResult;
use crate::node::ConfigNode;

/// Encoding applied to a finished document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON text, indented by two spaces when `pretty`.
    Json {
        /// Whether to indent the output.
        pretty: bool,
    },
    /// YAML text.
    Yaml,
}

impl OutputFormat {
    /// Encodes `document` in this format.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use param_config::{ConfigNode, OutputFormat};
    /// use serde_json::json;
    ///
    /// let doc = ConfigNode::from(json!({"a": [1, 2]}));
    /// let compact = OutputFormat::Json { pretty: false }.encode(&doc)?;
    /// assert_eq!(compact, br#"{"a":[1,2]}"#);
    /// # Ok::<_, param_config::BuildError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::JsonEncode`] or
    /// [`crate::BuildError::YamlEncode`] when the encoder rejects the
    /// document.
    pub fn encode(self, document: &ConfigNode) -> BuildResult<Vec<u8>> {
        Ok(match self {
            Self::Json { pretty: true } => serde_json::to_vec_pretty(document)?,
            Self::Json { pretty: false } => serde_json::to_vec(document)?,
            Self::Yaml => serde_yaml::to_string(document)?.into_bytes(),
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { pretty: true } => f.write_str("pretty JSON"),
            Self::Json { pretty: false } => f.write_str("JSON"),
            Self::Yaml => f.write_str("YAML"),
        }
    }
}
