//! Build options and the providers they are loaded from.
//!
//! Options can be constructed directly, converted from [`crate::BuildArgs`],
//! or extracted from a [`Figment`] so host applications can layer them from
//! files and the environment.

use std::path::Path;

use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::encode::OutputFormat;
use crate::error::BuildResult;

mod env;

pub use env::OptionsEnv;

/// Caller-supplied settings for one build.
///
/// No field has a default; every value must be supplied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Prefixes to fetch, merged in this order.
    pub prefixes: Vec<String>,
    /// Whether keys are made relative to their prefix.
    pub strip_prefix: bool,
    /// Whether JSON output is indented.
    pub json_output: bool,
    /// Whether to build a YAML rules document instead of a JSON tree.
    pub yaml_rules: bool,
    /// Whether to reorder the `types` sequence by dependency (JSON only).
    pub sort_by_dependencies: bool,
}

impl BuildOptions {
    /// Options for a single prefix rendered as indented JSON.
    #[must_use]
    pub fn json(prefix: impl Into<String>, sort_by_dependencies: bool) -> Self {
        Self {
            prefixes: vec![prefix.into()],
            strip_prefix: true,
            json_output: true,
            yaml_rules: false,
            sort_by_dependencies,
        }
    }

    /// Options for a single prefix rendered as a YAML rules document.
    #[must_use]
    pub fn yaml(prefix: impl Into<String>, sort_by_dependencies: bool) -> Self {
        Self {
            prefixes: vec![prefix.into()],
            strip_prefix: true,
            json_output: false,
            yaml_rules: true,
            sort_by_dependencies,
        }
    }

    /// The encoding these options select.
    #[must_use]
    pub const fn output_format(&self) -> OutputFormat {
        if self.yaml_rules {
            OutputFormat::Yaml
        } else {
            OutputFormat::Json {
                pretty: self.json_output,
            }
        }
    }

    /// Extracts options from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::Options`] when a field is missing or has
    /// the wrong type.
    pub fn from_figment(figment: &Figment) -> BuildResult<Self> {
        Ok(figment.extract()?)
    }

    /// Loads options from an optional TOML file overlaid by environment
    /// variables starting with `env_prefix`.
    ///
    /// ```rust,no_run
    /// use param_config::BuildOptions;
    ///
    /// // PARAMCFG_PREFIXES=/app/schema,/app/extra PARAMCFG_STRIP_PREFIX=true ...
    /// let options = BuildOptions::load("PARAMCFG_", None)?;
    /// # Ok::<_, param_config::BuildError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::Options`] when the merged sources do not
    /// describe a complete set of options, or when a file is given but the
    /// `toml` feature is disabled.
    pub fn load(env_prefix: &str, file: Option<&Path>) -> BuildResult<Self> {
        let mut figment = Figment::new();
        if let Some(path) = file {
            figment = merge_file(figment, path)?;
        }
        Self::from_figment(&figment.merge(OptionsEnv::prefixed(env_prefix)))
    }
}

#[cfg(feature = "toml")]
#[expect(
    clippy::unnecessary_wraps,
    reason = "signature matches the variant used without the toml feature"
)]
fn merge_file(figment: Figment, path: &Path) -> BuildResult<Figment> {
    use figment::providers::{Format, Toml};

    Ok(figment.merge(Toml::file(path)))
}

#[cfg(not(feature = "toml"))]
fn merge_file(_figment: Figment, path: &Path) -> BuildResult<Figment> {
    Err(figment::Error::from(format!(
        "toml feature disabled: enable the 'toml' feature to read {}",
        path.display()
    ))
    .into())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::BuildOptions;
    use crate::encode::OutputFormat;

    #[rstest]
    fn json_shortcut_sets_fixed_flags() {
        let options = BuildOptions::json("/app/schema", true);
        assert_eq!(options.prefixes, vec!["/app/schema"]);
        assert!(options.strip_prefix && options.json_output && !options.yaml_rules);
        assert_eq!(options.output_format(), OutputFormat::Json { pretty: true });
    }

    #[rstest]
    fn yaml_shortcut_selects_rules_mode() {
        let options = BuildOptions::yaml("/app/rules", false);
        assert!(options.strip_prefix && options.yaml_rules && !options.json_output);
        assert_eq!(options.output_format(), OutputFormat::Yaml);
    }
}
