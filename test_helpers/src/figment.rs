//! Helpers for loading build options inside a `figment::Jail`.
//!
//! The jail isolates the process environment and working directory, so tests
//! can set `PARAMCFG_*` variables and write option files without leaking them
//! into other tests.

use std::path::Path;

use anyhow::{Result, anyhow};
use param_config::BuildOptions;

/// Environment prefix used by the option-loading helpers.
pub const ENV_PREFIX: &str = "PARAMCFG_";

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail fails to initialise or the closure returns a
/// [`figment::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Loads [`BuildOptions`] from `env` and an optional TOML `file` body.
///
/// Variables are set inside a jail; `file`, when given, is written to
/// `options.toml` in the jail directory and loaded beneath the environment.
///
/// # Examples
///
/// ```
/// use param_config_test_helpers::figment::load_options;
///
/// let options = load_options(
///     &[
///         ("PARAMCFG_PREFIXES", "/a,/b"),
///         ("PARAMCFG_STRIP_PREFIX", "true"),
///         ("PARAMCFG_JSON_OUTPUT", "false"),
///         ("PARAMCFG_YAML_RULES", "false"),
///         ("PARAMCFG_SORT_BY_DEPENDENCIES", "false"),
///     ],
///     None,
/// )
/// .expect("options")
/// .expect("complete options");
/// assert_eq!(options.prefixes, vec!["/a", "/b"]);
/// ```
///
/// # Errors
///
/// The outer result reports jail failures. The inner result carries the
/// [`param_config::BuildError`] returned by [`BuildOptions::load`].
pub fn load_options(
    env: &[(&str, &str)],
    file: Option<&str>,
) -> Result<param_config::BuildResult<BuildOptions>> {
    with_jail(|j| {
        for (key, value) in env {
            j.set_env(key, value);
        }
        let path = match file {
            Some(body) => {
                j.create_file("options.toml", body)?;
                Some(Path::new("options.toml"))
            }
            None => None,
        };
        Ok(BuildOptions::load(ENV_PREFIX, path))
    })
}
