//! Test helpers shared across crates.
//!
//! Provides parameter fixtures, instrumented parameter sources and
//! `figment::Jail` wrappers for loading build options.

pub mod figment;
pub mod store;

use param_config::Parameter;

/// Builds a parameter list from `(key, value)` pairs.
///
/// # Examples
///
/// ```
/// use param_config_test_helpers::params;
///
/// let list = params(&[("/app/a", "1"), ("/app/b", "2")]);
/// assert_eq!(list.len(), 2);
/// assert_eq!(list[0].key, "/app/a");
/// ```
#[must_use]
pub fn params(pairs: &[(&str, &str)]) -> Vec<Parameter> {
    pairs
        .iter()
        .map(|(key, value)| Parameter::new(*key, *value))
        .collect()
}
