//! Environment provider for build options.
//!
//! Wraps `figment::providers::Env` so `PREFIXES` can be written as a
//! comma-separated list (`/app/schema,/app/extra`). Parameter paths never
//! contain commas, so a single path also reads as a one-element list. Values
//! starting with `[` are left to figment's own parser, as are all other
//! keys.

use std::ops::Deref;

use figment::providers::Env;
use figment::{
    Metadata, Profile, Provider,
    error::Error,
    util::nest,
    value::{Dict, Map, Value},
};

const PREFIXES_KEY: &str = "prefixes";

/// Environment provider with list support for the `prefixes` key.
#[derive(Clone)]
pub struct OptionsEnv {
    inner: Env,
}

impl OptionsEnv {
    /// Create a provider reading variables that start with `prefix`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use param_config::OptionsEnv;
    /// let env = OptionsEnv::prefixed("PARAMCFG_");
    /// let _ = env;
    /// ```
    #[must_use]
    pub fn prefixed(prefix: &str) -> Self {
        Env::prefixed(prefix).into()
    }

    fn parse_value(key: &str, raw: &str) -> Value {
        let trimmed = raw.trim();
        if key.eq_ignore_ascii_case(PREFIXES_KEY) && !trimmed.starts_with('[') {
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|prefix| !prefix.is_empty())
                .map(|prefix| Value::from(prefix.to_owned()))
                .collect::<Vec<_>>()
                .into()
        } else {
            trimmed
                .parse()
                .unwrap_or_else(|_| Value::from(trimmed.to_owned()))
        }
    }
}

impl Provider for OptionsEnv {
    fn metadata(&self) -> Metadata {
        self.inner.metadata()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.inner.profile.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        for (k, v) in self.inner.iter() {
            let value = Self::parse_value(k.as_str(), &v);
            let Some(nested) = nest(k.as_str(), value).into_dict() else {
                return Err(Error::from(format!(
                    "environment key `{k}` produced a non-object value"
                )));
            };
            dict.extend(nested);
        }
        Ok(self.inner.profile.collect(dict))
    }
}

impl From<Env> for OptionsEnv {
    fn from(inner: Env) -> Self {
        Self { inner }
    }
}

impl Deref for OptionsEnv {
    type Target = Env;

    fn deref(&self) -> &Env {
        &self.inner
    }
}
