//! In-memory parameter store.

use std::collections::BTreeMap;

use super::{FetchContext, Page, PagedParameterSource, Paginated, Parameter, ParameterSource};
use crate::error::SourceError;

const DEFAULT_PAGE_SIZE: usize = 10;

/// Paged store backed by a sorted map.
///
/// Listing `path` returns the parameter stored at `path` itself and every
/// parameter below it on a segment boundary, so `/app` matches `/app/a` but
/// not `/application`.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store returning ten parameters per page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// A store holding `pairs`.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Self::new();
        store.extend(pairs);
        store
    }

    /// Sets the number of parameters returned per page; zero is treated as
    /// one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Stores `value` under `key`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Stores every pair in `pairs`.
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    /// Number of stored parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_under(key: &str, path: &str) -> bool {
        let base = path.trim_end_matches('/');
        key.strip_prefix(base)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

impl PagedParameterSource for MemoryStore {
    fn fetch_page(&self, path: &str, next_token: Option<&str>) -> Result<Page, SourceError> {
        let start = match next_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|err| format!("invalid page token '{token}': {err}"))?,
            None => 0,
        };
        let mut matching = self
            .entries
            .iter()
            .filter(|(key, _)| Self::is_under(key, path))
            .skip(start);
        let parameters: Vec<Parameter> = matching
            .by_ref()
            .take(self.page_size)
            .map(|(key, value)| Parameter::new(key.as_str(), value.as_str()))
            .collect();
        let next_token = matching
            .next()
            .map(|_| (start + parameters.len()).to_string());
        Ok(Page {
            parameters,
            next_token,
        })
    }
}

impl ParameterSource for MemoryStore {
    fn fetch_parameters_under_path(
        &self,
        cx: &FetchContext,
        path: &str,
    ) -> Result<Vec<Parameter>, SourceError> {
        Paginated::new(self).fetch_parameters_under_path(cx, path)
    }
}
