//! Parameter-store collaborators.
//!
//! The builder only needs [`ParameterSource`]: list every parameter stored
//! recursively under a path. Stores that page their results implement
//! [`PagedParameterSource`] instead and are adapted with [`Paginated`], which
//! follows continuation tokens until the store reports none remaining.

use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::error::SourceError;

mod memory;

pub use memory::MemoryStore;

/// A single stored parameter.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Parameter {
    /// Slash-delimited absolute key, for example `/app/schema/types`.
    pub key: String,
    /// Raw stored value.
    pub value: String,
}

impl Parameter {
    /// Construct a parameter from its key and value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Per-call context handed to every fetch.
///
/// Sources honour the deadline between round trips; a request already in
/// flight is not interrupted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchContext {
    deadline: Option<Instant>,
}

impl FetchContext {
    /// A context without a deadline.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// A context that expires at `deadline`.
    #[must_use]
    pub const fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// A store that can list every parameter under a path.
pub trait ParameterSource {
    /// Returns all parameters whose key lies recursively under `path`.
    ///
    /// # Errors
    ///
    /// Returns the store's failure unchanged; the builder wraps it with the
    /// prefix being fetched.
    fn fetch_parameters_under_path(
        &self,
        cx: &FetchContext,
        path: &str,
    ) -> Result<Vec<Parameter>, SourceError>;
}

impl<S: ParameterSource + ?Sized> ParameterSource for &S {
    fn fetch_parameters_under_path(
        &self,
        cx: &FetchContext,
        path: &str,
    ) -> Result<Vec<Parameter>, SourceError> {
        (**self).fetch_parameters_under_path(cx, path)
    }
}

/// One page of a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Parameters returned by this round trip.
    pub parameters: Vec<Parameter>,
    /// Token for the following page, `None` on the last page.
    pub next_token: Option<String>,
}

/// A store that returns listings one page at a time.
pub trait PagedParameterSource {
    /// Fetches the page of parameters under `path` that starts at
    /// `next_token`, or the first page when it is `None`.
    ///
    /// # Errors
    ///
    /// Returns the store's failure for this page.
    fn fetch_page(&self, path: &str, next_token: Option<&str>) -> Result<Page, SourceError>;
}

impl<S: PagedParameterSource + ?Sized> PagedParameterSource for &S {
    fn fetch_page(&self, path: &str, next_token: Option<&str>) -> Result<Page, SourceError> {
        (**self).fetch_page(path, next_token)
    }
}

/// Failures raised while following a paged listing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// The call deadline passed before the next page was requested.
    #[error("deadline exceeded before page {page} of '{path}'")]
    DeadlineExceeded {
        /// Path being listed.
        path: String,
        /// One-based number of the page that was not requested.
        page: usize,
    },

    /// The store rejected a page request.
    #[error("page {page} of '{path}' failed: {source}")]
    Page {
        /// Path being listed.
        path: String,
        /// One-based number of the failed page.
        page: usize,
        /// Error returned by the store.
        #[source]
        source: SourceError,
    },
}

/// Adapts a [`PagedParameterSource`] into a [`ParameterSource`].
///
/// # Examples
///
/// ```rust
/// use param_config::source::{FetchContext, MemoryStore, Paginated, ParameterSource};
///
/// let store = MemoryStore::from_pairs([("/app/a", "1"), ("/app/b", "2"), ("/app/c", "3")])
///     .with_page_size(2);
/// let params = Paginated::new(store)
///     .fetch_parameters_under_path(&FetchContext::new(), "/app")?;
/// assert_eq!(params.len(), 3);
/// # Ok::<_, Box<dyn std::error::Error + Send + Sync>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Paginated<S> {
    inner: S,
}

impl<S> Paginated<S> {
    /// Wrap a paged store.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Returns the wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwraps the adapter.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: PagedParameterSource> ParameterSource for Paginated<S> {
    fn fetch_parameters_under_path(
        &self,
        cx: &FetchContext,
        path: &str,
    ) -> Result<Vec<Parameter>, SourceError> {
        let mut parameters = Vec::new();
        let mut next_token: Option<String> = None;
        let mut page = 0_usize;
        loop {
            page += 1;
            if cx.is_expired() {
                return Err(Box::new(FetchError::DeadlineExceeded {
                    path: path.to_owned(),
                    page,
                }));
            }
            let fetched = self
                .inner
                .fetch_page(path, next_token.as_deref())
                .map_err(|source| FetchError::Page {
                    path: path.to_owned(),
                    page,
                    source,
                })?;
            debug!(path, page, count = fetched.parameters.len(), "fetched parameter page");
            parameters.extend(fetched.parameters);
            match fetched.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }
        Ok(parameters)
    }
}
