//! Parameter sources that record or fail fetches.
//!
//! # Examples
//!
//! ```
//! use param_config::{ConfigBuilder, FetchContext, MemoryStore};
//! use param_config_test_helpers::store::RecordingStore;
//!
//! let store = RecordingStore::new(MemoryStore::from_pairs([("/a/x", "1")]));
//! let builder = ConfigBuilder::new(&store);
//! builder
//!     .build_json_from_prefix(&FetchContext::new(), "/a", false)
//!     .expect("build");
//! assert_eq!(store.calls(), vec!["/a".to_owned()]);
//! ```

use param_config::{FetchContext, Parameter, ParameterSource, SourceError};
use parking_lot::Mutex;

/// Wraps a source and records every path it is asked for.
#[derive(Debug)]
pub struct RecordingStore<S> {
    inner: S,
    calls: Mutex<Vec<String>>,
}

impl<S> RecordingStore<S> {
    /// Wraps `inner` with an empty call log.
    pub const fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Paths requested so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl<S: ParameterSource> ParameterSource for RecordingStore<S> {
    fn fetch_parameters_under_path(
        &self,
        cx: &FetchContext,
        path: &str,
    ) -> Result<Vec<Parameter>, SourceError> {
        self.calls.lock().push(path.to_owned());
        self.inner.fetch_parameters_under_path(cx, path)
    }
}

/// Delegates to an inner source except for one path, which always fails.
#[derive(Debug)]
pub struct FailingStore<S> {
    inner: S,
    failing_path: String,
    message: String,
}

impl<S> FailingStore<S> {
    /// Fails fetches of `failing_path` with `message`.
    pub fn new(inner: S, failing_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            inner,
            failing_path: failing_path.into(),
            message: message.into(),
        }
    }
}

impl<S: ParameterSource> ParameterSource for FailingStore<S> {
    fn fetch_parameters_under_path(
        &self,
        cx: &FetchContext,
        path: &str,
    ) -> Result<Vec<Parameter>, SourceError> {
        if path == self.failing_path {
            return Err(self.message.clone().into());
        }
        self.inner.fetch_parameters_under_path(cx, path)
    }
}
