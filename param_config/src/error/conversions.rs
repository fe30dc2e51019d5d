//! Trait-based conversions between external error types and `BuildError`.

use figment::Error as FigmentError;

use super::{BuildError, BuildResult, SourceError};

impl From<FigmentError> for BuildError {
    fn from(e: FigmentError) -> Self {
        Self::Options(Box::new(e))
    }
}

/// Extension for attaching the fetched prefix to source failures.
///
/// Mirrors the `.map_err(|e| BuildError::source_fetch(path, e))` pattern that
/// every fetch site would otherwise repeat.
pub trait FetchResultExt<T> {
    /// Convert a source failure into [`BuildError::SourceFetch`] for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::SourceFetch`] wrapping the original error.
    fn for_prefix(self, path: &str) -> BuildResult<T>;
}

impl<T> FetchResultExt<T> for Result<T, SourceError> {
    fn for_prefix(self, path: &str) -> BuildResult<T> {
        self.map_err(|source| BuildError::source_fetch(path, source))
    }
}
