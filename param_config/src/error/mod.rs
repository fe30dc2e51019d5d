//! Error types produced while building configuration documents.

mod constructors;
mod conversions;
mod types;

pub use conversions::FetchResultExt;
pub use types::{BuildError, SourceError};

/// Result alias used throughout the crate.
pub type BuildResult<T> = Result<T, BuildError>;
