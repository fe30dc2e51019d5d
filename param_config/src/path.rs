//! Classification of slash-delimited parameter keys.
//!
//! Keys are treated as opaque text split on `/`; no normalisation beyond the
//! trimming described on each helper is applied.

/// Returns `key` relative to `base`.
///
/// With `strip_prefix`, a trailing slash is removed from `base`, `base` is
/// removed from the front of `key` when present, and surrounding slashes are
/// trimmed. Without it, `key` is returned untouched.
///
/// # Examples
///
/// ```rust
/// use param_config::path::relative_path;
///
/// assert_eq!(relative_path("/app/schema/types", "/app/", true), "schema/types");
/// assert_eq!(relative_path("/app", "/app", true), "");
/// assert_eq!(relative_path("/app/schema", "/app", false), "/app/schema");
/// ```
#[must_use]
pub fn relative_path<'a>(key: &'a str, base: &str, strip_prefix: bool) -> &'a str {
    if !strip_prefix {
        return key;
    }
    let trimmed_base = base.strip_suffix('/').unwrap_or(base);
    key.strip_prefix(trimmed_base)
        .unwrap_or(key)
        .trim_matches('/')
}

/// Returns the final `/`-separated segment of `key`.
///
/// A key ending in `/` has an empty final segment.
#[must_use]
pub fn last_segment(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Number of separators in a child path, used by the sequence heuristic.
#[must_use]
pub fn depth(path: &str) -> usize {
    path.matches('/').count()
}

/// Splits `path` into its first segment and the remainder after it.
///
/// Returns `None` for the remainder when `path` has a single segment.
#[must_use]
pub fn split_first(path: &str) -> (&str, Option<&str>) {
    match path.split_once('/') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}
