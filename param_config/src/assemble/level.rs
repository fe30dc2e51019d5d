//! Grouping of parameters into tree levels.

use std::collections::BTreeMap;

use crate::path::{depth, last_segment, relative_path, split_first};
use crate::source::Parameter;

/// Position of a parameter inside a named level.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChildKey {
    /// The value stored at the level's own path.
    Here,
    /// A path below the level, without the level's segment.
    Path(String),
}

impl ChildKey {
    /// The child's path as written into nested mappings. A value stored at
    /// the level itself keeps the `.` placeholder as its key.
    #[must_use]
    pub fn as_path(&self) -> &str {
        match self {
            Self::Here => ".",
            Self::Path(path) => path,
        }
    }

    /// Separator count of the child's path.
    #[must_use]
    pub fn depth(&self) -> usize {
        depth(self.as_path())
    }
}

/// Parameters of one named level keyed by their position below it.
pub type Level<'a> = BTreeMap<ChildKey, &'a Parameter>;

/// Parameters of one prefix grouped by level.
#[derive(Debug, Default)]
pub struct Levels<'a> {
    /// Parameters whose relative path is empty, keyed by their last segment.
    pub root: BTreeMap<String, &'a Parameter>,
    /// Parameters keyed by the first segment of their relative path.
    pub named: BTreeMap<String, Level<'a>>,
}

impl<'a> Levels<'a> {
    /// Groups `params` by the first segment of their path relative to
    /// `base`.
    ///
    /// Later parameters replace earlier ones that land on the same slot.
    #[must_use]
    pub fn group(params: &'a [Parameter], base: &str, strip_prefix: bool) -> Self {
        let mut levels = Self::default();
        for param in params {
            let relative = relative_path(&param.key, base, strip_prefix);
            if relative.is_empty() {
                levels
                    .root
                    .insert(last_segment(&param.key).to_owned(), param);
                continue;
            }
            let (head, rest) = split_first(relative);
            let child = rest.map_or(ChildKey::Here, |path| ChildKey::Path(path.to_owned()));
            levels
                .named
                .entry(head.to_owned())
                .or_default()
                .insert(child, param);
        }
        levels
    }
}
