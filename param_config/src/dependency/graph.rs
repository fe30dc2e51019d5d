//! Dependency graph over type definitions and its topological order.

use std::collections::{BTreeSet, HashMap, VecDeque};

use super::entry::TypedEntry;
use crate::error::{BuildError, BuildResult};

/// Directed graph whose nodes are positions in a `types` sequence.
///
/// Edges point from a dependency to its dependents: if `B` has a field of
/// type `A`, the edge is `A -> B`, and `A` sorts before `B`. References to
/// names that are not declared in the sequence (scalars, external types)
/// add no edge.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    names: Vec<String>,
    dependents: Vec<BTreeSet<usize>>,
    in_degree: Vec<usize>,
}

impl DependencyGraph {
    /// Builds the graph for `entries`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedSchema`] when two entries declare the
    /// same name.
    pub fn from_entries(entries: &[TypedEntry]) -> BuildResult<Self> {
        let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if index_of.insert(entry.name.as_str(), index).is_some() {
                return Err(BuildError::malformed_schema(
                    format!("types[{index}].name"),
                    format!("duplicate type name '{}'", entry.name),
                ));
            }
        }

        let mut dependents = vec![BTreeSet::new(); entries.len()];
        let mut in_degree = vec![0_usize; entries.len()];
        for (dependent, entry) in entries.iter().enumerate() {
            let dependencies: BTreeSet<usize> = entry
                .references()
                .filter_map(|name| index_of.get(name).copied())
                .collect();
            for dependency in dependencies {
                if let Some(edges) = dependents.get_mut(dependency) {
                    edges.insert(dependent);
                }
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree += 1;
                }
            }
        }

        Ok(Self {
            names: entries.iter().map(|entry| entry.name.clone()).collect(),
            dependents,
            in_degree,
        })
    }

    /// Number of declared types.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of distinct dependency edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependents.iter().map(BTreeSet::len).sum()
    }

    /// Orders node positions so every dependency precedes its dependents,
    /// using Kahn's algorithm.
    ///
    /// Types with no ordering constraint between them keep their declaration
    /// order relative to each other whenever they become ready together.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::CyclicDependency`] listing every type that could
    /// not be ordered when the references form a cycle.
    pub fn topological_order(&self) -> BuildResult<Vec<usize>> {
        let mut in_degree = self.in_degree.clone();
        let mut queue: VecDeque<usize> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(index, _)| index)
            .collect();
        let mut order = Vec::with_capacity(self.node_count());

        while let Some(current) = queue.pop_front() {
            order.push(current);
            let Some(edges) = self.dependents.get(current) else {
                continue;
            };
            for &dependent in edges {
                if let Some(degree) = in_degree.get_mut(dependent) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        if order.len() < self.node_count() {
            let placed: BTreeSet<usize> = order.iter().copied().collect();
            let participants = self
                .names
                .iter()
                .enumerate()
                .filter(|(index, _)| !placed.contains(index))
                .map(|(_, name)| name.clone())
                .collect();
            return Err(BuildError::CyclicDependency { participants });
        }
        Ok(order)
    }
}
