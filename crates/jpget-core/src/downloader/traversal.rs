//! Traversal-scoped state: the visited set and the pending work stack.
//!
//! Depth-first in declaration order without native recursion. Dependencies
//! are pushed in reverse so the first declared one is popped first, and a
//! coordinate is re-checked against the visited set when popped because an
//! earlier sibling's subtree may have reached it in the meantime.

use crate::coordinate::Coordinate;
use std::collections::HashSet;

#[derive(Debug)]
pub struct Traversal {
    visited: HashSet<String>,
    pending: Vec<Coordinate>,
}

impl Traversal {
    pub fn new(root: Coordinate) -> Self {
        Self {
            visited: HashSet::new(),
            pending: vec![root],
        }
    }

    /// Next coordinate to process, skipping any already visited.
    pub fn next_pending(&mut self) -> Option<Coordinate> {
        while let Some(coordinate) = self.pending.pop() {
            if !self.is_visited(&coordinate) {
                return Some(coordinate);
            }
        }
        None
    }

    /// Records `coordinate` as resolved and persisted.
    /// Returns false if its canonical key was already present.
    pub fn mark_visited(&mut self, coordinate: &Coordinate) -> bool {
        self.visited.insert(coordinate.canonical_key())
    }

    pub fn is_visited(&self, coordinate: &Coordinate) -> bool {
        self.visited.contains(&coordinate.canonical_key())
    }

    /// Schedules the not-yet-visited `dependencies` ahead of everything already pending.
    pub fn push_dependencies(&mut self, dependencies: Vec<Coordinate>) {
        for dependency in dependencies.into_iter().rev() {
            if !self.is_visited(&dependency) {
                self.pending.push(dependency);
            }
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
