// src/pipeline/frontier.rs

//! Crawl frontier: what has been visited and what is still pending.

use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::models::Identifier;

/// Owned traversal state for one crawl.
///
/// Every identifier is scheduled at most once: `push` is a single
/// check-and-insert against the set of everything ever scheduled, so an
/// identifier whose fetch failed is never queued again in the same run.
#[derive(Debug, Default)]
pub struct Frontier {
    scheduled: HashSet<Identifier>,
    pending: VecDeque<Identifier>,
    visited: BTreeSet<Identifier>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frontier holding only `root`.
    pub fn seeded(root: Identifier) -> Self {
        let mut frontier = Self::new();
        frontier.push(root);
        frontier
    }

    /// Queue an identifier unless it was ever scheduled before.
    pub fn push(&mut self, identifier: Identifier) -> bool {
        if !self.scheduled.insert(identifier.clone()) {
            return false;
        }
        self.pending.push_back(identifier);
        true
    }

    /// Queue every new identifier; returns how many were added.
    pub fn extend(&mut self, identifiers: impl IntoIterator<Item = Identifier>) -> usize {
        identifiers
            .into_iter()
            .filter(|id| self.push(id.clone()))
            .count()
    }

    pub fn pop(&mut self) -> Option<Identifier> {
        self.pending.pop_front()
    }

    /// Record a successfully fetched identifier.
    pub fn mark_visited(&mut self, identifier: Identifier) -> bool {
        self.visited.insert(identifier)
    }

    pub fn is_visited(&self, identifier: &Identifier) -> bool {
        self.visited.contains(identifier)
    }

    pub fn is_scheduled(&self, identifier: &Identifier) -> bool {
        self.scheduled.contains(identifier)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn visited(&self) -> &BTreeSet<Identifier> {
        &self.visited
    }

    pub fn into_visited(self) -> BTreeSet<Identifier> {
        self.visited
    }
}
