//! Dependency graphs attached to a sentence.
//!
//! These are inert edge lists. Traversal and analytics over them are not
//! provided here.

use serde::{Deserialize, Serialize};

/// Graph name used by processors for Stanford basic dependencies.
pub const STANFORD_BASIC_DEPENDENCIES: &str = "stanford-basic";

/// Graph name used by processors for Stanford collapsed dependencies.
pub const STANFORD_COLLAPSED_DEPENDENCIES: &str = "stanford-collapsed";

/// A labeled, directed edge between two token indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// 0-based index of the token serving as the relation's source.
    pub source: usize,
    /// 0-based index of the token serving as the relation's destination.
    pub destination: usize,
    /// Label for the relation.
    pub relation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedGraph {
    /// Roots of the graph; generally a single token index.
    pub roots: Vec<usize>,
    pub edges: Vec<Edge>,
}

impl DirectedGraph {
    /// Edges leaving `token`, in stored order.
    pub fn outgoing(&self, token: usize) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.source == token)
    }

    /// Edges arriving at `token`, in stored order.
    pub fn incoming(&self, token: usize) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.destination == token)
    }
}
