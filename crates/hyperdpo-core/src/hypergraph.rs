// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed hypergraph storage used by the matcher, the pushout builders and tests.
//!
//! Determinism contract
//! - Vertices and edges live in `BTreeSet`/`BTreeMap`, so iteration is always
//!   in ascending id order. The matcher relies on this order for its
//!   enumeration sequence.
//! - The structural digest ignores edge ids: it hashes the sorted vertex list
//!   and the sorted multiset of edge vertex sets, each length-prefixed with an
//!   8-byte little-endian count.
use std::collections::{BTreeMap, BTreeSet};

use blake3::Hasher;

use crate::error::ValidationError;
use crate::ident::{EdgeId, Hash, VertexId};

/// Vertex set of a single hyperedge.
pub type EdgeSet = BTreeSet<VertexId>;

/// Vertex set plus a mapping from edge id to a non-empty vertex set.
///
/// Invariant: every vertex referenced by an edge is a member of the vertex
/// set, and no edge is empty. All constructors and mutators uphold it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hypergraph {
    pub(crate) vertices: BTreeSet<VertexId>,
    pub(crate) edges: BTreeMap<EdgeId, EdgeSet>,
}

impl Hypergraph {
    /// Creates an empty hypergraph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hypergraph from an edge dictionary; vertices are implied by
    /// the edges.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyEdge`] if any edge has no vertices.
    pub fn from_edges<I>(edges: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (EdgeId, EdgeSet)>,
    {
        let mut graph = Self::new();
        for (id, members) in edges {
            graph.vertices.extend(members.iter().cloned());
            graph.insert_edge(id, members)?;
        }
        Ok(graph)
    }

    /// Builds a hypergraph from an explicit vertex set and edge dictionary.
    ///
    /// Unlike [`Hypergraph::from_edges`], isolated vertices are kept and edges
    /// must only reference listed vertices.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyEdge`] or
    /// [`ValidationError::UnknownVertex`] when the invariant would be broken.
    pub fn from_parts<V, E>(vertices: V, edges: E) -> Result<Self, ValidationError>
    where
        V: IntoIterator<Item = VertexId>,
        E: IntoIterator<Item = (EdgeId, EdgeSet)>,
    {
        let mut graph = Self {
            vertices: vertices.into_iter().collect(),
            edges: BTreeMap::new(),
        };
        for (id, members) in edges {
            graph.insert_edge(id, members)?;
        }
        Ok(graph)
    }

    /// Iterate over all vertices in ascending id order.
    pub fn vertices(&self) -> impl Iterator<Item = &VertexId> {
        self.vertices.iter()
    }

    /// Iterate over all edges `(id, vertex set)` in ascending id order.
    pub fn edges(&self) -> impl Iterator<Item = (&EdgeId, &EdgeSet)> {
        self.edges.iter()
    }

    /// Returns the vertex set of an edge when it exists.
    pub fn edge(&self, id: &EdgeId) -> Option<&EdgeSet> {
        self.edges.get(id)
    }

    /// Returns `true` if `vertex` is a member of the vertex set.
    #[must_use]
    pub fn contains_vertex(&self, vertex: &VertexId) -> bool {
        self.vertices.contains(vertex)
    }

    /// Returns `true` if an edge with `id` exists.
    #[must_use]
    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains_key(id)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when the hypergraph has neither vertices nor edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }

    /// Adds a vertex. Returns `false` if it was already present.
    pub fn insert_vertex(&mut self, vertex: VertexId) -> bool {
        self.vertices.insert(vertex)
    }

    /// Inserts or replaces an edge, returning the previous vertex set.
    ///
    /// Every member must already be a vertex of the hypergraph; call
    /// [`Hypergraph::insert_vertex`] first for new vertices.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyEdge`] for an empty vertex set and
    /// [`ValidationError::UnknownVertex`] for a member missing from the graph.
    pub fn insert_edge(
        &mut self,
        id: EdgeId,
        members: EdgeSet,
    ) -> Result<Option<EdgeSet>, ValidationError> {
        if members.is_empty() {
            return Err(ValidationError::EmptyEdge { edge: id });
        }
        if let Some(vertex) = members.iter().find(|v| !self.vertices.contains(*v)) {
            return Err(ValidationError::UnknownVertex {
                edge: id,
                vertex: vertex.clone(),
            });
        }
        Ok(self.edges.insert(id, members))
    }

    /// Removes an edge, returning its vertex set. Vertices are left in place.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Option<EdgeSet> {
        self.edges.remove(id)
    }

    /// Removes a vertex together with every edge incident to it.
    ///
    /// Returns the ids of the removed edges in ascending order.
    pub fn remove_vertex_cascade(&mut self, vertex: &VertexId) -> Vec<EdgeId> {
        let incident: Vec<EdgeId> = self.incident_edges(vertex).cloned().collect();
        for id in &incident {
            self.edges.remove(id);
        }
        self.vertices.remove(vertex);
        incident
    }

    /// Iterate over the ids of edges whose vertex set contains `vertex`.
    pub fn incident_edges<'a>(&'a self, vertex: &'a VertexId) -> impl Iterator<Item = &'a EdgeId> {
        self.edges
            .iter()
            .filter(move |(_, members)| members.contains(vertex))
            .map(|(id, _)| id)
    }

    /// Returns `true` if no edge contains `vertex`.
    #[must_use]
    pub fn is_isolated(&self, vertex: &VertexId) -> bool {
        self.incident_edges(vertex).next().is_none()
    }

    /// Computes an edge-id independent BLAKE3 fingerprint of the structure.
    ///
    /// Two hypergraphs share a digest iff they have the same vertex set and
    /// the same multiset of edge vertex sets.
    ///
    /// Algorithm
    /// 1) Update with the vertex count, then each vertex (length + bytes) in
    ///    ascending order.
    /// 2) Collect every edge's vertex set, sort the collection, update with its
    ///    length, then for each edge its member count and members.
    #[must_use]
    pub fn structural_digest(&self) -> Hash {
        let mut hasher = Hasher::new();
        hasher.update(b"hypergraph:");
        hasher.update(&(self.vertices.len() as u64).to_le_bytes());
        for vertex in &self.vertices {
            update_label(&mut hasher, vertex.as_str());
        }
        let mut shapes: Vec<&EdgeSet> = self.edges.values().collect();
        shapes.sort();
        hasher.update(&(shapes.len() as u64).to_le_bytes());
        for members in shapes {
            hasher.update(&(members.len() as u64).to_le_bytes());
            for vertex in members {
                update_label(&mut hasher, vertex.as_str());
            }
        }
        hasher.finalize().into()
    }

    /// Hex rendering of [`Hypergraph::structural_digest`].
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.structural_digest())
    }
}

fn update_label(hasher: &mut Hasher, label: &str) {
    hasher.update(&(label.len() as u64).to_le_bytes());
    hasher.update(label.as_bytes());
}
