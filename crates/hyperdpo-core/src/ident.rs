// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier types for hypergraph vertices and edges.
use core::fmt;

/// Canonical 256-bit digest used for structural hypergraph fingerprints.
pub type Hash = [u8; 32];

/// Opaque identifier for a vertex.
///
/// Vertex ids carry no attributes beyond identity. Sharing a `VertexId`
/// between the `L`, `I` and `R` graphs of a rule is what glues them together.
/// Ordering is lexicographic on the underlying string and is the traversal
/// order used by the matcher.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VertexId(String);

impl VertexId {
    /// Wraps a label as a vertex identifier.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label this id was built from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VertexId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for VertexId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier for a hyperedge.
///
/// Edges decoded from the wire format get positional ids (`e0`, `e1`, ...),
/// see [`EdgeId::positional`]. Edges created by a rewrite get fresh ids from
/// an [`IdSource`](crate::IdSource).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct EdgeId(String);

impl EdgeId {
    /// Wraps a label as an edge identifier.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Positional id for the `index`-th edge of an edge list (`e{index}`).
    pub fn positional(index: usize) -> Self {
        Self(format!("e{index}"))
    }

    /// Returns the label this id was built from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EdgeId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for EdgeId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
