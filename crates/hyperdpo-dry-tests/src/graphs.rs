// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hypergraph builders for tests.
//!
//! Every builder panics on malformed input: fixtures are expected to be valid.

use hyperdpo_core::{EdgeId, EdgeSet, Hypergraph, VertexId};

/// Builds an [`EdgeSet`] from labels.
pub fn edge_set(labels: &[&str]) -> EdgeSet {
    labels.iter().map(|l| VertexId::from(*l)).collect()
}

/// Builds a hypergraph from `(edge id, member labels)` pairs.
///
/// # Panics
/// Panics if an edge is empty.
#[allow(clippy::expect_used)]
pub fn graph_from_edges(edges: &[(&str, &[&str])]) -> Hypergraph {
    Hypergraph::from_edges(
        edges
            .iter()
            .map(|(id, members)| (EdgeId::from(*id), edge_set(members))),
    )
    .expect("fixture edges must be non-empty")
}

/// Like [`graph_from_edges`] but with extra (possibly isolated) vertices.
///
/// # Panics
/// Panics if an edge is empty or names a vertex missing from `vertices`.
#[allow(clippy::expect_used)]
pub fn graph_with_vertices(vertices: &[&str], edges: &[(&str, &[&str])]) -> Hypergraph {
    Hypergraph::from_parts(
        vertices.iter().map(|v| VertexId::from(*v)),
        edges
            .iter()
            .map(|(id, members)| (EdgeId::from(*id), edge_set(members))),
    )
    .expect("fixture edges must reference listed vertices")
}

/// Path `v0 - v1 - ... - v{len}` of binary edges `e0 .. e{len-1}`.
///
/// # Panics
/// Never for the generated shape; see [`Hypergraph::insert_edge`].
#[allow(clippy::expect_used)]
pub fn path_graph(len: usize) -> Hypergraph {
    let mut graph = Hypergraph::new();
    for i in 0..=len {
        graph.insert_vertex(VertexId::new(format!("v{i}")));
    }
    for i in 0..len {
        let members = [format!("v{i}"), format!("v{}", i + 1)]
            .into_iter()
            .map(VertexId::new)
            .collect();
        graph
            .insert_edge(EdgeId::positional(i), members)
            .expect("path vertices were inserted first");
    }
    graph
}

/// Vertex labels of `graph` in ascending order.
pub fn vertex_labels(graph: &Hypergraph) -> Vec<String> {
    graph.vertices().map(ToString::to_string).collect()
}
