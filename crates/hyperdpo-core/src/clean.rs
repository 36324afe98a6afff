// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Canonical cleanup between evolution steps.
use std::collections::BTreeSet;

use crate::hypergraph::Hypergraph;

/// Removes singletons, then reduces the edge set to its toplexes.
///
/// Idempotent: `clean(&clean(g)) == clean(g)`.
pub fn clean(graph: &Hypergraph) -> Hypergraph {
    toplexes(&remove_singletons(graph))
}

/// Drops every vertex that belongs to no edge. Edges are untouched.
pub fn remove_singletons(graph: &Hypergraph) -> Hypergraph {
    let mut out = graph.clone();
    out.vertices.retain(|v| graph.edges.values().any(|members| members.contains(v)));
    out
}

/// Keeps only inclusion-maximal edges.
///
/// An edge is discarded when its vertex set is a strict subset of another
/// edge's vertex set; edges with identical vertex sets are all kept. The
/// result's vertices are exactly those of the surviving edges.
pub fn toplexes(graph: &Hypergraph) -> Hypergraph {
    let mut out = Hypergraph::new();
    for (id, members) in graph.edges() {
        let dominated = graph
            .edges()
            .any(|(_, other)| members.len() < other.len() && members.is_subset(other));
        if !dominated {
            out.edges.insert(id.clone(), members.clone());
        }
    }
    out.vertices = out.edges.values().flatten().cloned().collect::<BTreeSet<_>>();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypergraph::EdgeSet;
    use crate::ident::{EdgeId, VertexId};

    fn members(labels: &[&str]) -> EdgeSet {
        labels.iter().map(|l| VertexId::from(*l)).collect()
    }

    #[test]
    fn singletons_are_removed() {
        let graph = Hypergraph::from_parts(
            [VertexId::from("a"), VertexId::from("b"), VertexId::from("lonely")],
            [(EdgeId::from("e0"), members(&["a", "b"]))],
        )
        .unwrap();
        let cleaned = remove_singletons(&graph);
        assert_eq!(cleaned.vertex_count(), 2);
        assert_eq!(cleaned.edge_count(), 1);
    }

    #[test]
    fn strict_subsets_are_dropped_duplicates_kept() {
        let graph = Hypergraph::from_edges([
            (EdgeId::from("e0"), members(&["a", "b", "c"])),
            (EdgeId::from("e1"), members(&["a", "b"])),
            (EdgeId::from("e2"), members(&["c", "d"])),
            (EdgeId::from("e3"), members(&["c", "d"])),
        ])
        .unwrap();
        let top = toplexes(&graph);
        let ids: Vec<&str> = top.edges().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["e0", "e2", "e3"]);
        assert_eq!(top.vertex_count(), 4);
    }

    #[test]
    fn clean_is_idempotent_on_nested_edges() {
        let graph = Hypergraph::from_parts(
            ["a", "b", "c", "z"].map(VertexId::from),
            [
                (EdgeId::from("e0"), members(&["a"])),
                (EdgeId::from("e1"), members(&["a", "b"])),
                (EdgeId::from("e2"), members(&["a", "b", "c"])),
            ],
        )
        .unwrap();
        let once = clean(&graph);
        assert_eq!(once.edge_count(), 1);
        assert_eq!(clean(&once), once);
    }
}
