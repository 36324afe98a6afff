// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rewrite rule definitions.
use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::hypergraph::{EdgeSet, Hypergraph};
use crate::ident::{EdgeId, VertexId};

/// Immutable DPO rule `L <- I -> R`.
///
/// The span maps are implicit: a vertex id shared between graphs denotes the
/// same vertex. `I` is preserved by a rewrite, `L \ I` is deleted and `R \ I`
/// is created.
///
/// Edges are paired by vertex set. Each `I` edge (ascending id) claims one
/// unclaimed `L` edge and one unclaimed `R` edge with the same vertex set,
/// preferring the edge with its own id. When both exist the pair is kept:
/// the `L` edge is not deleted and the `R` edge is not re-created. An `I`
/// edge without both partners only contributes its vertices, so edge ids
/// and list positions never decide what a rule does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    left: Hypergraph,
    interface: Hypergraph,
    right: Hypergraph,
    kept_left: BTreeSet<EdgeId>,
    kept_right: BTreeSet<EdgeId>,
}

/// Unclaimed edge of `graph` with vertex set `members`, `id` first.
fn partner(
    graph: &Hypergraph,
    id: &EdgeId,
    members: &EdgeSet,
    claimed: &BTreeSet<EdgeId>,
) -> Option<EdgeId> {
    if graph.edge(id) == Some(members) && !claimed.contains(id) {
        return Some(id.clone());
    }
    graph
        .edges()
        .find(|(other, set)| *set == members && !claimed.contains(*other))
        .map(|(other, _)| other.clone())
}

fn kept_edges(
    left: &Hypergraph,
    interface: &Hypergraph,
    right: &Hypergraph,
) -> (BTreeSet<EdgeId>, BTreeSet<EdgeId>) {
    let mut kept_left = BTreeSet::new();
    let mut kept_right = BTreeSet::new();
    for (id, members) in interface.edges() {
        let pair = (
            partner(left, id, members, &kept_left),
            partner(right, id, members, &kept_right),
        );
        if let (Some(l), Some(r)) = pair {
            kept_left.insert(l);
            kept_right.insert(r);
        }
    }
    (kept_left, kept_right)
}

impl RewriteRule {
    /// Validates and builds a rule.
    ///
    /// # Errors
    /// Returns [`ValidationError::InterfaceNotInLeft`] or
    /// [`ValidationError::InterfaceNotInRight`] when an interface vertex is
    /// missing from the pattern or the replacement.
    pub fn new(
        left: Hypergraph,
        interface: Hypergraph,
        right: Hypergraph,
    ) -> Result<Self, ValidationError> {
        if let Some(vertex) = interface.vertices().find(|v| !left.contains_vertex(v)) {
            return Err(ValidationError::InterfaceNotInLeft {
                vertex: vertex.clone(),
            });
        }
        if let Some(vertex) = interface.vertices().find(|v| !right.contains_vertex(v)) {
            return Err(ValidationError::InterfaceNotInRight {
                vertex: vertex.clone(),
            });
        }
        Ok(Self::assemble(left, interface, right))
    }

    fn assemble(left: Hypergraph, interface: Hypergraph, right: Hypergraph) -> Self {
        let (kept_left, kept_right) = kept_edges(&left, &interface, &right);
        Self {
            left,
            interface,
            right,
            kept_left,
            kept_right,
        }
    }

    /// Rule with `L = I = R = graph`; every application is a no-op.
    pub fn identity(graph: Hypergraph) -> Self {
        Self::assemble(graph.clone(), graph.clone(), graph)
    }

    /// Pattern `L`.
    pub fn left(&self) -> &Hypergraph {
        &self.left
    }

    /// Interface `I`.
    pub fn interface(&self) -> &Hypergraph {
        &self.interface
    }

    /// Replacement `R`.
    pub fn right(&self) -> &Hypergraph {
        &self.right
    }

    /// Pattern vertices that are not part of the interface (`L \ I`).
    pub fn deleted_vertices(&self) -> impl Iterator<Item = &VertexId> {
        self.left
            .vertices()
            .filter(|v| !self.interface.contains_vertex(v))
    }

    /// Replacement vertices that are not part of the interface (`R \ I`).
    pub fn created_vertices(&self) -> impl Iterator<Item = &VertexId> {
        self.right
            .vertices()
            .filter(|v| !self.interface.contains_vertex(v))
    }

    /// Returns `true` if the `L` edge `id` is kept through `I`.
    ///
    /// A kept edge incident to a deleted vertex still disappears with it.
    #[must_use]
    pub fn preserves_left_edge(&self, id: &EdgeId) -> bool {
        self.kept_left.contains(id)
    }

    /// Returns `true` if the `R` edge `id` is the image of a kept `L` edge
    /// and therefore not re-created by the pushout.
    #[must_use]
    pub fn preserves_right_edge(&self, id: &EdgeId) -> bool {
        self.kept_right.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypergraph::EdgeSet;

    fn graph(edges: &[(&str, &[&str])]) -> Hypergraph {
        Hypergraph::from_edges(edges.iter().map(|(id, members)| {
            (
                EdgeId::from(*id),
                members.iter().map(|m| VertexId::from(*m)).collect::<EdgeSet>(),
            )
        }))
        .unwrap()
    }

    #[test]
    fn interface_must_live_in_left() {
        let err = RewriteRule::new(
            graph(&[("e0", &["x"])]),
            graph(&[("e0", &["x", "q"])]),
            graph(&[("e0", &["x", "q"])]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InterfaceNotInLeft {
                vertex: VertexId::from("q")
            }
        );
    }

    #[test]
    fn interface_must_live_in_right() {
        let err = RewriteRule::new(
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["y"])]),
            graph(&[("e0", &["x"])]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InterfaceNotInRight {
                vertex: VertexId::from("y")
            }
        );
    }

    #[test]
    fn deleted_and_created_vertices() {
        let rule = RewriteRule::new(
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x"])]),
            graph(&[("e0", &["x", "z"])]),
        )
        .unwrap();
        let deleted: Vec<&str> = rule.deleted_vertices().map(VertexId::as_str).collect();
        let created: Vec<&str> = rule.created_vertices().map(VertexId::as_str).collect();
        assert_eq!(deleted, ["y"]);
        assert_eq!(created, ["z"]);
    }

    #[test]
    fn interface_edge_with_other_vertex_set_preserves_nothing() {
        // I's e0 = {x} only carries x: L's e0 is deleted, R's e0 is created.
        let rule = RewriteRule::new(
            graph(&[("e0", &["x", "y"]), ("e1", &["y"])]),
            graph(&[("e0", &["x"])]),
            graph(&[("e0", &["x", "z"])]),
        )
        .unwrap();
        assert!(!rule.preserves_left_edge(&EdgeId::from("e0")));
        assert!(!rule.preserves_right_edge(&EdgeId::from("e0")));
        assert!(!rule.preserves_left_edge(&EdgeId::from("e1")));
    }

    #[test]
    fn kept_edges_are_paired_by_vertex_set_not_position() {
        let rule = RewriteRule::new(
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x", "z"]), ("e1", &["x", "y"])]),
        )
        .unwrap();
        assert!(rule.preserves_left_edge(&EdgeId::from("e0")));
        assert!(!rule.preserves_right_edge(&EdgeId::from("e0")));
        assert!(rule.preserves_right_edge(&EdgeId::from("e1")));
    }

    #[test]
    fn interface_edge_missing_from_right_deletes_the_left_edge() {
        let rule = RewriteRule::new(
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x", "y"])]),
            Hypergraph::from_parts(["x", "y"].map(VertexId::from), std::iter::empty()).unwrap(),
        )
        .unwrap();
        assert!(!rule.preserves_left_edge(&EdgeId::from("e0")));
    }

    #[test]
    fn parallel_interface_edges_claim_distinct_partners() {
        let rule = RewriteRule::new(
            graph(&[("e0", &["x", "y"]), ("e1", &["x", "y"])]),
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x", "y"])]),
        )
        .unwrap();
        assert!(rule.preserves_left_edge(&EdgeId::from("e0")));
        assert!(!rule.preserves_left_edge(&EdgeId::from("e1")));
    }

    #[test]
    fn shared_edge_is_preserved_on_both_sides() {
        let rule = RewriteRule::new(
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x", "y"]), ("e1", &["x", "z"])]),
        )
        .unwrap();
        assert!(rule.preserves_left_edge(&EdgeId::from("e0")));
        assert!(rule.preserves_right_edge(&EdgeId::from("e0")));
        assert!(!rule.preserves_right_edge(&EdgeId::from("e1")));
    }
}
