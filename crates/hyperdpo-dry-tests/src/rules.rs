// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rule builders for tests.
//!
//! [`RuleBuilder`] accumulates the three sides of a rule edge by edge; the
//! canonical rules below are the ones most tests share.

use hyperdpo_core::{EdgeId, Hypergraph, RewriteRule, ValidationError, VertexId};

use crate::graphs::edge_set;

/// Builder for a `(L, I, R)` rule.
///
/// Edge helpers add the member vertices automatically; use the `*_vertex`
/// helpers for isolated interface or replacement vertices.
#[derive(Debug, Clone, Default)]
pub struct RuleBuilder {
    left: Hypergraph,
    interface: Hypergraph,
    right: Hypergraph,
}

#[allow(clippy::expect_used)]
fn add_edge(graph: &mut Hypergraph, id: &str, members: &[&str]) {
    for member in members {
        graph.insert_vertex(VertexId::from(*member));
    }
    graph
        .insert_edge(EdgeId::from(id), edge_set(members))
        .expect("fixture edges must be non-empty");
}

impl RuleBuilder {
    /// Empty rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern edge.
    ///
    /// # Panics
    /// Panics if `members` is empty, as do the other edge helpers.
    pub fn left_edge(mut self, id: &str, members: &[&str]) -> Self {
        add_edge(&mut self.left, id, members);
        self
    }

    /// Adds an interface edge.
    pub fn interface_edge(mut self, id: &str, members: &[&str]) -> Self {
        add_edge(&mut self.interface, id, members);
        self
    }

    /// Adds an isolated interface vertex.
    pub fn interface_vertex(mut self, label: &str) -> Self {
        self.interface.insert_vertex(VertexId::from(label));
        self
    }

    /// Adds a replacement edge.
    pub fn right_edge(mut self, id: &str, members: &[&str]) -> Self {
        add_edge(&mut self.right, id, members);
        self
    }

    /// Adds an isolated replacement vertex.
    pub fn right_vertex(mut self, label: &str) -> Self {
        self.right.insert_vertex(VertexId::from(label));
        self
    }

    /// Same edge in `L`, `I` and `R`.
    pub fn kept_edge(self, id: &str, members: &[&str]) -> Self {
        self.left_edge(id, members)
            .interface_edge(id, members)
            .right_edge(id, members)
    }

    /// Validates and builds the rule.
    ///
    /// # Errors
    /// See [`RewriteRule::new`].
    pub fn try_build(self) -> Result<RewriteRule, ValidationError> {
        RewriteRule::new(self.left, self.interface, self.right)
    }

    /// Builds the rule.
    ///
    /// # Panics
    /// Panics if the rule is invalid.
    #[allow(clippy::expect_used)]
    pub fn build(self) -> RewriteRule {
        self.try_build().expect("fixture rule must be valid")
    }
}

/// Keeps `{x, y}` and attaches a new vertex `z` to `x`.
///
/// `L = {e0:{x,y}}`, `I = {e0:{x,y}}`, `R = {e0:{x,y}, e1:{x,z}}`.
pub fn pendant_edge_rule() -> RewriteRule {
    RuleBuilder::new()
        .kept_edge("e0", &["x", "y"])
        .right_edge("e1", &["x", "z"])
        .build()
}

/// Deletes the edge `{x, y}` and the vertex `y`, keeping `x`.
///
/// `L = {e0:{x,y}}`, `I = vertex {x}`, `R = vertex {x}`.
pub fn pendant_vertex_deletion_rule() -> RewriteRule {
    RuleBuilder::new()
        .left_edge("e0", &["x", "y"])
        .interface_vertex("x")
        .right_vertex("x")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pendant_edge_rule_creates_one_vertex() {
        let rule = pendant_edge_rule();
        let created: Vec<&str> = rule.created_vertices().map(VertexId::as_str).collect();
        assert_eq!(created, ["z"]);
        assert!(rule.preserves_left_edge(&EdgeId::from("e0")));
        assert!(!rule.preserves_right_edge(&EdgeId::from("e1")));
    }

    #[test]
    fn deletion_rule_deletes_y() {
        let rule = pendant_vertex_deletion_rule();
        let deleted: Vec<&str> = rule.deleted_vertices().map(VertexId::as_str).collect();
        assert_eq!(deleted, ["y"]);
        assert_eq!(rule.right().edge_count(), 0);
    }

    #[test]
    #[should_panic(expected = "fixture edges must be non-empty")]
    fn empty_fixture_edge_panics() {
        let _ = RuleBuilder::new().left_edge("e0", &[]);
    }

    #[test]
    fn reordered_pendant_rule_keeps_the_matching_edge() {
        let rule = RuleBuilder::new()
            .left_edge("e0", &["x", "y"])
            .interface_edge("e0", &["x", "y"])
            .right_edge("e0", &["x", "z"])
            .right_edge("e1", &["x", "y"])
            .build();
        assert!(rule.preserves_left_edge(&EdgeId::from("e0")));
        assert!(!rule.preserves_right_edge(&EdgeId::from("e0")));
        assert!(rule.preserves_right_edge(&EdgeId::from("e1")));
    }

    #[test]
    fn interface_outside_left_is_rejected() {
        let err = RuleBuilder::new()
            .left_edge("e0", &["x"])
            .interface_vertex("q")
            .right_vertex("q")
            .try_build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InterfaceNotInLeft {
                vertex: VertexId::from("q")
            }
        );
    }
}
