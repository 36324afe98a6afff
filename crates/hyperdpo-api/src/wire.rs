// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON wire model of the evolution endpoint.
//!
//! The wire format only carries vertex lists per edge. Edge ids are assigned
//! positionally (`e0`, `e1`, ...) when decoding, and dropped when encoding.
use std::collections::BTreeMap;

use hyperdpo_core::{EdgeId, EdgeSet, Hypergraph, Match, MatchStrategy, ValidationError, VertexId};
use serde::{Deserialize, Serialize};

/// One hyperedge on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Member vertices. Order is irrelevant and duplicates collapse.
    pub vertices: Vec<String>,
}

impl Edge {
    /// Builds an edge from vertex labels.
    pub fn new<I, S>(vertices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vertices: vertices.into_iter().map(Into::into).collect(),
        }
    }
}

/// Rule triple as edge lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Pattern.
    #[serde(rename = "L")]
    pub left: Vec<Edge>,
    /// Interface.
    #[serde(rename = "I")]
    pub interface: Vec<Edge>,
    /// Replacement.
    #[serde(rename = "R")]
    pub right: Vec<Edge>,
}

/// Edge assignment strategy selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Matching {
    /// First unclaimed parallel edge only.
    #[default]
    Greedy,
    /// Every injective choice of parallel edges.
    Exhaustive,
}

impl From<Matching> for MatchStrategy {
    fn from(matching: Matching) -> Self {
        match matching {
            Matching::Greedy => Self::Greedy,
            Matching::Exhaustive => Self::Exhaustive,
        }
    }
}

/// Body of `POST /evolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolveRequest {
    /// Initial host hypergraph.
    pub hypergraph: Vec<Edge>,
    /// Rule to apply.
    pub rule: RuleSpec,
    /// Maximum number of rewrites.
    pub steps: usize,
    /// Clean the host before every step.
    pub clean: bool,
    /// Matcher strategy (defaults to greedy).
    #[serde(default)]
    pub matching: Matching,
    /// Seed for fresh identifiers; a call-scoped counter is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Response of `POST /evolve`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolveResponse {
    /// Final hypergraph, one entry per edge in edge-id order.
    pub hypergraph: Vec<Edge>,
}

/// Serializable view of a deletion-safe match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Pattern vertex to host vertex.
    pub vertex_mapping: BTreeMap<String, String>,
    /// Pattern edge id to host edge id.
    pub edge_mapping: BTreeMap<String, String>,
}

impl From<&Match> for MatchSummary {
    fn from(m: &Match) -> Self {
        Self {
            vertex_mapping: m
                .vertex_mapping
                .iter()
                .map(|(p, h)| (p.to_string(), h.to_string()))
                .collect(),
            edge_mapping: m
                .edge_mapping
                .iter()
                .map(|(p, h)| (p.to_string(), h.to_string()))
                .collect(),
        }
    }
}

/// Decodes an edge list into a hypergraph with positional edge ids.
///
/// # Errors
/// Returns [`ValidationError::EmptyEdge`] for an edge without vertices.
pub fn decode_edges(edges: &[Edge]) -> Result<Hypergraph, ValidationError> {
    Hypergraph::from_edges(edges.iter().enumerate().map(|(idx, edge)| {
        let members: EdgeSet = edge.vertices.iter().map(|v| VertexId::new(v.as_str())).collect();
        (EdgeId::positional(idx), members)
    }))
}

/// Encodes a hypergraph as an edge list (edge-id order, sorted members).
///
/// Isolated vertices have no wire representation and are dropped.
pub fn encode_graph(graph: &Hypergraph) -> Vec<Edge> {
    graph
        .edges()
        .map(|(_, members)| Edge::new(members.iter().map(VertexId::as_str)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_single_letter_rule_keys() {
        let json = r#"{
            "hypergraph": [{"vertices": ["a", "b"]}],
            "rule": {"L": [{"vertices": ["x"]}], "I": [], "R": []},
            "steps": 2,
            "clean": false
        }"#;
        let req: EvolveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.rule.left, vec![Edge::new(["x"])]);
        assert_eq!(req.matching, Matching::Greedy);
        assert_eq!(req.seed, None);
    }

    #[test]
    fn matching_is_lowercase() {
        let m: Matching = serde_json::from_str("\"exhaustive\"").unwrap();
        assert_eq!(m, Matching::Exhaustive);
        assert_eq!(MatchStrategy::from(m), MatchStrategy::Exhaustive);
    }

    #[test]
    fn decode_assigns_positional_ids_and_collapses_duplicates() {
        let graph = decode_edges(&[Edge::new(["b", "a", "b"]), Edge::new(["c"])]).unwrap();
        let e0: Vec<&str> = graph
            .edge(&EdgeId::from("e0"))
            .unwrap()
            .iter()
            .map(VertexId::as_str)
            .collect();
        assert_eq!(e0, ["a", "b"]);
        assert!(graph.contains_edge(&EdgeId::from("e1")));
    }

    #[test]
    fn decode_rejects_empty_edge() {
        let err = decode_edges(&[Edge::new(["a"]), Edge::new(Vec::<String>::new())]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyEdge {
                edge: EdgeId::from("e1")
            }
        );
    }

    #[test]
    fn encode_sorts_members() {
        let graph = decode_edges(&[Edge::new(["z", "a"])]).unwrap();
        assert_eq!(encode_graph(&graph), vec![Edge::new(["a", "z"])]);
    }
}
