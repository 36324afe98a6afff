// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Monomorphism search: injective, edge-preserving embeddings of a pattern.
//!
//! Enumeration order
//! - Pattern vertices are assigned in ascending id order; host candidates are
//!   tried in ascending id order for each position. The resulting sequence is
//!   the order of `permutations(sorted(host), |pattern|)`.
//! - Pattern edges are resolved in ascending id order against host edges in
//!   ascending id order.
//!
//! A branch is cut as soon as some fully-assigned pattern edge has an image
//! that equals no host edge at all. Such a candidate could never be emitted,
//! so the cut does not change the result sequence.
use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::hypergraph::Hypergraph;
use crate::ident::{EdgeId, VertexId};

/// Occurrence of a pattern inside a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Total injective map from pattern vertices to host vertices.
    pub vertex_mapping: BTreeMap<VertexId, VertexId>,
    /// Injective map from every pattern edge to the host edge with the
    /// image vertex set.
    pub edge_mapping: BTreeMap<EdgeId, EdgeId>,
}

impl Match {
    /// Host image of a pattern vertex.
    pub fn vertex(&self, pattern_vertex: &VertexId) -> Option<&VertexId> {
        self.vertex_mapping.get(pattern_vertex)
    }

    /// Host image of a pattern edge.
    pub fn edge(&self, pattern_edge: &EdgeId) -> Option<&EdgeId> {
        self.edge_mapping.get(pattern_edge)
    }
}

/// How pattern edges are assigned to host edges with identical vertex sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Each pattern edge takes the first unclaimed host edge with the image
    /// vertex set. A vertex mapping yields at most one match, so alternative
    /// assignments over parallel host edges are never reported.
    #[default]
    Greedy,
    /// Backtracks over every injective choice among parallel host edges. A
    /// vertex mapping may yield several matches.
    Exhaustive,
}

/// Finds all matches of `pattern` in `host` using [`MatchStrategy::Greedy`].
pub fn find_matches(host: &Hypergraph, pattern: &Hypergraph) -> Vec<Match> {
    find_matches_with(host, pattern, MatchStrategy::Greedy)
}

/// Finds all matches of `pattern` in `host` using `strategy`.
///
/// Returns an empty vector when the pattern has more vertices than the host
/// or when no occurrence exists.
pub fn find_matches_with(
    host: &Hypergraph,
    pattern: &Hypergraph,
    strategy: MatchStrategy,
) -> Vec<Match> {
    if pattern.vertex_count() > host.vertex_count() {
        return Vec::new();
    }
    let search = Search::new(host, pattern, strategy);
    let mut assignment = Vec::with_capacity(search.pattern_vertices.len());
    let mut used = vec![false; search.host_vertices.len()];
    let mut out = Vec::new();
    search.assign(&mut assignment, &mut used, &mut out);
    out
}

/// Sorted member list of an edge; used as the comparable edge shape.
type Shape<'a> = Vec<&'a VertexId>;

struct Search<'a> {
    strategy: MatchStrategy,
    host_vertices: Vec<&'a VertexId>,
    host_edges: Vec<(&'a EdgeId, Shape<'a>)>,
    host_shapes: FxHashSet<Shape<'a>>,
    pattern_vertices: Vec<&'a VertexId>,
    /// Pattern edges as `(id, member positions in pattern_vertices)`.
    pattern_edges: Vec<(&'a EdgeId, Vec<usize>)>,
    /// `ready_at[p]` lists pattern edges whose last member is position `p`.
    ready_at: Vec<Vec<usize>>,
}

impl<'a> Search<'a> {
    fn new(host: &'a Hypergraph, pattern: &'a Hypergraph, strategy: MatchStrategy) -> Self {
        let host_vertices: Vec<&VertexId> = host.vertices().collect();
        let host_edges: Vec<(&EdgeId, Shape<'a>)> = host
            .edges()
            .map(|(id, members)| (id, members.iter().collect()))
            .collect();
        let host_shapes = host_edges.iter().map(|(_, shape)| shape.clone()).collect();

        let pattern_vertices: Vec<&VertexId> = pattern.vertices().collect();
        let position: FxHashMap<&VertexId, usize> = pattern_vertices
            .iter()
            .enumerate()
            .map(|(idx, v)| (*v, idx))
            .collect();
        let mut ready_at = vec![Vec::new(); pattern_vertices.len()];
        let mut pattern_edges = Vec::with_capacity(pattern.edge_count());
        for (id, members) in pattern.edges() {
            let positions: Vec<usize> = members
                .iter()
                .filter_map(|v| position.get(v).copied())
                .collect();
            if let Some(last) = positions.iter().copied().max() {
                ready_at[last].push(pattern_edges.len());
            }
            pattern_edges.push((id, positions));
        }

        Self {
            strategy,
            host_vertices,
            host_edges,
            host_shapes,
            pattern_vertices,
            pattern_edges,
            ready_at,
        }
    }

    fn assign(&self, assignment: &mut Vec<usize>, used: &mut [bool], out: &mut Vec<Match>) {
        let depth = assignment.len();
        if depth == self.pattern_vertices.len() {
            self.resolve_edges(assignment, out);
            return;
        }
        for candidate in 0..self.host_vertices.len() {
            if used[candidate] {
                continue;
            }
            used[candidate] = true;
            assignment.push(candidate);
            if self.edges_feasible(depth, assignment) {
                self.assign(assignment, used, out);
            }
            assignment.pop();
            used[candidate] = false;
        }
    }

    fn edges_feasible(&self, depth: usize, assignment: &[usize]) -> bool {
        self.ready_at[depth]
            .iter()
            .all(|&edge| self.host_shapes.contains(&self.image(edge, assignment)))
    }

    fn image(&self, edge: usize, assignment: &[usize]) -> Shape<'a> {
        let mut shape: Shape<'a> = self.pattern_edges[edge]
            .1
            .iter()
            .map(|&pos| self.host_vertices[assignment[pos]])
            .collect();
        shape.sort_unstable();
        shape
    }

    fn resolve_edges(&self, assignment: &[usize], out: &mut Vec<Match>) {
        let images: Vec<Shape<'a>> = (0..self.pattern_edges.len())
            .map(|edge| self.image(edge, assignment))
            .collect();
        let mut claimed = vec![false; self.host_edges.len()];
        let mut chosen = Vec::with_capacity(images.len());
        match self.strategy {
            MatchStrategy::Greedy => {
                for image in &images {
                    let Some(hit) = self.first_unclaimed(image, &claimed, 0) else {
                        return;
                    };
                    claimed[hit] = true;
                    chosen.push(hit);
                }
                out.push(self.emit(assignment, &chosen));
            }
            MatchStrategy::Exhaustive => {
                self.backtrack_edges(assignment, &images, &mut claimed, &mut chosen, out);
            }
        }
    }

    fn backtrack_edges(
        &self,
        assignment: &[usize],
        images: &[Shape<'a>],
        claimed: &mut [bool],
        chosen: &mut Vec<usize>,
        out: &mut Vec<Match>,
    ) {
        let Some(image) = images.get(chosen.len()) else {
            out.push(self.emit(assignment, chosen));
            return;
        };
        let mut from = 0;
        while let Some(hit) = self.first_unclaimed(image, claimed, from) {
            claimed[hit] = true;
            chosen.push(hit);
            self.backtrack_edges(assignment, images, claimed, chosen, out);
            chosen.pop();
            claimed[hit] = false;
            from = hit + 1;
        }
    }

    fn first_unclaimed(&self, image: &Shape<'a>, claimed: &[bool], from: usize) -> Option<usize> {
        (from..self.host_edges.len()).find(|&idx| !claimed[idx] && self.host_edges[idx].1 == *image)
    }

    fn emit(&self, assignment: &[usize], chosen: &[usize]) -> Match {
        let vertex_mapping = self
            .pattern_vertices
            .iter()
            .zip(assignment)
            .map(|(p, &h)| ((*p).clone(), self.host_vertices[h].clone()))
            .collect();
        let edge_mapping = self
            .pattern_edges
            .iter()
            .zip(chosen)
            .map(|((p, _), &h)| ((*p).clone(), self.host_edges[h].0.clone()))
            .collect();
        Match {
            vertex_mapping,
            edge_mapping,
        }
    }
}
