// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pushout complement (`D`) and pushout (`H'`) constructions.
//!
//! Both builders return new, independent hypergraphs. They may reuse vertex
//! and edge ids of their input but never alias it.
use std::collections::BTreeMap;

use crate::error::InternalError;
use crate::fresh::{fresh_edge, fresh_vertex, IdSource};
use crate::hypergraph::{EdgeSet, Hypergraph};
use crate::ident::VertexId;
use crate::matcher::Match;
use crate::rule::RewriteRule;

/// Computes `D = H - m(L \ I)`.
///
/// 1) Drop every host edge that is the image of a deleted (non-preserved)
///    pattern edge.
/// 2) Remove the images of `L \ I` together with any edge still incident to
///    them. After a passing dangling check this second sweep finds nothing to
///    remove; it runs unconditionally so `D` is well-formed even for matches
///    that were never checked.
pub fn build_complement(host: &Hypergraph, rule: &RewriteRule, candidate: &Match) -> Hypergraph {
    let mut complement = host.clone();
    for (pattern_edge, host_edge) in &candidate.edge_mapping {
        if !rule.preserves_left_edge(pattern_edge) {
            complement.remove_edge(host_edge);
        }
    }
    for vertex in rule.deleted_vertices() {
        if let Some(image) = candidate.vertex(vertex) {
            complement.remove_vertex_cascade(image);
        }
    }
    complement
}

/// Computes `H'` by gluing `R \ I` onto `complement` along the interface.
///
/// Interface vertices resolve to their host images. Each vertex of `R \ I`
/// (ascending id order) receives a fresh vertex id, then each non-preserved
/// `R` edge (ascending id order) is inserted under a fresh edge id. New
/// vertices that appear in no `R` edge are still added.
///
/// # Errors
/// Returns an [`InternalError`] when an interface vertex has no image or lost
/// it in the complement, when `ids` cannot produce an unused identifier, or
/// when a constructed edge would break the hypergraph invariant.
pub fn build_pushout(
    complement: &Hypergraph,
    rule: &RewriteRule,
    candidate: &Match,
    ids: &mut dyn IdSource,
) -> Result<Hypergraph, InternalError> {
    let mut result = complement.clone();
    let mut images: BTreeMap<&VertexId, VertexId> = BTreeMap::new();

    for vertex in rule.interface().vertices() {
        let image = candidate
            .vertex(vertex)
            .ok_or_else(|| InternalError::UnmappedVertex {
                vertex: vertex.clone(),
            })?;
        if !result.contains_vertex(image) {
            return Err(InternalError::MissingInterfaceImage {
                vertex: image.clone(),
            });
        }
        images.insert(vertex, image.clone());
    }

    for vertex in rule.created_vertices() {
        let fresh = fresh_vertex(ids, &result)?;
        result.insert_vertex(fresh.clone());
        images.insert(vertex, fresh);
    }

    for (edge, members) in rule.right().edges() {
        if rule.preserves_right_edge(edge) {
            continue;
        }
        let glued = members
            .iter()
            .map(|v| {
                images
                    .get(v)
                    .cloned()
                    .ok_or_else(|| InternalError::UnmappedVertex { vertex: v.clone() })
            })
            .collect::<Result<EdgeSet, _>>()?;
        let id = fresh_edge(ids, &result)?;
        result
            .insert_edge(id, glued)
            .map_err(InternalError::InvalidResult)?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dangling::is_deletion_safe;
    use crate::fresh::CounterIds;
    use crate::ident::EdgeId;
    use crate::matcher::find_matches;

    fn graph(edges: &[(&str, &[&str])]) -> Hypergraph {
        Hypergraph::from_edges(edges.iter().map(|(id, members)| {
            (
                EdgeId::from(*id),
                members.iter().map(|m| VertexId::from(*m)).collect::<EdgeSet>(),
            )
        }))
        .unwrap()
    }

    fn members(labels: &[&str]) -> EdgeSet {
        labels.iter().map(|l| VertexId::from(*l)).collect()
    }

    #[test]
    fn complement_removes_deleted_edge_and_vertex() {
        let host = graph(&[("e0", &["a", "b"]), ("e1", &["b", "c"])]);
        let rule = RewriteRule::new(
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x"])]),
            graph(&[("e0", &["x"])]),
        )
        .unwrap();
        // x -> b, y -> c: c is pendant.
        let m = find_matches(&host, rule.left())
            .into_iter()
            .find(|m| m.vertex(&VertexId::from("y")) == Some(&VertexId::from("c")))
            .unwrap();
        assert!(is_deletion_safe(&host, &rule, &m));
        let d = build_complement(&host, &rule, &m);
        assert_eq!(d.edge_count(), 1);
        assert_eq!(d.edge(&EdgeId::from("e0")), Some(&members(&["a", "b"])));
        assert!(!d.contains_vertex(&VertexId::from("c")));
        assert!(d.contains_vertex(&VertexId::from("b")));
    }

    #[test]
    fn complement_sweeps_unchecked_dangling_edges() {
        let host = graph(&[("e0", &["a", "b"]), ("e1", &["b", "c"])]);
        let rule = RewriteRule::new(
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x"])]),
            graph(&[("e0", &["x"])]),
        )
        .unwrap();
        // x -> a, y -> b fails the dangling check; the complement still drops e1.
        let m = find_matches(&host, rule.left()).remove(0);
        assert!(!is_deletion_safe(&host, &rule, &m));
        let d = build_complement(&host, &rule, &m);
        assert_eq!(d.edge_count(), 0);
        let vertices: Vec<&str> = d.vertices().map(VertexId::as_str).collect();
        assert_eq!(vertices, ["a", "c"]);
    }

    #[test]
    fn pushout_glues_new_vertex_and_edge() {
        let host = graph(&[("e0", &["a", "b"]), ("e1", &["b", "c"])]);
        let rule = RewriteRule::new(
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x", "y"])]),
            graph(&[("e0", &["x", "y"]), ("e1", &["x", "z"])]),
        )
        .unwrap();
        let m = find_matches(&host, rule.left()).remove(0);
        let d = build_complement(&host, &rule, &m);
        assert_eq!(d, host);
        let mut ids = CounterIds::new();
        let h = build_pushout(&d, &rule, &m, &mut ids).unwrap();
        assert_eq!(h.vertex_count(), host.vertex_count() + 1);
        assert_eq!(h.edge_count(), host.edge_count() + 1);
        assert_eq!(
            h.edge(&EdgeId::from("new_e1")),
            Some(&members(&["a", "new_v0"]))
        );
    }

    #[test]
    fn pushout_keeps_isolated_created_vertices() {
        let host = graph(&[("e0", &["a"])]);
        let left = graph(&[("e0", &["x"])]);
        let right = Hypergraph::from_parts(
            [VertexId::from("x"), VertexId::from("w")],
            [(EdgeId::from("e0"), members(&["x"]))],
        )
        .unwrap();
        let rule = RewriteRule::new(left.clone(), left, right).unwrap();
        let m = find_matches(&host, rule.left()).remove(0);
        let d = build_complement(&host, &rule, &m);
        let h = build_pushout(&d, &rule, &m, &mut CounterIds::new()).unwrap();
        assert!(h.contains_vertex(&VertexId::from("new_v0")));
        assert!(h.is_isolated(&VertexId::from("new_v0")));
        assert_eq!(h.edge_count(), 1);
    }

    #[test]
    fn pushout_rejects_unmapped_interface_vertex() {
        let host = graph(&[("e0", &["a"])]);
        let left = graph(&[("e0", &["x"])]);
        let rule = RewriteRule::identity(left);
        let bogus = Match {
            vertex_mapping: BTreeMap::new(),
            edge_mapping: BTreeMap::new(),
        };
        let err = build_pushout(&host, &rule, &bogus, &mut CounterIds::new()).unwrap_err();
        assert_eq!(
            err,
            InternalError::UnmappedVertex {
                vertex: VertexId::from("x")
            }
        );
    }
}
