// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The DPO "no dangling edges" condition.
//!
//! Deleting the image of `L \ I` must not leave a host edge pointing at a
//! removed vertex unless the rule accounts for that edge, i.e. it is the image
//! of some pattern edge.
use rustc_hash::FxHashSet;

use crate::hypergraph::Hypergraph;
use crate::ident::EdgeId;
use crate::matcher::Match;
use crate::rule::RewriteRule;

/// Host edges that would dangle if `candidate` were applied, in ascending id order.
pub fn dangling_edges(host: &Hypergraph, rule: &RewriteRule, candidate: &Match) -> Vec<EdgeId> {
    let accounted: FxHashSet<&EdgeId> = candidate.edge_mapping.values().collect();
    let mut dangling: Vec<EdgeId> = rule
        .deleted_vertices()
        .filter_map(|v| candidate.vertex(v))
        .flat_map(|hv| host.incident_edges(hv))
        .filter(|edge| !accounted.contains(edge))
        .cloned()
        .collect();
    dangling.sort();
    dangling.dedup();
    dangling
}

/// Returns `true` when deleting the matched `L \ I` leaves no dangling edge.
///
/// Matches failing this check are skipped by the drivers; they are not errors.
pub fn is_deletion_safe(host: &Hypergraph, rule: &RewriteRule, candidate: &Match) -> bool {
    let accounted: FxHashSet<&EdgeId> = candidate.edge_mapping.values().collect();
    rule.deleted_vertices()
        .filter_map(|v| candidate.vertex(v))
        .all(|hv| host.incident_edges(hv).all(|edge| accounted.contains(edge)))
}
