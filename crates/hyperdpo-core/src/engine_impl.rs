// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rewrite drivers: one DPO step over every match, and N-step evolution.
use std::collections::BTreeMap;

use tracing::{debug, info, trace, warn};

use crate::clean::clean;
use crate::dangling::is_deletion_safe;
use crate::error::RewriteError;
use crate::fresh::IdSource;
use crate::hypergraph::Hypergraph;
use crate::ident::{EdgeId, VertexId};
use crate::matcher::{find_matches_with, MatchStrategy};
use crate::pushout::{build_complement, build_pushout};
use crate::rule::RewriteRule;

/// One valid single-step rewrite result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Pattern-to-host vertex map of the applied match.
    pub vertex_mapping: BTreeMap<VertexId, VertexId>,
    /// Pattern-to-host edge map of the applied match.
    pub edge_mapping: BTreeMap<EdgeId, EdgeId>,
    /// The rewritten hypergraph `H'`.
    pub result: Hypergraph,
}

/// Per-call knobs for [`evolve_traced`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Edge assignment strategy used by the matcher.
    pub strategy: MatchStrategy,
    /// Clean the current hypergraph before every step.
    pub clean: bool,
    /// Stop once a rewrite leaves more vertices than this.
    pub max_vertices: Option<usize>,
}

/// Why an evolution stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// All requested steps were applied.
    StepsExhausted,
    /// A step found no deletion-safe match. This is normal termination.
    NoApplicableMatch,
    /// The last rewrite pushed the vertex count over
    /// [`RewriteOptions::max_vertices`].
    VertexLimitReached,
}

/// Outcome of [`evolve_traced`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evolution {
    /// Final hypergraph.
    pub graph: Hypergraph,
    /// Number of rewrites actually applied.
    pub applied: usize,
    /// Reason the loop ended.
    pub stop: StopReason,
}

/// Applies `rule` at every deletion-safe greedy match of its pattern in `host`.
///
/// # Errors
/// Propagates [`RewriteError::Internal`] from the pushout construction.
pub fn apply_rule(
    host: &Hypergraph,
    rule: &RewriteRule,
    ids: &mut dyn IdSource,
) -> Result<Vec<Rewrite>, RewriteError> {
    apply_rule_with(host, rule, MatchStrategy::Greedy, ids)
}

/// Applies `rule` at every deletion-safe match found with `strategy`.
///
/// Results follow the matcher's enumeration order. An empty vector means the
/// rule is not applicable; it is not an error.
///
/// # Errors
/// Propagates [`RewriteError::Internal`] from the pushout construction.
pub fn apply_rule_with(
    host: &Hypergraph,
    rule: &RewriteRule,
    strategy: MatchStrategy,
    ids: &mut dyn IdSource,
) -> Result<Vec<Rewrite>, RewriteError> {
    let matches = find_matches_with(host, rule.left(), strategy);
    let total = matches.len();
    let mut rewrites = Vec::new();
    for candidate in matches {
        if !is_deletion_safe(host, rule, &candidate) {
            trace!(mapping = ?candidate.vertex_mapping, "match rejected: dangling edges");
            continue;
        }
        let complement = build_complement(host, rule, &candidate);
        let result = build_pushout(&complement, rule, &candidate, ids)?;
        rewrites.push(Rewrite {
            vertex_mapping: candidate.vertex_mapping,
            edge_mapping: candidate.edge_mapping,
            result,
        });
    }
    debug!(matches = total, applicable = rewrites.len(), "rule applied");
    Ok(rewrites)
}

/// Rewrites at the first deletion-safe match, building no other pushout.
fn first_rewrite(
    host: &Hypergraph,
    rule: &RewriteRule,
    strategy: MatchStrategy,
    ids: &mut dyn IdSource,
) -> Result<Option<Hypergraph>, RewriteError> {
    let Some(candidate) = find_matches_with(host, rule.left(), strategy)
        .into_iter()
        .find(|candidate| is_deletion_safe(host, rule, candidate))
    else {
        return Ok(None);
    };
    let complement = build_complement(host, rule, &candidate);
    Ok(Some(build_pushout(&complement, rule, &candidate, ids)?))
}

/// Applies `rule` up to `steps` times, always taking the first result.
///
/// # Errors
/// Propagates [`RewriteError::Internal`] from any step.
pub fn evolve(
    initial: Hypergraph,
    rule: &RewriteRule,
    steps: usize,
    clean: bool,
    ids: &mut dyn IdSource,
) -> Result<Hypergraph, RewriteError> {
    let options = RewriteOptions {
        clean,
        ..RewriteOptions::default()
    };
    evolve_traced(initial, rule, steps, options, ids).map(|evolution| evolution.graph)
}

/// Applies `rule` up to `steps` times and reports how the loop ended.
///
/// Each step optionally replaces the current graph with its cleaned form,
/// then rewrites at the first deletion-safe match. Only that match is turned
/// into a pushout, so the result equals the first entry [`apply_rule_with`]
/// would return. When no match applies the current graph (cleaned, if
/// requested) is returned as is.
///
/// With [`RewriteOptions::max_vertices`] set, the loop ends after the first
/// rewrite whose result exceeds it; that result is returned.
///
/// # Errors
/// Propagates [`RewriteError::Internal`] from any step.
pub fn evolve_traced(
    initial: Hypergraph,
    rule: &RewriteRule,
    steps: usize,
    options: RewriteOptions,
    ids: &mut dyn IdSource,
) -> Result<Evolution, RewriteError> {
    let mut current = initial;
    for step in 0..steps {
        if options.clean {
            current = clean(&current);
        }
        let Some(next) = first_rewrite(&current, rule, options.strategy, ids)? else {
            info!(applied = step, "evolution stopped: no applicable match");
            return Ok(Evolution {
                graph: current,
                applied: step,
                stop: StopReason::NoApplicableMatch,
            });
        };
        current = next;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let digest = current.digest_hex();
            debug!(
                step,
                vertices = current.vertex_count(),
                edges = current.edge_count(),
                digest = &digest[..16],
                "rewrite applied"
            );
        }
        if let Some(limit) = options.max_vertices {
            if current.vertex_count() > limit {
                warn!(
                    applied = step + 1,
                    vertices = current.vertex_count(),
                    limit,
                    "evolution stopped: vertex limit reached"
                );
                return Ok(Evolution {
                    graph: current,
                    applied: step + 1,
                    stop: StopReason::VertexLimitReached,
                });
            }
        }
    }
    info!(applied = steps, "evolution finished");
    Ok(Evolution {
        graph: current,
        applied: steps,
        stop: StopReason::StepsExhausted,
    })
}
