// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Request handling shared by the daemon and the CLI.
use hyperdpo_core::{
    clean, evolve_traced, find_matches_with, is_deletion_safe, CounterIds, Evolution, Hypergraph,
    IdSource, RewriteOptions, RewriteRule, SeededIds, StopReason,
};
use tracing::{debug, instrument};

use crate::config::Limits;
use crate::error::ApiError;
use crate::wire::{decode_edges, encode_graph, EvolveRequest, EvolveResponse, MatchSummary};

/// A request translated into core types and checked against the limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRequest {
    /// Initial host.
    pub host: Hypergraph,
    /// Validated rule.
    pub rule: RewriteRule,
    /// Step budget.
    pub steps: usize,
    /// Matcher strategy, cleaning flag and vertex ceiling.
    pub options: RewriteOptions,
    /// Seed for [`SeededIds`]; [`CounterIds`] when `None`.
    pub seed: Option<u64>,
}

impl DecodedRequest {
    /// Builds the id source this request asks for.
    pub fn id_source(&self) -> Box<dyn IdSource> {
        match self.seed {
            Some(seed) => Box::new(SeededIds::from_seed(seed)),
            None => Box::new(CounterIds::new()),
        }
    }
}

fn check_limit(what: &'static str, actual: usize, limit: usize) -> Result<(), ApiError> {
    if actual > limit {
        return Err(ApiError::LimitExceeded {
            what,
            actual,
            limit,
        });
    }
    Ok(())
}

fn decode_host(request: &EvolveRequest, limits: &Limits) -> Result<Hypergraph, ApiError> {
    let host = decode_edges(&request.hypergraph)?;
    check_limit("host vertex count", host.vertex_count(), limits.max_host_vertices)?;
    Ok(host)
}

/// Decodes and validates `request`.
///
/// # Errors
/// Validation-kind [`ApiError`] for empty edges, interface vertices missing
/// from `L` or `R`, and any value over `limits`.
pub fn decode_request(request: &EvolveRequest, limits: &Limits) -> Result<DecodedRequest, ApiError> {
    check_limit("steps", request.steps, limits.max_steps)?;
    let host = decode_host(request, limits)?;
    let left = decode_edges(&request.rule.left)?;
    check_limit("pattern vertex count", left.vertex_count(), limits.max_pattern_vertices)?;
    let interface = decode_edges(&request.rule.interface)?;
    let right = decode_edges(&request.rule.right)?;
    let rule = RewriteRule::new(left, interface, right)?;
    Ok(DecodedRequest {
        host,
        rule,
        steps: request.steps,
        options: RewriteOptions {
            strategy: request.matching.into(),
            clean: request.clean,
            max_vertices: Some(limits.max_host_vertices),
        },
        seed: request.seed,
    })
}

/// Runs the evolution described by `decoded`.
///
/// # Errors
/// Internal-kind [`ApiError`] when a pushout construction fails, and
/// [`ApiError::LimitExceeded`] when the graph outgrows
/// [`RewriteOptions::max_vertices`].
pub fn run_evolve(decoded: DecodedRequest) -> Result<Evolution, ApiError> {
    let mut ids = decoded.id_source();
    let evolution = evolve_traced(
        decoded.host,
        &decoded.rule,
        decoded.steps,
        decoded.options,
        &mut *ids,
    )?;
    if let (StopReason::VertexLimitReached, Some(limit)) =
        (evolution.stop, decoded.options.max_vertices)
    {
        return Err(ApiError::LimitExceeded {
            what: "host vertex count",
            actual: evolution.graph.vertex_count(),
            limit,
        });
    }
    Ok(evolution)
}

/// Full `POST /evolve` pipeline: decode, limit, evolve, encode.
///
/// # Errors
/// See [`decode_request`] and [`run_evolve`].
#[instrument(skip_all, fields(steps = request.steps, clean = request.clean))]
pub fn handle_evolve(request: &EvolveRequest, limits: &Limits) -> Result<EvolveResponse, ApiError> {
    let decoded = decode_request(request, limits)?;
    let evolution = run_evolve(decoded)?;
    debug!(applied = evolution.applied, stop = ?evolution.stop, "request evolved");
    Ok(EvolveResponse {
        hypergraph: encode_graph(&evolution.graph),
    })
}

/// Deletion-safe matches of the request's rule on its host.
///
/// The host is cleaned first when the request asks for cleaning, mirroring
/// what the first evolution step would see.
///
/// # Errors
/// See [`decode_request`].
#[instrument(skip_all)]
pub fn list_matches(request: &EvolveRequest, limits: &Limits) -> Result<Vec<MatchSummary>, ApiError> {
    let decoded = decode_request(request, limits)?;
    let host = if decoded.options.clean {
        clean(&decoded.host)
    } else {
        decoded.host
    };
    let matches = find_matches_with(&host, decoded.rule.left(), decoded.options.strategy);
    Ok(matches
        .iter()
        .filter(|m| is_deletion_safe(&host, &decoded.rule, m))
        .map(MatchSummary::from)
        .collect())
}

/// Cleans the request's host hypergraph. The rule is ignored.
///
/// # Errors
/// Validation-kind [`ApiError`] for a malformed or oversized host.
#[instrument(skip_all)]
pub fn handle_clean(request: &EvolveRequest, limits: &Limits) -> Result<EvolveResponse, ApiError> {
    let host = decode_host(request, limits)?;
    Ok(EvolveResponse {
        hypergraph: encode_graph(&clean(&host)),
    })
}
