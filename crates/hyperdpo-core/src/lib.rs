// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! hyperdpo-core: double-pushout (DPO) rewriting over hypergraphs.
//!
//! A rewrite step runs a fixed pipeline: the matcher enumerates injective
//! occurrences of the rule's pattern `L` in the host, the dangling check drops
//! occurrences whose deletion would orphan host edges, the pushout complement
//! removes `L \ I`, and the pushout glues `R \ I` back in along the interface.
//! [`evolve`] loops that pipeline, feeding each result back in as the next host.
//!
//! Everything in this crate is synchronous and deterministic for a given
//! [`IdSource`]: iteration follows the ordering of vertex and edge ids.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod clean;
mod dangling;
mod engine_impl;
mod error;
mod fresh;
mod hypergraph;
mod ident;
mod matcher;
mod pushout;
mod rule;

// Re-exports for stable public API
/// Singleton removal and toplex reduction.
pub use clean::{clean, remove_singletons, toplexes};
/// No-dangling-edges condition.
pub use dangling::{dangling_edges, is_deletion_safe};
/// Single-step and multi-step rewrite drivers.
pub use engine_impl::{
    apply_rule, apply_rule_with, evolve, evolve_traced, Evolution, Rewrite, RewriteOptions,
    StopReason,
};
/// Error taxonomy: client faults vs. invariant violations.
pub use error::{InternalError, RewriteError, ValidationError};
/// Fresh identifier generation for vertices and edges created by a rewrite.
pub use fresh::{CounterIds, IdSource, SeededIds, MAX_FRESH_ATTEMPTS};
/// Typed hypergraph storage.
pub use hypergraph::{EdgeSet, Hypergraph};
/// Identifier newtypes.
pub use ident::{EdgeId, Hash, VertexId};
/// Monomorphism search.
pub use matcher::{find_matches, find_matches_with, Match, MatchStrategy};
/// Pushout complement and pushout constructions.
pub use pushout::{build_complement, build_pushout};
/// Validated `(L, I, R)` rewrite rules.
pub use rule::RewriteRule;
