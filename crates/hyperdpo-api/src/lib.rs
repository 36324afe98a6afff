// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Request boundary for hyperdpo front ends (daemon, CLI).
//! Decodes the JSON wire model into core types, enforces limits, runs the
//! rewrite driver and maps failures onto a typed client/server error body.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

pub mod config;
pub mod config_fs;
pub mod error;
pub mod service;
pub mod wire;

pub use config::{ConfigError, ConfigService, ConfigStore, Limits, ServiceConfig};
pub use config_fs::FsConfigStore;
pub use error::{ApiError, ErrorBody, ErrorDetail, ErrorKind};
pub use service::{
    decode_request, handle_clean, handle_evolve, list_matches, run_evolve, DecodedRequest,
};
pub use wire::{
    decode_edges, encode_graph, Edge, EvolveRequest, EvolveResponse, MatchSummary, Matching,
    RuleSpec,
};
