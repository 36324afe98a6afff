// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for hyperdpo crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`graphs`] - Terse hypergraph construction from label slices
//! - [`ids`] - Scripted id source for collision tests
//! - [`rules`] - Rule builder and the canonical rules used across the suite

pub mod config;
pub mod graphs;
pub mod ids;
pub mod rules;

// Re-export commonly used items at crate root for convenience
pub use config::InMemoryConfigStore;
pub use graphs::{edge_set, graph_from_edges, graph_with_vertices, path_graph, vertex_labels};
pub use ids::ScriptedIds;
pub use rules::{pendant_edge_rule, pendant_vertex_deletion_rule, RuleBuilder};
