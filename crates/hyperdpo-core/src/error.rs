// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for rewriting.
//!
//! [`ValidationError`] is a client fault (malformed graph or rule) and is
//! raised before any matching starts. [`InternalError`] is an invariant
//! violation inside a pushout construction; it aborts the current call only.
//! Running out of applicable matches is not an error at all.
use thiserror::Error;

use crate::ident::{EdgeId, VertexId};

/// Malformed input detected before rewriting begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An edge was given with an empty vertex set.
    #[error("edge {edge} has no vertices")]
    EmptyEdge {
        /// Offending edge.
        edge: EdgeId,
    },
    /// An edge references a vertex that is not part of the hypergraph.
    #[error("edge {edge} references unknown vertex {vertex}")]
    UnknownVertex {
        /// Offending edge.
        edge: EdgeId,
        /// Vertex missing from the vertex set.
        vertex: VertexId,
    },
    /// An interface vertex does not occur in the pattern `L`.
    #[error("interface vertex {vertex} is not a vertex of the pattern (L)")]
    InterfaceNotInLeft {
        /// Offending interface vertex.
        vertex: VertexId,
    },
    /// An interface vertex does not occur in the replacement `R`.
    #[error("interface vertex {vertex} is not a vertex of the replacement (R)")]
    InterfaceNotInRight {
        /// Offending interface vertex.
        vertex: VertexId,
    },
}

/// Invariant violation while constructing a pushout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternalError {
    /// The id source kept producing identifiers already taken in the target.
    #[error("no fresh identifier found after {attempts} attempts")]
    FreshIdExhausted {
        /// Number of tokens drawn before giving up.
        attempts: usize,
    },
    /// A vertex of the rule has no image under the match.
    #[error("rule vertex {vertex} has no image under the match")]
    UnmappedVertex {
        /// Rule vertex without an image.
        vertex: VertexId,
    },
    /// The image of an interface vertex was removed by the complement.
    #[error("image {vertex} of an interface vertex is missing from the complement")]
    MissingInterfaceImage {
        /// Host vertex that should have been preserved.
        vertex: VertexId,
    },
    /// The constructed result violates the hypergraph invariant.
    #[error("pushout produced an invalid hypergraph: {0}")]
    InvalidResult(#[source] ValidationError),
}

/// Any failure surfaced by the rewrite drivers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// Client fault.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Server fault.
    #[error(transparent)]
    Internal(#[from] InternalError),
}
