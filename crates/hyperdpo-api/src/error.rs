// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Boundary error type and its JSON body.
use hyperdpo_core::{InternalError, RewriteError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a request handled by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Error raised by the rewriting core.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    /// The request is well-formed but over a configured limit.
    #[error("{what} is {actual}, over the configured limit of {limit}")]
    LimitExceeded {
        /// Name of the bounded quantity.
        what: &'static str,
        /// Value carried by the request.
        actual: usize,
        /// Configured ceiling.
        limit: usize,
    },
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Rewrite(RewriteError::Validation(err))
    }
}

impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        Self::Rewrite(RewriteError::Internal(err))
    }
}

/// Client or server fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The request was invalid (HTTP 400).
    Validation,
    /// The server failed to process a valid request (HTTP 500).
    Internal,
}

/// `{ "error": { "kind", "message" } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error payload.
    pub error: ErrorDetail,
}

/// Inner error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Fault class.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Classifies the error as a client or server fault.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Rewrite(RewriteError::Internal(_)) => ErrorKind::Internal,
            Self::Rewrite(RewriteError::Validation(_)) | Self::LimitExceeded { .. } => {
                ErrorKind::Validation
            }
        }
    }

    /// Renders the JSON error body.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: ErrorDetail {
                kind: self.kind(),
                message: self.to_string(),
            },
        }
    }
}
