//! The normalized response envelope.
//!
//! Every dispatch produces exactly one of two shapes:
//! `{"status":"success","result":..}` or
//! `{"status":"error","error_kind":..,"message":..}`. Callers never see a
//! raw backend error or a stack trace, only a distinguishable `error_kind`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::schema::ValidationError;

/// Stable `error_kind` strings carried in error envelopes.
pub mod error_kind {
    pub const UNKNOWN_CAPABILITY: &str = "UnknownCapability";
    pub const UNKNOWN_ACTION: &str = "UnknownAction";
    pub const VALIDATION_ERROR: &str = "ValidationError";
    pub const HANDLER_ERROR: &str = "HandlerError";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success { result: Value },
    Error { error_kind: String, message: String },
}

impl Envelope {
    pub fn success(result: Value) -> Self {
        Envelope::Success { result }
    }

    pub fn error(err: &DispatchError) -> Self {
        Envelope::Error {
            error_kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self)
            .unwrap_or(serde_json::json!({ "error": "serialization failed" }))
    }
}

/// Everything that can go wrong inside a single dispatch.
///
/// Timeouts are a handler failure, not a distinct envelope kind: the budget
/// elapsing mid-handler surfaces as `HandlerError` with a timeout message.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    #[error("unknown action {action} for capability {capability}")]
    UnknownAction { capability: String, action: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Handler(String),

    #[error("handler timed out after {0}s")]
    Timeout(u64),
}

impl DispatchError {
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::UnknownCapability(_) => error_kind::UNKNOWN_CAPABILITY,
            DispatchError::UnknownAction { .. } => error_kind::UNKNOWN_ACTION,
            DispatchError::Validation(_) => error_kind::VALIDATION_ERROR,
            DispatchError::Handler(_) | DispatchError::Timeout(_) => error_kind::HANDLER_ERROR,
        }
    }
}
