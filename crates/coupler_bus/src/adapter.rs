//! Wire-shape normalization.
//!
//! Two inbound shapes are accepted: the flat MCP request
//! (`{capability, action, parameters}`) and a JSON-RPC 2.0 envelope whose
//! method either names the reserved introspection call or splits into
//! capability/action on a configurable separator. Everything else is a
//! [`AdapterError::MalformedRequest`], the only failure allowed to surface
//! at the transport level instead of inside a response envelope.

use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::envelope::{Envelope, error_kind};
use crate::protocol::{JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse, error_codes};
use crate::schema::json_type_name;
use crate::{CapabilityBus, McpRequest};

/// How JSON-RPC method strings map onto routing keys.
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Separator between capability and action in ordinary method names.
    pub method_separator: char,
    /// The reserved introspection method, answered from the route table
    /// without going through dispatch.
    pub list_tools_method: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            method_separator: '.',
            list_tools_method: "mcp/listTools".to_string(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum AdapterError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

pub struct ProtocolAdapter {
    bus: Arc<CapabilityBus>,
    config: AdapterConfig,
}

impl ProtocolAdapter {
    pub fn new(bus: Arc<CapabilityBus>) -> Self {
        Self::with_config(bus, AdapterConfig::default())
    }

    pub fn with_config(bus: Arc<CapabilityBus>, config: AdapterConfig) -> Self {
        Self { bus, config }
    }

    pub fn bus(&self) -> &Arc<CapabilityBus> {
        &self.bus
    }

    /// Normalizes an inbound payload, dispatches it, and renders the
    /// response in the shape the caller spoke.
    pub async fn handle(&self, payload: Value) -> Result<Value, AdapterError> {
        let obj = payload.as_object().ok_or_else(|| {
            AdapterError::MalformedRequest(format!(
                "request body must be a JSON object, got {}",
                json_type_name(&payload)
            ))
        })?;

        if obj.contains_key("capability") || obj.contains_key("action") {
            self.handle_flat(&payload).await
        } else if obj.contains_key("method") {
            self.handle_rpc(&payload).await
        } else {
            Err(AdapterError::MalformedRequest(
                "expected either capability/action fields or a JSON-RPC method".to_string(),
            ))
        }
    }

    async fn handle_flat(&self, payload: &Value) -> Result<Value, AdapterError> {
        let request: McpRequest = serde_json::from_value(payload.clone())
            .map_err(|e| AdapterError::MalformedRequest(e.to_string()))?;
        let envelope = self.bus.dispatch(&request).await;
        Ok(envelope.to_value())
    }

    async fn handle_rpc(&self, payload: &Value) -> Result<Value, AdapterError> {
        let rpc: JsonRpcRequest = serde_json::from_value(payload.clone())
            .map_err(|e| AdapterError::MalformedRequest(e.to_string()))?;
        if rpc.jsonrpc != crate::protocol::JSONRPC_VERSION {
            return Err(AdapterError::MalformedRequest(format!(
                "unsupported JSON-RPC version: {}",
                rpc.jsonrpc
            )));
        }

        let parameters = match rpc.params {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(AdapterError::MalformedRequest(format!(
                    "params must be an object, got {}",
                    json_type_name(&other)
                )));
            }
        };

        if rpc.method == self.config.list_tools_method {
            let routes = self.bus.list_routes();
            let result = serde_json::to_value(routes)
                .map_err(|e| AdapterError::MalformedRequest(e.to_string()))?;
            return Ok(render(JsonRpcResponse::success(rpc.id, result)));
        }

        let (capability, action) = self.split_method(&rpc.method)?;
        let request = McpRequest {
            capability,
            action,
            parameters,
            id: Some(rpc.id.clone()),
        };
        let envelope = self.bus.dispatch(&request).await;
        Ok(render_rpc_envelope(envelope, rpc.id))
    }

    fn split_method(&self, method: &str) -> Result<(String, String), AdapterError> {
        let sep = self.config.method_separator;
        match method.split_once(sep) {
            Some((capability, action))
                if !capability.is_empty() && !action.is_empty() && !action.contains(sep) =>
            {
                Ok((capability.to_string(), action.to_string()))
            }
            _ => Err(AdapterError::MalformedRequest(format!(
                "method {method:?} is not of the form capability{sep}action"
            ))),
        }
    }
}

fn render(response: JsonRpcResponse) -> Value {
    serde_json::to_value(response).unwrap_or(Value::Null)
}

/// Wraps a dispatch envelope in the JSON-RPC response the caller expects,
/// mapping error kinds onto the standard error codes.
fn render_rpc_envelope(envelope: Envelope, id: Value) -> Value {
    match envelope {
        Envelope::Success { result } => render(JsonRpcResponse::success(id, result)),
        Envelope::Error { error_kind: kind, message } => {
            let code = match kind.as_str() {
                error_kind::UNKNOWN_CAPABILITY | error_kind::UNKNOWN_ACTION => {
                    error_codes::METHOD_NOT_FOUND
                }
                error_kind::VALIDATION_ERROR => error_codes::INVALID_PARAMS,
                _ => error_codes::INTERNAL_ERROR,
            };
            serde_json::to_value(JsonRpcErrorResponse::error(id, code, message))
                .unwrap_or(Value::Null)
        }
    }
}
