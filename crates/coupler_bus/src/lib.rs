//! Capability dispatch core for the Model Coupling Protocol (MCP) gateway.
//!
//! A [`CapabilityBus`] maps two-level routing keys (capability, action) to
//! registered [`Handler`]s, validates parameters against each handler's
//! declared schema, and normalizes every outcome into a single response
//! [`Envelope`]. The bus is built once at startup and read-only afterwards,
//! so concurrent dispatches need no locking.

pub mod adapter;
pub mod capabilities;
pub mod envelope;
pub mod protocol;
pub mod schema;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub use adapter::{AdapterConfig, AdapterError, ProtocolAdapter};
pub use capabilities::{Handler, HandlerResult};
pub use envelope::{DispatchError, Envelope, error_kind};
pub use schema::{ParamKind, ParamSchema, ParamSpec, ValidationError};

use capabilities::{
    CompressData, CompressFile, DecompressData, GetCpuInfo, GetJobStatus, GetMemoryInfo,
    GetSystemInfo, ListContents, ReadDataset, SlurmQueue, SubmitJob,
};

/// A parsed inbound request, independent of wire shape.
#[derive(Debug, Clone, Deserialize)]
pub struct McpRequest {
    pub capability: String,
    pub action: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    /// Correlation identifier, echoed by JSON-RPC rendering. Not used by
    /// dispatch itself.
    #[serde(default)]
    pub id: Option<Value>,
}

/// One row of the route table, as exposed by introspection.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RouteInfo {
    pub capability: String,
    pub action: String,
    pub description: String,
    pub parameters: Value,
}

/// Startup-time registration failure. Always a configuration bug, never a
/// request-time condition.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("duplicate route: {capability}.{action}")]
    DuplicateRoute { capability: String, action: String },
}

/// The registry and dispatcher in one: a read-only table of handlers keyed
/// by (capability, action).
#[derive(Default)]
pub struct CapabilityBus {
    routes: BTreeMap<String, BTreeMap<String, Arc<dyn Handler>>>,
    call_timeout: Option<Duration>,
}

impl CapabilityBus {
    /// An empty bus. Handlers are added with [`register`](Self::register)
    /// before the bus is shared; there is no runtime registration.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus with every built-in capability registered.
    pub fn with_default_capabilities() -> Result<Self, RegistryError> {
        let mut bus = Self::new();
        bus.register_defaults()?;
        Ok(bus)
    }

    /// Caps the wall-clock budget of each handler invocation. Disabled by
    /// default; an elapsed budget surfaces as a `HandlerError` envelope.
    pub fn with_call_timeout(mut self, budget: Duration) -> Self {
        self.call_timeout = Some(budget);
        self
    }

    fn register_defaults(&mut self) -> Result<(), RegistryError> {
        self.register(ListContents)?;
        self.register(ReadDataset)?;

        let queue = SlurmQueue::new();
        self.register(SubmitJob::new(Arc::clone(&queue)))?;
        self.register(GetJobStatus::new(queue))?;

        self.register(GetCpuInfo)?;
        self.register(GetMemoryInfo)?;
        self.register(GetSystemInfo)?;

        self.register(CompressData)?;
        self.register(DecompressData)?;
        self.register(CompressFile)?;

        Ok(())
    }

    pub fn register<H: Handler + 'static>(&mut self, handler: H) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(handler))
    }

    pub fn register_arc(&mut self, handler: Arc<dyn Handler>) -> Result<(), RegistryError> {
        let capability = handler.capability();
        let action = handler.action();
        let actions = self.routes.entry(capability.to_string()).or_default();
        if actions.contains_key(action) {
            return Err(RegistryError::DuplicateRoute {
                capability: capability.to_string(),
                action: action.to_string(),
            });
        }
        debug!(capability, action, "registered handler");
        actions.insert(action.to_string(), handler);
        Ok(())
    }

    /// Looks up the handler for (capability, action), distinguishing a
    /// misspelled capability from a misspelled action.
    pub fn resolve(
        &self,
        capability: &str,
        action: &str,
    ) -> Result<&Arc<dyn Handler>, DispatchError> {
        let actions = self
            .routes
            .get(capability)
            .ok_or_else(|| DispatchError::UnknownCapability(capability.to_string()))?;
        actions.get(action).ok_or_else(|| DispatchError::UnknownAction {
            capability: capability.to_string(),
            action: action.to_string(),
        })
    }

    /// The full route table in deterministic (capability, action) order.
    pub fn list_routes(&self) -> Vec<RouteInfo> {
        self.routes
            .values()
            .flat_map(|actions| actions.values())
            .map(|h| RouteInfo {
                capability: h.capability().to_string(),
                action: h.action().to_string(),
                description: h.description().to_string(),
                parameters: h.schema().to_json_schema(),
            })
            .collect()
    }

    /// Routes, validates, and invokes. Every outcome is normalized into an
    /// [`Envelope`]; handler failures never propagate past this call, so a
    /// fault in one backend cannot poison an unrelated request.
    pub async fn dispatch(&self, request: &McpRequest) -> Envelope {
        match self.dispatch_inner(request).await {
            Ok(result) => Envelope::success(result),
            Err(err) => {
                warn!(
                    capability = %request.capability,
                    action = %request.action,
                    kind = err.kind(),
                    %err,
                    "dispatch failed"
                );
                Envelope::error(&err)
            }
        }
    }

    async fn dispatch_inner(&self, request: &McpRequest) -> Result<Value, DispatchError> {
        let handler = self.resolve(&request.capability, &request.action)?;
        let params = handler.schema().validate(&request.parameters)?;

        let invocation = handler.invoke(params);
        let outcome = match self.call_timeout {
            Some(budget) => tokio::time::timeout(budget, invocation)
                .await
                .map_err(|_| DispatchError::Timeout(budget.as_secs()))?,
            None => invocation.await,
        };

        outcome.map_err(|e| DispatchError::Handler(e.to_string()))
    }
}
