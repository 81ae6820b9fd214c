//! Node hardware telemetry capability.
//!
//! CPU figures come from the host; memory and disk figures are the fixed
//! values the staging cluster reports, flagged `"simulated": true` so
//! callers can tell them apart from live telemetry.

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::capabilities::{Handler, HandlerResult};
use crate::schema::ParamSchema;

fn cpu_info() -> Value {
    let cpu_count = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    json!({
        "cpu_count": cpu_count,
        "system": std::env::consts::OS,
        "architecture": std::env::consts::ARCH,
        "machine": std::env::consts::ARCH,
    })
}

fn memory_info() -> Value {
    json!({
        "total_memory_gb": 32,
        "available_memory_gb": 24.5,
        "used_memory_gb": 7.5,
        "percent_used": 23.4,
        "simulated": true,
    })
}

fn disk_info() -> Value {
    json!({
        "mount_points": [
            { "path": "/", "total_gb": 500, "used_gb": 325, "available_gb": 175, "percent_used": 65.0 },
            { "path": "/data", "total_gb": 2000, "used_gb": 1200, "available_gb": 800, "percent_used": 60.0 },
        ],
        "simulated": true,
    })
}

fn node_name() -> String {
    std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string())
}

pub struct GetCpuInfo;

#[async_trait]
impl Handler for GetCpuInfo {
    fn capability(&self) -> &'static str {
        "node"
    }

    fn action(&self) -> &'static str {
        "get_cpu_info"
    }

    fn description(&self) -> &'static str {
        "Get information about the CPU on the current node"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
    }

    async fn invoke(&self, _params: Map<String, Value>) -> HandlerResult {
        Ok(cpu_info())
    }
}

pub struct GetMemoryInfo;

#[async_trait]
impl Handler for GetMemoryInfo {
    fn capability(&self) -> &'static str {
        "node"
    }

    fn action(&self) -> &'static str {
        "get_memory_info"
    }

    fn description(&self) -> &'static str {
        "Get information about memory on the current node"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
    }

    async fn invoke(&self, _params: Map<String, Value>) -> HandlerResult {
        Ok(memory_info())
    }
}

pub struct GetSystemInfo;

#[async_trait]
impl Handler for GetSystemInfo {
    fn capability(&self) -> &'static str {
        "node"
    }

    fn action(&self) -> &'static str {
        "get_system_info"
    }

    fn description(&self) -> &'static str {
        "Get comprehensive system information about the current node"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
    }

    async fn invoke(&self, _params: Map<String, Value>) -> HandlerResult {
        Ok(json!({
            "node_name": node_name(),
            "system": std::env::consts::OS,
            "cpu": cpu_info(),
            "memory": memory_info(),
            "disk": disk_info(),
        }))
    }
}
