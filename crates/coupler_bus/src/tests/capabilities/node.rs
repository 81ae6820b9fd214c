use serde_json::json;

use crate::capabilities::{GetCpuInfo, GetMemoryInfo, GetSystemInfo, Handler};
use crate::tests::{params, runtime};

#[test]
fn cpu_info_reports_the_host() {
    let rt = runtime();
    rt.block_on(async {
        let result = GetCpuInfo.invoke(params(json!({}))).await.unwrap();

        assert!(result["cpu_count"].as_u64().unwrap() >= 1);
        assert_eq!(result["system"], std::env::consts::OS);
        assert_eq!(result["architecture"], std::env::consts::ARCH);
    });
}

#[test]
fn memory_info_is_flagged_as_simulated() {
    let rt = runtime();
    rt.block_on(async {
        let result = GetMemoryInfo.invoke(params(json!({}))).await.unwrap();

        assert_eq!(result["simulated"], true);
        assert_eq!(result["total_memory_gb"], 32);
    });
}

#[test]
fn system_info_aggregates_cpu_memory_and_disk() {
    let rt = runtime();
    rt.block_on(async {
        let result = GetSystemInfo.invoke(params(json!({}))).await.unwrap();

        assert!(result["node_name"].is_string());
        assert!(result["cpu"]["cpu_count"].as_u64().unwrap() >= 1);
        assert_eq!(result["memory"]["total_memory_gb"], 32);
        assert_eq!(result["disk"]["mount_points"].as_array().unwrap().len(), 2);
    });
}
