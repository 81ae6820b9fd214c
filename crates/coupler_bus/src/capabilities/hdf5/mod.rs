//! HDF5 introspection capability.
//!
//! Backed by a simulated catalog with a fixed group/dataset structure, the
//! same one the deployment environment stages under `/data/samples`. Paths
//! containing `nonexistent` are treated as missing files so failure paths
//! stay reachable without real data on disk.

mod args;
mod error;

pub use args::{ListContentsArgs, ReadDatasetArgs};
pub use error::Hdf5Error;

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::capabilities::{Handler, HandlerResult};
use crate::schema::{ParamKind, ParamSchema};

const GROUPS: &[&str] = &["group1", "group2", "group2/subgroup1", "measurements"];

const DATASETS: &[&str] = &[
    "metadata",
    "group1/temperature",
    "group1/pressure",
    "group2/timestamps",
    "group2/subgroup1/data1",
    "group2/subgroup1/data2",
    "measurements/sensor1",
    "measurements/sensor2",
    "measurements/sensor3",
];

fn file_exists(file_path: &str) -> bool {
    !file_path.is_empty() && !file_path.contains("nonexistent")
}

fn strip_leading_slash(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Direct children of `group_path` in the simulated structure, split into
/// subgroups and datasets.
fn group_contents(group_path: &str) -> (Vec<String>, Vec<String>) {
    let prefix = strip_leading_slash(group_path);

    let child_of = |entry: &str| -> Option<String> {
        let rest = if prefix.is_empty() {
            entry
        } else {
            entry.strip_prefix(prefix)?.strip_prefix('/')?
        };
        if rest.is_empty() || rest.contains('/') {
            None
        } else {
            Some(rest.to_string())
        }
    };

    let groups = GROUPS.iter().filter_map(|g| child_of(g)).collect();
    let datasets = DATASETS.iter().filter_map(|d| child_of(d)).collect();
    (groups, datasets)
}

/// Lists groups and datasets within an HDF5 file.
pub struct ListContents;

#[async_trait]
impl Handler for ListContents {
    fn capability(&self) -> &'static str {
        "hdf5"
    }

    fn action(&self) -> &'static str {
        "list_contents"
    }

    fn description(&self) -> &'static str {
        "List groups and datasets in an HDF5 file"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .required("file_path", ParamKind::String, "Path to the HDF5 file")
            .optional(
                "group_path",
                ParamKind::String,
                "Path to the group within the file (defaults to the root group)",
            )
    }

    async fn invoke(&self, params: Map<String, Value>) -> HandlerResult {
        let args: ListContentsArgs = serde_json::from_value(Value::Object(params))?;

        if !file_exists(&args.file_path) {
            return Err(Hdf5Error::FileNotFound(args.file_path).into());
        }

        let lookup = strip_leading_slash(&args.group_path);
        if !lookup.is_empty() && !GROUPS.contains(&lookup) {
            return Err(Hdf5Error::GroupNotFound(args.group_path).into());
        }

        let (groups, datasets) = group_contents(&args.group_path);
        Ok(json!({
            "groups": groups,
            "datasets": datasets,
            "simulated": true,
        }))
    }
}

/// Reads a dataset from an HDF5 file.
pub struct ReadDataset;

#[async_trait]
impl Handler for ReadDataset {
    fn capability(&self) -> &'static str {
        "hdf5"
    }

    fn action(&self) -> &'static str {
        "read_dataset"
    }

    fn description(&self) -> &'static str {
        "Read data from an HDF5 dataset"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .required("file_path", ParamKind::String, "Path to the HDF5 file")
            .required(
                "dataset_path",
                ParamKind::String,
                "Path to the dataset within the file",
            )
    }

    async fn invoke(&self, params: Map<String, Value>) -> HandlerResult {
        let args: ReadDatasetArgs = serde_json::from_value(Value::Object(params))?;

        if !file_exists(&args.file_path) {
            return Err(Hdf5Error::FileNotFound(args.file_path).into());
        }

        let lookup = strip_leading_slash(&args.dataset_path);
        if !DATASETS.contains(&lookup) {
            return Err(Hdf5Error::DatasetNotFound(args.dataset_path).into());
        }

        let (data, shape, dtype) = if lookup == "metadata" {
            (
                json!({"created": "2025-03-15", "author": "Researcher", "version": "1.2"}),
                Value::Null,
                "object",
            )
        } else if lookup.ends_with("temperature") {
            (json!([20.1, 20.3, 20.8, 21.2, 21.5]), json!([5]), "float64")
        } else if lookup.ends_with("pressure") {
            (
                json!([101.3, 101.4, 101.3, 101.2, 101.3]),
                json!([5]),
                "float64",
            )
        } else if lookup.ends_with("timestamps") {
            (
                json!(["2025-04-01T12:00:00", "2025-04-01T12:15:00", "2025-04-01T12:30:00"]),
                json!([3]),
                "object",
            )
        } else {
            (json!([1, 2, 3, 4, 5]), json!([5]), "int64")
        };

        let unit = if lookup.contains("temperature") {
            "celsius"
        } else if lookup.contains("pressure") {
            "hPa"
        } else {
            "none"
        };

        Ok(json!({
            "data": data,
            "shape": shape,
            "dtype": dtype,
            "attributes": { "unit": unit },
            "simulated": true,
        }))
    }
}
