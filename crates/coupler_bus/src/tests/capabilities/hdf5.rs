use serde_json::json;

use crate::capabilities::{Handler, ListContents, ReadDataset};
use crate::tests::{params, runtime};

#[test]
fn root_listing_shows_top_level_groups_and_datasets() {
    let rt = runtime();
    rt.block_on(async {
        let result = ListContents
            .invoke(params(json!({"file_path": "/data/samples/sample1.h5"})))
            .await
            .unwrap();

        assert_eq!(result["groups"], json!(["group1", "group2", "measurements"]));
        assert_eq!(result["datasets"], json!(["metadata"]));
        assert_eq!(result["simulated"], true);
    });
}

#[test]
fn group_listing_is_scoped_to_the_group() {
    let rt = runtime();
    rt.block_on(async {
        let result = ListContents
            .invoke(params(json!({
                "file_path": "/data/samples/sample1.h5",
                "group_path": "/group2",
            })))
            .await
            .unwrap();

        assert_eq!(result["groups"], json!(["subgroup1"]));
        assert_eq!(result["datasets"], json!(["timestamps"]));
    });
}

#[test]
fn missing_file_and_missing_group_are_distinct_errors() {
    let rt = runtime();
    rt.block_on(async {
        let err = ListContents
            .invoke(params(json!({"file_path": "/data/nonexistent.h5"})))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("file not found"));

        let err = ListContents
            .invoke(params(json!({
                "file_path": "/data/samples/sample1.h5",
                "group_path": "/no_such_group",
            })))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no_such_group"));
    });
}

#[test]
fn read_dataset_returns_data_shape_and_attributes() {
    let rt = runtime();
    rt.block_on(async {
        let result = ReadDataset
            .invoke(params(json!({
                "file_path": "/data/samples/sample1.h5",
                "dataset_path": "group1/temperature",
            })))
            .await
            .unwrap();

        assert_eq!(result["data"], json!([20.1, 20.3, 20.8, 21.2, 21.5]));
        assert_eq!(result["shape"], json!([5]));
        assert_eq!(result["dtype"], "float64");
        assert_eq!(result["attributes"]["unit"], "celsius");
    });
}

#[test]
fn metadata_dataset_is_a_mapping_without_shape() {
    let rt = runtime();
    rt.block_on(async {
        let result = ReadDataset
            .invoke(params(json!({
                "file_path": "/data/samples/sample1.h5",
                "dataset_path": "metadata",
            })))
            .await
            .unwrap();

        assert_eq!(result["dtype"], "object");
        assert!(result["shape"].is_null());
        assert_eq!(result["data"]["version"], "1.2");
    });
}

#[test]
fn unknown_dataset_is_an_error() {
    let rt = runtime();
    rt.block_on(async {
        let err = ReadDataset
            .invoke(params(json!({
                "file_path": "/data/samples/sample1.h5",
                "dataset_path": "group1/humidity",
            })))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("group1/humidity"));
    });
}
