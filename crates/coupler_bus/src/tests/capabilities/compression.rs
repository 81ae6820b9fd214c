use std::io::Write as _;

use serde_json::json;

use crate::capabilities::{CompressData, CompressFile, DecompressData, Handler};
use crate::tests::{params, runtime};

#[test]
fn gzip_roundtrip_recovers_the_original_text() {
    let rt = runtime();
    rt.block_on(async {
        let text = "the quick brown fox jumps over the lazy dog".repeat(20);

        let compressed = CompressData
            .invoke(params(json!({"data": text})))
            .await
            .unwrap();
        assert_eq!(compressed["algorithm"], "gzip");
        assert_eq!(compressed["original_size_bytes"], text.len());
        assert!(compressed["compression_ratio"].as_f64().unwrap() > 1.0);

        let payload = compressed["full_compressed_data_b64"].as_str().unwrap();
        let decompressed = DecompressData
            .invoke(params(json!({"compressed_data_b64": payload})))
            .await
            .unwrap();
        assert_eq!(decompressed["full_decompressed_data"], text);
    });
}

#[test]
fn zlib_roundtrip_works_with_an_explicit_algorithm() {
    let rt = runtime();
    rt.block_on(async {
        let compressed = CompressData
            .invoke(params(json!({"data": "hello zlib", "algorithm": "ZLIB"})))
            .await
            .unwrap();
        assert_eq!(compressed["algorithm"], "zlib");

        let payload = compressed["full_compressed_data_b64"].as_str().unwrap();
        let decompressed = DecompressData
            .invoke(params(json!({
                "compressed_data_b64": payload,
                "algorithm": "zlib",
            })))
            .await
            .unwrap();
        assert_eq!(decompressed["full_decompressed_data"], "hello zlib");
    });
}

#[test]
fn long_payloads_are_truncated_in_the_preview_field() {
    let rt = runtime();
    rt.block_on(async {
        let compressed = CompressData
            .invoke(params(json!({"data": "x".repeat(10_000)})))
            .await
            .unwrap();

        let preview = compressed["compressed_data_b64"].as_str().unwrap();
        let full = compressed["full_compressed_data_b64"].as_str().unwrap();
        if full.len() > 100 {
            assert!(preview.ends_with("..."));
            assert_eq!(preview.len(), 103);
        }
    });
}

#[test]
fn empty_data_and_unknown_algorithms_are_rejected() {
    let rt = runtime();
    rt.block_on(async {
        let err = CompressData
            .invoke(params(json!({"data": ""})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "data cannot be empty");

        let err = CompressData
            .invoke(params(json!({"data": "abc", "algorithm": "brotli"})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported compression algorithm: brotli");
    });
}

#[test]
fn invalid_base64_is_a_typed_failure() {
    let rt = runtime();
    rt.block_on(async {
        let err = DecompressData
            .invoke(params(json!({"compressed_data_b64": "!!! not base64 !!!"})))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid base64"));
    });
}

#[test]
fn compress_file_writes_the_default_output_path() {
    let rt = runtime();
    rt.block_on(async {
        let dir = tempfile::tempdir().unwrap();
        let input_path = dir.path().join("report.txt");
        let mut file = std::fs::File::create(&input_path).unwrap();
        file.write_all("compress me ".repeat(500).as_bytes()).unwrap();
        drop(file);

        let result = CompressFile
            .invoke(params(json!({"file_path": input_path.to_str().unwrap()})))
            .await
            .unwrap();

        let output_path = format!("{}.gz", input_path.display());
        assert_eq!(result["compressed_file"], output_path);
        assert!(result["compression_ratio"].as_f64().unwrap() > 1.0);
        assert!(std::fs::metadata(&output_path).is_ok());
    });
}

#[test]
fn compress_file_reports_missing_input() {
    let rt = runtime();
    rt.block_on(async {
        let err = CompressFile
            .invoke(params(json!({"file_path": "/no/such/file.txt"})))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("file not found"));
    });
}
