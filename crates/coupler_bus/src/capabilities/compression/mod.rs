//! Data and file compression capability (gzip and zlib).
//!
//! In-memory payloads travel base64-encoded so they stay JSON-safe; large
//! fields are truncated in the response preview with the full value carried
//! alongside. File compression streams through the encoder on a blocking
//! thread.

mod args;
mod error;

pub use args::{CompressDataArgs, CompressFileArgs, DecompressDataArgs};
pub use error::CompressionError;

use std::io::{Read as _, Write as _};
use std::str::FromStr;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::Compression;
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use serde_json::{Map, Value, json};

use crate::capabilities::{Handler, HandlerResult};
use crate::schema::{ParamKind, ParamSchema};

const PREVIEW_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Gzip,
    Zlib,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Gzip => "gzip",
            Algorithm::Zlib => "zlib",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Algorithm::Gzip => "gz",
            Algorithm::Zlib => "zz",
        }
    }
}

impl FromStr for Algorithm {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gzip" => Ok(Algorithm::Gzip),
            "zlib" => Ok(Algorithm::Zlib),
            other => Err(CompressionError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

fn parse_algorithm(raw: Option<&str>) -> Result<Algorithm, CompressionError> {
    raw.unwrap_or("gzip").parse()
}

fn compress_bytes(algorithm: Algorithm, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    match algorithm {
        Algorithm::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
        Algorithm::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
    }
}

fn decompress_bytes(algorithm: Algorithm, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut out = Vec::new();
    match algorithm {
        Algorithm::Gzip => GzDecoder::new(data).read_to_end(&mut out)?,
        Algorithm::Zlib => ZlibDecoder::new(data).read_to_end(&mut out)?,
    };
    Ok(out)
}

fn ratio(original: u64, compressed: u64) -> f64 {
    if compressed == 0 {
        return 0.0;
    }
    let r = original as f64 / compressed as f64;
    (r * 100.0).round() / 100.0
}

fn preview(full: &str) -> String {
    if full.len() <= PREVIEW_LIMIT {
        return full.to_string();
    }
    // Back off to a char boundary so multibyte text cannot split a scalar.
    let cut = (0..=PREVIEW_LIMIT)
        .rev()
        .find(|i| full.is_char_boundary(*i))
        .unwrap_or(0);
    format!("{}...", &full[..cut])
}

/// Compresses a string payload.
pub struct CompressData;

#[async_trait]
impl Handler for CompressData {
    fn capability(&self) -> &'static str {
        "compression"
    }

    fn action(&self) -> &'static str {
        "compress_data"
    }

    fn description(&self) -> &'static str {
        "Compress a string using the specified algorithm"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .required("data", ParamKind::String, "The string data to compress")
            .optional(
                "algorithm",
                ParamKind::String,
                "Compression algorithm to use (gzip or zlib, default gzip)",
            )
    }

    async fn invoke(&self, params: Map<String, Value>) -> HandlerResult {
        let args: CompressDataArgs = serde_json::from_value(Value::Object(params))?;
        if args.data.is_empty() {
            return Err(CompressionError::EmptyData.into());
        }
        let algorithm = parse_algorithm(args.algorithm.as_deref())?;

        let original = args.data.as_bytes();
        let compressed = compress_bytes(algorithm, original)?;
        let encoded = BASE64.encode(&compressed);

        Ok(json!({
            "algorithm": algorithm.name(),
            "original_size_bytes": original.len(),
            "compressed_size_bytes": compressed.len(),
            "compression_ratio": ratio(original.len() as u64, compressed.len() as u64),
            "compressed_data_b64": preview(&encoded),
            "full_compressed_data_b64": encoded,
        }))
    }
}

/// Decompresses a base64-encoded payload.
pub struct DecompressData;

#[async_trait]
impl Handler for DecompressData {
    fn capability(&self) -> &'static str {
        "compression"
    }

    fn action(&self) -> &'static str {
        "decompress_data"
    }

    fn description(&self) -> &'static str {
        "Decompress a base64-encoded compressed string"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .required(
                "compressed_data_b64",
                ParamKind::String,
                "Base64-encoded compressed data",
            )
            .optional(
                "algorithm",
                ParamKind::String,
                "Compression algorithm used (gzip or zlib, default gzip)",
            )
    }

    async fn invoke(&self, params: Map<String, Value>) -> HandlerResult {
        let args: DecompressDataArgs = serde_json::from_value(Value::Object(params))?;
        if args.compressed_data_b64.is_empty() {
            return Err(CompressionError::EmptyData.into());
        }
        let algorithm = parse_algorithm(args.algorithm.as_deref())?;

        let compressed = BASE64
            .decode(args.compressed_data_b64.as_bytes())
            .map_err(CompressionError::from)?;
        let decompressed = decompress_bytes(algorithm, &compressed)?;
        let text = String::from_utf8(decompressed).map_err(CompressionError::from)?;

        Ok(json!({
            "algorithm": algorithm.name(),
            "compressed_size_bytes": compressed.len(),
            "decompressed_size_bytes": text.len(),
            "decompressed_data": preview(&text),
            "full_decompressed_data": text,
        }))
    }
}

/// Compresses a file on disk.
pub struct CompressFile;

#[async_trait]
impl Handler for CompressFile {
    fn capability(&self) -> &'static str {
        "compression"
    }

    fn action(&self) -> &'static str {
        "compress_file"
    }

    fn description(&self) -> &'static str {
        "Compress a file using the specified algorithm"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .required("file_path", ParamKind::String, "Path to the file to compress")
            .optional(
                "output_path",
                ParamKind::String,
                "Path for the compressed output file",
            )
            .optional(
                "algorithm",
                ParamKind::String,
                "Compression algorithm to use (gzip or zlib, default gzip)",
            )
    }

    async fn invoke(&self, params: Map<String, Value>) -> HandlerResult {
        let args: CompressFileArgs = serde_json::from_value(Value::Object(params))?;
        let algorithm = parse_algorithm(args.algorithm.as_deref())?;
        let output_path = args
            .output_path
            .clone()
            .unwrap_or_else(|| format!("{}.{}", args.file_path, algorithm.extension()));

        let file_path = args.file_path.clone();
        let out = output_path.clone();
        let (original_size, compressed_size) =
            tokio::task::spawn_blocking(move || compress_file_blocking(algorithm, &file_path, &out))
                .await??;

        Ok(json!({
            "algorithm": algorithm.name(),
            "original_file": args.file_path,
            "compressed_file": output_path,
            "original_size_bytes": original_size,
            "compressed_size_bytes": compressed_size,
            "compression_ratio": ratio(original_size, compressed_size),
        }))
    }
}

fn compress_file_blocking(
    algorithm: Algorithm,
    file_path: &str,
    output_path: &str,
) -> Result<(u64, u64), CompressionError> {
    let mut input = std::fs::File::open(file_path)
        .map_err(|_| CompressionError::FileNotFound(file_path.to_string()))?;
    let original_size = input.metadata()?.len();

    let output = std::fs::File::create(output_path)?;
    match algorithm {
        Algorithm::Gzip => {
            let mut encoder = GzEncoder::new(output, Compression::default());
            std::io::copy(&mut input, &mut encoder)?;
            encoder.finish()?;
        }
        Algorithm::Zlib => {
            let mut encoder = ZlibEncoder::new(output, Compression::default());
            std::io::copy(&mut input, &mut encoder)?;
            encoder.finish()?;
        }
    }

    let compressed_size = std::fs::metadata(output_path)?.len();
    Ok((original_size, compressed_size))
}
