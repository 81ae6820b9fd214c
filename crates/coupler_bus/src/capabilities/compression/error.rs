use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("data cannot be empty")]
    EmptyData,

    #[error("unsupported compression algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("decompressed data is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
