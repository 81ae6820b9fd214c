use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CompressDataArgs {
    pub data: String,

    #[serde(default)]
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecompressDataArgs {
    pub compressed_data_b64: String,

    #[serde(default)]
    pub algorithm: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompressFileArgs {
    pub file_path: String,

    #[serde(default)]
    pub output_path: Option<String>,

    #[serde(default)]
    pub algorithm: Option<String>,
}
