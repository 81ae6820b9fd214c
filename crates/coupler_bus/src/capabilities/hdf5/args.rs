use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ListContentsArgs {
    pub file_path: String,

    #[serde(default = "default_group_path")]
    pub group_path: String,
}

fn default_group_path() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadDatasetArgs {
    pub file_path: String,
    pub dataset_path: String,
}
