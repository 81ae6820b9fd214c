use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitJobArgs {
    pub script_path: String,

    #[serde(default)]
    pub job_name: Option<String>,

    #[serde(default)]
    pub partition: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetJobStatusArgs {
    pub job_id: String,
}
