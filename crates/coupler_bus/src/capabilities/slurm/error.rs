use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SlurmError {
    #[error("script path cannot be empty")]
    EmptyScriptPath,

    #[error("job ID cannot be empty")]
    EmptyJobId,
}
