use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Hdf5Error {
    #[error("HDF5 file not found: {0}")]
    FileNotFound(String),

    #[error("group {0} not found in file")]
    GroupNotFound(String),

    #[error("dataset {0} not found in file")]
    DatasetNotFound(String),
}
