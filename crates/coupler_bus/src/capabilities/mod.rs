pub mod compression;
pub mod hdf5;
pub mod node;
pub mod slurm;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::schema::ParamSchema;

pub use compression::{Algorithm, CompressData, CompressFile, CompressionError, DecompressData};
pub use hdf5::{Hdf5Error, ListContents, ReadDataset};
pub use node::{GetCpuInfo, GetMemoryInfo, GetSystemInfo};
pub use slurm::{GetJobStatus, SlurmError, SlurmQueue, SubmitJob};

pub type HandlerResult = anyhow::Result<Value>;

/// A backend operation bound to exactly one (capability, action) pair.
///
/// `invoke` only ever sees parameters that passed schema validation; its
/// error type is erased at this boundary and normalized into a
/// `HandlerError` envelope by the bus.
#[async_trait]
pub trait Handler: Send + Sync {
    fn capability(&self) -> &'static str;
    fn action(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn schema(&self) -> ParamSchema;
    async fn invoke(&self, params: Map<String, Value>) -> HandlerResult;
}

impl std::fmt::Debug for dyn Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("capability", &self.capability())
            .field("action", &self.action())
            .finish()
    }
}
