//! Slurm batch-scheduler capability.
//!
//! Simulated scheduler: jobs live in an in-process table shared by the
//! submit and status handlers, and advance probabilistically through
//! PENDING -> RUNNING -> COMPLETED on each status poll. Submission is not
//! revocable; nothing here rolls back on a later failure.

mod args;
mod error;

pub use args::{GetJobStatusArgs, SubmitJobArgs};
pub use error::SlurmError;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use rand::Rng;
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;

use crate::capabilities::{Handler, HandlerResult};
use crate::schema::{ParamKind, ParamSchema};

#[derive(Debug, Clone)]
struct JobRecord {
    job_name: String,
    partition: String,
    status: &'static str,
    start_time: Option<SystemTime>,
    end_time: Option<SystemTime>,
    node_list: Option<String>,
}

/// The shared simulated job table. One instance backs both slurm handlers.
#[derive(Default)]
pub struct SlurmQueue {
    jobs: Mutex<HashMap<String, JobRecord>>,
}

impl SlurmQueue {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

fn format_elapsed(start: SystemTime, end: Option<SystemTime>) -> String {
    let end = end.unwrap_or_else(SystemTime::now);
    let secs = end
        .duration_since(start)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

/// Submits a job to the simulated scheduler.
pub struct SubmitJob {
    queue: Arc<SlurmQueue>,
}

impl SubmitJob {
    pub fn new(queue: Arc<SlurmQueue>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl Handler for SubmitJob {
    fn capability(&self) -> &'static str {
        "slurm"
    }

    fn action(&self) -> &'static str {
        "submit_job"
    }

    fn description(&self) -> &'static str {
        "Submit a job to the Slurm scheduler"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new()
            .required("script_path", ParamKind::String, "Path to the job script")
            .optional("job_name", ParamKind::String, "Name for the job")
            .optional("partition", ParamKind::String, "Slurm partition to use")
    }

    async fn invoke(&self, params: Map<String, Value>) -> HandlerResult {
        let args: SubmitJobArgs = serde_json::from_value(Value::Object(params))?;
        if args.script_path.is_empty() {
            return Err(SlurmError::EmptyScriptPath.into());
        }

        let (job_id, already_running) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(10_000..100_000).to_string(),
                rng.r#gen::<f64>() < 0.3,
            )
        };

        let mut record = JobRecord {
            job_name: args.job_name.unwrap_or_else(|| format!("job_{job_id}")),
            partition: args.partition.unwrap_or_else(|| "compute".to_string()),
            status: "PENDING",
            start_time: None,
            end_time: None,
            node_list: None,
        };
        if already_running {
            record.status = "RUNNING";
            record.start_time = Some(SystemTime::now());
            record.node_list = Some(format!("node-{}", rand::thread_rng().gen_range(1..=100)));
        }

        self.queue.jobs.lock().await.insert(job_id.clone(), record);

        Ok(json!({
            "job_id": job_id,
            "status": "submitted",
            "command_output": format!("Submitted batch job {job_id}"),
            "simulated": true,
        }))
    }
}

/// Polls the status of a previously submitted job.
pub struct GetJobStatus {
    queue: Arc<SlurmQueue>,
}

impl GetJobStatus {
    pub fn new(queue: Arc<SlurmQueue>) -> Self {
        Self { queue }
    }
}

#[async_trait]
impl Handler for GetJobStatus {
    fn capability(&self) -> &'static str {
        "slurm"
    }

    fn action(&self) -> &'static str {
        "get_job_status"
    }

    fn description(&self) -> &'static str {
        "Check the status of a Slurm job"
    }

    fn schema(&self) -> ParamSchema {
        ParamSchema::new().required("job_id", ParamKind::String, "The Slurm job ID")
    }

    async fn invoke(&self, params: Map<String, Value>) -> HandlerResult {
        let args: GetJobStatusArgs = serde_json::from_value(Value::Object(params))?;
        if args.job_id.is_empty() {
            return Err(SlurmError::EmptyJobId.into());
        }

        let mut jobs = self.queue.jobs.lock().await;
        let Some(job) = jobs.get_mut(&args.job_id) else {
            // Unknown jobs report an UNKNOWN state rather than failing, the
            // same contract `squeue` gives for ids that already aged out.
            return Ok(json!({
                "job_id": args.job_id,
                "state": "UNKNOWN",
                "message": "Job not found",
                "simulated": true,
            }));
        };

        let roll: f64 = rand::thread_rng().r#gen();
        if job.status == "PENDING" && roll < 0.5 {
            job.status = "RUNNING";
            job.start_time = Some(SystemTime::now());
            job.node_list = Some(format!("node-{}", rand::thread_rng().gen_range(1..=100)));
        } else if job.status == "RUNNING" && roll < 0.2 {
            job.status = "COMPLETED";
            job.end_time = Some(SystemTime::now());
        }

        let elapsed = job
            .start_time
            .map(|start| format_elapsed(start, job.end_time));

        Ok(json!({
            "job_id": args.job_id,
            "state": job.status,
            "job_name": job.job_name,
            "partition": job.partition,
            "elapsed": elapsed,
            "node_list": job.node_list,
            "simulated": true,
        }))
    }
}
