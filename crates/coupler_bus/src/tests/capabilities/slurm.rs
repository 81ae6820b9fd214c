use serde_json::json;

use crate::capabilities::{GetJobStatus, Handler, SlurmQueue, SubmitJob};
use crate::tests::{params, runtime};

#[test]
fn submit_returns_a_job_id_and_records_the_job() {
    let rt = runtime();
    rt.block_on(async {
        let queue = SlurmQueue::new();
        let submit = SubmitJob::new(queue.clone());
        let status = GetJobStatus::new(queue);

        let submitted = submit
            .invoke(params(json!({
                "script_path": "/jobs/train.sh",
                "job_name": "train",
                "partition": "gpu",
            })))
            .await
            .unwrap();

        let job_id = submitted["job_id"].as_str().unwrap().to_string();
        assert_eq!(submitted["status"], "submitted");
        assert_eq!(
            submitted["command_output"],
            format!("Submitted batch job {job_id}")
        );

        let polled = status
            .invoke(params(json!({"job_id": job_id})))
            .await
            .unwrap();
        assert_eq!(polled["job_name"], "train");
        assert_eq!(polled["partition"], "gpu");
        let state = polled["state"].as_str().unwrap();
        assert!(["PENDING", "RUNNING", "COMPLETED"].contains(&state));
    });
}

#[test]
fn submit_defaults_name_and_partition() {
    let rt = runtime();
    rt.block_on(async {
        let queue = SlurmQueue::new();
        let submit = SubmitJob::new(queue.clone());
        let status = GetJobStatus::new(queue);

        let submitted = submit
            .invoke(params(json!({"script_path": "/jobs/run.sh"})))
            .await
            .unwrap();
        let job_id = submitted["job_id"].as_str().unwrap().to_string();

        let polled = status
            .invoke(params(json!({"job_id": job_id.clone()})))
            .await
            .unwrap();
        assert_eq!(polled["job_name"], format!("job_{job_id}"));
        assert_eq!(polled["partition"], "compute");
    });
}

#[test]
fn empty_script_path_is_rejected() {
    let rt = runtime();
    rt.block_on(async {
        let submit = SubmitJob::new(SlurmQueue::new());
        let err = submit
            .invoke(params(json!({"script_path": ""})))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "script path cannot be empty");
    });
}

#[test]
fn unknown_job_reports_unknown_state_instead_of_failing() {
    let rt = runtime();
    rt.block_on(async {
        let status = GetJobStatus::new(SlurmQueue::new());
        let polled = status
            .invoke(params(json!({"job_id": "424242"})))
            .await
            .unwrap();

        assert_eq!(polled["state"], "UNKNOWN");
        assert_eq!(polled["message"], "Job not found");
    });
}
