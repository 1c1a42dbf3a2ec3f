//! End-to-end supervision over the real HTTP client.
//!
//! Drives a Supervisor through JobsClient against a wiremock backend:
//! submit, poll to completion, settle.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sforge_jobs::{JobApi, JobsClient, JobsClientConfig};
use sforge_models::{FullWorkflowPayload, Job, JobPayload, JobStatus};
use sforge_supervisor::{JobOutcome, PollConfig, Supervisor, SupervisorState, WizardObserver};

#[derive(Default)]
struct CollectingObserver {
    progress: Mutex<Vec<u8>>,
    outcomes: Mutex<Vec<JobOutcome>>,
}

impl WizardObserver for CollectingObserver {
    fn on_progress(&self, job: &Job, _stage: &'static str) {
        self.progress.lock().unwrap().push(job.progress);
    }

    fn on_settled(&self, outcome: &JobOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}

async fn wait_for_settle(supervisor: &Supervisor) -> SupervisorState {
    for _ in 0..200 {
        let state = supervisor.state();
        if state.is_terminal() {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("supervisor did not settle in {:?}", supervisor.state());
}

#[tokio::test]
async fn full_workflow_submits_polls_and_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/jobs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "job_id": "job-e2e" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Two processing observations, then completed.
    Mock::given(method("GET"))
        .and(path("/api/jobs/job-e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "processing",
            "progress": 35
        })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/job-e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "completed",
            "progress": 100,
            "result": { "video_url": "https://cdn/final.mp4", "duration_secs": 42.5 }
        })))
        .mount(&server)
        .await;

    let client = JobsClient::new(JobsClientConfig {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
    })
    .unwrap();

    let observer = Arc::new(CollectingObserver::default());
    let supervisor = Arc::new(Supervisor::new(
        Arc::new(client) as Arc<dyn JobApi>,
        PollConfig {
            interval: Duration::from_millis(50),
            timeout: Duration::from_secs(10),
            max_consecutive_failures: 3,
        },
        Arc::clone(&observer) as Arc<dyn WizardObserver>,
    ));

    let payload = JobPayload::FullWorkflow(
        FullWorkflowPayload::new("INT. KITCHEN - DAY").with_scene_image("scene-1", "https://img/1.png"),
    );
    assert!(supervisor.begin(payload));

    assert_eq!(wait_for_settle(&supervisor).await, SupervisorState::Succeeded);

    let progress = observer.progress.lock().unwrap().clone();
    assert_eq!(progress, vec![35, 35, 100]);

    match observer.outcomes.lock().unwrap().as_slice() {
        [JobOutcome::Succeeded(job)] => {
            assert_eq!(job.status, JobStatus::Completed);
            assert_eq!(
                job.result.as_ref().unwrap()["video_url"],
                "https://cdn/final.mp4"
            );
        }
        other => panic!("unexpected outcomes: {other:?}"),
    };
}
