use async_trait::async_trait;
use cftcli::core::build;
use cftcli::domain::model::{BuildProgress, BuildRequest, LogLocation};
use cftcli::domain::ports::BuildOps;
use cftcli::utils::error::{CftError, Result};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

struct FakeBuildOps {
    progress: Mutex<VecDeque<BuildProgress>>,
    log_lines: Vec<String>,
    downloads: Mutex<Vec<(String, String, String)>>,
}

impl FakeBuildOps {
    fn with_progress(script: Vec<BuildProgress>) -> Self {
        Self {
            progress: Mutex::new(script.into_iter().collect()),
            log_lines: vec!["[Container] hello".to_string()],
            downloads: Mutex::new(Vec::new()),
        }
    }
}

fn progress(status: &str, phase: &str, complete: bool) -> BuildProgress {
    BuildProgress {
        id: "demo:1234".to_string(),
        project: "demo".to_string(),
        status: status.to_string(),
        phase: phase.to_string(),
        complete,
        log: Some(LogLocation {
            group: "/aws/codebuild/demo".to_string(),
            stream: "1234".to_string(),
        }),
        artifact_arn: None,
    }
}

#[async_trait]
impl BuildOps for FakeBuildOps {
    async fn start_build(&self, _request: &BuildRequest) -> Result<String> {
        Ok("demo:1234".to_string())
    }

    async fn build_progress(&self, _id: &str) -> Result<BuildProgress> {
        let mut script = self.progress.lock().unwrap();
        if script.len() > 1 {
            Ok(script.pop_front().unwrap())
        } else {
            script.front().cloned().ok_or_else(|| CftError::ApiError {
                message: "no scripted progress".to_string(),
            })
        }
    }

    async fn log_messages(&self, _log: &LogLocation) -> Result<Vec<String>> {
        Ok(self.log_lines.clone())
    }

    async fn download_object(&self, bucket: &str, key: &str, destination: &Path) -> Result<()> {
        self.downloads.lock().unwrap().push((
            bucket.to_string(),
            key.to_string(),
            destination.display().to_string(),
        ));
        std::fs::write(destination, b"zip-bytes")?;
        Ok(())
    }
}

fn request() -> BuildRequest {
    BuildRequest {
        project: "demo".to_string(),
        buildspec: "version: 0.2".to_string(),
        source_artifact: None,
        destination: None,
    }
}

#[tokio::test]
async fn wait_build_polls_until_complete() {
    let ops = FakeBuildOps::with_progress(vec![
        progress("IN_PROGRESS", "BUILD", false),
        progress("IN_PROGRESS", "POST_BUILD", false),
        progress("SUCCEEDED", "COMPLETED", true),
    ]);

    let build = build::wait_build(&ops, "demo:1234", Duration::ZERO)
        .await
        .unwrap();
    assert!(build.complete);
    assert_eq!(build.phase, "COMPLETED");
}

#[tokio::test]
async fn completed_build_run_is_ok() {
    let ops = FakeBuildOps::with_progress(vec![progress("SUCCEEDED", "COMPLETED", true)]);

    build::run(&ops, &request(), None).await.unwrap();
}

#[tokio::test]
async fn failed_build_surfaces_as_error() {
    let ops = FakeBuildOps::with_progress(vec![progress("FAILED", "BUILD", true)]);

    let err = build::run(&ops, &request(), None).await.unwrap_err();
    match err {
        CftError::BuildFailed { project, phase } => {
            assert_eq!(project, "demo");
            assert_eq!(phase, "BUILD");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn artifact_is_downloaded_to_the_requested_file() {
    let dir = tempfile::tempdir().unwrap();
    let destination = dir.path().join("demo.zip");

    let mut done = progress("SUCCEEDED", "COMPLETED", true);
    done.artifact_arn = Some("arn:aws:s3:::builds/cftcli/demo.zip".to_string());
    let ops = FakeBuildOps::with_progress(vec![done]);

    build::run(&ops, &request(), destination.to_str())
        .await
        .unwrap();

    let downloads = ops.downloads.lock().unwrap();
    assert_eq!(downloads.len(), 1);
    assert_eq!(downloads[0].0, "builds");
    assert_eq!(downloads[0].1, "cftcli/demo.zip");
    assert!(destination.exists());
}
