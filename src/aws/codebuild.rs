use crate::domain::model::{BuildProgress, BuildRequest, LogLocation};
use crate::domain::ports::BuildOps;
use crate::utils::error::{CftError, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_codebuild::error::DisplayErrorContext;
use aws_sdk_codebuild::types::{
    ArtifactPackaging, ArtifactsType, BucketOwnerAccess, ProjectArtifacts, SourceType,
};
use aws_sdk_codebuild::Client;
use std::path::Path;

pub struct CodeBuildOps {
    client: Client,
    logs: aws_sdk_cloudwatchlogs::Client,
    s3: aws_sdk_s3::Client,
}

impl CodeBuildOps {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
            logs: aws_sdk_cloudwatchlogs::Client::new(config),
            s3: aws_sdk_s3::Client::new(config),
        }
    }
}

/// `arn:aws:logs:region:account:log-group:GROUP:log-stream:STREAM`
/// fields 6 and 8 are the group and stream names.
fn log_location_from_arn(arn: &str) -> Option<LogLocation> {
    let fields: Vec<&str> = arn.split(':').collect();
    Some(LogLocation {
        group: fields.get(6)?.to_string(),
        stream: fields.get(8)?.to_string(),
    })
}

fn artifacts_override(request: &BuildRequest) -> Result<ProjectArtifacts> {
    let builder = match &request.destination {
        Some(target) => ProjectArtifacts::builder()
            .r#type(ArtifactsType::S3)
            .bucket_owner_access(BucketOwnerAccess::Full)
            .location(&target.bucket)
            .path(&target.path)
            .name(format!("{}.zip", request.project))
            .packaging(ArtifactPackaging::Zip)
            .override_artifact_name(true)
            .artifact_identifier("NONE"),
        None => ProjectArtifacts::builder().r#type(ArtifactsType::NoArtifacts),
    };
    builder
        .build()
        .map_err(|e| CftError::api("artifacts override", e))
}

#[async_trait]
impl BuildOps for CodeBuildOps {
    async fn start_build(&self, request: &BuildRequest) -> Result<String> {
        let mut call = self
            .client
            .start_build()
            .project_name(&request.project)
            .buildspec_override(&request.buildspec)
            .artifacts_override(artifacts_override(request)?);

        call = match &request.source_artifact {
            Some(location) => call
                .source_type_override(SourceType::S3)
                .source_location_override(location),
            None => call.source_type_override(SourceType::NoSource),
        };

        let output = call
            .send()
            .await
            .map_err(|e| CftError::api("start_build", DisplayErrorContext(&e)))?;

        output
            .build_value()
            .and_then(|b| b.id())
            .map(str::to_string)
            .ok_or_else(|| CftError::ApiError {
                message: "start_build returned no build id".to_string(),
            })
    }

    async fn build_progress(&self, id: &str) -> Result<BuildProgress> {
        let output = self
            .client
            .batch_get_builds()
            .ids(id)
            .send()
            .await
            .map_err(|e| CftError::api("batch_get_builds", DisplayErrorContext(&e)))?;

        let build = output.builds().first().ok_or_else(|| CftError::ApiError {
            message: format!("build {} not found", id),
        })?;

        Ok(BuildProgress {
            id: build.id().unwrap_or(id).to_string(),
            project: build.project_name().unwrap_or_default().to_string(),
            status: build
                .build_status()
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            phase: build.current_phase().unwrap_or_default().to_string(),
            complete: build.build_complete(),
            log: build
                .logs()
                .and_then(|l| l.cloud_watch_logs_arn())
                .and_then(log_location_from_arn),
            artifact_arn: build
                .artifacts()
                .and_then(|a| a.location())
                .map(str::to_string),
        })
    }

    async fn log_messages(&self, log: &LogLocation) -> Result<Vec<String>> {
        let output = self
            .logs
            .get_log_events()
            .log_group_name(&log.group)
            .log_stream_name(&log.stream)
            .send()
            .await
            .map_err(|e| CftError::api("get_log_events", DisplayErrorContext(&e)))?;

        Ok(output
            .events()
            .iter()
            .filter_map(|e| e.message())
            .map(str::to_string)
            .collect())
    }

    async fn download_object(&self, bucket: &str, key: &str, destination: &Path) -> Result<()> {
        let response = self
            .s3
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| CftError::api("get_object", DisplayErrorContext(&e)))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| CftError::api("get_object body", e))?;

        std::fs::write(destination, data.into_bytes())?;
        Ok(())
    }
}
