use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One row of `list-stacks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackSummary {
    pub name: String,
    pub status: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

impl StackSummary {
    /// Prefer the last update time, falling back to creation.
    pub fn display_date(&self) -> DateTime<Utc> {
        self.updated.unwrap_or(self.created)
    }
}

/// Populated fields of a described stack, in display order.
#[derive(Debug, Clone, Default)]
pub struct StackDetail {
    pub fields: Vec<(String, serde_json::Value)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackEvent {
    pub logical_id: String,
    pub physical_id: String,
    pub resource_type: String,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    pub reason: Option<String>,
    pub properties: Option<String>,
}

/// Status of a single stack resource, as reported by the resource listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceState {
    pub logical_id: String,
    pub status: String,
    pub reason: Option<String>,
}

impl ResourceState {
    pub fn is_in_progress(&self) -> bool {
        self.status.to_uppercase().contains("IN_PROGRESS")
    }

    pub fn is_failed(&self) -> bool {
        self.status.to_uppercase().contains("FAILED")
    }
}

/// Behavior when stack creation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum OnFailure {
    #[value(name = "DO_NOTHING")]
    DoNothing,
    #[value(name = "ROLLBACK")]
    Rollback,
    #[value(name = "DELETE")]
    Delete,
}

#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub stack_name: String,
    pub template_body: String,
    pub parameters: Vec<(String, String)>,
    pub on_failure: OnFailure,
    pub protected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineHealth {
    Succeeded,
    InProgress,
    Failed,
}

#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub name: String,
    pub health: PipelineHealth,
}

/// S3 destination for an ad-hoc build artifact.
#[derive(Debug, Clone)]
pub struct ArtifactTarget {
    pub bucket: String,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub project: String,
    pub buildspec: String,
    pub source_artifact: Option<String>,
    pub destination: Option<ArtifactTarget>,
}

/// CloudWatch Logs coordinates of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLocation {
    pub group: String,
    pub stream: String,
}

#[derive(Debug, Clone)]
pub struct BuildProgress {
    pub id: String,
    pub project: String,
    pub status: String,
    pub phase: String,
    pub complete: bool,
    pub log: Option<LogLocation>,
    /// S3 ARN of the produced artifact, when the build uploaded one.
    pub artifact_arn: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssumedCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}
