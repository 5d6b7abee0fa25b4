use crate::domain::model::{
    AssumedCredentials, BuildProgress, BuildRequest, DeployRequest, LogLocation, ResourceState,
    StackDetail, StackEvent, StackSummary,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// CloudFormation operations, one method per API interaction the commands
/// need. Pagination is handled behind the port.
#[async_trait]
pub trait StackOps: Send + Sync {
    /// Current status of the stack, or `None` when the describe call fails,
    /// which the tool reads as "the stack no longer exists".
    async fn stack_status(&self, name: &str) -> Option<String>;

    async fn resource_states(&self, name: &str) -> Result<Vec<ResourceState>>;

    async fn stack_events(&self, name: &str) -> Result<Vec<StackEvent>>;

    async fn describe_stack(&self, name: &str) -> Result<StackDetail>;

    async fn list_stacks(&self) -> Result<Vec<StackSummary>>;

    async fn create_stack(&self, request: &DeployRequest) -> Result<()>;

    async fn update_stack(&self, request: &DeployRequest) -> Result<()>;

    async fn delete_stack(&self, name: &str) -> Result<()>;

    async fn set_stack_policy(&self, name: &str, policy_body: &str) -> Result<()>;

    async fn set_termination_protection(&self, name: &str, enabled: bool) -> Result<()>;
}

/// CodePipeline read access.
#[async_trait]
pub trait PipelineOps: Send + Sync {
    async fn list_pipelines(&self) -> Result<Vec<String>>;

    /// Latest-execution status per stage, in stage order.
    async fn stage_statuses(&self, pipeline: &str) -> Result<Vec<String>>;
}

/// CodeBuild plus the log and artifact fetches that go with a build.
#[async_trait]
pub trait BuildOps: Send + Sync {
    async fn start_build(&self, request: &BuildRequest) -> Result<String>;

    async fn build_progress(&self, id: &str) -> Result<BuildProgress>;

    async fn log_messages(&self, log: &LogLocation) -> Result<Vec<String>>;

    async fn download_object(&self, bucket: &str, key: &str, destination: &Path) -> Result<()>;
}

/// STS access for the assume-role command.
#[async_trait]
pub trait TokenOps: Send + Sync {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<AssumedCredentials>;
}
