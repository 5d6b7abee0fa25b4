use crate::domain::ports::PipelineOps;
use crate::utils::error::{CftError, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_codepipeline::error::DisplayErrorContext;
use aws_sdk_codepipeline::Client;

pub struct CodePipelineOps {
    client: Client,
}

impl CodePipelineOps {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl PipelineOps for CodePipelineOps {
    async fn list_pipelines(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut call = self.client.list_pipelines();
            if let Some(token) = &next_token {
                call = call.next_token(token);
            }
            let output = call
                .send()
                .await
                .map_err(|e| CftError::api("list_pipelines", DisplayErrorContext(&e)))?;

            for pipeline in output.pipelines() {
                if let Some(name) = pipeline.name() {
                    names.push(name.to_string());
                }
            }

            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(names)
    }

    async fn stage_statuses(&self, pipeline: &str) -> Result<Vec<String>> {
        let output = self
            .client
            .get_pipeline_state()
            .name(pipeline)
            .send()
            .await
            .map_err(|e| CftError::api("get_pipeline_state", DisplayErrorContext(&e)))?;

        Ok(output
            .stage_states()
            .iter()
            .filter_map(|stage| stage.latest_execution())
            .map(|execution| execution.status().as_str().to_string())
            .collect())
    }
}
