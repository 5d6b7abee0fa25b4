use crate::aws::to_chrono;
use crate::domain::model::{
    DeployRequest, OnFailure, ResourceState, StackDetail, StackEvent, StackSummary,
};
use crate::domain::ports::StackOps;
use crate::utils::error::{CftError, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudformation::error::DisplayErrorContext;
use aws_sdk_cloudformation::types::{Capability, OnFailure as SdkOnFailure, Parameter, Stack};
use aws_sdk_cloudformation::Client;
use serde_json::json;

pub struct CloudFormationStackOps {
    client: Client,
}

impl CloudFormationStackOps {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

fn sdk_on_failure(mode: OnFailure) -> SdkOnFailure {
    match mode {
        OnFailure::DoNothing => SdkOnFailure::DoNothing,
        OnFailure::Rollback => SdkOnFailure::Rollback,
        OnFailure::Delete => SdkOnFailure::Delete,
    }
}

fn sdk_parameters(request: &DeployRequest) -> Vec<Parameter> {
    request
        .parameters
        .iter()
        .map(|(key, value)| {
            Parameter::builder()
                .parameter_key(key)
                .parameter_value(value)
                .build()
        })
        .collect()
}

/// The populated fields of a stack, in the order the detail view shows them.
fn detail_fields(stack: &Stack) -> Vec<(String, serde_json::Value)> {
    let mut fields: Vec<(String, serde_json::Value)> = Vec::new();
    let mut push = |key: &str, value: serde_json::Value| fields.push((key.to_string(), value));

    push("StackId", json!(stack.stack_id().unwrap_or_default()));
    push("StackName", json!(stack.stack_name().unwrap_or_default()));
    push("Description", json!(stack.description().unwrap_or_default()));
    push(
        "StackStatus",
        json!(stack.stack_status().map(|s| s.as_str()).unwrap_or_default()),
    );
    push(
        "StackStatusReason",
        json!(stack.stack_status_reason().unwrap_or_default()),
    );
    push(
        "CreationTime",
        json!(stack
            .creation_time()
            .map(to_chrono)
            .unwrap_or_default()
            .to_string()),
    );
    if let Some(updated) = stack.last_updated_time() {
        push("LastUpdatedTime", json!(to_chrono(updated).to_string()));
    }
    if let Some(deleted) = stack.deletion_time() {
        push("DeletionTime", json!(to_chrono(deleted).to_string()));
    }
    if let Some(disable_rollback) = stack.disable_rollback() {
        push("DisableRollback", json!(disable_rollback.to_string()));
    }
    if let Some(protected) = stack.enable_termination_protection() {
        push("EnableTerminationProtection", json!(protected.to_string()));
    }
    push(
        "Capabilities",
        json!(stack
            .capabilities()
            .iter()
            .map(|c| c.as_str().to_string())
            .collect::<Vec<_>>()),
    );
    push(
        "Parameters",
        json!(stack
            .parameters()
            .iter()
            .map(|p| json!({
                "ParameterKey": p.parameter_key().unwrap_or_default(),
                "ParameterValue": p.parameter_value().unwrap_or_default(),
            }))
            .collect::<Vec<_>>()),
    );
    push(
        "Outputs",
        json!(stack
            .outputs()
            .iter()
            .map(|o| json!({
                "OutputKey": o.output_key().unwrap_or_default(),
                "OutputValue": o.output_value().unwrap_or_default(),
                "Description": o.description().unwrap_or_default(),
            }))
            .collect::<Vec<_>>()),
    );
    push(
        "Tags",
        json!(stack
            .tags()
            .iter()
            .map(|t| json!({"Key": t.key(), "Value": t.value()}))
            .collect::<Vec<_>>()),
    );
    if let Some(role_arn) = stack.role_arn() {
        push("RoleARN", json!(role_arn));
    }

    fields
}

#[async_trait]
impl StackOps for CloudFormationStackOps {
    async fn stack_status(&self, name: &str) -> Option<String> {
        match self
            .client
            .describe_stacks()
            .stack_name(name)
            .send()
            .await
        {
            Ok(output) => output
                .stacks()
                .first()
                .map(|s| s.stack_status().map(|st| st.as_str()).unwrap_or_default().to_string()),
            Err(e) => {
                tracing::debug!(
                    "describe of {} failed, presuming gone: {}",
                    name,
                    DisplayErrorContext(&e)
                );
                None
            }
        }
    }

    async fn resource_states(&self, name: &str) -> Result<Vec<ResourceState>> {
        let output = self
            .client
            .describe_stack_resources()
            .stack_name(name)
            .send()
            .await
            .map_err(|e| CftError::api("describe_stack_resources", DisplayErrorContext(&e)))?;

        Ok(output
            .stack_resources()
            .iter()
            .map(|r| ResourceState {
                logical_id: r.logical_resource_id().unwrap_or_default().to_string(),
                status: r
                    .resource_status()
                    .map(|s| s.as_str())
                    .unwrap_or_default()
                    .to_string(),
                reason: r.resource_status_reason().map(str::to_string),
            })
            .collect())
    }

    async fn stack_events(&self, name: &str) -> Result<Vec<StackEvent>> {
        let mut events = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut call = self.client.describe_stack_events().stack_name(name);
            if let Some(token) = &next_token {
                call = call.next_token(token);
            }
            let output = call
                .send()
                .await
                .map_err(|e| CftError::api("describe_stack_events", DisplayErrorContext(&e)))?;

            for event in output.stack_events() {
                events.push(StackEvent {
                    logical_id: event.logical_resource_id().unwrap_or_default().to_string(),
                    physical_id: event
                        .physical_resource_id()
                        .unwrap_or_default()
                        .to_string(),
                    resource_type: event.resource_type().unwrap_or_default().to_string(),
                    timestamp: event.timestamp().map(to_chrono).unwrap_or_default(),
                    status: event
                        .resource_status()
                        .map(|s| s.as_str().to_string())
                        .unwrap_or_default(),
                    reason: event.resource_status_reason().map(str::to_string),
                    properties: event.resource_properties().map(str::to_string),
                });
            }

            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(events)
    }

    async fn describe_stack(&self, name: &str) -> Result<StackDetail> {
        let output = self
            .client
            .describe_stacks()
            .stack_name(name)
            .send()
            .await
            .map_err(|e| CftError::api("describe_stacks", DisplayErrorContext(&e)))?;

        let stack = output
            .stacks()
            .first()
            .ok_or_else(|| CftError::ApiError {
                message: format!("stack {} not found", name),
            })?;

        Ok(StackDetail {
            fields: detail_fields(stack),
        })
    }

    async fn list_stacks(&self) -> Result<Vec<StackSummary>> {
        let mut stacks = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let mut call = self.client.list_stacks();
            if let Some(token) = &next_token {
                call = call.next_token(token);
            }
            let output = call
                .send()
                .await
                .map_err(|e| CftError::api("list_stacks", DisplayErrorContext(&e)))?;

            for summary in output.stack_summaries() {
                stacks.push(StackSummary {
                    name: summary.stack_name().unwrap_or_default().to_string(),
                    status: summary
                        .stack_status()
                        .map(|s| s.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    created: summary.creation_time().map(to_chrono).unwrap_or_default(),
                    updated: summary.last_updated_time().map(to_chrono),
                });
            }

            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(stacks)
    }

    async fn create_stack(&self, request: &DeployRequest) -> Result<()> {
        let mut call = self
            .client
            .create_stack()
            .stack_name(&request.stack_name)
            .template_body(&request.template_body)
            .capabilities(Capability::CapabilityIam)
            .capabilities(Capability::CapabilityNamedIam)
            .capabilities(Capability::CapabilityAutoExpand)
            .on_failure(sdk_on_failure(request.on_failure))
            .enable_termination_protection(request.protected);
        for parameter in sdk_parameters(request) {
            call = call.parameters(parameter);
        }
        call.send()
            .await
            .map_err(|e| CftError::api("create_stack", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn update_stack(&self, request: &DeployRequest) -> Result<()> {
        let mut call = self
            .client
            .update_stack()
            .stack_name(&request.stack_name)
            .template_body(&request.template_body)
            .capabilities(Capability::CapabilityIam)
            .capabilities(Capability::CapabilityNamedIam)
            .capabilities(Capability::CapabilityAutoExpand);
        for parameter in sdk_parameters(request) {
            call = call.parameters(parameter);
        }
        call.send()
            .await
            .map_err(|e| CftError::api("update_stack", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn delete_stack(&self, name: &str) -> Result<()> {
        self.client
            .delete_stack()
            .stack_name(name)
            .send()
            .await
            .map_err(|e| CftError::api("delete_stack", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn set_stack_policy(&self, name: &str, policy_body: &str) -> Result<()> {
        self.client
            .set_stack_policy()
            .stack_name(name)
            .stack_policy_body(policy_body)
            .send()
            .await
            .map_err(|e| CftError::api("set_stack_policy", DisplayErrorContext(&e)))?;
        Ok(())
    }

    async fn set_termination_protection(&self, name: &str, enabled: bool) -> Result<()> {
        self.client
            .update_termination_protection()
            .stack_name(name)
            .enable_termination_protection(enabled)
            .send()
            .await
            .map_err(|e| {
                CftError::api("update_termination_protection", DisplayErrorContext(&e))
            })?;
        Ok(())
    }
}
