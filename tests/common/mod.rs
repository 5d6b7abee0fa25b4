use async_trait::async_trait;
use cftcli::domain::model::{
    DeployRequest, ResourceState, StackDetail, StackEvent, StackSummary,
};
use cftcli::domain::ports::StackOps;
use cftcli::utils::error::Result;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted CloudFormation fake: `stack_status` pops from a queue and keeps
/// returning the final entry, so a test can describe a whole stack lifecycle
/// up front.
pub struct FakeStackOps {
    statuses: Mutex<VecDeque<Option<String>>>,
    pub resources: Mutex<Vec<ResourceState>>,
    pub created: Mutex<Vec<DeployRequest>>,
    pub updated: Mutex<Vec<DeployRequest>>,
    pub deleted: Mutex<Vec<String>>,
    pub policies: Mutex<Vec<String>>,
    pub protections: Mutex<Vec<bool>>,
}

impl FakeStackOps {
    pub fn with_statuses(script: &[Option<&str>]) -> Self {
        Self {
            statuses: Mutex::new(
                script
                    .iter()
                    .map(|s| s.map(str::to_string))
                    .collect(),
            ),
            resources: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
            updated: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            policies: Mutex::new(Vec::new()),
            protections: Mutex::new(Vec::new()),
        }
    }

    pub fn set_resources(&self, resources: Vec<ResourceState>) {
        *self.resources.lock().unwrap() = resources;
    }
}

pub fn resource(logical_id: &str, status: &str) -> ResourceState {
    ResourceState {
        logical_id: logical_id.to_string(),
        status: status.to_string(),
        reason: None,
    }
}

#[async_trait]
impl StackOps for FakeStackOps {
    async fn stack_status(&self, _name: &str) -> Option<String> {
        let mut script = self.statuses.lock().unwrap();
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap_or(None)
        }
    }

    async fn resource_states(&self, _name: &str) -> Result<Vec<ResourceState>> {
        Ok(self.resources.lock().unwrap().clone())
    }

    async fn stack_events(&self, _name: &str) -> Result<Vec<StackEvent>> {
        Ok(Vec::new())
    }

    async fn describe_stack(&self, _name: &str) -> Result<StackDetail> {
        Ok(StackDetail::default())
    }

    async fn list_stacks(&self) -> Result<Vec<StackSummary>> {
        Ok(Vec::new())
    }

    async fn create_stack(&self, request: &DeployRequest) -> Result<()> {
        self.created.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn update_stack(&self, request: &DeployRequest) -> Result<()> {
        self.updated.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn delete_stack(&self, name: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn set_stack_policy(&self, _name: &str, policy_body: &str) -> Result<()> {
        self.policies.lock().unwrap().push(policy_body.to_string());
        Ok(())
    }

    async fn set_termination_protection(&self, _name: &str, enabled: bool) -> Result<()> {
        self.protections.lock().unwrap().push(enabled);
        Ok(())
    }
}

pub fn deploy_request(stack_name: &str) -> DeployRequest {
    DeployRequest {
        stack_name: stack_name.to_string(),
        template_body: "Resources: {}".to_string(),
        parameters: Vec::new(),
        on_failure: cftcli::OnFailure::DoNothing,
        protected: false,
    }
}
