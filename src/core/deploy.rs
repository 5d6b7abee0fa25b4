use crate::core::watch::StackWatcher;
use crate::domain::model::DeployRequest;
use crate::domain::ports::StackOps;
use crate::utils::error::{CftError, Result};
use crate::utils::validation::{validate_stack_name, Validate};

/// Which API call a deploy resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployAction {
    Create,
    Update,
}

impl Validate for DeployRequest {
    fn validate(&self) -> Result<()> {
        validate_stack_name("stackname", &self.stack_name)?;
        if self.template_body.trim().is_empty() {
            return Err(CftError::TemplateError {
                message: "template body is empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses the `--parameters` comma list: `foo=bar,cat=dog`.
pub fn parse_parameters(raw: &str) -> Result<Vec<(String, String)>> {
    let mut parameters = Vec::new();
    if raw.is_empty() {
        return Ok(parameters);
    }

    for pair in raw.split(',') {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(CftError::InvalidConfigValueError {
                field: "parameters".to_string(),
                value: pair.to_string(),
                reason: "expected name=value".to_string(),
            });
        };
        parameters.push((name.to_string(), value.to_string()));
    }
    Ok(parameters)
}

/// Submits the stack: update when it already exists, create otherwise.
pub async fn submit(ops: &dyn StackOps, request: &DeployRequest) -> Result<DeployAction> {
    request.validate()?;

    let action = if ops.stack_status(&request.stack_name).await.is_some() {
        tracing::debug!("stack {} exists, updating", request.stack_name);
        ops.update_stack(request).await?;
        DeployAction::Update
    } else {
        tracing::debug!("stack {} not found, creating", request.stack_name);
        ops.create_stack(request).await?;
        DeployAction::Create
    };
    Ok(action)
}

/// Full deploy flow: submit, then watch until the stack is terminal.
/// The terminal status is an error when it contains ROLLBACK or FAILED.
pub async fn run(ops: &dyn StackOps, request: &DeployRequest) -> Result<()> {
    submit(ops, request).await?;

    let outcome = StackWatcher::new(ops).wait(&request.stack_name).await?;
    crate::core::watch::report(&outcome);

    if outcome.is_failure() {
        return Err(CftError::StackFailed {
            stack: request.stack_name.clone(),
            status: outcome.status,
        });
    }
    Ok(())
}
