use crate::domain::model::AssumedCredentials;
use crate::domain::ports::TokenOps;
use crate::utils::error::{CftError, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client;

pub struct StsTokenOps {
    client: Client,
}

impl StsTokenOps {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl TokenOps for StsTokenOps {
    async fn assume_role(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<AssumedCredentials> {
        let output = self
            .client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name)
            .send()
            .await
            .map_err(|e| CftError::CredentialError {
                message: format!("assume_role: {}", DisplayErrorContext(&e)),
            })?;

        let credentials = output
            .credentials()
            .ok_or_else(|| CftError::CredentialError {
                message: "assume_role returned no credentials".to_string(),
            })?;

        Ok(AssumedCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().to_string(),
        })
    }
}
