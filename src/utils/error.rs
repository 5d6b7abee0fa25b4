use thiserror::Error;

#[derive(Error, Debug)]
pub enum CftError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Template error: {message}")]
    TemplateError { message: String },

    #[error("AWS API error: {message}")]
    ApiError { message: String },

    #[error("Stack {stack} finished in {status}")]
    StackFailed { stack: String, status: String },

    #[error("Build {project} finished in phase {phase}")]
    BuildFailed { project: String, phase: String },

    #[error("Credential error: {message}")]
    CredentialError { message: String },
}

pub type Result<T> = std::result::Result<T, CftError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Io,
    Api,
    Operation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CftError {
    /// Shorthand for wrapping a service error at an adapter boundary.
    pub fn api(context: &str, err: impl std::fmt::Display) -> Self {
        CftError::ApiError {
            message: format!("{}: {}", context, err),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CftError::IoError(_) => ErrorCategory::Io,
            CftError::SerializationError(_) => ErrorCategory::Io,
            CftError::ConfigError { .. }
            | CftError::InvalidConfigValueError { .. }
            | CftError::MissingConfigError { .. }
            | CftError::TemplateError { .. } => ErrorCategory::Config,
            CftError::ApiError { .. } | CftError::CredentialError { .. } => ErrorCategory::Api,
            CftError::StackFailed { .. } | CftError::BuildFailed { .. } => {
                ErrorCategory::Operation
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CftError::IoError(_) => ErrorSeverity::Critical,
            CftError::SerializationError(_) => ErrorSeverity::High,
            CftError::ConfigError { .. }
            | CftError::InvalidConfigValueError { .. }
            | CftError::MissingConfigError { .. }
            | CftError::TemplateError { .. } => ErrorSeverity::High,
            // throttling and transient network failures are worth a retry
            CftError::ApiError { .. } => ErrorSeverity::Medium,
            CftError::CredentialError { .. } => ErrorSeverity::Critical,
            CftError::StackFailed { .. } | CftError::BuildFailed { .. } => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CftError::IoError(_) => {
                "Check file permissions and available disk space".to_string()
            }
            CftError::SerializationError(_) => {
                "The response or cache file was not valid JSON; remove ~/.cftcli to reset"
                    .to_string()
            }
            CftError::ConfigError { .. }
            | CftError::InvalidConfigValueError { .. }
            | CftError::MissingConfigError { .. } => {
                "Review the command line options and environment variables".to_string()
            }
            CftError::TemplateError { .. } => {
                "Check that the template file exists and is readable".to_string()
            }
            CftError::ApiError { .. } => {
                "Verify AWS credentials, region, and network access, then retry".to_string()
            }
            CftError::StackFailed { stack, .. } => format!(
                "Inspect the failed resources with 'cftcli describe -s {}'",
                stack
            ),
            CftError::BuildFailed { project, .. } => format!(
                "Inspect the build logs for project {} in the CodeBuild console",
                project
            ),
            CftError::CredentialError { .. } => {
                "Confirm the role ARN and that the source profile may assume it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CftError::ApiError { message } => format!("AWS rejected the request: {}", message),
            CftError::StackFailed { stack, status } => {
                format!("Stack {} did not converge: {}", stack, status)
            }
            CftError::BuildFailed { project, phase } => {
                format!("Build for {} stopped in phase {}", project, phase)
            }
            other => other.to_string(),
        }
    }
}
