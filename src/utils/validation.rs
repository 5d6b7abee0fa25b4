use crate::utils::error::{CftError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_stack_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    // CloudFormation: letters, digits and hyphens, starting with a letter,
    // at most 128 characters.
    if name.len() > 128 {
        return Err(CftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Stack name must be at most 128 characters".to_string(),
        });
    }

    if !name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(CftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Stack name must start with a letter".to_string(),
        });
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(CftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Stack name can only contain letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

pub fn validate_readable_file(field_name: &str, path: &str) -> Result<()> {
    validate_non_empty_string(field_name, path)?;

    if !Path::new(path).is_file() {
        return Err(CftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "File does not exist or is not a regular file".to_string(),
        });
    }

    Ok(())
}

pub fn validate_role_arn(field_name: &str, arn: &str) -> Result<()> {
    validate_non_empty_string(field_name, arn)?;

    if !arn.starts_with("arn:") || !arn.contains(":role/") {
        return Err(CftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: arn.to_string(),
            reason: "Expected an IAM role ARN like arn:aws:iam::123456789012:role/name"
                .to_string(),
        });
    }

    Ok(())
}
