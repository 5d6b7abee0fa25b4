use crate::domain::model::AssumedCredentials;
use crate::domain::ports::TokenOps;
use crate::utils::error::{CftError, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Session name for the assumed role: the local username.
pub fn session_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_else(|_| "cftcli".to_string())
}

/// Sections of an AWS ini file (`~/.aws/config`, `~/.aws/credentials`),
/// keyed by section name. There is no ini crate in our stack, and the
/// format here is only `[section]` plus `key = value` lines.
type IniSections = BTreeMap<String, BTreeMap<String, String>>;

fn parse_ini(raw: &str) -> IniSections {
    let mut sections = IniSections::new();
    let mut current: Option<String> = None;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = Some(name.trim().to_string());
            sections.entry(name.trim().to_string()).or_default();
            continue;
        }
        if let (Some(section), Some((key, value))) = (&current, line.split_once('=')) {
            sections
                .entry(section.clone())
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    sections
}

fn write_ini(sections: &IniSections) -> String {
    let mut out = String::new();
    for (name, entries) in sections {
        out.push_str(&format!("[{}]\n", name));
        for (key, value) in entries {
            out.push_str(&format!("{} = {}\n", key, value));
        }
        out.push('\n');
    }
    out
}

fn load_sections(path: &Path, profile: &str) -> Result<IniSections> {
    let mut sections = match std::fs::read_to_string(path) {
        Ok(raw) => parse_ini(&raw),
        Err(_) => {
            tracing::debug!("no existing file at {}", path.display());
            IniSections::new()
        }
    };
    // the target profile is rewritten from scratch
    sections.remove(profile);
    Ok(sections)
}

/// Writes the assumed credentials into `{aws_dir}/credentials` and the
/// region into `{aws_dir}/config`, replacing only the target profile and
/// keeping every other section intact.
pub fn apply_profile(
    aws_dir: &Path,
    profile: &str,
    region: &str,
    credentials: &AssumedCredentials,
) -> Result<()> {
    std::fs::create_dir_all(aws_dir)?;

    let credentials_path = aws_dir.join("credentials");
    let mut credential_sections = load_sections(&credentials_path, profile)?;
    let mut entries = BTreeMap::new();
    entries.insert(
        "aws_access_key_id".to_string(),
        credentials.access_key_id.clone(),
    );
    entries.insert(
        "aws_secret_access_key".to_string(),
        credentials.secret_access_key.clone(),
    );
    entries.insert(
        "aws_session_token".to_string(),
        credentials.session_token.clone(),
    );
    credential_sections.insert(profile.to_string(), entries);
    std::fs::write(&credentials_path, write_ini(&credential_sections))?;

    let config_path = aws_dir.join("config");
    let mut config_sections = load_sections(&config_path, profile)?;
    let mut entries = BTreeMap::new();
    entries.insert("region".to_string(), region.to_string());
    config_sections.insert(profile.to_string(), entries);
    std::fs::write(&config_path, write_ini(&config_sections))?;

    Ok(())
}

/// Assume-role flow: with a destination profile the credentials land in the
/// AWS config files, otherwise they are printed as JSON for eval/capture.
pub async fn run(
    ops: &dyn TokenOps,
    role_arn: &str,
    region: &str,
    dst_profile: Option<&str>,
) -> Result<()> {
    tracing::info!("Assuming the role {}", role_arn);
    let credentials = ops.assume_role(role_arn, &session_name()).await?;

    match dst_profile {
        Some(profile) => {
            let aws_dir = dirs::home_dir()
                .ok_or_else(|| CftError::CredentialError {
                    message: "cannot locate home directory".to_string(),
                })?
                .join(".aws");
            apply_profile(&aws_dir, profile, region, &credentials)?;
            println!("Profile {} written", profile);
        }
        None => {
            println!(
                "{}",
                serde_json::json!({
                    "aws_access_key_id": credentials.access_key_id,
                    "aws_secret_access_key": credentials.secret_access_key,
                    "aws_session_token": credentials.session_token,
                    "region": region,
                })
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> AssumedCredentials {
        AssumedCredentials {
            access_key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: "token".to_string(),
        }
    }

    #[test]
    fn writes_fresh_profile_files() {
        let dir = tempfile::tempdir().unwrap();
        apply_profile(dir.path(), "sandbox", "us-east-1", &creds()).unwrap();

        let credentials = std::fs::read_to_string(dir.path().join("credentials")).unwrap();
        assert!(credentials.contains("[sandbox]"));
        assert!(credentials.contains("aws_access_key_id = AKIAEXAMPLE"));
        assert!(credentials.contains("aws_session_token = token"));

        let config = std::fs::read_to_string(dir.path().join("config")).unwrap();
        assert!(config.contains("[sandbox]"));
        assert!(config.contains("region = us-east-1"));
    }

    #[test]
    fn other_profiles_survive_a_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("credentials"),
            "[default]\naws_access_key_id = KEEPME\n\n[sandbox]\naws_access_key_id = OLD\n",
        )
        .unwrap();

        apply_profile(dir.path(), "sandbox", "us-east-1", &creds()).unwrap();

        let credentials = std::fs::read_to_string(dir.path().join("credentials")).unwrap();
        assert!(credentials.contains("KEEPME"));
        assert!(!credentials.contains("OLD"));
        assert!(credentials.contains("AKIAEXAMPLE"));
    }

    #[test]
    fn ini_roundtrip_preserves_sections() {
        let parsed = parse_ini("[a]\nx = 1\n# comment\n[b]\ny = 2\n");
        assert_eq!(parsed["a"]["x"], "1");
        assert_eq!(parsed["b"]["y"], "2");
        let rendered = write_ini(&parsed);
        assert_eq!(parse_ini(&rendered), parsed);
    }

    #[test]
    fn session_name_never_empty() {
        assert!(!session_name().is_empty());
    }
}
