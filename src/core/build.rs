use crate::domain::model::{BuildProgress, BuildRequest};
use crate::domain::ports::BuildOps;
use crate::utils::error::{CftError, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// `arn:aws:s3:::bucket/folder/object` -> `s3://bucket/folder/object`
pub fn s3_arn_to_url(arn: &str) -> String {
    format!("s3://{}", arn.rsplit(':').next().unwrap_or_default())
}

/// Bucket and key of an S3 object ARN.
pub fn s3_arn_to_parts(arn: &str) -> Result<(String, String)> {
    let url = Url::parse(&s3_arn_to_url(arn)).map_err(|e| CftError::ConfigError {
        message: format!("unparseable artifact location '{}': {}", arn, e),
    })?;
    let bucket = url.host_str().unwrap_or_default().to_string();
    let key = url.path().trim_start_matches('/').to_string();
    if bucket.is_empty() || key.is_empty() {
        return Err(CftError::ConfigError {
            message: format!("artifact location '{}' has no bucket/key", arn),
        });
    }
    Ok((bucket, key))
}

/// CodeBuild prefixes every shell line with `[Container]`; strip it.
pub fn clean_log_line(message: &str) -> String {
    message
        .trim()
        .trim_start_matches("[Container]")
        .trim()
        .to_string()
}

/// Polls the build until it reports complete, spinning while the
/// status/phase pair holds still.
pub async fn wait_build(
    ops: &dyn BuildOps,
    id: &str,
    interval: Duration,
) -> Result<BuildProgress> {
    let mut build = ops.build_progress(id).await?;

    while !build.complete {
        if build.status != "IN_PROGRESS" || build.phase == "COMPLETED" {
            break;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message(format!(
            "{} is {} under {}",
            build.project, build.status, build.phase
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let tracker = (build.status.clone(), build.phase.clone());
        while tracker == (build.status.clone(), build.phase.clone()) {
            tokio::time::sleep(interval).await;
            build = ops.build_progress(id).await?;
        }
        spinner.finish_and_clear();
    }

    Ok(build)
}

/// Starts the build, watches it, prints the final log, and downloads the
/// artifact when one was requested.
pub async fn run(
    ops: &dyn BuildOps,
    request: &BuildRequest,
    artifact_destination: Option<&str>,
) -> Result<()> {
    let id = ops.start_build(request).await?;
    tracing::info!("started build {}", id);

    let build = wait_build(ops, &id, POLL_INTERVAL).await?;

    let status = if build.phase == "COMPLETED" {
        build.phase.green()
    } else {
        build.phase.red()
    };
    println!("build complete with status {}", status);

    if let Some(log) = &build.log {
        match ops.log_messages(log).await {
            Ok(messages) => {
                for message in messages {
                    println!("{}", clean_log_line(&message));
                }
            }
            Err(e) => tracing::debug!("no logs for build {}: {}", id, e),
        }
    }

    if let (Some(arn), Some(destination)) = (&build.artifact_arn, artifact_destination) {
        let (bucket, key) = s3_arn_to_parts(arn)?;
        match ops
            .download_object(&bucket, &key, Path::new(destination))
            .await
        {
            Ok(()) => println!("Download of {} {}", destination, "SUCCESS".green()),
            Err(e) => {
                tracing::debug!("failed to download {}: {}", destination, e);
                println!("Download of {} {}", s3_arn_to_url(arn), "FAILED".red());
            }
        }
    }

    if build.phase != "COMPLETED" {
        return Err(CftError::BuildFailed {
            project: build.project,
            phase: build.phase,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arn_converts_to_s3_url() {
        assert_eq!(
            s3_arn_to_url("arn:aws:s3:::bucket/folder/object.zip"),
            "s3://bucket/folder/object.zip"
        );
    }

    #[test]
    fn arn_splits_into_bucket_and_key() {
        let (bucket, key) = s3_arn_to_parts("arn:aws:s3:::builds/cftcli/app.zip").unwrap();
        assert_eq!(bucket, "builds");
        assert_eq!(key, "cftcli/app.zip");
    }

    #[test]
    fn arn_without_key_is_rejected() {
        assert!(s3_arn_to_parts("arn:aws:s3:::just-a-bucket").is_err());
    }

    #[test]
    fn container_prefix_is_stripped() {
        assert_eq!(
            clean_log_line("[Container] 2024/05/01 phase DOWNLOAD_SOURCE\n"),
            "2024/05/01 phase DOWNLOAD_SOURCE"
        );
        assert_eq!(clean_log_line("  plain line  "), "plain line");
    }
}
