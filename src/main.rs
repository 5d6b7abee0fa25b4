use cftcli::aws::cloudformation::CloudFormationStackOps;
use cftcli::aws::codebuild::CodeBuildOps;
use cftcli::aws::codepipeline::CodePipelineOps;
use cftcli::aws::sts::StsTokenOps;
use cftcli::config::cli::{AssumeRoleArgs, CodebuildArgs, DeployArgs, GlobalOpts};
use cftcli::config::resolve;
use cftcli::core;
use cftcli::domain::model::{ArtifactTarget, BuildRequest, DeployRequest};
use cftcli::utils::error::{CftError, ErrorSeverity, Result};
use cftcli::utils::logger;
use cftcli::utils::validation::{
    validate_aws_region, validate_readable_file, validate_role_arn, validate_stack_name,
};
use cftcli::{Cli, Commands, DefaultsCache};
use clap::Parser;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.global.verbosity);

    tracing::info!("Starting cftcli");
    if cli.global.verbosity > 0 {
        tracing::debug!("global options: {:?}", cli.global);
    }

    let mut cache = DefaultsCache::open_default();

    match run(cli, &mut cache).await {
        Ok(()) => {
            if let Err(e) = cache.save() {
                tracing::debug!("could not persist defaults cache: {}", e);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

/// Resolved `--profile`/`--region` with the sticky cache behind them and the
/// classic fallbacks last: the `default` profile in `us-east-1`.
fn session_options(global: &GlobalOpts, cache: &DefaultsCache) -> (String, String) {
    let profile = resolve(global.profile.as_deref(), cache, "profile", "default");
    let region = resolve(global.region.as_deref(), cache, "region", "us-east-1");
    (profile, region)
}

fn remember_session(cache: &mut DefaultsCache, profile: &str, region: &str) {
    cache.add("profile", profile);
    cache.add("region", region);
}

async fn run(cli: Cli, cache: &mut DefaultsCache) -> Result<()> {
    let (profile, region) = session_options(&cli.global, cache);
    validate_aws_region("region", &region)?;

    match cli.command {
        Commands::Deploy(args) => {
            let request = deploy_request(&args, cache)?;
            remember_session(cache, &profile, &region);
            cache.add("stackname", &request.stack_name);

            let config = cftcli::aws::sdk_config(Some(&profile), Some(&region)).await;
            let ops = CloudFormationStackOps::new(&config);
            core::deploy::run(&ops, &request).await
        }
        Commands::Delete(args) => {
            remember_session(cache, &profile, &region);
            let config = cftcli::aws::sdk_config(Some(&profile), Some(&region)).await;
            let ops = CloudFormationStackOps::new(&config);
            core::destroy::run(&ops, &args.stackname).await
        }
        Commands::List => {
            remember_session(cache, &profile, &region);
            let config = cftcli::aws::sdk_config(Some(&profile), Some(&region)).await;
            let ops = CloudFormationStackOps::new(&config);
            core::list::run(&ops).await
        }
        Commands::Describe(args) => {
            remember_session(cache, &profile, &region);
            cache.add("stackname", &args.stackname);
            let config = cftcli::aws::sdk_config(Some(&profile), Some(&region)).await;
            let ops = CloudFormationStackOps::new(&config);
            core::describe::run(&ops, &args.stackname).await
        }
        Commands::Pipelines => {
            remember_session(cache, &profile, &region);
            let config = cftcli::aws::sdk_config(Some(&profile), Some(&region)).await;
            let ops = CodePipelineOps::new(&config);
            core::pipelines::run(&ops).await
        }
        Commands::Codebuild(args) => {
            let (request, destination) = build_request(&args, cache)?;
            remember_session(cache, &profile, &region);

            let config = cftcli::aws::sdk_config(Some(&profile), Some(&region)).await;
            let ops = CodeBuildOps::new(&config);
            core::build::run(&ops, &request, destination.as_deref()).await
        }
        Commands::Lock(args) => {
            remember_session(cache, &profile, &region);
            let config = cftcli::aws::sdk_config(Some(&profile), Some(&region)).await;
            let ops = CloudFormationStackOps::new(&config);
            core::lock::run(&ops, &args.stackname).await
        }
        Commands::Attach(args) => {
            remember_session(cache, &profile, &region);
            let config = cftcli::aws::sdk_config(Some(&profile), Some(&region)).await;
            let ops = CloudFormationStackOps::new(&config);
            core::attach::run(&ops, &args.stackname).await
        }
        Commands::AssumeRole(args) => {
            let request = assume_role_request(&args, cache)?;

            // the role is assumed with the source profile, not the target
            let config =
                cftcli::aws::sdk_config(request.src_profile.as_deref(), Some(&region)).await;
            let ops = StsTokenOps::new(&config);
            core::credentials::run(
                &ops,
                &request.rolearn,
                &region,
                request.dst_profile.as_deref(),
            )
            .await
        }
    }
}

fn deploy_request(args: &DeployArgs, cache: &mut DefaultsCache) -> Result<DeployRequest> {
    // reject the stack name before anything about this run becomes sticky
    validate_stack_name("stackname", &args.stackname)?;

    let filename = resolve(args.filename.as_deref(), cache, "filename", "");
    if filename.is_empty() {
        return Err(CftError::MissingConfigError {
            field: "filename".to_string(),
        });
    }
    validate_readable_file("filename", &filename)?;
    cache.add("filename", &filename);

    let template_body =
        std::fs::read_to_string(&filename).map_err(|e| CftError::TemplateError {
            message: format!("cannot read {}: {}", filename, e),
        })?;

    Ok(DeployRequest {
        stack_name: args.stackname.clone(),
        template_body,
        parameters: core::deploy::parse_parameters(&args.parameters)?,
        on_failure: args.failure,
        protected: args.protected,
    })
}

fn build_request(
    args: &CodebuildArgs,
    cache: &mut DefaultsCache,
) -> Result<(BuildRequest, Option<String>)> {
    let project = resolve(args.codebuild.as_deref(), cache, "codebuild", "DefaultCodeBuild");
    let buildspec_file = resolve(args.buildspec.as_deref(), cache, "buildspec", "");
    if buildspec_file.is_empty() {
        return Err(CftError::MissingConfigError {
            field: "buildspec".to_string(),
        });
    }
    validate_readable_file("buildspec", &buildspec_file)?;
    let buildspec = std::fs::read_to_string(&buildspec_file)?;

    let src_artifact = resolve(args.src_artifact.as_deref(), cache, "src_artifact", "");
    let dst_artifact = resolve(args.dst_artifact.as_deref(), cache, "dst_artifact", "");
    let bucket = resolve(args.bucket.as_deref(), cache, "bucket", "");
    let bucket_path = resolve(args.bucket_path.as_deref(), cache, "bucket_path", "cftcli");

    let destination = if dst_artifact.is_empty() {
        None
    } else {
        if bucket.is_empty() {
            return Err(CftError::MissingConfigError {
                field: "bucket".to_string(),
            });
        }
        Some(ArtifactTarget {
            bucket: bucket.clone(),
            path: bucket_path.clone(),
        })
    };

    cache.add("codebuild", &project);
    cache.add("buildspec", &buildspec_file);
    cache.add("src_artifact", &src_artifact);
    cache.add("dst_artifact", &dst_artifact);
    cache.add("bucket", &bucket);
    cache.add("bucket_path", &bucket_path);

    let request = BuildRequest {
        project,
        buildspec,
        source_artifact: (!src_artifact.is_empty()).then_some(src_artifact),
        destination,
    };
    let destination_file = (!dst_artifact.is_empty()).then_some(dst_artifact);
    Ok((request, destination_file))
}

struct AssumeRoleRequest {
    rolearn: String,
    src_profile: Option<String>,
    dst_profile: Option<String>,
}

fn assume_role_request(
    args: &AssumeRoleArgs,
    cache: &mut DefaultsCache,
) -> Result<AssumeRoleRequest> {
    validate_role_arn("rolearn", &args.rolearn)?;
    cache.add("rolearn", &args.rolearn);

    Ok(AssumeRoleRequest {
        rolearn: args.rolearn.clone(),
        src_profile: args.src_profile.clone().filter(|p| !p.is_empty()),
        dst_profile: args.dst_profile.clone().filter(|p| !p.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cftcli::OnFailure;

    fn cache_in(dir: &std::path::Path) -> DefaultsCache {
        DefaultsCache::open(dir.join("defaults.json"))
    }

    #[test]
    fn session_falls_back_to_default_profile_in_us_east_1() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());
        let global = GlobalOpts {
            profile: None,
            region: None,
            verbosity: 0,
        };

        let (profile, region) = session_options(&global, &cache);
        assert_eq!(profile, "default");
        assert_eq!(region, "us-east-1");
    }

    #[test]
    fn explicit_session_options_beat_the_fallbacks() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());
        let global = GlobalOpts {
            profile: Some("sandbox".to_string()),
            region: Some("eu-west-1".to_string()),
            verbosity: 0,
        };

        let (profile, region) = session_options(&global, &cache);
        assert_eq!(profile, "sandbox");
        assert_eq!(region, "eu-west-1");
    }

    #[test]
    fn invalid_stack_name_leaves_the_cache_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(dir.path());
        let template = dir.path().join("stack.yaml");
        std::fs::write(&template, "Resources: {}").unwrap();

        let args = DeployArgs {
            stackname: "_bad_name".to_string(),
            filename: Some(template.to_string_lossy().into_owned()),
            parameters: String::new(),
            failure: OnFailure::DoNothing,
            protected: false,
        };

        assert!(deploy_request(&args, &mut cache).is_err());
        assert_eq!(cache.get("stackname"), None);
        assert_eq!(cache.get("filename"), None);
    }
}
