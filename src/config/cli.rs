use crate::domain::model::OnFailure;
use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cftcli")]
#[command(about = "CloudFormation deployment CLI", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// The AWS profile to use
    #[arg(long, short = 'p', global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Region to use
    #[arg(long, global = true, env = "AWS_DEFAULT_REGION")]
    pub region: Option<String>,

    /// Use multiple times to increase logging level
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or update a stack from a template, then watch it converge
    #[command(visible_alias = "deploy-stack")]
    Deploy(DeployArgs),

    /// Delete a stack and wait until it is gone
    #[command(visible_alias = "delete-stack")]
    Delete(StackArgs),

    /// List all stacks that are not deleted
    #[command(visible_alias = "list-stacks")]
    List,

    /// Show stack detail and the latest event per resource
    #[command(visible_alias = "describe-stack")]
    Describe(StackArgs),

    /// List CodePipeline pipelines with their health
    #[command(visible_alias = "list-pipelines")]
    Pipelines,

    /// Run an ad-hoc CodeBuild job and stream its result
    Codebuild(CodebuildArgs),

    /// Freeze a stack: deny updates and enable termination protection
    Lock(StackArgs),

    /// Attach to a stack operation already in progress and watch it
    Attach(StackArgs),

    /// Assume a role and write it to an AWS profile
    AssumeRole(AssumeRoleArgs),
}

#[derive(Debug, Clone, Args)]
pub struct StackArgs {
    /// The Stack Name to use
    #[arg(long = "stack", short = 's', env = "STACKNAME")]
    pub stackname: String,
}

#[derive(Debug, Clone, Args)]
pub struct DeployArgs {
    /// The Stack Name to use
    #[arg(long = "stack", short = 's', env = "STACKNAME")]
    pub stackname: String,

    /// The template filename to use
    #[arg(long, short = 'f', env = "FILENAME")]
    pub filename: Option<String>,

    /// A comma delimited list ie foo=bar,cat=dog
    #[arg(long = "parameters", visible_alias = "params", short = 'i', default_value = "")]
    pub parameters: String,

    /// What to do on failure
    #[arg(long, value_enum, default_value = "DO_NOTHING")]
    pub failure: OnFailure,

    /// Enables Termination Protection
    #[arg(long)]
    pub protected: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CodebuildArgs {
    /// What codebuild project to use
    #[arg(long = "codebuild", visible_alias = "project", env = "CODEBUILD")]
    pub codebuild: Option<String>,

    /// The buildspec filename to use
    #[arg(long, short = 'b', env = "BUILDSPEC")]
    pub buildspec: Option<String>,

    /// The source artifact to use (S3 location)
    #[arg(long = "src-artifact", visible_alias = "src", short = 's')]
    pub src_artifact: Option<String>,

    /// The destination artifact (local filename)
    #[arg(long = "dst-artifact", visible_alias = "dst", short = 'd')]
    pub dst_artifact: Option<String>,

    /// The build bucket to use
    #[arg(long, env = "BUCKET")]
    pub bucket: Option<String>,

    /// The path within the build bucket
    #[arg(long = "bucket-path", env = "BUCKETPATH")]
    pub bucket_path: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct AssumeRoleArgs {
    /// What role to assume
    #[arg(long = "role-arn", visible_alias = "role", short = 'r', env = "ROLEARN")]
    pub rolearn: String,

    /// The profile to use when assuming the role
    #[arg(long = "source-profile", visible_alias = "src-profile")]
    pub src_profile: Option<String>,

    /// The profile to write after assuming the role
    #[arg(long = "dest-profile", short = 'd')]
    pub dst_profile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_deploy_with_parameters() {
        let cli = Cli::parse_from([
            "cftcli", "deploy", "-s", "web", "-f", "stack.yaml", "-i", "foo=bar,cat=dog",
        ]);
        match cli.command {
            Commands::Deploy(args) => {
                assert_eq!(args.stackname, "web");
                assert_eq!(args.filename.as_deref(), Some("stack.yaml"));
                assert_eq!(args.parameters, "foo=bar,cat=dog");
                assert_eq!(args.failure, OnFailure::DoNothing);
                assert!(!args.protected);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn readme_command_names_are_aliases() {
        let cli = Cli::parse_from(["cftcli", "deploy-stack", "-s", "web"]);
        assert!(matches!(cli.command, Commands::Deploy(_)));

        let cli = Cli::parse_from(["cftcli", "list-stacks"]);
        assert!(matches!(cli.command, Commands::List));

        let cli = Cli::parse_from(["cftcli", "describe-stack", "-s", "web"]);
        assert!(matches!(cli.command, Commands::Describe(_)));
    }

    #[test]
    fn verbosity_accumulates() {
        let cli = Cli::parse_from(["cftcli", "-vv", "list"]);
        assert_eq!(cli.global.verbosity, 2);
    }

    #[test]
    fn failure_mode_uses_api_spelling() {
        let cli = Cli::parse_from([
            "cftcli", "deploy", "-s", "web", "--failure", "ROLLBACK",
        ]);
        match cli.command {
            Commands::Deploy(args) => assert_eq!(args.failure, OnFailure::Rollback),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
