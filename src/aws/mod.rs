// Adapters layer: the aws-sdk clients behind the domain ports. Commands
// never touch SDK types directly.

pub mod cloudformation;
pub mod codebuild;
pub mod codepipeline;
pub mod sts;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Shared SDK configuration honoring `--profile` and `--region`.
pub async fn sdk_config(profile: Option<&str>, region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = profile.filter(|p| !p.is_empty()) {
        loader = loader.profile_name(profile);
    }
    if let Some(region) = region.filter(|r| !r.is_empty()) {
        loader = loader.region(Region::new(region.to_string()));
    }
    loader.load().await
}

/// Smithy timestamps carry epoch seconds; chrono is what the rest of the
/// crate speaks. Every service crate re-exports the same primitive type.
pub(crate) fn to_chrono(
    datetime: &aws_sdk_cloudformation::primitives::DateTime,
) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(datetime.secs(), datetime.subsec_nanos())
        .unwrap_or_default()
}
