use crate::domain::model::{PipelineHealth, PipelineSummary};
use crate::domain::ports::PipelineOps;
use crate::utils::error::Result;
use crate::utils::render;
use colored::Colorize;
use tabled::Tabled;

#[derive(Tabled)]
struct PipelineRow {
    #[tabled(rename = "Name")]
    name: String,
}

/// Health from stage statuses, in stage order: the first stage that has
/// failed (or was cancelled/stopped) or is still running decides.
pub fn health_of(stage_statuses: &[String]) -> PipelineHealth {
    for status in stage_statuses {
        match status.as_str() {
            "Failed" | "Cancelled" | "Stopped" | "Stopping" => return PipelineHealth::Failed,
            "InProgress" => return PipelineHealth::InProgress,
            _ => {}
        }
    }
    PipelineHealth::Succeeded
}

fn colored_name(summary: &PipelineSummary) -> String {
    match summary.health {
        PipelineHealth::Failed => summary.name.red().to_string(),
        PipelineHealth::InProgress => summary.name.blue().to_string(),
        PipelineHealth::Succeeded => summary.name.green().to_string(),
    }
}

pub async fn run(ops: &dyn PipelineOps) -> Result<()> {
    let mut pipelines = Vec::new();
    for name in ops.list_pipelines().await? {
        let health = health_of(&ops.stage_statuses(&name).await?);
        pipelines.push(PipelineSummary { name, health });
    }
    tracing::debug!("{} pipelines", pipelines.len());

    let rows: Vec<PipelineRow> = pipelines
        .iter()
        .map(|p| PipelineRow {
            name: colored_name(p),
        })
        .collect();
    render::print_table("Pipelines", rows, 0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_green_is_succeeded() {
        assert_eq!(
            health_of(&statuses(&["Succeeded", "Succeeded"])),
            PipelineHealth::Succeeded
        );
    }

    #[test]
    fn stopped_counts_as_failed() {
        for bad in ["Failed", "Cancelled", "Stopped", "Stopping"] {
            assert_eq!(
                health_of(&statuses(&["Succeeded", bad])),
                PipelineHealth::Failed
            );
        }
    }

    #[test]
    fn earliest_non_green_stage_decides() {
        // stage order matters: an in-progress stage ahead of a failed one
        // reports the pipeline as still running
        assert_eq!(
            health_of(&statuses(&["InProgress", "Failed"])),
            PipelineHealth::InProgress
        );
    }

    #[test]
    fn no_stages_is_succeeded() {
        assert_eq!(health_of(&[]), PipelineHealth::Succeeded);
    }
}
