use crate::domain::model::ResourceState;
use crate::domain::ports::StackOps;
use crate::utils::error::Result;
use crate::utils::render;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tabled::Tabled;

pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Terminal observation of a watched stack operation.
#[derive(Debug)]
pub struct WatchOutcome {
    pub stack: String,
    pub status: String,
    pub failed: Vec<ResourceState>,
}

impl WatchOutcome {
    pub fn is_failure(&self) -> bool {
        self.status.contains("ROLLBACK") || self.status.contains("FAILED")
    }
}

#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "reason")]
    reason: String,
}

pub struct StackWatcher<'a> {
    ops: &'a dyn StackOps,
    interval: Duration,
}

impl<'a> StackWatcher<'a> {
    pub fn new(ops: &'a dyn StackOps) -> Self {
        Self {
            ops,
            interval: POLL_INTERVAL,
        }
    }

    /// Shortened poll interval for tests driving a scripted fake.
    pub fn with_interval(ops: &'a dyn StackOps, interval: Duration) -> Self {
        Self { ops, interval }
    }

    /// Current state line: the stack status, suffixed with the sorted
    /// logical ids of any resources still in progress. A failed describe
    /// reads as the stack being gone.
    async fn state_line(&self, name: &str) -> String {
        let Some(status) = self.ops.stack_status(name).await else {
            return "DELETE_COMPLETE".to_string();
        };

        let mut in_progress: Vec<String> = self
            .ops
            .resource_states(name)
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(ResourceState::is_in_progress)
            .map(|r| r.logical_id)
            .collect();
        in_progress.sort();

        if in_progress.is_empty() {
            status
        } else {
            format!("{} - {}", status, in_progress.join(", "))
        }
    }

    /// Polls until the stack leaves every IN_PROGRESS state, spinning while
    /// a given state line persists and re-rendering when it changes.
    pub async fn wait(&self, name: &str) -> Result<WatchOutcome> {
        let mut state = self.state_line(name).await;

        loop {
            if !state.contains("IN_PROGRESS") {
                break;
            }

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap(),
            );
            spinner.set_message(format!("{} is {}", name, state));
            spinner.enable_steady_tick(Duration::from_millis(100));

            let previous = state.clone();
            while previous == state {
                tokio::time::sleep(self.interval).await;
                state = self.state_line(name).await;
            }
            spinner.finish_and_clear();
        }

        let failed = if state.contains("ROLLBACK") || state.contains("FAILED") {
            self.ops
                .resource_states(name)
                .await
                .unwrap_or_default()
                .into_iter()
                .filter(ResourceState::is_failed)
                .collect()
        } else {
            Vec::new()
        };

        Ok(WatchOutcome {
            stack: name.to_string(),
            status: state,
            failed,
        })
    }
}

/// Prints the terminal status line and, on failure, the failed resources.
pub fn report(outcome: &WatchOutcome) {
    if outcome.is_failure() {
        let rows: Vec<FailureRow> = outcome
            .failed
            .iter()
            .map(|r| FailureRow {
                name: r.logical_id.clone(),
                status: r.status.clone(),
                reason: r.reason.clone().unwrap_or_default(),
            })
            .collect();
        render::print_table("Resources", rows, 50);
        println!("{} is {}", outcome.stack, outcome.status.red());
    } else {
        println!("{} is {}", outcome.stack, outcome.status.green());
    }
}
