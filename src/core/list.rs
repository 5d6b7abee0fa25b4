use crate::domain::model::StackSummary;
use crate::domain::ports::StackOps;
use crate::utils::error::Result;
use crate::utils::render;
use tabled::Tabled;

#[derive(Tabled)]
pub struct StackRow {
    #[tabled(rename = "name")]
    pub name: String,
    #[tabled(rename = "status")]
    pub status: String,
    #[tabled(rename = "date")]
    pub date: String,
}

/// Table rows for every stack that still exists; deleted stacks are noise.
pub fn rows(stacks: Vec<StackSummary>) -> Vec<StackRow> {
    stacks
        .into_iter()
        .filter(|s| s.status != "DELETE_COMPLETE")
        .map(|s| StackRow {
            name: s.name.clone(),
            status: render::color_stack_status(&s.status),
            date: s.display_date().to_string(),
        })
        .collect()
}

pub async fn run(ops: &dyn StackOps) -> Result<()> {
    let stacks = ops.list_stacks().await?;
    tracing::debug!("listed {} stacks", stacks.len());
    render::print_table("Stacks", rows(stacks), 0);
    Ok(())
}
