use crate::core::watch::StackWatcher;
use crate::domain::ports::StackOps;
use crate::utils::error::Result;

/// Watches a stack operation somebody else started.
pub async fn run(ops: &dyn StackOps, stack_name: &str) -> Result<()> {
    let outcome = StackWatcher::new(ops).wait(stack_name).await?;
    crate::core::watch::report(&outcome);
    Ok(())
}
