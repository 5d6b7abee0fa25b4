use crate::core::watch::StackWatcher;
use crate::domain::ports::StackOps;
use crate::utils::error::Result;

/// Deletes the stack and watches until the describe probe stops answering,
/// which the watcher reports as DELETE_COMPLETE.
pub async fn run(ops: &dyn StackOps, stack_name: &str) -> Result<()> {
    ops.delete_stack(stack_name).await?;

    let outcome = StackWatcher::new(ops).wait(stack_name).await?;
    crate::core::watch::report(&outcome);
    Ok(())
}
