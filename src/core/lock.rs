use crate::domain::ports::StackOps;
use crate::utils::error::Result;

/// Allow-then-Deny on Update:*; the Deny wins, so no resource may change
/// until the policy is replaced.
pub fn lock_policy() -> serde_json::Value {
    serde_json::json!({
        "Statement": [
            {
                "Effect": "Allow",
                "Action": "Update:*",
                "Principal": "*",
                "Resource": "*"
            },
            {
                "Effect": "Deny",
                "Action": "Update:*",
                "Principal": "*",
                "Resource": "*"
            }
        ]
    })
}

pub async fn run(ops: &dyn StackOps, stack_name: &str) -> Result<()> {
    ops.set_stack_policy(stack_name, &lock_policy().to_string())
        .await?;
    println!("Policy lock applied for {}", stack_name);

    ops.set_termination_protection(stack_name, true).await?;
    println!("Termination Protection for {} enabled", stack_name);
    Ok(())
}
