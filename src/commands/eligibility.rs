//! Eligibility command

use super::{Context, domain_error};

/// Check whether a user may start verification
pub async fn eligibility(ctx: &Context, user_id: &str) -> anyhow::Result<()> {
    let decision = ctx.orchestrator()?.eligibility(user_id).await.map_err(domain_error)?;
    decision.render(ctx.mode);
    Ok(())
}
