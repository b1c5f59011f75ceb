//! Status command - show the recomputed verification status

use super::{Context, domain_error};

/// Show verification status for a user
pub async fn status(ctx: &Context, user_id: &str) -> anyhow::Result<()> {
    let report = ctx.orchestrator()?.status(user_id).await.map_err(domain_error)?;
    report.render(ctx.mode);
    Ok(())
}
