//! Profile command - manage local profiles

use mentor_verify::core::models::{Profile, ProfileType};
use mentor_verify::core::ports::ProfileStore;
use mentor_verify::output::OperationResult;

use super::Context;

/// Create or replace a profile
pub async fn profile_set(
    ctx: &Context,
    user_id: &str,
    profile_type: ProfileType,
) -> anyhow::Result<()> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        anyhow::bail!("user id cannot be empty");
    }
    ctx.profiles().upsert(&Profile::new(user_id, profile_type)).await?;
    OperationResult::ok(format!("Saved {profile_type} profile for {user_id}")).render(ctx.mode);
    Ok(())
}

/// Show a profile
pub async fn profile_show(ctx: &Context, user_id: &str) -> anyhow::Result<()> {
    match ctx.profiles().get(user_id.trim()).await? {
        Some(profile) => {
            profile.render(ctx.mode);
            Ok(())
        },
        None => anyhow::bail!("no profile for user {user_id}"),
    }
}
