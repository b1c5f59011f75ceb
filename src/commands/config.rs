//! Config command - show or initialise the configuration file

use std::path::Path;

use mentor_verify::config::AppConfig;
use mentor_verify::output::{OperationResult, OutputMode};

use super::Context;

/// Print the effective configuration
pub fn config_show(ctx: &Context) -> anyhow::Result<()> {
    match ctx.mode {
        OutputMode::Human => print!("{}", ctx.config.to_toml()?),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(&ctx.config)?),
    }
    Ok(())
}

/// Write the default configuration file
pub fn config_init(path: Option<&Path>, force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let target = path.map_or_else(AppConfig::config_path, Path::to_path_buf);
    if target.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", target.display());
    }
    let written = AppConfig::default().save(Some(&target))?;
    OperationResult::ok(format!("Wrote {}", written.display())).render(mode);
    Ok(())
}
