//! Centralized path definitions for mentor-verify
//!
//! Single source of truth for filesystem locations.
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.config/mentor-verify/
//! └── config.toml                 # Deployment configuration
//!
//! ~/.local/share/mentor-verify/   # Default data directory
//! ├── records/                    # One JSON file per verification record
//! └── profiles/                   # One JSON file per profile
//! ```
//!
//! Both locations follow the platform conventions reported by `dirs`.

use std::path::PathBuf;

/// Application directory name
pub const APP_DIR: &str = "mentor-verify";

/// Config filename
const CONFIG_FILE: &str = "config.toml";

/// Get the config directory.
///
/// Returns `~/.config/mentor-verify/` on Linux.
#[must_use]
pub fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Get the config file path.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Get the default data directory.
///
/// Returns `~/.local/share/mentor-verify/` on Linux.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}
