mod config;
pub mod database;

pub use config::{Config, DrillConfig, MatchmakingConfig, ProfileConfig};
pub use database::{Database, DrillRecord};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the KickUp data directory, creating it if needed.
///
/// Resolution order:
/// 1. `KICKUP_DATA_DIR`, used as-is
/// 2. `~/.config/kickup-dev/` when `KICKUP_ENV=dev`
/// 3. `~/.config/kickup/`
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("KICKUP_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("KICKUP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("kickup-dev")
            } else {
                base_dir.join("kickup")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
