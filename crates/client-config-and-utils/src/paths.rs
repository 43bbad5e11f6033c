//! File system paths for the client cache.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Directory name for cached state blobs under the base directory.
const STATE_DIR_NAME: &str = "state";

/// Manages file system paths for the client cache.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for client runtime files (~/.showroom)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.showroom`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".showroom"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.showroom).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.showroom/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the state directory (~/.showroom/state), the backing
    /// directory for the file storage adapter.
    pub fn state_dir(&self) -> PathBuf {
        self.base_dir.join(STATE_DIR_NAME)
    }

    /// Get the logs directory (~/.showroom/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.state_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().expect("Failed to determine home directory")
    }
}
