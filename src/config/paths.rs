//! Path management for pnlview
//!
//! Provides XDG-compliant path resolution for the persisted tag data.
//!
//! ## Path Resolution Order
//!
//! 1. `PNLVIEW_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/pnlview` or `~/.config/pnlview`
//! 3. Windows: `%APPDATA%\pnlview`

use std::path::PathBuf;

use crate::error::PnlError;

/// Manages all paths used by pnlview
#[derive(Debug, Clone)]
pub struct PnlPaths {
    /// Base directory for all pnlview data
    base_dir: PathBuf,
}

impl PnlPaths {
    /// Create a new PnlPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PnlError> {
        let base_dir = if let Ok(custom) = std::env::var("PNLVIEW_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create PnlPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/pnlview/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/pnlview/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the tag overlay document (transaction id -> tag)
    pub fn tags_file(&self) -> PathBuf {
        self.data_dir().join("tags.json")
    }

    /// Get the path to the tag config document (sub-account label lists)
    pub fn tag_config_file(&self) -> PathBuf {
        self.data_dir().join("tag_config.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), PnlError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PnlError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PnlError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PnlError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .map_err(|_| {
                    PnlError::Io("Cannot determine home directory: HOME not set".to_string())
                })
        })?;

    Ok(config_base.join("pnlview"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PnlError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PnlError::Io("Cannot determine APPDATA directory".to_string()))?;

    Ok(PathBuf::from(appdata).join("pnlview"))
}
