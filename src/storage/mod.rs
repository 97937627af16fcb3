//! Storage layer
//!
//! JSON file storage with atomic writes and automatic directory creation.
//! Only the tag overlay and its config live here; ledger exports and
//! exclusion datasets are read-only inputs parsed on each run.

pub mod file_io;
pub mod tags;

pub use file_io::{read_json, write_json_atomic};
pub use tags::TagRepository;

use crate::config::paths::PnlPaths;
use crate::error::PnlError;

/// Main storage coordinator
pub struct Storage {
    paths: PnlPaths,
    pub tags: TagRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PnlPaths) -> Result<Self, PnlError> {
        paths.ensure_directories()?;

        Ok(Self {
            tags: TagRepository::new(paths.tags_file(), paths.tag_config_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &PnlPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PnlError> {
        self.tags.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PnlError> {
        self.tags.save()
    }
}
