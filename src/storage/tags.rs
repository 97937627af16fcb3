//! Tag repository for JSON storage
//!
//! Manages the tag overlay (tags.json) and the tag category configuration
//! (tag_config.json). The overlay is the only mutable state the tool owns;
//! the ledger export itself is never written back.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PnlError;
use crate::models::{Tag, TagCategory, TagConfig, TagOverlay, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable overlay document
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TagData {
    tags: TagOverlay,
}

/// Repository for tag overlay and tag config persistence
pub struct TagRepository {
    tags_path: PathBuf,
    config_path: PathBuf,
    overlay: RwLock<TagOverlay>,
    config: RwLock<TagConfig>,
}

impl TagRepository {
    /// Create a new tag repository
    pub fn new(tags_path: PathBuf, config_path: PathBuf) -> Self {
        Self {
            tags_path,
            config_path,
            overlay: RwLock::new(TagOverlay::new()),
            config: RwLock::new(TagConfig::default()),
        }
    }

    /// Load overlay and config from disk; missing files yield empty defaults
    pub fn load(&self) -> Result<(), PnlError> {
        let file_data: TagData = read_json(&self.tags_path)?;
        let file_config: TagConfig = read_json(&self.config_path)?;

        let mut overlay = self
            .overlay
            .write()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut config = self
            .config
            .write()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *overlay = file_data.tags;
        *config = file_config;

        Ok(())
    }

    /// Save overlay and config to disk
    pub fn save(&self) -> Result<(), PnlError> {
        let overlay = self
            .overlay
            .read()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let config = self
            .config
            .read()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(
            &self.tags_path,
            &TagData {
                tags: overlay.clone(),
            },
        )?;
        write_json_atomic(&self.config_path, &*config)
    }

    /// Get the tag for a transaction, if any
    pub fn get(&self, id: &TransactionId) -> Result<Option<Tag>, PnlError> {
        let overlay = self
            .overlay
            .read()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(overlay.get(id).cloned())
    }

    /// Get a copy of the whole overlay
    pub fn get_all(&self) -> Result<TagOverlay, PnlError> {
        let overlay = self
            .overlay
            .read()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(overlay.clone())
    }

    /// Insert or replace the tag on a transaction
    pub fn upsert(&self, id: TransactionId, tag: Tag) -> Result<(), PnlError> {
        let mut overlay = self
            .overlay
            .write()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        overlay.insert(id, tag);
        Ok(())
    }

    /// Remove the tag from a transaction, returning whether one was present
    pub fn delete(&self, id: &TransactionId) -> Result<bool, PnlError> {
        let mut overlay = self
            .overlay
            .write()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(overlay.remove(id).is_some())
    }

    /// Merge tags into the overlay, returning the number of tags added
    ///
    /// An already-tagged transaction keeps its existing tag; at most one tag
    /// per transaction, and manual tags are never overwritten by a bulk merge.
    pub fn merge(&self, tags: TagOverlay) -> Result<usize, PnlError> {
        let mut overlay = self
            .overlay
            .write()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut added = 0;
        for (id, tag) in tags {
            if !overlay.contains_key(&id) {
                overlay.insert(id, tag);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Count tagged transactions
    pub fn count(&self) -> Result<usize, PnlError> {
        let overlay = self
            .overlay
            .read()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(overlay.len())
    }

    /// Get a copy of the tag config
    pub fn config(&self) -> Result<TagConfig, PnlError> {
        let config = self
            .config
            .read()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(config.clone())
    }

    /// Register a sub-account label under a category
    pub fn add_sub_account(&self, category: TagCategory, label: &str) -> Result<(), PnlError> {
        let mut config = self
            .config
            .write()
            .map_err(|e| PnlError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        config.add_sub_account(category, label);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagCategory;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TagRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = TagRepository::new(
            temp_dir.path().join("tags.json"),
            temp_dir.path().join("tag_config.json"),
        );
        (temp_dir, repo)
    }

    fn sample_id() -> TransactionId {
        TransactionId::from_string("txn-02-01-2025-6340Meals-0".to_string())
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        // Config comes up with the seeded defaults
        assert!(!repo.config().unwrap().personal.is_empty());
    }

    #[test]
    fn test_upsert_get_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let id = sample_id();
        repo.upsert(id.clone(), Tag::new(TagCategory::Personal, "Personal Meals"))
            .unwrap();

        let tag = repo.get(&id).unwrap().unwrap();
        assert_eq!(tag.category, TagCategory::Personal);
        assert_eq!(tag.sub_account, "Personal Meals");

        assert!(repo.delete(&id).unwrap());
        assert!(!repo.delete(&id).unwrap());
        assert!(repo.get(&id).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let id = sample_id();
        repo.upsert(
            id.clone(),
            Tag::new(TagCategory::NonRecurring, "One-Time Event"),
        )
        .unwrap();
        repo.add_sub_account(TagCategory::NonRecurring, "Lawsuit Settlement")
            .unwrap();
        repo.save().unwrap();

        let repo2 = TagRepository::new(
            temp_dir.path().join("tags.json"),
            temp_dir.path().join("tag_config.json"),
        );
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        let tag = repo2.get(&id).unwrap().unwrap();
        assert_eq!(tag.category, TagCategory::NonRecurring);
        assert!(repo2
            .config()
            .unwrap()
            .non_recurring
            .contains(&"Lawsuit Settlement".to_string()));
    }

    #[test]
    fn test_merge_keeps_existing_tags() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(sample_id(), Tag::new(TagCategory::Personal, "X"))
            .unwrap();

        // Incoming batch collides on sample_id and brings one new tag
        let mut batch = TagOverlay::new();
        batch.insert(sample_id(), Tag::new(TagCategory::NonRecurring, "Y"));
        batch.insert(
            TransactionId::from_string("txn-03-01-2025-4000Sales-0".to_string()),
            Tag::new(TagCategory::NonRecurring, "Y"),
        );
        let added = repo.merge(batch).unwrap();

        assert_eq!(added, 1);
        assert_eq!(repo.count().unwrap(), 2);
        // The pre-existing tag survived the collision untouched
        let kept = repo.get(&sample_id()).unwrap().unwrap();
        assert_eq!(kept.category, TagCategory::Personal);
        assert_eq!(kept.sub_account, "X");
    }
}
