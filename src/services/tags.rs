//! Tag service
//!
//! Business logic for manually tagging and untagging transactions, and for
//! applying a reconciliation outcome to the persisted overlay. Every
//! mutation is saved immediately; the overlay on disk always reflects the
//! last completed operation.

use crate::error::{PnlError, PnlResult};
use crate::ledger::LedgerSnapshot;
use crate::models::{Tag, TagCategory, TagOverlay, TransactionId};
use crate::storage::Storage;

/// Service for tag overlay mutation
pub struct TagService<'a> {
    storage: &'a Storage,
}

impl<'a> TagService<'a> {
    /// Create a new tag service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Tag a transaction, replacing any existing tag
    ///
    /// The transaction must exist in the snapshot; tagging an unknown id
    /// would silently do nothing to every report.
    pub fn tag(
        &self,
        snapshot: &LedgerSnapshot,
        id: &TransactionId,
        category: TagCategory,
        sub_account: &str,
    ) -> PnlResult<Tag> {
        if snapshot.transaction(id).is_none() {
            return Err(PnlError::transaction_not_found(id.as_str()));
        }
        if sub_account.trim().is_empty() {
            return Err(PnlError::Validation(
                "Sub-account label must not be empty".into(),
            ));
        }

        let tag = Tag::new(category, sub_account.trim());
        self.storage.tags.upsert(id.clone(), tag.clone())?;
        self.storage.tags.add_sub_account(category, sub_account.trim())?;
        self.storage.save_all()?;
        Ok(tag)
    }

    /// Remove the tag from a transaction
    pub fn untag(&self, id: &TransactionId) -> PnlResult<()> {
        if !self.storage.tags.delete(id)? {
            return Err(PnlError::transaction_not_found(id.as_str()));
        }
        self.storage.save_all()
    }

    /// Current overlay, as reports consume it
    pub fn overlay(&self) -> PnlResult<TagOverlay> {
        self.storage.tags.get_all()
    }

    /// Merge a reconciliation outcome into the persisted overlay
    ///
    /// The reconciler contributes part of the overlay; tags created by hand
    /// stay in place and win any collision. Returns the number of tags added.
    pub fn apply_overlay(&self, tags: TagOverlay) -> PnlResult<usize> {
        let added = self.storage.tags.merge(tags)?;
        self.storage.save_all()?;
        Ok(added)
    }

    /// Register a sub-account label without tagging anything
    pub fn add_sub_account(&self, category: TagCategory, label: &str) -> PnlResult<()> {
        if label.trim().is_empty() {
            return Err(PnlError::Validation(
                "Sub-account label must not be empty".into(),
            ));
        }
        self.storage.tags.add_sub_account(category, label.trim())?;
        self.storage.save_all()
    }
}
