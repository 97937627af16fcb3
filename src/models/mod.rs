//! Core data models for pnlview
//!
//! This module contains the data structures that represent the P&L domain:
//! transactions, accounts, sections, tags, and exclusions.

pub mod account;
pub mod exclusion;
pub mod money;
pub mod section;
pub mod tag;
pub mod transaction;

pub use account::Account;
pub use exclusion::{Exclusion, ExclusionMatch};
pub use money::Money;
pub use section::Section;
pub use tag::{Tag, TagCategory, TagConfig, TagOverlay};
pub use transaction::{RawRecord, Transaction, TransactionId};
