//! Configuration for pnlview
//!
//! Path management for the persisted tag overlay and tag config documents.

pub mod paths;

pub use paths::PnlPaths;
