//! # masthead-sync
//!
//! Header substitution and in-place rewriting of a site's pages.
//!
//! Build a [`HeaderSynchronizer`] from a template path and an ordered target
//! list (or from a [`masthead_core::SiteManifest`]) and call
//! [`HeaderSynchronizer::run`]. [`diff_targets`] and [`check_status`] inspect
//! the same targets without writing.

pub mod diff;
pub mod error;
pub mod pattern;
pub mod status;
pub mod synchronizer;
pub mod template;
pub mod writer;

pub use diff::{diff_targets, DiffReport, FileDiff};
pub use error::SyncError;
pub use status::{check_status, HeaderStatus, StatusReport, TargetStatus};
pub use synchronizer::{FileOutcome, HeaderSynchronizer, SyncOptions, SyncReport};
pub use template::Template;
pub use writer::WriteResult;
