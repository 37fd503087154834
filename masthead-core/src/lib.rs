//! Masthead core library — site manifest types, manifest persistence, errors.
//!
//! - [`types`] — [`SiteManifest`] and [`FailurePolicy`]
//! - [`error`] — [`ManifestError`]
//! - [`manifest`] — load / save / init of `masthead.yaml`

pub mod error;
pub mod manifest;
pub mod types;

pub use error::ManifestError;
pub use types::{FailurePolicy, SiteManifest, DEFAULT_TARGETS, DEFAULT_TEMPLATE};
