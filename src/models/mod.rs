//! Data models for the sync pipeline.
//!
//! Field names follow the CMS and search-index wire formats.

mod analysis;
mod record;
mod story;

pub use analysis::*;
pub use record::*;
pub use story::*;
