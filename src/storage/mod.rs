//! Storage module for maqal
//!
//! Persists processed articles (markdown, metadata, cover image) to the
//! output directory.

mod output;

pub use output::{render_metadata, save_result, SavedFiles};
