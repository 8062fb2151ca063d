//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available,
//! with no runtime file I/O. Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

use crate::model::Category;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  pub app_name: String,

  // Storage records
  pub videos_record: String,
  pub categories_record: String,

  // Accents and collections
  pub palette: Vec<String>,
  pub default_accent: String,
  pub default_categories: Vec<Category>,

  // Copy feedback
  pub feedback_clear_ms: u64,

  // Decorative pattern
  pub pattern_size: usize,

  // Layout
  pub narrow_width: u16,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; if it's malformed this is a build-time error.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
