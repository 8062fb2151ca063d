use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::constants::constants;

/// Id of the virtual "no filter" category. Never persisted.
pub const ALL_CATEGORY_ID: &str = "all";

/// A saved video link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
  pub id: String,
  pub title: String,
  pub url: String,
  #[serde(default, deserialize_with = "null_as_empty")]
  pub notes: String,
  pub category_id: String,
  #[serde(default = "default_accent", deserialize_with = "accent_or_default")]
  pub accent: String,
  /// Milliseconds since the Unix epoch.
  pub created_at: i64,
}

/// A user-defined collection that videos point at by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  pub id: String,
  pub name: String,
  pub color: String,
}

fn default_accent() -> String {
  constants().default_accent.clone()
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A null or empty accent falls back to the default.
fn accent_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Ok(Option::<String>::deserialize(deserializer)?.filter(|a| !a.is_empty()).unwrap_or_else(default_accent))
}

/// Generate a fresh video id. UUIDv7 keeps ids unique and roughly time-ordered.
pub fn new_video_id() -> String {
  format!("v_{}", Uuid::now_v7().simple())
}

pub fn now_millis() -> i64 {
  Utc::now().timestamp_millis()
}

/// Derive a category id from a display name.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and drops separators at either end. Returns an empty string
/// when the name has no usable characters.
pub fn derive_category_id(name: &str) -> String {
  let mut id = String::with_capacity(name.len());
  let mut gap = false;
  for c in name.to_lowercase().chars() {
    if c.is_ascii_lowercase() || c.is_ascii_digit() {
      if gap && !id.is_empty() {
        id.push('-');
      }
      gap = false;
      id.push(c);
    } else {
      gap = true;
    }
  }
  id
}

/// Pick the palette colour for the category created after `existing` others.
pub fn palette_color(existing: usize) -> String {
  let palette = &constants().palette;
  palette.get(existing % palette.len().max(1)).cloned().unwrap_or_else(default_accent)
}

/// Seed collections used on first run.
pub fn default_categories() -> Vec<Category> {
  constants().default_categories.clone()
}

/// Short local date for list rows.
pub fn format_date(millis: i64) -> String {
  local_time(millis).map(|t| t.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Local date and time for the viewer.
pub fn format_timestamp(millis: i64) -> String {
  local_time(millis).map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default()
}

fn local_time(millis: i64) -> Option<DateTime<Local>> {
  DateTime::<Utc>::from_timestamp_millis(millis).map(|t| t.with_timezone(&Local))
}

#[cfg(test)]
mod tests {
  use super::*;

  // --- derive_category_id ---

  #[test]
  fn derive_id_collapses_punctuation_and_spaces() {
    assert_eq!(derive_category_id("Family Trips!"), "family-trips");
    assert_eq!(derive_category_id("Game Night"), "game-night");
    assert_eq!(derive_category_id("  Rock -- n' Roll  "), "rock-n-roll");
  }

  #[test]
  fn derive_id_blank_is_empty() {
    assert_eq!(derive_category_id("   "), "");
    assert_eq!(derive_category_id(""), "");
    assert_eq!(derive_category_id("!!!"), "");
  }

  #[test]
  fn derive_id_keeps_digits() {
    assert_eq!(derive_category_id("2024 Summer"), "2024-summer");
  }

  #[test]
  fn derive_id_non_ascii_letters_are_separators() {
    assert_eq!(derive_category_id("Café Nights"), "caf-nights");
  }

  #[test]
  fn derive_id_is_idempotent() {
    for name in ["Family Trips!", "  a  b  ", "Work", "x--y", "Über 9000"] {
      let once = derive_category_id(name);
      assert_eq!(derive_category_id(&once), once);
    }
  }

  // --- palette_color ---

  #[test]
  fn palette_wraps_round_robin() {
    assert_eq!(palette_color(0), "accent-blue");
    assert_eq!(palette_color(3), "accent-emerald");
    assert_eq!(palette_color(5), "accent-blue");
  }

  // --- serde ---

  #[test]
  fn video_uses_camel_case_fields() {
    let video = Video {
      id: "v_1".to_string(),
      title: "Trip".to_string(),
      url: "https://youtu.be/abc123".to_string(),
      notes: String::new(),
      category_id: "family".to_string(),
      accent: "accent-pink".to_string(),
      created_at: 1_700_000_000_000,
    };
    let json = serde_json::to_value(&video).unwrap();
    assert_eq!(json["categoryId"], "family");
    assert_eq!(json["createdAt"], 1_700_000_000_000i64);
  }

  #[test]
  fn video_missing_optional_fields_get_defaults() {
    let json = r#"{"id":"v_1","title":"Trip","url":"u","categoryId":"family","createdAt":1}"#;
    let video: Video = serde_json::from_str(json).unwrap();
    assert_eq!(video.notes, "");
    assert_eq!(video.accent, "accent-blue");
  }

  #[test]
  fn null_or_empty_optional_fields_get_defaults() {
    let json = r#"{"id":"v_1","title":"Trip","url":"u","notes":null,"categoryId":"family","accent":"","createdAt":1}"#;
    let video: Video = serde_json::from_str(json).unwrap();
    assert_eq!(video.notes, "");
    assert_eq!(video.accent, "accent-blue");

    let json = r#"{"id":"v_1","title":"Trip","url":"u","categoryId":"family","accent":null,"createdAt":1}"#;
    let video: Video = serde_json::from_str(json).unwrap();
    assert_eq!(video.accent, "accent-blue");
  }

  #[test]
  fn new_video_ids_are_unique() {
    let a = new_video_id();
    let b = new_video_id();
    assert_ne!(a, b);
    assert!(a.starts_with("v_"));
  }

  #[test]
  fn format_date_handles_out_of_range() {
    assert_eq!(format_date(i64::MAX), "");
    assert!(!format_date(1_700_000_000_000).is_empty());
  }
}
