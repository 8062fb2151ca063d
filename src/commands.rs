//! User actions that change the catalog.
//!
//! Each handler mutates [`CatalogState`], persists what changed, and returns a
//! [`Refresh`] naming the surfaces the caller must rebuild.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::constants;
use crate::model::{ALL_CATEGORY_ID, Category, Video, derive_category_id, new_video_id, now_millis, palette_color};
use crate::render::Refresh;
use crate::state::CatalogState;
use crate::storage::Storage;

/// Why a new collection was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
  #[error("A collection name needs at least one letter or digit.")]
  EmptyName,
  #[error("A collection with that name already exists.")]
  Duplicate { id: String },
}

/// Raw values from the add-video form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDraft {
  pub title: String,
  pub url: String,
  pub notes: String,
  pub category_id: String,
  pub accent: String,
}

pub struct Catalog {
  pub state: CatalogState,
  storage: Storage,
  /// Last persistence failure, surfaced in the status line.
  pub save_error: Option<String>,
}

impl Catalog {
  /// Load both collections and start with no filter or selection.
  pub fn open(mut storage: Storage) -> Self {
    let (videos, categories) = storage.load();
    info!(videos = videos.len(), categories = categories.len(), "catalog loaded");
    Self { state: CatalogState::new(videos, categories), storage, save_error: None }
  }

  pub fn add_category(&mut self, name: &str) -> Result<Category, CategoryError> {
    let id = derive_category_id(name);
    if id.is_empty() {
      return Err(CategoryError::EmptyName);
    }
    if self.state.category(&id).is_some() {
      debug!(id = %id, "category rejected: duplicate");
      return Err(CategoryError::Duplicate { id });
    }

    let category = Category { id, name: name.to_string(), color: palette_color(self.state.categories.len()) };
    info!(id = %category.id, color = %category.color, "category added");
    self.state.categories.push(category.clone());
    self.persist_categories();
    Ok(category)
  }

  /// Add a video from the form. Returns the new id, or None when a required
  /// field is blank (the submission is ignored).
  pub fn add_video(&mut self, draft: VideoDraft) -> Option<String> {
    let title = draft.title.trim();
    let url = draft.url.trim();
    let category_id = draft.category_id.trim();
    if title.is_empty() || url.is_empty() || category_id.is_empty() {
      debug!("video form incomplete, ignoring");
      return None;
    }

    let accent = draft.accent.trim();
    let video = Video {
      id: new_video_id(),
      title: title.to_string(),
      url: url.to_string(),
      notes: draft.notes.trim().to_string(),
      category_id: category_id.to_string(),
      accent: if accent.is_empty() { constants().default_accent.clone() } else { accent.to_string() },
      created_at: now_millis(),
    };
    let id = video.id.clone();
    info!(id = %id, category = %video.category_id, "video added");

    self.state.videos.insert(0, video);
    self.persist_videos();

    self.state.active_category_id = ALL_CATEGORY_ID.to_string();
    self.state.active_video_id = Some(id.clone());
    Some(id)
  }

  pub fn select_category(&mut self, id: &str) -> Refresh {
    self.state.active_category_id = id.to_string();
    Refresh::All
  }

  pub fn select_video(&mut self, id: &str) -> Refresh {
    self.state.active_video_id = Some(id.to_string());
    Refresh::All
  }

  pub fn set_search(&mut self, term: &str) -> Refresh {
    self.state.search_term = term.to_string();
    Refresh::VideoList
  }

  fn persist_videos(&mut self) {
    match self.storage.save_videos(&self.state.videos) {
      Ok(()) => self.save_error = None,
      Err(e) => {
        warn!(err = %e, "failed to save videos");
        self.save_error = Some(format!("Could not save videos: {:#}", e));
      }
    }
  }

  fn persist_categories(&mut self) {
    match self.storage.save_categories(&self.state.categories) {
      Ok(()) => self.save_error = None,
      Err(e) => {
        warn!(err = %e, "failed to save categories");
        self.save_error = Some(format!("Could not save collections: {:#}", e));
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::render::{Preview, ViewerView, render_all};
  use crate::storage::{MemoryStore, RecordStore};
  use anyhow::{Result, anyhow};

  fn catalog() -> Catalog {
    Catalog::open(Storage::new(MemoryStore::new()))
  }

  fn draft(title: &str, url: &str, category_id: &str) -> VideoDraft {
    VideoDraft {
      title: title.to_string(),
      url: url.to_string(),
      notes: String::new(),
      category_id: category_id.to_string(),
      accent: "accent-pink".to_string(),
    }
  }

  /// A store whose writes always fail.
  struct ReadOnlyStore;

  impl RecordStore for ReadOnlyStore {
    fn read(&self, _key: &str) -> Result<Option<String>> {
      Ok(None)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
      Err(anyhow!("disk full"))
    }
  }

  // --- add_category ---

  #[test]
  fn add_category_appends_with_next_palette_color() {
    let mut catalog = catalog();
    let cat = catalog.add_category("Game Night").unwrap();
    assert_eq!(cat.id, "game-night");
    assert_eq!(cat.name, "Game Night");
    assert_eq!(cat.color, "accent-emerald");
    assert_eq!(catalog.state.categories.last(), Some(&cat));
  }

  #[test]
  fn add_category_twice_is_rejected() {
    let mut catalog = catalog();
    catalog.add_category("Game Night").unwrap();
    let err = catalog.add_category("game   night!").unwrap_err();
    assert_eq!(err, CategoryError::Duplicate { id: "game-night".to_string() });
    assert_eq!(catalog.state.categories.len(), 4);
  }

  #[test]
  fn add_category_blank_is_rejected() {
    let mut catalog = catalog();
    assert_eq!(catalog.add_category("   "), Err(CategoryError::EmptyName));
    assert_eq!(catalog.state.categories.len(), 3);
  }

  #[test]
  fn add_category_persists() {
    let store = MemoryStore::new();
    let mut catalog = Catalog::open(Storage::new(store));
    catalog.add_category("Game Night").unwrap();
    let (_, categories) = catalog.storage.load();
    assert_eq!(categories.len(), 4);
  }

  // --- add_video ---

  #[test]
  fn add_video_prepends_and_selects() {
    let mut catalog = catalog();
    catalog.add_video(draft("First", "https://example.com/1", "work")).unwrap();
    catalog.state.active_category_id = "work".to_string();

    let id = catalog.add_video(draft("Trip", "https://youtu.be/abc123", "family")).unwrap();
    assert_eq!(catalog.state.videos[0].id, id);
    assert_eq!(catalog.state.videos.len(), 2);
    assert_eq!(catalog.state.active_category_id, "all");
    assert_eq!(catalog.state.active_video_id.as_deref(), Some(id.as_str()));

    let ViewerView::Selected(selected) = render_all(&catalog.state).viewer else { panic!("expected a selection") };
    let Preview::Embedded(embed) = &selected.preview else { panic!("expected an embed") };
    assert_eq!(embed.embed_url, "https://www.youtube.com/embed/abc123");
  }

  #[test]
  fn add_video_trims_fields() {
    let mut catalog = catalog();
    let mut d = draft("  Trip  ", " https://youtu.be/x ", "family");
    d.notes = "  beach day ".to_string();
    catalog.add_video(d).unwrap();
    let v = &catalog.state.videos[0];
    assert_eq!(v.title, "Trip");
    assert_eq!(v.url, "https://youtu.be/x");
    assert_eq!(v.notes, "beach day");
    assert_eq!(v.accent, "accent-pink");
  }

  #[test]
  fn add_video_blank_accent_uses_default() {
    let mut catalog = catalog();
    let mut d = draft("Trip", "u", "family");
    d.accent.clear();
    catalog.add_video(d).unwrap();
    assert_eq!(catalog.state.videos[0].accent, constants().default_accent);
  }

  #[test]
  fn incomplete_form_is_ignored() {
    let mut catalog = catalog();
    let before = catalog.state.clone();
    assert!(catalog.add_video(draft("", "https://youtu.be/x", "family")).is_none());
    assert!(catalog.add_video(draft("Trip", "   ", "family")).is_none());
    assert!(catalog.add_video(draft("Trip", "https://youtu.be/x", "")).is_none());
    assert_eq!(catalog.state, before);
  }

  #[test]
  fn add_video_persists_full_list() {
    let mut catalog = catalog();
    catalog.add_video(draft("A", "u1", "work")).unwrap();
    catalog.add_video(draft("B", "u2", "work")).unwrap();
    let (videos, _) = catalog.storage.load();
    assert_eq!(videos, catalog.state.videos);
  }

  #[test]
  fn save_failure_is_reported_not_fatal() {
    let mut catalog = Catalog::open(Storage::new(ReadOnlyStore));
    assert!(catalog.add_video(draft("A", "u1", "work")).is_some());
    assert_eq!(catalog.state.videos.len(), 1);
    assert!(catalog.save_error.as_deref().is_some_and(|e| e.contains("disk full")));
  }

  // --- selection and search ---

  #[test]
  fn selection_does_not_persist() {
    let mut catalog = catalog();
    let id = catalog.add_video(draft("A", "u1", "work")).unwrap();
    assert_eq!(catalog.select_category("work"), Refresh::All);
    assert_eq!(catalog.select_video(&id), Refresh::All);

    let saved = serde_json::to_string(&catalog.state.videos).unwrap();
    let reopened =
      Catalog::open(Storage::new(MemoryStore::new().with_record(&constants().videos_record, &saved)));
    assert_eq!(reopened.state.active_category_id, "all");
    assert!(reopened.state.active_video_id.is_none());
  }

  #[test]
  fn search_refreshes_only_the_list() {
    let mut catalog = catalog();
    catalog.add_video(draft("Trip", "u1", "family")).unwrap();
    catalog.add_video(draft("Meeting", "u2", "work")).unwrap();
    let counts_before = render_all(&catalog.state).categories;

    assert_eq!(catalog.set_search("trip"), Refresh::VideoList);
    let model = render_all(&catalog.state);
    assert_eq!(model.videos.rows.len(), 1);
    assert_eq!(model.videos.rows[0].title, "Trip");
    assert_eq!(model.categories, counts_before);
  }
}
