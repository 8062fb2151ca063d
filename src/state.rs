use crate::model::{ALL_CATEGORY_ID, Category, Video};

/// Everything the catalog displays. Command handlers mutate fields directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
  /// Newest first.
  pub videos: Vec<Video>,
  pub categories: Vec<Category>,
  /// `all` means no category filter.
  pub active_category_id: String,
  pub active_video_id: Option<String>,
  /// Mirrors the search input; written on every keystroke.
  pub search_term: String,
}

impl CatalogState {
  pub fn new(videos: Vec<Video>, categories: Vec<Category>) -> Self {
    Self {
      videos,
      categories,
      active_category_id: ALL_CATEGORY_ID.to_string(),
      active_video_id: None,
      search_term: String::new(),
    }
  }

  pub fn video(&self, id: &str) -> Option<&Video> {
    self.videos.iter().find(|v| v.id == id)
  }

  pub fn category(&self, id: &str) -> Option<&Category> {
    self.categories.iter().find(|c| c.id == id)
  }

  /// The selected video, if the selection still resolves.
  pub fn active_video(&self) -> Option<&Video> {
    self.active_video_id.as_deref().and_then(|id| self.video(id))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_state_has_no_filter_or_selection() {
    let state = CatalogState::new(Vec::new(), Vec::new());
    assert_eq!(state.active_category_id, "all");
    assert!(state.active_video_id.is_none());
    assert!(state.search_term.is_empty());
  }

  #[test]
  fn dangling_selection_resolves_to_none() {
    let mut state = CatalogState::new(Vec::new(), Vec::new());
    state.active_video_id = Some("v_missing".to_string());
    assert!(state.active_video().is_none());
  }
}
