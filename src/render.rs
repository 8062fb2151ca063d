//! Projection from catalog state to what the three panes show.
//!
//! Every function here is pure: it reads [`CatalogState`] and builds a fresh
//! display model. Nothing is cached between calls.

use crate::constants::constants;
use crate::embed::{Embed, resolve_embed};
use crate::filter::filter_videos;
use crate::model::{ALL_CATEGORY_ID, format_date, format_timestamp};
use crate::pattern::Pattern;
use crate::state::CatalogState;

pub const UNKNOWN_TAG: &str = "Clip";
pub const UNSORTED_LABEL: &str = "Unsorted";
pub const EXTERNAL_NOTICE: &str = "This link can't be embedded, but it will still work when shared.";

/// Which surfaces a command needs rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
  All,
  Categories,
  VideoList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPill {
  pub id: String,
  pub label: String,
  pub count: usize,
  pub color: String,
  pub active: bool,
}

/// An entry for the add-video form's collection selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
  pub id: String,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStrip {
  pub pills: Vec<CategoryPill>,
  pub options: Vec<CategoryOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRow {
  pub id: String,
  pub title: String,
  pub notes: String,
  /// Category name, or a fallback when the category is gone.
  pub tag: String,
  pub accent: String,
  pub date: String,
  pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoListView {
  pub heading: String,
  pub rows: Vec<VideoRow>,
  pub empty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
  Embedded(Embed),
  External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVideo {
  pub id: String,
  pub title: String,
  pub notes: Option<String>,
  pub category: String,
  pub saved_at: String,
  pub url: String,
  pub preview: Preview,
  pub pattern: Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerView {
  Placeholder { now_playing: String, message: String, pattern_message: String },
  Selected(Box<SelectedVideo>),
}

impl ViewerView {
  pub fn copy_enabled(&self) -> bool {
    matches!(self, ViewerView::Selected(_))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayModel {
  pub categories: CategoryStrip,
  pub videos: VideoListView,
  pub viewer: ViewerView,
}

impl DisplayModel {
  /// Rebuild the surfaces named by `refresh` from current state.
  pub fn refresh(&mut self, refresh: Refresh, state: &CatalogState) {
    match refresh {
      Refresh::All => *self = render_all(state),
      Refresh::Categories => self.categories = render_categories(state),
      Refresh::VideoList => self.videos = render_video_list(state),
    }
  }
}

pub fn render_all(state: &CatalogState) -> DisplayModel {
  DisplayModel {
    categories: render_categories(state),
    videos: render_video_list(state),
    viewer: render_viewer(state),
  }
}

pub fn render_categories(state: &CatalogState) -> CategoryStrip {
  let mut pills = Vec::with_capacity(state.categories.len() + 1);
  pills.push(CategoryPill {
    id: ALL_CATEGORY_ID.to_string(),
    label: "All".to_string(),
    count: state.videos.len(),
    color: constants().default_accent.clone(),
    active: state.active_category_id == ALL_CATEGORY_ID,
  });
  pills.extend(state.categories.iter().map(|cat| CategoryPill {
    id: cat.id.clone(),
    label: cat.name.clone(),
    count: state.videos.iter().filter(|v| v.category_id == cat.id).count(),
    color: cat.color.clone(),
    active: state.active_category_id == cat.id,
  }));

  let options =
    state.categories.iter().map(|cat| CategoryOption { id: cat.id.clone(), name: cat.name.clone() }).collect();

  CategoryStrip { pills, options }
}

pub fn render_video_list(state: &CatalogState) -> VideoListView {
  let filtered = filter_videos(&state.videos, &state.active_category_id, &state.search_term);

  let rows: Vec<VideoRow> = filtered
    .iter()
    .map(|video| VideoRow {
      id: video.id.clone(),
      title: video.title.clone(),
      notes: video.notes.clone(),
      tag: state.category(&video.category_id).map_or_else(|| UNKNOWN_TAG.to_string(), |c| c.name.clone()),
      accent: video.accent.clone(),
      date: format_date(video.created_at),
      active: state.active_video_id.as_deref() == Some(video.id.as_str()),
    })
    .collect();

  let shown = rows.len();
  let heading = if state.active_category_id == ALL_CATEGORY_ID {
    format!("All clips · {} shown", shown)
  } else {
    let name = state.category(&state.active_category_id).map_or("Collection", |c| c.name.as_str());
    format!("{} · {} clip{}", name, shown, if shown == 1 { "" } else { "s" })
  };

  VideoListView { heading, empty: rows.is_empty(), rows }
}

pub fn render_viewer(state: &CatalogState) -> ViewerView {
  let Some(video) = state.active_video() else {
    return ViewerView::Placeholder {
      now_playing: "Select a video from your list.".to_string(),
      message: "Pick a video to see it here.".to_string(),
      pattern_message: "No video selected".to_string(),
    };
  };

  let preview = match resolve_embed(&video.url) {
    Some(embed) => Preview::Embedded(embed),
    None => Preview::External,
  };

  ViewerView::Selected(Box::new(SelectedVideo {
    id: video.id.clone(),
    title: video.title.clone(),
    notes: Some(video.notes.clone()).filter(|n| !n.is_empty()),
    category: state.category(&video.category_id).map_or_else(|| UNSORTED_LABEL.to_string(), |c| c.name.clone()),
    saved_at: format!("Saved {}", format_timestamp(video.created_at)),
    url: video.url.clone(),
    preview,
    pattern: Pattern::from_url(&video.url, constants().pattern_size),
  }))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{Category, Video, default_categories};

  fn make_video(id: &str, title: &str, url: &str, category_id: &str) -> Video {
    Video {
      id: id.to_string(),
      title: title.to_string(),
      url: url.to_string(),
      notes: String::new(),
      category_id: category_id.to_string(),
      accent: "accent-amber".to_string(),
      created_at: 1_700_000_000_000,
    }
  }

  fn sample_state() -> CatalogState {
    CatalogState::new(
      vec![
        make_video("v2", "Road trip", "https://youtu.be/abc123", "family"),
        make_video("v1", "Keynote", "https://example.com/talk", "work"),
        make_video("v0", "Orphan", "https://vimeo.com/42", "deleted"),
      ],
      default_categories(),
    )
  }

  #[test]
  fn pills_count_per_category() {
    let strip = render_categories(&sample_state());
    let counts: Vec<(&str, usize)> = strip.pills.iter().map(|p| (p.id.as_str(), p.count)).collect();
    assert_eq!(counts, [("all", 3), ("work", 1), ("family", 1), ("events", 0)]);
    assert!(strip.pills[0].active);
    assert!(strip.pills[1..].iter().all(|p| !p.active));
  }

  #[test]
  fn options_follow_categories() {
    let strip = render_categories(&sample_state());
    let ids: Vec<&str> = strip.options.iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, ["work", "family", "events"]);
  }

  #[test]
  fn active_category_marks_pill_and_filters_list() {
    let mut state = sample_state();
    state.active_category_id = "family".to_string();
    let model = render_all(&state);
    assert!(model.categories.pills.iter().find(|p| p.id == "family").unwrap().active);
    assert_eq!(model.videos.rows.len(), 1);
    assert_eq!(model.videos.heading, "Family · 1 clip");
  }

  #[test]
  fn heading_for_all_and_plurals() {
    let mut state = sample_state();
    assert_eq!(render_video_list(&state).heading, "All clips · 3 shown");
    state.active_category_id = "events".to_string();
    assert_eq!(render_video_list(&state).heading, "Events · 0 clips");
    state.active_category_id = "ghost".to_string();
    assert_eq!(render_video_list(&state).heading, "Collection · 0 clips");
  }

  #[test]
  fn orphaned_video_gets_fallback_tag() {
    let list = render_video_list(&sample_state());
    let orphan = list.rows.iter().find(|r| r.id == "v0").unwrap();
    assert_eq!(orphan.tag, UNKNOWN_TAG);
    assert_eq!(orphan.date, format_date(1_700_000_000_000));
  }

  #[test]
  fn empty_state_iff_no_rows() {
    let mut state = sample_state();
    assert!(!render_video_list(&state).empty);
    state.search_term = "zzz".to_string();
    let list = render_video_list(&state);
    assert!(list.empty);
    assert!(list.rows.is_empty());
  }

  #[test]
  fn search_leaves_counts_alone() {
    let mut state = sample_state();
    let before = render_categories(&state);
    state.search_term = "trip".to_string();
    let model = render_all(&state);
    assert_eq!(model.videos.rows.len(), 1);
    assert_eq!(model.categories, before);
  }

  #[test]
  fn placeholder_without_selection() {
    let viewer = render_viewer(&sample_state());
    assert!(!viewer.copy_enabled());
    assert!(matches!(viewer, ViewerView::Placeholder { .. }));
  }

  #[test]
  fn selected_youtube_video_embeds() {
    let mut state = sample_state();
    state.active_video_id = Some("v2".to_string());
    let ViewerView::Selected(selected) = render_viewer(&state) else { panic!("expected a selection") };
    assert_eq!(selected.category, "Family");
    assert!(selected.notes.is_none());
    assert!(selected.saved_at.starts_with("Saved "));
    let Preview::Embedded(embed) = &selected.preview else { panic!("expected an embed") };
    assert!(embed.embed_url.ends_with("/embed/abc123"));
  }

  #[test]
  fn selected_unknown_host_is_external() {
    let mut state = sample_state();
    state.active_video_id = Some("v1".to_string());
    let viewer = render_viewer(&state);
    assert!(viewer.copy_enabled());
    let ViewerView::Selected(selected) = viewer else { panic!("expected a selection") };
    assert_eq!(selected.preview, Preview::External);
  }

  #[test]
  fn orphaned_selection_is_unsorted() {
    let mut state = sample_state();
    state.active_video_id = Some("v0".to_string());
    let ViewerView::Selected(selected) = render_viewer(&state) else { panic!("expected a selection") };
    assert_eq!(selected.category, UNSORTED_LABEL);
  }

  #[test]
  fn active_row_follows_selection() {
    let mut state = sample_state();
    state.active_video_id = Some("v1".to_string());
    let list = render_video_list(&state);
    let active: Vec<&str> = list.rows.iter().filter(|r| r.active).map(|r| r.id.as_str()).collect();
    assert_eq!(active, ["v1"]);
  }

  #[test]
  fn rendering_is_idempotent() {
    let mut state = sample_state();
    state.active_video_id = Some("v2".to_string());
    state.search_term = "o".to_string();
    assert_eq!(render_all(&state), render_all(&state));
  }

  #[test]
  fn partial_refresh_only_touches_named_surface() {
    let mut state = sample_state();
    let mut model = render_all(&state);
    state.active_video_id = Some("v2".to_string());
    state.categories.push(Category { id: "new".into(), name: "New".into(), color: "accent-pink".into() });

    model.refresh(Refresh::VideoList, &state);
    assert!(!model.viewer.copy_enabled());
    assert_eq!(model.categories.pills.len(), 4);

    model.refresh(Refresh::Categories, &state);
    assert_eq!(model.categories.pills.len(), 5);

    model.refresh(Refresh::All, &state);
    assert_eq!(model, render_all(&state));
  }
}
