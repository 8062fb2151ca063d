use ratatui::widgets::ListState;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::clipboard::CopyChain;
use crate::commands::Catalog;
use crate::config::Config;
use crate::constants::constants;
use crate::display::DisplayMode;
use crate::form::{TextInput, VideoForm};
use crate::render::{DisplayModel, Refresh, render_all};
use crate::theme::THEMES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
  Browse,
  Search,
  Form,
  Prompt,
  Alert,
}

/// The copy feedback line and the timer that clears it.
///
/// Each message bumps `generation`; the timer reports the generation it was
/// started for, and a report for an older generation is ignored.
pub(crate) struct Feedback {
  pub(crate) message: Option<String>,
  generation: u64,
  handle: Option<JoinHandle<()>>,
  tx: mpsc::UnboundedSender<u64>,
  rx: mpsc::UnboundedReceiver<u64>,
}

impl Feedback {
  fn new() -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self { message: None, generation: 0, handle: None, tx, rx }
  }

  fn show(&mut self, message: &str, clear_after: Duration) {
    if let Some(handle) = self.handle.take() {
      handle.abort();
    }
    self.generation += 1;
    self.message = Some(message.to_string());

    let generation = self.generation;
    let tx = self.tx.clone();
    self.handle = Some(tokio::spawn(async move {
      tokio::time::sleep(clear_after).await;
      let _ = tx.send(generation);
    }));
  }

  fn poll(&mut self) {
    while let Ok(generation) = self.rx.try_recv() {
      if generation == self.generation {
        self.message = None;
        self.handle = None;
      }
    }
  }
}

pub struct App {
  pub catalog: Catalog,
  /// What the panes show. Rebuilt from `catalog.state` after every command.
  pub view: DisplayModel,
  pub mode: AppMode,
  pub theme_index: usize,
  pub display_mode: DisplayMode,
  pub search: TextInput,
  pub form: VideoForm,
  /// Name entry for a new collection.
  pub prompt: TextInput,
  pub alert: Option<String>,
  /// Highlighted row in the video list (index into `view.videos.rows`).
  pub list_state: ListState,
  pub last_error: Option<String>,
  /// On narrow terminals the viewer replaces the list while this is set.
  pub viewer_in_view: bool,
  pub should_quit: bool,
  /// Mode to return to when the prompt or alert closes.
  return_mode: AppMode,
  clipboard: CopyChain,
  pub(crate) feedback: Feedback,
  error_time: Option<Instant>,
}

impl App {
  pub fn new(catalog: Catalog, display_mode: DisplayMode, theme_index: usize, clipboard: CopyChain) -> Self {
    let view = render_all(&catalog.state);
    let mut app = Self {
      catalog,
      view,
      mode: AppMode::Browse,
      theme_index: theme_index.min(THEMES.len() - 1),
      display_mode,
      search: TextInput::default(),
      form: VideoForm::default(),
      prompt: TextInput::default(),
      alert: None,
      list_state: ListState::default(),
      last_error: None,
      viewer_in_view: false,
      should_quit: false,
      return_mode: AppMode::Browse,
      clipboard,
      feedback: Feedback::new(),
      error_time: None,
    };
    app.sync_list_selection();
    app
  }

  pub fn theme(&self) -> &'static crate::theme::Theme {
    // Clamped in new(), wrapped in next_theme().
    &THEMES[self.theme_index]
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    let mut config = Config::load();
    config.theme_name = Some(self.theme().name.to_string());
    config.save();
  }

  // --- Errors ---

  /// Set an error message with auto-dismiss tracking.
  pub fn set_error(&mut self, msg: String) {
    self.last_error = Some(msg);
    self.error_time = Some(Instant::now());
  }

  pub fn clear_error(&mut self) {
    self.last_error = None;
    self.error_time = None;
  }

  /// Clear stale error messages after 5 seconds.
  pub fn expire_error(&mut self) {
    if let Some(t) = self.error_time
      && t.elapsed() >= Duration::from_secs(5)
    {
      self.clear_error();
    }
  }

  pub fn feedback_message(&self) -> Option<&str> {
    self.feedback.message.as_deref()
  }

  // --- Rendering ---

  /// Rebuild the surfaces a command touched and keep the list highlight valid.
  pub fn apply(&mut self, refresh: Refresh) {
    self.view.refresh(refresh, &self.catalog.state);
    if let Some(err) = self.catalog.save_error.take() {
      self.set_error(err);
    }
    self.sync_list_selection();
  }

  fn sync_list_selection(&mut self) {
    let rows = &self.view.videos.rows;
    if let Some(i) = rows.iter().position(|r| r.active) {
      self.list_state.select(Some(i));
    } else if rows.is_empty() {
      self.list_state.select(None);
    } else {
      let sel = self.list_state.selected().unwrap_or(0);
      self.list_state.select(Some(sel.min(rows.len() - 1)));
    }
  }

  // --- Categories ---

  /// Activate the category `delta` pills away from the active one, wrapping.
  pub fn step_category(&mut self, delta: isize) {
    let pills = &self.view.categories.pills;
    if pills.is_empty() {
      return;
    }
    let current = pills.iter().position(|p| p.active).unwrap_or(0);
    let next = (current as isize + delta).rem_euclid(pills.len() as isize) as usize;
    let id = pills[next].id.clone();
    debug!(id = %id, "category selected");
    let refresh = self.catalog.select_category(&id);
    self.apply(refresh);
  }

  pub fn open_category_prompt(&mut self) {
    self.prompt.clear();
    self.return_mode = self.mode;
    self.mode = AppMode::Prompt;
  }

  pub fn cancel_prompt(&mut self) {
    self.prompt.clear();
    self.mode = self.return_mode;
  }

  /// Create a collection from the prompt. An empty prompt counts as cancelled.
  pub fn submit_prompt(&mut self) {
    let name = std::mem::take(&mut self.prompt).value;
    if name.is_empty() {
      self.mode = self.return_mode;
      return;
    }
    match self.catalog.add_category(&name) {
      Ok(category) => {
        self.apply(Refresh::Categories);
        self.form.select_category(&category.id, &self.view.categories.options);
        self.mode = self.return_mode;
      }
      Err(e) => {
        self.alert = Some(e.to_string());
        self.mode = AppMode::Alert;
      }
    }
  }

  pub fn dismiss_alert(&mut self) {
    self.alert = None;
    self.mode = self.return_mode;
  }

  // --- Videos ---

  pub fn move_highlight(&mut self, delta: isize) {
    let count = self.view.videos.rows.len();
    if count == 0 {
      return;
    }
    let i = self.list_state.selected().map_or(0, |i| (i as isize + delta).rem_euclid(count as isize) as usize);
    self.list_state.select(Some(i));
  }

  /// Select the highlighted video and bring the viewer into view.
  pub fn select_highlighted(&mut self) {
    let Some(selected) = self.list_state.selected() else { return };
    let Some(row) = self.view.videos.rows.get(selected) else { return };
    let id = row.id.clone();
    debug!(id = %id, "video selected");
    let refresh = self.catalog.select_video(&id);
    self.apply(refresh);
    self.viewer_in_view = true;
  }

  pub fn open_form(&mut self) {
    self.mode = AppMode::Form;
  }

  pub fn close_form(&mut self) {
    self.mode = AppMode::Browse;
  }

  /// Save the form as a new video. Incomplete forms are ignored and stay open.
  pub fn submit_form(&mut self) {
    let draft = self.form.draft(&self.view.categories.options);
    if self.catalog.add_video(draft).is_some() {
      self.form.reset();
      self.apply(Refresh::All);
      self.mode = AppMode::Browse;
    }
  }

  // --- Search ---

  pub fn begin_search(&mut self) {
    self.mode = AppMode::Search;
  }

  pub fn search_changed(&mut self) {
    let refresh = self.catalog.set_search(&self.search.value);
    self.apply(refresh);
  }

  pub fn clear_search(&mut self) {
    self.search.clear();
    self.search_changed();
  }

  // --- Viewer actions ---

  /// Copy the selected link. Does nothing when no video is selected.
  pub fn copy_link(&mut self) {
    let Some(video) = self.catalog.state.active_video() else { return };
    let url = video.url.clone();
    let outcome = self.clipboard.copy(&url);
    info!(outcome = ?outcome, "copy link");
    self.feedback.show(outcome.message(), Duration::from_millis(constants().feedback_clear_ms));
  }

  /// Open the selected link in the default browser.
  pub fn open_link(&mut self) {
    let Some(video) = self.catalog.state.active_video() else { return };
    let url = video.url.clone();
    #[cfg(target_os = "macos")]
    let cmd = "open";
    #[cfg(not(target_os = "macos"))]
    let cmd = "xdg-open";
    match std::process::Command::new(cmd)
      .arg(&url)
      .stdin(std::process::Stdio::null())
      .stdout(std::process::Stdio::null())
      .stderr(std::process::Stdio::null())
      .spawn()
    {
      Ok(mut child) => {
        // Reap the child in a background thread to avoid zombie processes.
        std::thread::spawn(move || {
          let _ = child.wait();
        });
      }
      Err(e) => {
        self.set_error(format!("Failed to open browser: {}", e));
      }
    }
  }

  pub fn toggle_viewer(&mut self) {
    self.viewer_in_view = !self.viewer_in_view;
  }

  /// Apply timer results and expire old errors. Called once per frame.
  pub fn check_pending(&mut self) {
    self.feedback.poll();
    self.expire_error();
  }
}
