use crate::commands::VideoDraft;
use crate::constants::constants;
use crate::render::CategoryOption;

// --- Helpers ---

/// Convert a char index to a byte offset within the string.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
  s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

// --- Text input ---

/// A single-line text field with a char-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
  pub value: String,
  pub cursor: usize,
  /// Horizontal scroll offset in display columns.
  pub scroll: usize,
}

impl TextInput {
  pub fn insert(&mut self, c: char) {
    let byte_idx = char_to_byte_index(&self.value, self.cursor);
    self.value.insert(byte_idx, c);
    self.cursor += 1;
  }

  /// Returns true when something was removed.
  pub fn backspace(&mut self) -> bool {
    if self.cursor == 0 {
      return false;
    }
    self.cursor -= 1;
    let byte_idx = char_to_byte_index(&self.value, self.cursor);
    self.value.remove(byte_idx);
    true
  }

  /// Returns true when something was removed.
  pub fn delete(&mut self) -> bool {
    if self.cursor >= self.value.chars().count() {
      return false;
    }
    let byte_idx = char_to_byte_index(&self.value, self.cursor);
    self.value.remove(byte_idx);
    true
  }

  pub fn left(&mut self) {
    self.cursor = self.cursor.saturating_sub(1);
  }

  pub fn right(&mut self) {
    if self.cursor < self.value.chars().count() {
      self.cursor += 1;
    }
  }

  pub fn home(&mut self) {
    self.cursor = 0;
  }

  pub fn end(&mut self) {
    self.cursor = self.value.chars().count();
  }

  pub fn clear(&mut self) {
    *self = Self::default();
  }

  pub fn is_empty(&self) -> bool {
    self.value.is_empty()
  }
}

// --- Add-video form ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
  Title,
  Url,
  Notes,
  Category,
  Accent,
}

impl FormField {
  pub const ALL: [FormField; 5] =
    [FormField::Title, FormField::Url, FormField::Notes, FormField::Category, FormField::Accent];

  pub fn label(self) -> &'static str {
    match self {
      FormField::Title => "Title",
      FormField::Url => "Link",
      FormField::Notes => "Notes",
      FormField::Category => "Collection",
      FormField::Accent => "Accent",
    }
  }

  pub fn is_selector(self) -> bool {
    matches!(self, FormField::Category | FormField::Accent)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoForm {
  pub title: TextInput,
  pub url: TextInput,
  pub notes: TextInput,
  pub category_index: usize,
  pub accent_index: usize,
  focus_index: usize,
}

impl VideoForm {
  pub fn focus(&self) -> FormField {
    FormField::ALL[self.focus_index % FormField::ALL.len()]
  }

  pub fn next_field(&mut self) {
    self.focus_index = (self.focus_index + 1) % FormField::ALL.len();
  }

  pub fn prev_field(&mut self) {
    self.focus_index = (self.focus_index + FormField::ALL.len() - 1) % FormField::ALL.len();
  }

  /// The focused text field, or None when a selector is focused.
  pub fn focused_input(&mut self) -> Option<&mut TextInput> {
    match self.focus() {
      FormField::Title => Some(&mut self.title),
      FormField::Url => Some(&mut self.url),
      FormField::Notes => Some(&mut self.notes),
      FormField::Category | FormField::Accent => None,
    }
  }

  /// Step the focused selector by `delta`, wrapping around.
  pub fn cycle(&mut self, delta: isize, category_count: usize) {
    let (index, len) = match self.focus() {
      FormField::Category => (&mut self.category_index, category_count),
      FormField::Accent => (&mut self.accent_index, constants().palette.len()),
      _ => return,
    };
    if len == 0 {
      return;
    }
    *index = (*index as isize + delta).rem_euclid(len as isize) as usize;
  }

  /// Point the collection selector at `id`, if it is among `options`.
  pub fn select_category(&mut self, id: &str, options: &[CategoryOption]) {
    if let Some(i) = options.iter().position(|o| o.id == id) {
      self.category_index = i;
    }
  }

  pub fn accent(&self) -> &str {
    constants().palette.get(self.accent_index).map_or(constants().default_accent.as_str(), String::as_str)
  }

  pub fn draft(&self, options: &[CategoryOption]) -> VideoDraft {
    VideoDraft {
      title: self.title.value.clone(),
      url: self.url.value.clone(),
      notes: self.notes.value.clone(),
      category_id: options.get(self.category_index).map(|o| o.id.clone()).unwrap_or_default(),
      accent: self.accent().to_string(),
    }
  }

  /// Back to blank fields with the first collection and accent selected.
  pub fn reset(&mut self) {
    *self = Self::default();
  }
}
