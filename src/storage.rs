//! Persistence for the two catalog records.
//!
//! Each record is a JSON array stored under a fixed name in a [`RecordStore`].
//! Loading never fails: anything unreadable degrades to an empty collection.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
#[cfg(test)]
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::constants;
use crate::model::{Category, Video, default_categories};

/// Durable named-record storage.
pub trait RecordStore: Send {
  fn read(&self, key: &str) -> Result<Option<String>>;
  fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per record inside a directory.
pub struct FileStore {
  dir: PathBuf,
}

impl FileStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn record_path(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{}.json", key))
  }
}

impl RecordStore for FileStore {
  fn read(&self, key: &str) -> Result<Option<String>> {
    let path = self.record_path(key);
    match std::fs::read_to_string(&path) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
  }

  fn write(&mut self, key: &str, value: &str) -> Result<()> {
    std::fs::create_dir_all(&self.dir).with_context(|| format!("Failed to create {}", self.dir.display()))?;
    let path = self.record_path(key);
    // Write a sibling then rename so readers never see a half-written record.
    let tmp = self.dir.join(format!(".{}.json.tmp", key));
    std::fs::write(&tmp, value).with_context(|| format!("Failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, &path).with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
  }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
  records: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_record(mut self, key: &str, value: &str) -> Self {
    self.records.insert(key.to_string(), value.to_string());
    self
  }
}

#[cfg(test)]
impl RecordStore for MemoryStore {
  fn read(&self, key: &str) -> Result<Option<String>> {
    Ok(self.records.get(key).cloned())
  }

  fn write(&mut self, key: &str, value: &str) -> Result<()> {
    self.records.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// Reads and writes the video and category records.
pub struct Storage {
  store: Box<dyn RecordStore>,
}

impl Storage {
  pub fn new(store: impl RecordStore + 'static) -> Self {
    Self { store: Box::new(store) }
  }

  /// Load both collections, seeding default categories when none are stored.
  ///
  /// A record is written back only when it was read without losing anything,
  /// or when the category seed replaces it. Damaged records stay on disk
  /// until the next mutation overwrites them.
  pub fn load(&mut self) -> (Vec<Video>, Vec<Category>) {
    let videos: RecordList<Video> = self.read_list(&constants().videos_record);
    let mut categories: RecordList<Category> = self.read_list(&constants().categories_record);

    let seeded = categories.items.is_empty();
    if seeded {
      debug!("storage: seeding default categories");
      categories.items = default_categories();
    }

    if (seeded || categories.intact)
      && let Err(e) = self.save_categories(&categories.items)
    {
      warn!(err = %e, "storage: failed to write categories after load");
    }
    if videos.intact {
      if let Err(e) = self.save_videos(&videos.items) {
        warn!(err = %e, "storage: failed to write videos after load");
      }
    } else {
      warn!("storage: videos record kept as-is until the next save");
    }

    (videos.items, categories.items)
  }

  pub fn save_videos(&mut self, videos: &[Video]) -> Result<()> {
    self.write_list(&constants().videos_record, videos)
  }

  pub fn save_categories(&mut self, categories: &[Category]) -> Result<()> {
    self.write_list(&constants().categories_record, categories)
  }

  fn write_list<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
    let json = serde_json::to_string(items).with_context(|| format!("Failed to serialize {}", key))?;
    self.store.write(key, &json)
  }

  fn read_list<T: DeserializeOwned>(&self, key: &str) -> RecordList<T> {
    match self.store.read(key) {
      Ok(Some(raw)) => parse_list(key, &raw),
      Ok(None) => RecordList { items: Vec::new(), intact: true },
      Err(e) => {
        warn!(key, err = %e, "storage: record unreadable, starting empty");
        RecordList { items: Vec::new(), intact: false }
      }
    }
  }
}

/// The parsed elements of one record.
struct RecordList<T> {
  items: Vec<T>,
  /// False when anything stored under the key had to be dropped.
  intact: bool,
}

/// Parse a JSON array, skipping elements that don't fit the record shape.
fn parse_list<T: DeserializeOwned>(key: &str, raw: &str) -> RecordList<T> {
  let value: serde_json::Value = match serde_json::from_str(raw) {
    Ok(v) => v,
    Err(e) => {
      warn!(key, err = %e, "storage: record is not valid JSON, starting empty");
      return RecordList { items: Vec::new(), intact: false };
    }
  };
  let serde_json::Value::Array(elements) = value else {
    warn!(key, "storage: record is not an array, starting empty");
    return RecordList { items: Vec::new(), intact: false };
  };
  let total = elements.len();
  let items: Vec<T> = elements
    .into_iter()
    .enumerate()
    .filter_map(|(i, item)| match serde_json::from_value(item) {
      Ok(parsed) => Some(parsed),
      Err(e) => {
        warn!(key, index = i, err = %e, "storage: skipping malformed entry");
        None
      }
    })
    .collect();
  RecordList { intact: items.len() == total, items }
}
