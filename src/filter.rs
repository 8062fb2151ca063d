use crate::model::{ALL_CATEGORY_ID, Video};

/// Check if a video matches the category filter and the search term.
/// The term is matched case-insensitively against title and notes.
pub fn matches(video: &Video, category_id: &str, term: &str) -> bool {
  if category_id != ALL_CATEGORY_ID && video.category_id != category_id {
    return false;
  }
  let needle = term.trim().to_lowercase();
  if needle.is_empty() {
    return true;
  }
  let haystack = format!("{} {}", video.title, video.notes).to_lowercase();
  haystack.contains(&needle)
}

/// The visible videos, in their stored order.
pub fn filter_videos<'a>(videos: &'a [Video], category_id: &str, term: &str) -> Vec<&'a Video> {
  videos.iter().filter(|v| matches(v, category_id, term)).collect()
}
