//! Map a saved URL to an embeddable player for the providers we recognise.

/// Video hosting providers with an embeddable player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
  YouTube,
  Vimeo,
}

impl Provider {
  pub fn label(self) -> &'static str {
    match self {
      Provider::YouTube => "YouTube",
      Provider::Vimeo => "Vimeo",
    }
  }
}

/// An embeddable player for a saved link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embed {
  pub provider: Provider,
  pub video_id: String,
  pub embed_url: String,
}

impl Embed {
  fn youtube(video_id: &str) -> Self {
    Self {
      provider: Provider::YouTube,
      video_id: video_id.to_string(),
      embed_url: format!("https://www.youtube.com/embed/{}", video_id),
    }
  }

  fn vimeo(video_id: &str) -> Self {
    Self {
      provider: Provider::Vimeo,
      video_id: video_id.to_string(),
      embed_url: format!("https://player.vimeo.com/video/{}", video_id),
    }
  }

  /// Iframe markup for hosts that render HTML. Shown in the viewer as embed code.
  pub fn markup(&self) -> String {
    format!(r#"<iframe src="{}" allowfullscreen loading="lazy"></iframe>"#, self.embed_url)
  }
}

/// The pieces of an absolute http(s) URL we need to recognise providers.
struct UrlParts<'a> {
  host: String,
  path: &'a str,
  query: &'a str,
}

/// Split an absolute URL into lowercase host, path and query.
/// Returns None for anything without an http(s) scheme or host.
fn split_url(url: &str) -> Option<UrlParts<'_>> {
  let trimmed = url.trim();
  let (scheme, rest) = trimmed.split_once("://")?;
  if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
    return None;
  }
  let rest = rest.split('#').next().unwrap_or("");
  let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
  let (authority, tail) = rest.split_at(authority_end);
  // Drop userinfo and port.
  let host = authority.rsplit('@').next().unwrap_or("");
  let host = host.split(':').next().unwrap_or("").to_lowercase();
  if host.is_empty() {
    return None;
  }
  let (path, query) = tail.split_once('?').unwrap_or((tail, ""));
  let path = if path.is_empty() { "/" } else { path };
  Some(UrlParts { host, path, query })
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
  query.split('&').filter_map(|pair| pair.split_once('=')).find(|(k, _)| *k == name).map(|(_, v)| v)
}

/// Resolve a URL to an embeddable player.
///
/// Recognised forms:
/// - `youtube.com/watch?v=ID` (any subdomain)
/// - `youtu.be/ID`
/// - `vimeo.com/ID` (first path segment)
pub fn resolve_embed(url: &str) -> Option<Embed> {
  let parts = split_url(url)?;

  if parts.host.contains("youtube.com")
    && (parts.path == "/watch" || parts.path == "/watch/")
    && let Some(id) = query_param(parts.query, "v").filter(|v| !v.is_empty())
  {
    return Some(Embed::youtube(id));
  }

  if parts.host == "youtu.be" {
    let id = parts.path.strip_prefix('/').unwrap_or(parts.path);
    if !id.is_empty() {
      return Some(Embed::youtube(id));
    }
  }

  if parts.host.contains("vimeo.com")
    && let Some(id) = parts.path.split('/').find(|s| !s.is_empty())
  {
    return Some(Embed::vimeo(id));
  }

  None
}
