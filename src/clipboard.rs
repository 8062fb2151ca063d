use anyhow::{Context, Result, anyhow};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use std::io::Write;
use tracing::{debug, warn};

/// Something that can take a copied string.
pub trait Clipboard: Send {
  fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard using arboard. Created lazily and kept alive so X11
/// selections stay owned after the copy.
#[derive(Default)]
pub struct SystemClipboard {
  inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
  pub fn new() -> Self {
    Self { inner: None }
  }
}

impl Clipboard for SystemClipboard {
  fn set_text(&mut self, text: &str) -> Result<()> {
    if self.inner.is_none() {
      self.inner = Some(arboard::Clipboard::new().context("System clipboard unavailable")?);
    }
    let clipboard = self.inner.as_mut().ok_or_else(|| anyhow!("System clipboard unavailable"))?;
    clipboard.set_text(text.to_string()).context("Failed to set clipboard text")
  }
}

// --- OSC 52 ---
//
// Asks the terminal emulator to place text on the clipboard:
//
//   \x1B]52;c;<base64 text>\x07
//
// Works over SSH and without a display server, as long as the terminal
// honours the sequence. There is no acknowledgement, so a successful write
// is treated as a successful copy.

pub struct Osc52Clipboard<W: Write + Send> {
  out: W,
}

impl Osc52Clipboard<std::io::Stdout> {
  pub fn stdout() -> Self {
    Self { out: std::io::stdout() }
  }
}

impl<W: Write + Send> Osc52Clipboard<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
  fn set_text(&mut self, text: &str) -> Result<()> {
    write!(self.out, "\x1B]52;c;{}\x07", BASE64.encode(text)).context("Failed to write OSC 52 sequence")?;
    self.out.flush().context("Failed to flush OSC 52 sequence")
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
  Copied,
  Unsupported,
}

impl CopyOutcome {
  pub fn message(self) -> &'static str {
    match self {
      CopyOutcome::Copied => "Link copied to clipboard.",
      CopyOutcome::Unsupported => "Copy not supported in this terminal.",
    }
  }
}

/// The platform clipboard first, then the fallback.
pub struct CopyChain {
  primary: Box<dyn Clipboard>,
  fallback: Box<dyn Clipboard>,
}

impl CopyChain {
  pub fn new(primary: Box<dyn Clipboard>, fallback: Box<dyn Clipboard>) -> Self {
    Self { primary, fallback }
  }

  pub fn system() -> Self {
    Self::new(Box::new(SystemClipboard::new()), Box::new(Osc52Clipboard::stdout()))
  }

  pub fn copy(&mut self, text: &str) -> CopyOutcome {
    match self.primary.set_text(text) {
      Ok(()) => return CopyOutcome::Copied,
      Err(e) => debug!(err = %e, "clipboard: primary failed, trying fallback"),
    }
    match self.fallback.set_text(text) {
      Ok(()) => CopyOutcome::Copied,
      Err(e) => {
        warn!(err = %e, "clipboard: fallback failed");
        CopyOutcome::Unsupported
      }
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use std::sync::{Arc, Mutex};

  #[derive(Clone, Default)]
  pub(crate) struct MockClipboard {
    pub(crate) value: Arc<Mutex<Option<String>>>,
    pub(crate) fail: bool,
  }

  impl MockClipboard {
    pub(crate) fn failing() -> Self {
      Self { fail: true, ..Self::default() }
    }

    pub(crate) fn get(&self) -> Option<String> {
      self.value.lock().expect("lock clipboard").clone()
    }
  }

  impl Clipboard for MockClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
      if self.fail {
        return Err(anyhow!("no clipboard"));
      }
      *self.value.lock().expect("lock clipboard") = Some(text.to_string());
      Ok(())
    }
  }

  #[test]
  fn primary_success_skips_fallback() {
    let primary = MockClipboard::default();
    let fallback = MockClipboard::default();
    let mut chain = CopyChain::new(Box::new(primary.clone()), Box::new(fallback.clone()));
    assert_eq!(chain.copy("https://youtu.be/x"), CopyOutcome::Copied);
    assert_eq!(primary.get().as_deref(), Some("https://youtu.be/x"));
    assert!(fallback.get().is_none());
  }

  #[test]
  fn primary_failure_uses_fallback() {
    let fallback = MockClipboard::default();
    let mut chain = CopyChain::new(Box::new(MockClipboard::failing()), Box::new(fallback.clone()));
    assert_eq!(chain.copy("u"), CopyOutcome::Copied);
    assert_eq!(fallback.get().as_deref(), Some("u"));
  }

  #[test]
  fn both_failing_is_unsupported() {
    let mut chain = CopyChain::new(Box::new(MockClipboard::failing()), Box::new(MockClipboard::failing()));
    let outcome = chain.copy("u");
    assert_eq!(outcome, CopyOutcome::Unsupported);
    assert_eq!(outcome.message(), "Copy not supported in this terminal.");
  }

  #[test]
  fn osc52_sequence_is_base64_encoded() {
    let mut osc = Osc52Clipboard::new(Vec::new());
    osc.set_text("hi").unwrap();
    assert_eq!(osc.out, b"\x1B]52;c;aGk=\x07");
  }
}
