use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliDisplayMode {
  Auto,
  Blocks,
  Ascii,
}

/// How the link pattern is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
  /// Unicode half-blocks, two pattern rows per terminal row.
  Blocks,
  /// `#` and spaces, one pattern row per terminal row.
  Ascii,
}

impl DisplayMode {
  pub fn label(self) -> &'static str {
    match self {
      DisplayMode::Blocks => "blocks",
      DisplayMode::Ascii => "ascii",
    }
  }
}

/// Detect whether the terminal can draw half-block glyphs.
///
/// The Linux console and `dumb` terminals get ASCII; everything else gets blocks.
pub fn detect_display_mode() -> DisplayMode {
  let term = std::env::var("TERM").unwrap_or_default();
  display_mode_for_term(&term)
}

fn display_mode_for_term(term: &str) -> DisplayMode {
  if matches!(term, "dumb" | "linux" | "vt100" | "vt220") { DisplayMode::Ascii } else { DisplayMode::Blocks }
}

pub fn resolve_display_mode(cli: CliDisplayMode) -> DisplayMode {
  match cli {
    CliDisplayMode::Auto => detect_display_mode(),
    CliDisplayMode::Blocks => DisplayMode::Blocks,
    CliDisplayMode::Ascii => DisplayMode::Ascii,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn limited_terminals_get_ascii() {
    assert_eq!(display_mode_for_term("dumb"), DisplayMode::Ascii);
    assert_eq!(display_mode_for_term("linux"), DisplayMode::Ascii);
  }

  #[test]
  fn modern_terminals_get_blocks() {
    assert_eq!(display_mode_for_term("xterm-256color"), DisplayMode::Blocks);
    assert_eq!(display_mode_for_term("xterm-kitty"), DisplayMode::Blocks);
    assert_eq!(display_mode_for_term(""), DisplayMode::Blocks);
  }

  #[test]
  fn explicit_modes_skip_detection() {
    assert_eq!(resolve_display_mode(CliDisplayMode::Ascii), DisplayMode::Ascii);
    assert_eq!(resolve_display_mode(CliDisplayMode::Blocks), DisplayMode::Blocks);
  }
}
