use ratatui::style::Color;

pub struct Theme {
  pub name: &'static str,
  pub bg: Color,
  pub fg: Color,
  pub accent: Color,
  pub muted: Color,
  pub border: Color,
  pub highlight_fg: Color,
  pub highlight_bg: Color,
  pub stripe_bg: Color,
  pub status: Color,
  pub error: Color,
  pub key_fg: Color,
  pub key_bg: Color,
  /// Light and dark cells of the link pattern.
  pub pattern_on: Color,
  pub pattern_off: Color,
}

pub static THEMES: [Theme; 3] = [
  Theme {
    name: "midnight",
    bg: Color::Rgb(5, 7, 18),
    fg: Color::Rgb(226, 232, 240),
    accent: Color::Rgb(96, 165, 250),
    muted: Color::Rgb(100, 116, 139),
    border: Color::Rgb(51, 65, 85),
    highlight_fg: Color::Rgb(5, 7, 18),
    highlight_bg: Color::Rgb(96, 165, 250),
    stripe_bg: Color::Rgb(15, 20, 36),
    status: Color::Rgb(52, 211, 153),
    error: Color::Rgb(248, 113, 113),
    key_fg: Color::Rgb(5, 7, 18),
    key_bg: Color::Rgb(148, 163, 184),
    pattern_on: Color::Rgb(248, 250, 252),
    pattern_off: Color::Rgb(5, 7, 18),
  },
  Theme {
    name: "paper",
    bg: Color::Rgb(250, 248, 242),
    fg: Color::Rgb(41, 37, 36),
    accent: Color::Rgb(180, 83, 9),
    muted: Color::Rgb(120, 113, 108),
    border: Color::Rgb(214, 211, 209),
    highlight_fg: Color::Rgb(250, 248, 242),
    highlight_bg: Color::Rgb(180, 83, 9),
    stripe_bg: Color::Rgb(241, 238, 230),
    status: Color::Rgb(21, 128, 61),
    error: Color::Rgb(185, 28, 28),
    key_fg: Color::Rgb(250, 248, 242),
    key_bg: Color::Rgb(87, 83, 78),
    pattern_on: Color::Rgb(28, 25, 23),
    pattern_off: Color::Rgb(250, 248, 242),
  },
  Theme {
    name: "terminal",
    bg: Color::Reset,
    fg: Color::White,
    accent: Color::Cyan,
    muted: Color::DarkGray,
    border: Color::Gray,
    highlight_fg: Color::Black,
    highlight_bg: Color::Cyan,
    stripe_bg: Color::Reset,
    status: Color::Green,
    error: Color::Red,
    key_fg: Color::Black,
    key_bg: Color::Gray,
    pattern_on: Color::White,
    pattern_off: Color::Black,
  },
];

/// Terminal colour for an accent label. Unknown labels fall back to the theme accent.
pub fn accent_color(label: &str, theme: &Theme) -> Color {
  match label {
    "accent-blue" => Color::Rgb(96, 165, 250),
    "accent-amber" => Color::Rgb(251, 191, 36),
    "accent-pink" => Color::Rgb(244, 114, 182),
    "accent-emerald" => Color::Rgb(52, 211, 153),
    "accent-violet" => Color::Rgb(167, 139, 250),
    _ => theme.accent,
  }
}

/// Index of the named theme, defaulting to the first.
pub fn theme_index(name: Option<&str>) -> usize {
  name.and_then(|n| THEMES.iter().position(|t| t.name == n)).unwrap_or(0)
}
