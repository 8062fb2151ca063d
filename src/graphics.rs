use ratatui::{
  buffer::Buffer,
  layout::Rect,
  style::{Color, Style},
  widgets::Widget,
};

use crate::display::DisplayMode;
use crate::pattern::Pattern;

// --- Pattern Widget ---

pub struct PatternWidget<'a> {
  pub pattern: &'a Pattern,
  pub display_mode: DisplayMode,
  pub on: Color,
  pub off: Color,
}

impl PatternWidget<'_> {
  /// Terminal cells needed to draw the whole pattern.
  pub fn size(pattern: &Pattern, display_mode: DisplayMode) -> (u16, u16) {
    let n = pattern.size().min(u16::MAX as usize) as u16;
    match display_mode {
      DisplayMode::Blocks => (n, n.div_ceil(2)),
      DisplayMode::Ascii => (n.saturating_mul(2), n),
    }
  }
}

impl Widget for PatternWidget<'_> {
  fn render(self, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
      return;
    }
    match self.display_mode {
      DisplayMode::Blocks => render_blocks(&self, area, buf),
      DisplayMode::Ascii => render_ascii(&self, area, buf),
    }
  }
}

/// Centre a `w`×`h` drawing inside `area`, returning the top-left cell.
fn centred_origin(area: Rect, w: u16, h: u16) -> (u16, u16) {
  let offset_x = area.width.saturating_sub(w) / 2;
  let offset_y = area.height.saturating_sub(h) / 2;
  (area.x.saturating_add(offset_x), area.y.saturating_add(offset_y))
}

fn render_blocks(widget: &PatternWidget<'_>, area: Rect, buf: &mut Buffer) {
  let size = widget.pattern.size();
  let (w, h) = PatternWidget::size(widget.pattern, DisplayMode::Blocks);
  let (x0, y0) = centred_origin(area, w, h);
  let colour = |row: usize, col: usize| if widget.pattern.is_set(row, col) { widget.on } else { widget.off };

  for y in 0..h.min(area.height) {
    for x in 0..w.min(area.width) {
      let upper = y as usize * 2;
      let lower = upper + 1;
      let fg = colour(upper, x as usize);
      let bg = if lower < size { colour(lower, x as usize) } else { Color::Reset };
      buf.set_string(x0.saturating_add(x), y0.saturating_add(y), "▀", Style::default().fg(fg).bg(bg));
    }
  }
}

fn render_ascii(widget: &PatternWidget<'_>, area: Rect, buf: &mut Buffer) {
  let (w, h) = PatternWidget::size(widget.pattern, DisplayMode::Ascii);
  let (x0, y0) = centred_origin(area, w, h);

  for row in 0..h.min(area.height) {
    for col in 0..(w / 2).min(area.width / 2) {
      let cell = if widget.pattern.is_set(row as usize, col as usize) { "##" } else { "  " };
      buf.set_string(x0.saturating_add(col * 2), y0.saturating_add(row), cell, Style::default());
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn pattern() -> Pattern {
    Pattern::from_url("https://youtu.be/abc123", 21)
  }

  #[test]
  fn block_size_halves_rows() {
    assert_eq!(PatternWidget::size(&pattern(), DisplayMode::Blocks), (21, 11));
    assert_eq!(PatternWidget::size(&pattern(), DisplayMode::Ascii), (42, 21));
  }

  #[test]
  fn blocks_draw_top_left_eye() {
    let p = pattern();
    let area = Rect::new(0, 0, 21, 11);
    let mut buf = Buffer::empty(area);
    PatternWidget { pattern: &p, display_mode: DisplayMode::Blocks, on: Color::White, off: Color::Black }
      .render(area, &mut buf);
    let corner = &buf[(0, 0)];
    assert_eq!(corner.symbol(), "▀");
    assert_eq!(corner.fg, Color::White);
    assert_eq!(corner.bg, Color::White);
    // Row 1, col 1 is the gap inside the eye.
    assert_eq!(buf[(1, 0)].bg, Color::Black);
  }

  #[test]
  fn ascii_draws_hashes_for_set_cells() {
    let p = pattern();
    let area = Rect::new(0, 0, 42, 21);
    let mut buf = Buffer::empty(area);
    PatternWidget { pattern: &p, display_mode: DisplayMode::Ascii, on: Color::White, off: Color::Black }
      .render(area, &mut buf);
    assert_eq!(buf[(0, 0)].symbol(), "#");
    assert_eq!(buf[(2, 1)].symbol(), " ");
  }

  #[test]
  fn empty_area_is_a_no_op() {
    let p = pattern();
    let mut buf = Buffer::empty(Rect::new(0, 0, 5, 5));
    PatternWidget { pattern: &p, display_mode: DisplayMode::Blocks, on: Color::White, off: Color::Black }
      .render(Rect::new(0, 0, 0, 0), &mut buf);
    assert_eq!(buf[(0, 0)].symbol(), " ");
  }
}
