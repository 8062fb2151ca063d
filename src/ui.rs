use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Color, Modifier, Style, Stylize},
  text::{Line, Span},
  widgets::{BorderType, Block, Clear, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::{App, AppMode};
use crate::constants::constants;
use crate::form::{FormField, TextInput};
use crate::graphics::PatternWidget;
use crate::render::{EXTERNAL_NOTICE, Preview, SelectedVideo, ViewerView};
use crate::theme::{Theme, accent_color};

// --- Helpers ---

/// Compute the display width of the first `n` chars (accounting for double-width CJK).
pub fn display_width(s: &str, n: usize) -> usize {
  use unicode_width::UnicodeWidthChar;
  s.chars().take(n).map(|c| c.width().unwrap_or(0)).sum()
}

/// Truncate a string to `max_width` characters, appending "…" if truncated.
fn truncate_str(s: &str, max_width: usize) -> String {
  if s.chars().count() <= max_width {
    s.to_string()
  } else {
    let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    format!("{}…", truncated)
  }
}

fn rounded_block<'a>(theme: &Theme, title: impl Into<Line<'a>>, focused: bool) -> Block<'a> {
  let colour = if focused { theme.accent } else { theme.border };
  Block::bordered()
    .title(title)
    .title_style(Style::default().fg(colour).add_modifier(Modifier::BOLD))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(colour))
}

/// A `width`×`height` rect centred in `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
  let w = width.min(area.width);
  let h = height.min(area.height);
  Rect { x: area.x + (area.width - w) / 2, y: area.y + (area.height - h) / 2, width: w, height: h }
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();

  frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), frame.area());

  let [header_area, strip_area, main_area, status_area, search_area, footer_area] = Layout::vertical([
    Constraint::Length(1),
    Constraint::Length(1),
    Constraint::Min(6),
    Constraint::Length(1),
    Constraint::Length(3),
    Constraint::Length(1),
  ])
  .areas(frame.area());

  render_header(frame, theme, header_area);
  render_category_strip(frame, app, strip_area);
  render_main(frame, app, main_area);
  render_status(frame, app, status_area);
  let searching = app.mode == AppMode::Search;
  render_text_field(frame, theme, &mut app.search, search_area, "Search clips", searching);
  render_footer(frame, app, footer_area);

  match app.mode {
    AppMode::Form => render_form(frame, app),
    AppMode::Prompt => render_prompt(frame, app),
    AppMode::Alert => render_alert(frame, app),
    AppMode::Browse | AppMode::Search => {}
  }
}

fn render_header(frame: &mut Frame, theme: &Theme, area: Rect) {
  let title_style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
  let left = Line::from(Span::styled(" ▶ clipvault ", title_style));
  frame.render_widget(left, area);

  let version = format!("v{} ", env!("CARGO_PKG_VERSION"));
  let right = Line::from(Span::styled(&version, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(version.len() as u16), width: version.len() as u16, ..area };
  frame.render_widget(right, right_area);
}

fn render_category_strip(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let mut spans = vec![Span::raw(" ")];
  for pill in &app.view.categories.pills {
    let dot = Style::default().fg(accent_color(&pill.color, theme));
    let (label, count) = if pill.active {
      (
        Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD),
        Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg),
      )
    } else {
      (Style::default().fg(theme.fg), Style::default().fg(theme.muted))
    };
    spans.push(Span::styled("●", dot));
    spans.push(Span::styled(format!(" {} ", pill.label), label));
    spans.push(Span::styled(format!("{} ", pill.count), count));
    spans.push(Span::raw("  "));
  }
  frame.render_widget(Line::from(spans), area);
}

fn render_main(frame: &mut Frame, app: &mut App, area: Rect) {
  if area.width < constants().narrow_width {
    if app.viewer_in_view {
      render_viewer(frame, app, area);
    } else {
      render_video_list(frame, app, area);
    }
    return;
  }

  let [list_area, viewer_area] =
    Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);
  render_video_list(frame, app, list_area);
  render_viewer(frame, app, viewer_area);
}

fn render_video_list(frame: &mut Frame, app: &mut App, area: Rect) {
  let theme = app.theme();
  let focused = matches!(app.mode, AppMode::Browse | AppMode::Search);
  let block = rounded_block(theme, format!(" {} ", app.view.videos.heading), focused);

  if app.view.videos.empty {
    let text = vec![
      Line::from(""),
      Line::from(Span::styled("No clips here yet.", Style::default().fg(theme.fg))),
      Line::from(""),
      Line::from(Span::styled("Press a to save a link, or change the filter.", Style::default().fg(theme.muted))),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center).block(block), area);
    return;
  }

  // Inner width: area minus 2 borders minus 2 chars for highlight symbol ("▶ ")
  let inner_w = area.width.saturating_sub(4) as usize;

  let items: Vec<ListItem> = app
    .view
    .videos
    .rows
    .iter()
    .enumerate()
    .map(|(i, row)| {
      let bg = if i % 2 == 1 { theme.stripe_bg } else { theme.bg };
      let marker = if row.active { "● " } else { "" };

      let right_w = row.tag.chars().count() + 2 + row.date.chars().count();
      let title_max = inner_w.saturating_sub(right_w + 2 + marker.chars().count());
      let title = truncate_str(&row.title, title_max);
      let gap = inner_w.saturating_sub(marker.chars().count() + title.chars().count() + right_w);

      let title_style = if row.active {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(theme.fg)
      };
      let mut lines = vec![Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(title, title_style),
        Span::raw(" ".repeat(gap)),
        Span::styled(row.tag.clone(), Style::default().fg(accent_color(&row.accent, theme))),
        Span::raw("  "),
        Span::styled(row.date.clone(), Style::default().fg(theme.muted)),
      ])];
      if !row.notes.is_empty() {
        lines.push(Line::from(Span::styled(truncate_str(&row.notes, inner_w), Style::default().fg(theme.muted))));
      }
      ListItem::new(lines).bg(bg)
    })
    .collect();

  let list = List::new(items)
    .block(block)
    .highlight_symbol("▶ ")
    .highlight_style(Style::default().fg(theme.highlight_fg).bg(theme.highlight_bg).add_modifier(Modifier::BOLD));

  frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_viewer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();

  match &app.view.viewer {
    ViewerView::Placeholder { now_playing, message, pattern_message } => {
      let block = rounded_block(theme, " Preview ", false).padding(Padding::horizontal(1));
      let text = vec![
        Line::from(""),
        Line::from(Span::styled(now_playing.as_str(), Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(message.as_str(), Style::default().fg(theme.muted))),
        Line::from(""),
        Line::from(Span::styled("· · · · · · ·", Style::default().fg(theme.border))),
        Line::from(Span::styled(pattern_message.as_str(), Style::default().fg(theme.muted))),
        Line::from(""),
        Line::from(Span::styled("[y] Copy link", Style::default().fg(theme.border))),
      ];
      frame.render_widget(Paragraph::new(text).alignment(Alignment::Center).block(block), area);
    }
    ViewerView::Selected(selected) => render_selected(frame, app, selected, area),
  }
}

fn render_selected(frame: &mut Frame, app: &App, selected: &SelectedVideo, area: Rect) {
  let theme = app.theme();
  let title = Line::from(vec![
    Span::styled(" Now Playing ", Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)),
    Span::styled(format!("[{}] ", app.display_mode.label()), Style::default().fg(theme.muted)),
  ]);
  let block = rounded_block(theme, title, false).padding(Padding::horizontal(1));
  let inner = block.inner(area);
  frame.render_widget(block, area);

  let (_, pattern_h) = PatternWidget::size(&selected.pattern, app.display_mode);
  let [info_area, pattern_area] =
    Layout::vertical([Constraint::Min(6), Constraint::Length(pattern_h.saturating_add(1))]).areas(inner);

  let inner_w = info_area.width as usize;
  let mut lines = Vec::new();
  match &selected.preview {
    Preview::Embedded(embed) => {
      let badge = format!(" {} player ", embed.provider.label());
      let badge_w = badge.chars().count() + 1;
      lines.push(Line::from(vec![
        Span::styled(badge, Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::raw(" "),
        Span::styled(
          truncate_str(&embed.embed_url, inner_w.saturating_sub(badge_w)),
          Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED),
        ),
      ]));
      let embed_code = truncate_str(&embed.markup(), inner_w);
      lines.push(Line::from(Span::styled(embed_code, Style::default().fg(theme.muted))));
    }
    Preview::External => {
      lines.push(Line::from(Span::styled(" External link ", Style::default().fg(theme.key_fg).bg(theme.key_bg))));
      lines.push(Line::from(Span::styled(EXTERNAL_NOTICE, Style::default().fg(theme.muted))));
    }
  }
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    selected.title.as_str(),
    Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
  )));
  if let Some(notes) = &selected.notes {
    lines.push(Line::from(Span::styled(notes.as_str(), Style::default().fg(theme.fg))));
  }
  lines.push(Line::from(vec![
    Span::styled(selected.category.as_str(), Style::default().fg(theme.accent)),
    Span::raw("  "),
    Span::styled(selected.saved_at.as_str(), Style::default().fg(theme.muted)),
  ]));
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    truncate_str(&selected.url, inner_w),
    Style::default().fg(theme.accent).add_modifier(Modifier::UNDERLINED),
  )));
  lines.push(Line::from(vec![
    Span::styled(" y ", Style::default().fg(theme.key_fg).bg(theme.key_bg)),
    Span::styled(" Copy link ", Style::default().fg(theme.fg)),
    Span::styled(" o ", Style::default().fg(theme.key_fg).bg(theme.key_bg)),
    Span::styled(" Open ", Style::default().fg(theme.fg)),
  ]));
  frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), info_area);

  let widget = PatternWidget {
    pattern: &selected.pattern,
    display_mode: app.display_mode,
    on: theme.pattern_on,
    off: theme.pattern_off,
  };
  frame.render_widget(widget, pattern_area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let (text, style) = if let Some(msg) = app.feedback_message() {
    (format!(" ✓ {}", msg), Style::default().fg(theme.status))
  } else if let Some(err) = &app.last_error {
    (format!(" ⚠  {}", err), Style::default().fg(theme.error))
  } else {
    let total = app.catalog.state.videos.len();
    (format!(" {} clip{} saved", total, if total == 1 { "" } else { "s" }), Style::default().fg(theme.muted))
  };
  frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Draw a bordered single-line input, scrolling horizontally to keep the cursor visible.
fn render_text_field(frame: &mut Frame, theme: &Theme, input: &mut TextInput, area: Rect, title: &str, focused: bool) {
  let block = rounded_block(theme, format!(" {} ", title), focused).padding(Padding::horizontal(1));

  let inner_w = area.width.saturating_sub(4) as usize;
  let cursor_col = display_width(&input.value, input.cursor);

  if cursor_col < input.scroll {
    input.scroll = cursor_col;
  } else if inner_w > 0 && cursor_col >= input.scroll + inner_w {
    input.scroll = cursor_col.saturating_sub(inner_w) + 1;
  }

  let scroll = input.scroll;
  let visible: String = input
    .value
    .chars()
    .scan(0usize, |col, c| {
      let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
      let start = *col;
      *col += w;
      Some((start, *col, c))
    })
    .skip_while(|(_, end, _)| *end <= scroll)
    .take_while(|(start, _, _)| *start < scroll + inner_w)
    .map(|(_, _, c)| c)
    .collect();

  frame.render_widget(Paragraph::new(visible).style(Style::default().fg(theme.fg)).block(block), area);

  if focused {
    let cursor_x = area.x + 2 + cursor_col.saturating_sub(scroll) as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
  }
}

fn render_selector(theme: &Theme, field: FormField, value: &str, colour: Color, focused: bool) -> Line<'static> {
  let label_style = if focused {
    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(theme.muted)
  };
  Line::from(vec![
    Span::styled(format!(" {:<11}", field.label()), label_style),
    Span::styled("◀ ", Style::default().fg(theme.muted)),
    Span::styled(value.to_string(), Style::default().fg(colour).add_modifier(Modifier::BOLD)),
    Span::styled(" ▶", Style::default().fg(theme.muted)),
  ])
}

fn render_form(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();
  let area = centered_rect(frame.area(), 72, 16);
  frame.render_widget(Clear, area);
  let block = rounded_block(theme, " Save a clip ", true).style(Style::default().bg(theme.bg));
  let inner = block.inner(area);
  frame.render_widget(block, area);

  let [title_area, url_area, notes_area, category_area, accent_area, _, hint_area] = Layout::vertical([
    Constraint::Length(3),
    Constraint::Length(3),
    Constraint::Length(3),
    Constraint::Length(1),
    Constraint::Length(1),
    Constraint::Length(1),
    Constraint::Length(1),
  ])
  .areas(inner);

  let focus = app.form.focus();
  render_text_field(frame, theme, &mut app.form.title, title_area, FormField::Title.label(), focus == FormField::Title);
  render_text_field(frame, theme, &mut app.form.url, url_area, FormField::Url.label(), focus == FormField::Url);
  render_text_field(frame, theme, &mut app.form.notes, notes_area, FormField::Notes.label(), focus == FormField::Notes);

  let options = &app.view.categories.options;
  let (category_name, category_colour) = match options.get(app.form.category_index) {
    Some(option) => {
      let colour = app.catalog.state.category(&option.id).map_or(theme.accent, |c| accent_color(&c.color, theme));
      (option.name.as_str(), colour)
    }
    None => ("(no collections)", theme.muted),
  };
  frame.render_widget(
    render_selector(theme, FormField::Category, category_name, category_colour, focus == FormField::Category),
    category_area,
  );
  let accent = app.form.accent();
  frame.render_widget(
    render_selector(theme, FormField::Accent, accent, accent_color(accent, theme), focus == FormField::Accent),
    accent_area,
  );

  let hint = Line::from(Span::styled(
    " Tab next field · ←/→ choose · ^n new collection · Enter save · Esc close",
    Style::default().fg(theme.muted),
  ));
  frame.render_widget(hint, hint_area);
}

fn render_prompt(frame: &mut Frame, app: &mut App) {
  let theme = app.theme();
  let area = centered_rect(frame.area(), 56, 5);
  frame.render_widget(Clear, area);
  let block = rounded_block(theme, " New collection ", true).style(Style::default().bg(theme.bg));
  let inner = block.inner(area);
  frame.render_widget(block, area);

  let [field_area, hint_area] = Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(inner);
  render_text_field(frame, theme, &mut app.prompt, field_area, "Name your new collection", true);
  frame.render_widget(
    Line::from(Span::styled(" Enter create · Esc cancel", Style::default().fg(theme.muted))),
    hint_area,
  );
}

fn render_alert(frame: &mut Frame, app: &App) {
  let theme = app.theme();
  let area = centered_rect(frame.area(), 56, 6);
  frame.render_widget(Clear, area);
  let block = Block::bordered()
    .title(" Notice ")
    .title_style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
    .border_type(BorderType::Rounded)
    .border_style(Style::default().fg(theme.error))
    .padding(Padding::horizontal(1))
    .style(Style::default().bg(theme.bg));
  let text = vec![
    Line::from(Span::styled(app.alert.as_deref().unwrap_or_default(), Style::default().fg(theme.fg))),
    Line::from(""),
    Line::from(Span::styled("Press Enter to continue.", Style::default().fg(theme.muted))),
  ];
  frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }).block(block), area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
  let theme = app.theme();
  let has_selection = app.view.viewer.copy_enabled();
  let keys: Vec<(&str, &str)> = match app.mode {
    AppMode::Browse => {
      let mut k = vec![
        ("←/→", "Collection"),
        ("j/k", "Navigate"),
        ("Enter", "View"),
        ("/", "Search"),
        ("a", "Add"),
        ("c", "New collection"),
      ];
      if has_selection {
        k.push(("y", "Copy"));
        k.push(("o", "Open"));
      }
      k.push(("^t", "Theme"));
      k.push(("q", "Quit"));
      k
    }
    AppMode::Search => vec![("Enter", "Done"), ("↑/↓", "Navigate"), ("Esc", "Clear")],
    AppMode::Form => vec![("Tab", "Next"), ("Enter", "Save"), ("^n", "New collection"), ("Esc", "Close")],
    AppMode::Prompt => vec![("Enter", "Create"), ("Esc", "Cancel")],
    AppMode::Alert => vec![("Enter", "Dismiss")],
  };

  let spans: Vec<Span> = keys
    .iter()
    .enumerate()
    .flat_map(|(i, (key, action))| {
      let mut s = vec![
        Span::styled(format!(" {} ", key), Style::default().fg(theme.key_fg).bg(theme.key_bg)),
        Span::styled(format!(" {} ", action), Style::default().fg(theme.muted)),
      ];
      if i < keys.len() - 1 {
        s.push(Span::raw("  "));
      }
      s
    })
    .collect();

  frame.render_widget(Line::from(spans), area);

  let theme_label = format!("{} ", theme.name);
  let right = Line::from(Span::styled(&theme_label, Style::default().fg(theme.muted)));
  let right_area =
    Rect { x: area.x + area.width.saturating_sub(theme_label.len() as u16), width: theme_label.len() as u16, ..area };
  frame.render_widget(right, right_area);
}
