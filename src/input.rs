use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppMode};
use crate::form::TextInput;

// --- Helpers ---

/// Apply an editing key to a text field. Returns true when the value changed.
fn edit_text(input: &mut TextInput, key: &KeyEvent) -> bool {
  match key.code {
    KeyCode::Char(c) => {
      input.insert(c);
      true
    }
    KeyCode::Backspace => input.backspace(),
    KeyCode::Delete => input.delete(),
    KeyCode::Left => {
      input.left();
      false
    }
    KeyCode::Right => {
      input.right();
      false
    }
    KeyCode::Home => {
      input.home();
      false
    }
    KeyCode::End => {
      input.end();
      false
    }
    _ => false,
  }
}

// --- Event Handling ---

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
    app.should_quit = true;
    return;
  }

  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
    app.next_theme();
    return;
  }

  match app.mode {
    AppMode::Browse => handle_browse_key(app, key),
    AppMode::Search => handle_search_key(app, key),
    AppMode::Form => handle_form_key(app, key),
    AppMode::Prompt => handle_prompt_key(app, key),
    AppMode::Alert => handle_alert_key(app, key),
  }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
  app.clear_error();
  match key.code {
    KeyCode::Char('q') => {
      app.should_quit = true;
    }
    KeyCode::Esc => {
      if app.viewer_in_view {
        app.viewer_in_view = false;
      } else if !app.search.is_empty() {
        app.clear_search();
      } else {
        app.should_quit = true;
      }
    }
    KeyCode::Left | KeyCode::Char('h') => app.step_category(-1),
    KeyCode::Right | KeyCode::Char('l') => app.step_category(1),
    KeyCode::Down | KeyCode::Char('j') => app.move_highlight(1),
    KeyCode::Up | KeyCode::Char('k') => app.move_highlight(-1),
    KeyCode::Enter => app.select_highlighted(),
    KeyCode::Char('/') => app.begin_search(),
    KeyCode::Char('a') => app.open_form(),
    KeyCode::Char('c') => app.open_category_prompt(),
    KeyCode::Char('y') => app.copy_link(),
    KeyCode::Char('o') => app.open_link(),
    KeyCode::Char('v') => app.toggle_viewer(),
    _ => {}
  }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
  match key.code {
    KeyCode::Enter => {
      app.mode = AppMode::Browse;
    }
    KeyCode::Esc => {
      app.clear_search();
      app.mode = AppMode::Browse;
    }
    KeyCode::Down => app.move_highlight(1),
    KeyCode::Up => app.move_highlight(-1),
    _ => {
      if edit_text(&mut app.search, &key) {
        app.search_changed();
      }
    }
  }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
  if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('n') {
    app.open_category_prompt();
    return;
  }

  match key.code {
    KeyCode::Esc => app.close_form(),
    KeyCode::Enter => app.submit_form(),
    KeyCode::Tab | KeyCode::Down => app.form.next_field(),
    KeyCode::BackTab | KeyCode::Up => app.form.prev_field(),
    KeyCode::Left if app.form.focus().is_selector() => {
      app.form.cycle(-1, app.view.categories.options.len());
    }
    KeyCode::Right | KeyCode::Char(' ') if app.form.focus().is_selector() => {
      app.form.cycle(1, app.view.categories.options.len());
    }
    _ => {
      if let Some(input) = app.form.focused_input() {
        edit_text(input, &key);
      }
    }
  }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) {
  match key.code {
    KeyCode::Enter => app.submit_prompt(),
    KeyCode::Esc => app.cancel_prompt(),
    _ => {
      edit_text(&mut app.prompt, &key);
    }
  }
}

fn handle_alert_key(app: &mut App, key: KeyEvent) {
  if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
    app.dismiss_alert();
  }
}
