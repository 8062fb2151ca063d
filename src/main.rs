mod app;
mod clipboard;
mod commands;
mod config;
mod constants;
mod display;
mod embed;
mod filter;
mod form;
mod graphics;
mod input;
mod logging;
mod model;
mod pattern;
mod render;
mod state;
mod storage;
mod theme;
mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use app::App;
use clipboard::CopyChain;
use commands::Catalog;
use config::Config;
use constants::constants;
use display::CliDisplayMode;
use storage::{FileStore, Storage};

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Save, sort and preview video links", long_about = None)]
struct Args {
  /// Display mode for the link pattern: 'auto', 'blocks', or 'ascii' (default: auto-detect)
  #[arg(short, long, default_value = "auto")]
  display_mode: CliDisplayMode,

  /// Directory holding the catalog records (overrides prefs.toml)
  #[arg(long)]
  data_dir: Option<PathBuf>,

  /// Log filter written to <data-dir>/logs/clipvault.log, e.g. 'debug' or 'clipvault=trace'
  #[arg(long, default_value = "info")]
  log_level: String,

  /// Print a shell completion script and exit
  #[arg(long, value_name = "SHELL")]
  completions: Option<clap_complete::Shell>,
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(shell) = args.completions {
    let mut cmd = Args::command();
    clap_complete::generate(shell, &mut cmd, constants().app_name.as_str(), &mut std::io::stdout());
    return Ok(());
  }

  let config = Config::load();
  let data_dir = config
    .resolve_data_dir(args.data_dir.clone())
    .context("Could not determine a data directory; pass --data-dir")?;
  let _log_guard = logging::init(&data_dir.join("logs"), &args.log_level)?;

  let store = FileStore::new(&data_dir);
  info!(dir = %store.dir().display(), "opening catalog");
  let catalog = Catalog::open(Storage::new(store));

  let display_mode = display::resolve_display_mode(args.display_mode);
  let theme_index = theme::theme_index(config.theme_name.as_deref());
  let mut app = App::new(catalog, display_mode, theme_index, CopyChain::system());

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, &mut app);
  ratatui::restore();
  info!("exiting");
  result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
  loop {
    app.check_pending();

    terminal.draw(|frame| ui::ui(frame, app))?;

    if event::poll(Duration::from_millis(100))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(app, key);
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }
  Ok(())
}
