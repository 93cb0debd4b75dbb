mod app;
mod catalog;
mod filter;
mod frame;
mod ui;

use app::{App, InputMode, PlayerState};
use catalog::Catalog;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use frame::{EmbeddedFrame, ViewerFrame};
use std::path::{Path, PathBuf};

/// TUI catalog browser for web games played through an external viewer
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the catalog JSON file (defaults to the per-user file, then the bundled list)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Viewer command games are mounted into; the game URL is appended
    #[arg(short, long)]
    player: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (catalog, notice) = load_catalog(cli.catalog.as_deref());
    if let Some(ref notice) = notice {
        eprintln!("Warning: {notice} (starting with an empty catalog)");
    }

    let viewer: Box<dyn EmbeddedFrame> = match cli.player {
        Some(cmd) => {
            let parts: Vec<String> = cmd.split_whitespace().map(str::to_string).collect();
            Box::new(ViewerFrame::new(parts))
        }
        None => Box::new(ViewerFrame::platform_default()),
    };

    let mut app = App::new(catalog, viewer);
    if let Some(notice) = notice {
        app.status_msg = notice;
    }

    // Init terminal
    let mut terminal = ratatui::init();

    // Initial grid geometry
    let size = terminal.size()?;
    app.update_grid_size(size.width, size.height);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal, releasing the player first
    app.close_player();
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Resolve and load the catalog source: an explicit `--catalog` path wins,
/// then the per-user data file, then the list bundled into the binary.
///
/// A missing or malformed source degrades to an empty catalog with a notice,
/// never an exit.
fn load_catalog(explicit: Option<&Path>) -> (Catalog, Option<String>) {
    if let Some(path) = explicit {
        return match Catalog::load(path) {
            Ok(catalog) => (catalog, None),
            Err(e) => (Catalog::empty(), Some(e.user_message())),
        };
    }

    if let Some(dirs) = directories::ProjectDirs::from("io", "arcade", "arcade-explorer") {
        let path = dirs.data_dir().join("games.json");
        if path.exists() {
            return match Catalog::load(&path) {
                Ok(catalog) => (catalog, None),
                Err(e) => (Catalog::empty(), Some(e.user_message())),
            };
        }
    }

    (Catalog::bundled(), None)
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(width, height) => {
                    app.update_grid_size(width, height);
                }
                _ => {}
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Help toggle (global)
    if key.code == KeyCode::Char('?') && app.input_mode == InputMode::Normal {
        app.show_help = !app.show_help;
        return;
    }

    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // Handle based on input mode and player state
    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
    } else if matches!(app.player, PlayerState::Open { .. }) {
        handle_player_key(app, key);
    } else {
        handle_grid_key(app, key);
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    let mut changed = false;
    match key.code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search.pop();
            changed = true;
        }
        KeyCode::Char(c) => {
            app.search.push(c);
            changed = true;
        }
        _ => {}
    }

    if changed {
        app.apply_search();
    }
}

fn handle_grid_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.quit();
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor_up();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.cursor_right();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.cursor_left();
        }
        KeyCode::PageDown => {
            app.cursor_page_down();
        }
        KeyCode::PageUp => {
            app.cursor_page_up();
        }
        KeyCode::Char('g') => {
            app.cursor_first();
        }
        KeyCode::Char('G') => {
            app.cursor_last();
        }
        KeyCode::Enter => {
            app.open_selected();
        }
        KeyCode::Char('o') => {
            if let Some(game) = app.selected_game() {
                let url = game.url.clone();
                app.status_msg = open_in_browser(&url);
            }
        }
        KeyCode::Char('y') => {
            if let Some(game) = app.selected_game() {
                let url = game.url.clone();
                app.status_msg = yank_to_clipboard(&url);
            }
        }
        KeyCode::Esc => {
            // Clear search
            if !app.search.is_empty() {
                app.search.clear();
                app.apply_search();
            }
        }
        _ => {}
    }
}

fn handle_player_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.close_player();
        }
        KeyCode::Char('f') => {
            app.toggle_expanded();
        }
        KeyCode::Char('n') => {
            app.open_next();
        }
        KeyCode::Char('p') => {
            app.open_prev();
        }
        KeyCode::Char('o') => {
            if let PlayerState::Open { game, .. } = &app.player {
                let url = game.url.clone();
                app.status_msg = open_in_browser(&url);
            }
        }
        KeyCode::Char('y') => {
            if let PlayerState::Open { game, .. } = &app.player {
                let url = game.url.clone();
                app.status_msg = yank_to_clipboard(&url);
            }
        }
        _ => {}
    }
}

/// Hand a URL to the platform's default browser, fire-and-forget.
fn open_in_browser(url: &str) -> String {
    let result = if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        std::process::Command::new("cmd")
            .args(["/c", "start", ""])
            .arg(url)
            .spawn()
    } else {
        std::process::Command::new("xdg-open").arg(url).spawn()
    };

    match result {
        Ok(_) => format!("Opening: {url}"),
        Err(e) => format!("Could not open browser: {e}"),
    }
}

/// Copy a URL to the clipboard using xclip/wl-copy, returning a status note.
fn yank_to_clipboard(link: &str) -> String {
    if let Ok(mut child) = std::process::Command::new("xclip")
        .args(["-selection", "clipboard"])
        .stdin(std::process::Stdio::piped())
        .spawn()
    {
        use std::io::Write;
        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(link.as_bytes());
        }
        let _ = child.wait();
        format!("Copied: {link}")
    } else if let Ok(mut child) = std::process::Command::new("wl-copy")
        .stdin(std::process::Stdio::piped())
        .spawn()
    {
        use std::io::Write;
        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(link.as_bytes());
        }
        let _ = child.wait();
        format!("Copied: {link}")
    } else {
        format!("Link: {link} (clipboard not available)")
    }
}
