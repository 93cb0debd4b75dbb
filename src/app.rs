use crate::catalog::{Catalog, GameEntry};
use crate::filter::matching_indices;
use crate::frame::EmbeddedFrame;

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Player overlay state. `expanded` only exists while a game is open, so
/// closing the overlay can never leave a stale fullscreen flag behind.
pub enum PlayerState {
    Closed,
    Open { game: GameEntry, expanded: bool },
}

/// Width of one card in the grid, borders included.
pub const CARD_WIDTH: u16 = 26;
/// Height of one card in the grid, borders included.
pub const CARD_HEIGHT: u16 = 4;
/// Rows of chrome around the grid: header(3) + search(3) + grid border(2) + status(1).
pub const GRID_OVERHEAD: u16 = 9;

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub frame: Box<dyn EmbeddedFrame>,
    pub should_quit: bool,
    pub show_help: bool,

    // Visible subset, as indices into the catalog
    pub filtered: Vec<usize>,

    // Grid cursor state
    pub selected: usize, // Index within filtered
    pub row_offset: usize,
    pub columns: usize,
    pub visible_rows: usize,

    pub search: String,
    pub input_mode: InputMode,

    pub player: PlayerState,
    pub frame_error: Option<String>,

    // Status message
    pub status_msg: String,
}

impl App {
    pub fn new(catalog: Catalog, frame: Box<dyn EmbeddedFrame>) -> Self {
        let filtered: Vec<usize> = (0..catalog.len()).collect();
        let status_msg = format!("{} games loaded", catalog.len());
        Self {
            catalog,
            frame,
            should_quit: false,
            show_help: false,

            filtered,

            selected: 0,
            row_offset: 0,
            columns: 1,
            visible_rows: 1, // Updated on first render/resize

            search: String::new(),
            input_mode: InputMode::Normal,

            player: PlayerState::Closed,
            frame_error: None,

            status_msg,
        }
    }

    /// Recompute the visible subset from the current search text and reset
    /// the cursor to the first entry.
    pub fn apply_search(&mut self) {
        self.filtered = matching_indices(self.catalog.entries(), &self.search);
        self.selected = 0;
        self.row_offset = 0;

        self.status_msg = format!(
            "{} games found for \"{}\"",
            self.filtered.len(),
            if self.search.is_empty() { "all" } else { &self.search }
        );
    }

    /// Update grid geometry from the terminal size.
    pub fn update_grid_size(&mut self, width: u16, height: u16) {
        self.columns = (width / CARD_WIDTH).max(1) as usize;
        self.visible_rows = (height.saturating_sub(GRID_OVERHEAD) / CARD_HEIGHT).max(1) as usize;
        self.ensure_cursor_visible();
    }

    /// Scroll the grid so the row under the cursor stays on screen.
    fn ensure_cursor_visible(&mut self) {
        let cursor_row = self.selected / self.columns;
        if cursor_row < self.row_offset {
            self.row_offset = cursor_row;
        } else if cursor_row >= self.row_offset + self.visible_rows {
            self.row_offset = cursor_row + 1 - self.visible_rows;
        }
    }

    /// The catalog entry under the grid cursor.
    pub fn selected_game(&self) -> Option<&GameEntry> {
        self.filtered
            .get(self.selected)
            .map(|&idx| &self.catalog.entries()[idx])
    }

    pub fn cursor_right(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
            self.ensure_cursor_visible();
        }
    }

    pub fn cursor_left(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_cursor_visible();
        }
    }

    pub fn cursor_down(&mut self) {
        if self.selected + self.columns < self.filtered.len() {
            self.selected += self.columns;
        } else if !self.filtered.is_empty() {
            self.selected = self.filtered.len() - 1;
        }
        self.ensure_cursor_visible();
    }

    pub fn cursor_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.columns);
        self.ensure_cursor_visible();
    }

    pub fn cursor_page_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let jump = self.columns * self.visible_rows;
        self.selected = (self.selected + jump).min(self.filtered.len() - 1);
        self.ensure_cursor_visible();
    }

    pub fn cursor_page_up(&mut self) {
        let jump = self.columns * self.visible_rows;
        self.selected = self.selected.saturating_sub(jump);
        self.ensure_cursor_visible();
    }

    pub fn cursor_first(&mut self) {
        self.selected = 0;
        self.row_offset = 0;
    }

    pub fn cursor_last(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = self.filtered.len() - 1;
            self.ensure_cursor_visible();
        }
    }

    /// Open the game under the cursor in the player overlay.
    ///
    /// While a game is already open this replaces it, unmounting the old
    /// content first; the replacement always starts in the normal display
    /// mode, never inheriting the previous game's fullscreen state.
    pub fn open_selected(&mut self) {
        let Some(game) = self.selected_game().cloned() else {
            return;
        };

        if matches!(self.player, PlayerState::Open { .. }) {
            self.frame.unmount();
        }

        self.frame_error = None;
        match self.frame.mount(&game.url, &game.title) {
            Ok(()) => {
                self.status_msg = format!("Playing {} via {}", game.title, self.frame.label());
            }
            Err(e) => {
                // The overlay stays open so the user can read the note and
                // close it themselves; no retry.
                self.status_msg = format!("Viewer failed to start: {e}");
                self.frame_error = Some(e.to_string());
            }
        }
        self.player = PlayerState::Open {
            game,
            expanded: false,
        };
    }

    /// Move the cursor to the next filtered game and play it (overlay `n`).
    pub fn open_next(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
            self.ensure_cursor_visible();
            self.open_selected();
        }
    }

    /// Move the cursor to the previous filtered game and play it (overlay `p`).
    pub fn open_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_cursor_visible();
            self.open_selected();
        }
    }

    /// Toggle the overlay between the centered panel and the full viewport.
    pub fn toggle_expanded(&mut self) {
        if let PlayerState::Open { expanded, .. } = &mut self.player {
            *expanded = !*expanded;
        }
    }

    /// Close the player overlay and release the embedded content.
    pub fn close_player(&mut self) {
        if matches!(self.player, PlayerState::Open { .. }) {
            self.frame.unmount();
            self.player = PlayerState::Closed;
            self.frame_error = None;
            self.status_msg.clear();
        }
    }

    /// Quit the application, releasing the player first so no game keeps
    /// playing audio after the terminal is restored.
    pub fn quit(&mut self) {
        self.close_player();
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum FrameEvent {
        Mount(String),
        Unmount,
    }

    /// Test frame that records mount/unmount calls.
    struct RecordingFrame {
        log: Rc<RefCell<Vec<FrameEvent>>>,
        fail: bool,
    }

    impl EmbeddedFrame for RecordingFrame {
        fn mount(&mut self, url: &str, _title: &str) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::NotFound, "viewer missing"));
            }
            self.log.borrow_mut().push(FrameEvent::Mount(url.to_string()));
            Ok(())
        }

        fn unmount(&mut self) {
            self.log.borrow_mut().push(FrameEvent::Unmount);
        }

        fn label(&self) -> &str {
            "recorder"
        }
    }

    fn test_catalog() -> Catalog {
        let entries = ["Chess Arena", "Speed Run", "2048", "Hextris", "Astray", "Underrun"]
            .iter()
            .enumerate()
            .map(|(i, title)| GameEntry {
                id: i as i64 + 1,
                title: title.to_string(),
                thumbnail: format!("https://games.example/{}.png", i + 1),
                url: format!("https://games.example/{}", i + 1),
            })
            .collect();
        Catalog::from_entries(entries)
    }

    fn test_app() -> (App, Rc<RefCell<Vec<FrameEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let frame = RecordingFrame {
            log: Rc::clone(&log),
            fail: false,
        };
        let mut app = App::new(test_catalog(), Box::new(frame));
        // 3 columns, 5 visible rows
        app.update_grid_size(80, 29);
        (app, log)
    }

    fn open_title(app: &App) -> Option<&str> {
        match &app.player {
            PlayerState::Open { game, .. } => Some(game.title.as_str()),
            PlayerState::Closed => None,
        }
    }

    #[test]
    fn test_open_selected_mounts_the_game_url() {
        let (mut app, log) = test_app();
        app.cursor_right();
        app.open_selected();

        assert_eq!(open_title(&app), Some("Speed Run"));
        assert_eq!(
            *log.borrow(),
            vec![FrameEvent::Mount("https://games.example/2".to_string())]
        );
    }

    #[test]
    fn test_selection_is_exclusive() {
        let (mut app, log) = test_app();
        app.open_selected();
        app.cursor_right();
        app.open_selected();

        // Exactly the replacement is held, and the old content was released
        // before the new one was mounted.
        assert_eq!(open_title(&app), Some("Speed Run"));
        assert_eq!(
            *log.borrow(),
            vec![
                FrameEvent::Mount("https://games.example/1".to_string()),
                FrameEvent::Unmount,
                FrameEvent::Mount("https://games.example/2".to_string()),
            ]
        );
    }

    #[test]
    fn test_close_unmounts_and_resets_expansion() {
        let (mut app, log) = test_app();
        app.open_selected();
        app.toggle_expanded();
        assert!(matches!(app.player, PlayerState::Open { expanded: true, .. }));

        app.close_player();
        assert!(matches!(app.player, PlayerState::Closed));
        assert_eq!(log.borrow().last(), Some(&FrameEvent::Unmount));

        // Reopening after an expanded close starts in the normal display.
        app.open_selected();
        assert!(matches!(app.player, PlayerState::Open { expanded: false, .. }));
    }

    #[test]
    fn test_reselect_resets_expansion() {
        let (mut app, _log) = test_app();
        app.open_selected();
        app.toggle_expanded();

        app.open_next();
        assert_eq!(open_title(&app), Some("Speed Run"));
        assert!(matches!(app.player, PlayerState::Open { expanded: false, .. }));
    }

    #[test]
    fn test_toggle_expanded_is_a_noop_while_closed() {
        let (mut app, _log) = test_app();
        app.toggle_expanded();
        assert!(matches!(app.player, PlayerState::Closed));
    }

    #[test]
    fn test_mount_failure_keeps_the_overlay_open() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let frame = RecordingFrame {
            log: Rc::clone(&log),
            fail: true,
        };
        let mut app = App::new(test_catalog(), Box::new(frame));
        app.update_grid_size(80, 29);

        app.open_selected();
        assert_eq!(open_title(&app), Some("Chess Arena"));
        assert!(app.frame_error.is_some());
        assert!(app.status_msg.contains("Viewer failed"));

        app.close_player();
        assert!(app.frame_error.is_none());
    }

    #[test]
    fn test_quit_releases_an_open_player() {
        let (mut app, log) = test_app();
        app.open_selected();
        app.quit();

        assert!(app.should_quit);
        assert_eq!(log.borrow().last(), Some(&FrameEvent::Unmount));
    }

    #[test]
    fn test_search_scenario_from_the_catalog() {
        let (mut app, _log) = test_app();
        app.search = "run".to_string();
        app.apply_search();
        let titles: Vec<&str> = app
            .filtered
            .iter()
            .map(|&i| app.catalog.entries()[i].title.as_str())
            .collect();
        assert_eq!(titles, vec!["Speed Run", "Underrun"]);

        app.search = "z".to_string();
        app.apply_search();
        assert!(app.filtered.is_empty());
        assert!(app.selected_game().is_none());
    }

    #[test]
    fn test_apply_search_resets_the_cursor() {
        let (mut app, _log) = test_app();
        app.cursor_last();
        assert_eq!(app.selected, 5);

        app.search = "e".to_string();
        app.apply_search();
        assert_eq!(app.selected, 0);
        assert_eq!(app.row_offset, 0);
    }

    #[test]
    fn test_open_selected_with_empty_subset_stays_closed() {
        let (mut app, log) = test_app();
        app.search = "zzz".to_string();
        app.apply_search();
        app.open_selected();

        assert!(matches!(app.player, PlayerState::Closed));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_cursor_moves_by_grid_geometry() {
        let (mut app, _log) = test_app();
        // 6 entries in 3 columns: rows [0 1 2] [3 4 5]
        app.cursor_down();
        assert_eq!(app.selected, 3);
        app.cursor_right();
        assert_eq!(app.selected, 4);
        app.cursor_up();
        assert_eq!(app.selected, 1);
        app.cursor_left();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_cursor_down_clamps_to_the_last_entry() {
        let (mut app, _log) = test_app();
        app.selected = 4;
        app.cursor_down();
        assert_eq!(app.selected, 5);
        app.cursor_down();
        assert_eq!(app.selected, 5);
    }

    #[test]
    fn test_scrolling_keeps_the_cursor_row_visible() {
        let (mut app, _log) = test_app();
        // 1 column, 2 visible rows
        app.update_grid_size(26, 17);
        assert_eq!(app.columns, 1);
        assert_eq!(app.visible_rows, 2);

        app.cursor_last();
        assert_eq!(app.selected, 5);
        assert_eq!(app.row_offset, 4);

        app.cursor_first();
        assert_eq!(app.row_offset, 0);

        app.cursor_page_down();
        assert_eq!(app.selected, 2);
        assert_eq!(app.row_offset, 1);
    }
}
