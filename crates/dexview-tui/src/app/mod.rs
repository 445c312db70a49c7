//! Main application state and logic.

mod constants;
mod loading;
mod navigation;
mod render;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use dexview_core::{CatalogueConfig, Direction, FilterState, ItemDetail, ItemId, Session};
use dexview_fetch::{BatchFetcher, FetchProgress, ItemSource, LoadOutcome, PaginationController};

use crate::event::KeyAction;
use crate::search::SearchInput;
use crate::theme::Theme;
use crate::ui::grid_columns;

use self::constants::{SEARCH_DISPLAY_LIMIT, SPINNER_FRAMES, TICK_INTERVAL_MS};
use self::navigation::{GridNav, ListNavigator};
use self::render::{render_app, RenderContext};

pub use self::state::{AppMode, DetailTab, LoadResult, StatusLevel, UserSettings};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
pub struct App<S: ItemSource + 'static> {
    /// Current mode.
    mode: AppMode,
    /// Color theme.
    theme: Theme,
    /// Catalogue, filter and focus.
    session: Session,
    /// Page bookkeeping.
    pager: PaginationController,
    /// Fetches pages from the item source.
    fetcher: BatchFetcher<S>,
    /// Card selection.
    grid: GridNav,
    /// Tab shown in the detail overlay.
    detail_tab: DetailTab,
    /// Search bar contents.
    search: SearchInput,
    /// Channel for receiving page load results.
    load_rx: Option<mpsc::Receiver<LoadResult>>,
    /// Progress of the page being loaded.
    load_progress: Option<FetchProgress>,
    /// Last status message.
    status: Option<(StatusLevel, String)>,
    /// Spinner frame counter.
    tick: usize,
    /// Flag indicating UI needs redraw.
    needs_redraw: bool,
    /// Whether to load the first page on startup.
    load_on_startup: bool,
    /// User settings (persistent configuration).
    user_settings: UserSettings,
    /// Where theme changes are saved, if anywhere.
    settings_path: Option<PathBuf>,
}

impl<S: ItemSource + 'static> App<S> {
    /// Create an application reading from `source`.
    pub fn new(source: Arc<S>, catalogue: CatalogueConfig, user_settings: UserSettings) -> Self {
        Self {
            mode: AppMode::default(),
            theme: Theme::from_variant(user_settings.theme),
            pager: PaginationController::new(&catalogue),
            session: Session::new(catalogue),
            fetcher: BatchFetcher::new(source),
            grid: GridNav::default(),
            detail_tab: DetailTab::default(),
            search: SearchInput::new(),
            load_rx: None,
            load_progress: None,
            status: None,
            tick: 0,
            needs_redraw: true,
            load_on_startup: user_settings.load_on_startup,
            user_settings,
            settings_path: None,
        }
    }

    /// Persist theme changes to `path`.
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    /// Current mode.
    pub fn mode(&self) -> AppMode {
        self.mode
    }

    /// The browsing session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a page is being loaded.
    pub fn is_loading(&self) -> bool {
        self.load_rx.is_some()
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        if self.load_on_startup {
            self.load_more();
        }

        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while self.mode != AppMode::Quit {
            if self.needs_redraw {
                terminal.draw(|frame| Self::render(&mut self, frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    if let Event::Key(key_event) = event {
                        self.handle_key(key_event);
                    }

                    // Drain any additional pending events
                    while self.mode != AppMode::Quit && crossterm::event::poll(Duration::ZERO)? {
                        if let Event::Key(key_event) = crossterm::event::read()? {
                            self.handle_key(key_event);
                        }
                    }
                    self.needs_redraw = true;
                }

                message = async {
                    if let Some(rx) = &mut self.load_rx {
                        rx.recv().await
                    } else {
                        std::future::pending().await
                    }
                } => {
                    self.handle_load_message(message);
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {
                    if self.is_loading() {
                        self.tick = self.tick.wrapping_add(1);
                        self.needs_redraw = true;
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the application.
    fn render(&mut self, frame: &mut Frame) {
        self.grid.set_columns(grid_columns(frame.area().width));
        frame.render_widget(&*self, frame.area());
    }

    /// Cards currently on screen.
    ///
    /// Without a filter this is the whole catalogue. With a filter it is at
    /// most [`SEARCH_DISPLAY_LIMIT`] matches, and nothing when the filter
    /// matched nothing.
    fn displayed_items(&self) -> Vec<&ItemDetail> {
        let store = self.session.store();
        match self.session.filter() {
            FilterState::Inactive => store.iter().collect(),
            FilterState::Active { matches, .. } => matches
                .iter()
                .take(SEARCH_DISPLAY_LIMIT)
                .filter_map(|id| store.get(id).ok())
                .collect(),
        }
    }

    fn displayed_ids(&self) -> Vec<ItemId> {
        self.displayed_items()
            .into_iter()
            .map(|detail| detail.id.clone())
            .collect()
    }

    /// Clamp the grid to the displayed cards.
    fn sync_grid(&mut self) {
        let count = self.displayed_items().len();
        self.grid.set_count(count);
    }

    fn set_status(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status = Some((level, message.into()));
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.mode == AppMode::Search {
            self.handle_search_input(key);
        } else {
            self.handle_action(KeyAction::from_key_event(key));
        }
    }

    /// Handle a key action.
    fn handle_action(&mut self, action: KeyAction) {
        if action == KeyAction::ForceQuit {
            self.mode = AppMode::Quit;
            return;
        }

        match self.mode {
            AppMode::Help => {
                if matches!(
                    action,
                    KeyAction::ToggleHelp | KeyAction::Quit | KeyAction::Cancel
                ) {
                    self.mode = AppMode::Normal;
                }
            }
            AppMode::Detail => self.handle_detail_action(action),
            AppMode::Normal => self.handle_normal_action(action),
            AppMode::Search | AppMode::Quit => {}
        }
    }

    fn handle_normal_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveUp => self.grid.row_up(),
            KeyAction::MoveDown => self.grid.row_down(),
            KeyAction::MoveLeft => self.grid.left(),
            KeyAction::MoveRight => self.grid.right(),
            KeyAction::JumpToTop => self.grid.jump_to_top(),
            KeyAction::JumpToBottom => self.grid.jump_to_bottom(),
            KeyAction::PageUp => self.grid.page_up(),
            KeyAction::PageDown => self.grid.page_down(),
            KeyAction::Open => self.open_selected(),
            KeyAction::Search => {
                self.search.activate();
                self.mode = AppMode::Search;
            }
            KeyAction::LoadMore => self.load_more(),
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::ToggleTheme => self.toggle_theme(),
            KeyAction::Cancel => {
                if !self.search.query().is_empty() {
                    self.clear_search();
                } else {
                    self.status = None;
                }
            }
            KeyAction::Quit => self.mode = AppMode::Quit,
            KeyAction::NextTab | KeyAction::PrevTab | KeyAction::ForceQuit | KeyAction::None => {}
        }
    }

    fn handle_detail_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveLeft | KeyAction::MoveUp => self.navigate(Direction::Previous),
            KeyAction::MoveRight | KeyAction::MoveDown => self.navigate(Direction::Next),
            KeyAction::NextTab => self.detail_tab = self.detail_tab.next(),
            KeyAction::PrevTab => self.detail_tab = self.detail_tab.prev(),
            KeyAction::Cancel | KeyAction::Open | KeyAction::Quit => self.close_detail(),
            KeyAction::ToggleTheme => self.toggle_theme(),
            _ => {}
        }
    }

    /// Handle keyboard input while the search bar has focus.
    fn handle_search_input(&mut self, key: KeyEvent) {
        let edited = match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.clear_search();
                false
            }
            // Keep the filter and return to the grid
            (KeyCode::Enter, _) | (KeyCode::Down, _) | (KeyCode::Tab, _) => {
                self.search.deactivate();
                self.mode = AppMode::Normal;
                false
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.mode = AppMode::Quit;
                false
            }
            (KeyCode::Left, _) => {
                self.search.move_cursor_left();
                false
            }
            (KeyCode::Right, _) => {
                self.search.move_cursor_right();
                false
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.search.move_cursor_start();
                false
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.search.move_cursor_end();
                false
            }
            (KeyCode::Backspace, _) => self.search.delete_char_before(),
            (KeyCode::Delete, _) => self.search.delete_char_at(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.search.clear_query();
                true
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.search.insert_char(c);
                true
            }
            _ => false,
        };

        if edited {
            self.apply_query();
        }
    }

    /// Re-run the filter for the current search text.
    fn apply_query(&mut self) {
        let snapshot = self.session.search(self.search.query());
        debug!(
            query = self.search.query(),
            active = snapshot.filter_active,
            matches = snapshot.match_count,
            "Search updated"
        );
        self.sync_grid();
        self.grid.jump_to_top();
    }

    fn clear_search(&mut self) {
        self.search.clear_query();
        self.search.deactivate();
        self.mode = AppMode::Normal;
        self.apply_query();
    }

    fn open_selected(&mut self) {
        if self.grid.count() == 0 {
            return;
        }
        let ids = self.displayed_ids();
        let Some(id) = ids.get(self.grid.selected()) else {
            return;
        };

        match self.session.open_item(id) {
            Ok(_) => {
                self.detail_tab = DetailTab::Main;
                self.mode = AppMode::Detail;
            }
            Err(err) => self.set_status(StatusLevel::Error, err.to_string()),
        }
    }

    fn navigate(&mut self, direction: Direction) {
        if let Err(err) = self.session.navigate(direction) {
            warn!(error = %err, "Navigation failed");
            self.set_status(StatusLevel::Error, err.to_string());
        }
    }

    /// Close the detail overlay, moving the grid selection to the last
    /// item shown if it is on screen.
    fn close_detail(&mut self) {
        if let Some(focused) = self.session.focused().cloned() {
            let position = self.displayed_ids().iter().position(|id| *id == focused);
            if let Some(index) = position {
                self.grid.set_selected(index);
            }
        }
        self.session.close_item();
        self.mode = AppMode::Normal;
    }

    /// Request the next page in the background.
    fn load_more(&mut self) {
        if !self.session.can_load_more() {
            self.set_status(StatusLevel::Warning, "Clear the search to load more");
            return;
        }

        match self.pager.begin() {
            Ok(Some(request)) => {
                self.load_progress = Some(FetchProgress::new(request.offset, request.limit));
                self.load_rx = Some(loading::start_load(self.fetcher.clone(), request));
            }
            Ok(None) => {
                let loaded = self.pager.loaded();
                self.set_status(StatusLevel::Info, format!("All {loaded} items loaded"));
            }
            Err(err) => self.set_status(StatusLevel::Warning, err.to_string()),
        }
    }

    /// Handle a message from the load channel.
    ///
    /// `None` means the load task ended without reporting a result.
    fn handle_load_message(&mut self, message: Option<LoadResult>) {
        match message {
            Some(result) => self.handle_load_result(result),
            None => self.handle_load_closed(),
        }
    }

    fn handle_load_closed(&mut self) {
        self.load_rx = None;
        self.load_progress = None;

        if let Some(request) = self.pager.abandon() {
            warn!(offset = request.offset, "Load task ended without a result");
            self.set_status(StatusLevel::Error, "Load interrupted. Press m to retry");
        }
    }

    /// Handle a result from the background load task.
    fn handle_load_result(&mut self, result: LoadResult) {
        match result {
            LoadResult::Progress(progress) => {
                self.load_progress = Some(progress);
            }
            LoadResult::Complete { request, result } => {
                self.load_rx = None;
                self.load_progress = None;

                match self.pager.finish(request, result, &mut self.session) {
                    Ok(LoadOutcome::Loaded { added, loaded }) => {
                        self.set_status(
                            StatusLevel::Info,
                            format!("Loaded {added} more ({loaded} total)"),
                        );
                    }
                    Ok(LoadOutcome::Exhausted) => {}
                    Err(err) if err.is_transient() => {
                        self.set_status(
                            StatusLevel::Error,
                            format!("Load failed: {err}. Press m to retry"),
                        );
                    }
                    Err(err) => self.set_status(StatusLevel::Error, format!("Load failed: {err}")),
                }
                self.sync_grid();
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.user_settings.theme = self.theme.variant;

        if let Some(path) = &self.settings_path {
            if let Err(err) = self.user_settings.save_to(path) {
                warn!(path = %path.display(), error = %err, "Failed to save settings");
            }
        }
    }
}

impl<S: ItemSource + 'static> Widget for &App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cards = self.displayed_items();
        let spinner = SPINNER_FRAMES[self.tick % SPINNER_FRAMES.len()];

        let ctx = RenderContext {
            mode: self.mode,
            theme: &self.theme,
            session: &self.session,
            cards: &cards,
            selected: (!cards.is_empty()).then(|| self.grid.selected()),
            search: &self.search,
            load_progress: self.load_progress.as_ref(),
            loading: self.is_loading(),
            spinner,
            status: self.status.as_ref(),
            loaded: self.pager.loaded(),
            max_items: self.pager.max_items(),
            exhausted: self.pager.is_exhausted(),
            detail_tab: self.detail_tab,
        };

        render_app(&ctx, area, buf);
    }
}
