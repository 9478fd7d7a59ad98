//! App state and core application logic
//!
//! Owns the search box, the debounced committed term, the movie list, the
//! trending strip and the detail modal. All network work is expressed as
//! [`Request`]s queued in an outbox; the event loop hands them to the
//! [`crate::worker::Worker`] and feeds the [`Response`]s back through
//! [`App::apply`]. Each flow keeps its own loading state, and responses for
//! anything but the latest request of their flow are discarded.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::models::{Movie, MovieDetail, TrendingEntry};

/// Shown in place of the movie list when a listing request fails
pub const LIST_ERROR_MESSAGE: &str = "Failed to fetch movies. Please try again later.";

/// Default number of trending entries to load
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

/// Which list receives navigation keys in normal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Trending,
    #[default]
    Movies,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    /// Move selection down by a page
    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected - visible_height + 1;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        self.offset = self.offset.min(self.selected);
    }
}

// =============================================================================
// Scroll Lock
// =============================================================================

/// Suppresses background list scrolling while an overlay is open.
///
/// Every holder gets a [`ScrollGuard`]; the lock is held while at least one
/// guard is alive and released when the last one drops, on whatever path
/// the owner goes away.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> ScrollGuard {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }
}

/// Holds the [`ScrollLock`] until dropped
#[derive(Debug)]
pub struct ScrollGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// Search box and movie list state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Raw search text, updated on every keystroke
    pub query: String,
    /// Cursor position in query (in chars)
    pub cursor: usize,
    /// Debounced term the current listing was requested for
    pub committed: Option<String>,
    /// Movies for the committed term
    pub results: Vec<Movie>,
    /// Results list state
    pub list: ListState,
    /// Loading state of the listing
    pub loading: LoadingState,
}

impl SearchState {
    fn byte_index(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.query.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.query.remove(idx);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.query.remove(idx);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear query
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Query split at the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index(self.cursor))
    }

    /// Set results and update list state
    pub fn set_results(&mut self, results: Vec<Movie>) {
        self.list.set_len(results.len());
        self.results = results;
        self.loading = LoadingState::Idle;
    }

    /// Get currently selected result
    pub fn selected_result(&self) -> Option<&Movie> {
        self.results.get(self.list.selected)
    }
}

/// Trending strip state
#[derive(Debug, Clone, Default)]
pub struct TrendingState {
    pub entries: Vec<TrendingEntry>,
    pub list: ListState,
}

impl TrendingState {
    /// The strip is only shown when there is something to show
    pub fn is_visible(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn selected_entry(&self) -> Option<&TrendingEntry> {
        self.entries.get(self.list.selected)
    }
}

/// Detail modal phase, derived from [`ModalState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    OpenLoading,
    OpenLoaded,
}

/// An open detail modal
#[derive(Debug)]
pub struct OpenModal {
    /// The movie the modal was opened for
    pub movie: Movie,
    /// Detail for `movie`, once fetched; stays empty if the fetch failed
    pub detail: Option<MovieDetail>,
    pub loading: bool,
    /// Sequence number of the detail request for this opening
    pub seq: u64,
    /// Vertical scroll offset of the detail text
    pub scroll: u16,
    _scroll_guard: ScrollGuard,
}

/// Detail modal state
#[derive(Debug, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(OpenModal),
}

impl ModalState {
    pub fn phase(&self) -> ModalPhase {
        match self {
            ModalState::Closed => ModalPhase::Closed,
            ModalState::Open(open) if open.loading => ModalPhase::OpenLoading,
            ModalState::Open(_) => ModalPhase::OpenLoaded,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn open(&self) -> Option<&OpenModal> {
        match self {
            ModalState::Open(open) => Some(open),
            ModalState::Closed => None,
        }
    }
}

// =============================================================================
// Async Requests
// =============================================================================

/// Network work requested by the app, executed by the worker
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Load the top trending entries (once per session)
    LoadTrending { limit: usize },
    /// Fetch the listing for a committed term (empty = popular)
    FetchMovies { seq: u64, term: String },
    /// Fetch detail for the movie shown in the modal
    FetchDetail { seq: u64, id: u64 },
    /// Count a successful search, fire-and-forget
    RecordSearch { term: String, movie: Movie },
}

/// Completed network work, applied with [`App::apply`]
#[derive(Debug)]
pub enum Response {
    Trending(anyhow::Result<Vec<TrendingEntry>>),
    Movies {
        seq: u64,
        term: String,
        result: anyhow::Result<Vec<Movie>>,
    },
    Detail {
        seq: u64,
        id: u64,
        result: anyhow::Result<MovieDetail>,
    },
    Recorded {
        term: String,
        result: anyhow::Result<u64>,
    },
}

// =============================================================================
// Main Application State
// =============================================================================

/// Tunables taken from the configuration
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub debounce: Duration,
    pub trending_limit: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// List receiving navigation keys
    pub focus: Focus,

    pub search: SearchState,
    pub trending: TrendingState,
    pub modal: ModalState,

    debouncer: Debouncer,
    scroll_lock: ScrollLock,
    /// Sequence of the latest listing request
    list_seq: u64,
    /// Listing request still awaiting its response
    list_in_flight: Option<u64>,
    /// Sequence of the latest detail request
    detail_seq: u64,
    outbox: Vec<Request>,
}

impl Default for App {
    fn default() -> Self {
        Self::with_settings(AppSettings::default())
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an App and queue the startup requests: the trending strip and
    /// the initial (popular) listing.
    pub fn with_settings(settings: AppSettings) -> Self {
        let mut app = Self {
            running: true,
            input_mode: InputMode::Normal,
            focus: Focus::Movies,
            search: SearchState::default(),
            trending: TrendingState::default(),
            modal: ModalState::Closed,
            debouncer: Debouncer::with_delay(settings.debounce),
            scroll_lock: ScrollLock::new(),
            list_seq: 0,
            list_in_flight: None,
            detail_seq: 0,
            outbox: Vec::new(),
        };
        app.outbox.push(Request::LoadTrending {
            limit: settings.trending_limit,
        });
        app.commit_term(String::new());
        app
    }

    /// Take all queued requests
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.outbox)
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_lock.is_locked()
    }

    pub fn debounce_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        if !self.modal.is_open() {
            self.input_mode = InputMode::Editing;
            self.search.cursor_end();
        }
    }

    // -------------------------------------------------------------------------
    // Search / Listing
    // -------------------------------------------------------------------------

    /// Drive timers. Commits the debounced term once the window elapses.
    pub fn tick(&mut self, now: Instant) {
        if let Some(raw) = self.debouncer.poll(now) {
            let term = raw.trim().to_string();
            if self.search.committed.as_deref() != Some(term.as_str()) {
                self.commit_term(term);
            }
        }
    }

    fn commit_term(&mut self, term: String) {
        self.list_seq += 1;
        self.list_in_flight = Some(self.list_seq);
        tracing::debug!(seq = self.list_seq, term = %term, "search term committed");

        self.search.committed = Some(term.clone());
        self.search.loading = LoadingState::Loading;
        self.outbox.push(Request::FetchMovies {
            seq: self.list_seq,
            term,
        });
    }

    fn query_changed(&mut self, now: Instant) {
        self.debouncer.push(self.search.query.clone(), now);
    }

    fn apply_movies(&mut self, seq: u64, term: String, result: anyhow::Result<Vec<Movie>>) {
        if self.list_in_flight != Some(seq) {
            tracing::debug!(seq, current = self.list_seq, "discarding stale movie listing");
            return;
        }
        self.list_in_flight = None;

        match result {
            Ok(movies) => {
                tracing::info!(term = %term, count = movies.len(), "movie listing loaded");
                if !term.is_empty() {
                    if let Some(top) = movies.first() {
                        self.outbox.push(Request::RecordSearch {
                            term: term.clone(),
                            movie: top.clone(),
                        });
                    }
                }
                self.search.set_results(movies);
            }
            Err(e) => {
                tracing::error!(term = %term, error = %e, "error fetching movies");
                self.search.set_results(Vec::new());
                self.search.loading = LoadingState::Error(LIST_ERROR_MESSAGE.to_string());
            }
        }
    }

    // -------------------------------------------------------------------------
    // Detail Modal
    // -------------------------------------------------------------------------

    /// Open the detail modal for `movie` and request its detail.
    ///
    /// A movie without a valid id does not open anything.
    pub fn open_movie(&mut self, movie: Movie) {
        if !movie.has_valid_id() {
            tracing::debug!(title = %movie.title, "ignoring selection without id");
            return;
        }

        self.detail_seq += 1;
        let seq = self.detail_seq;
        let id = movie.id;
        tracing::debug!(seq, id, "opening detail modal");

        // The new guard is taken before the old state drops so the lock
        // never flickers off when switching movies.
        let guard = self.scroll_lock.acquire();
        self.modal = ModalState::Open(OpenModal {
            movie,
            detail: None,
            loading: true,
            seq,
            scroll: 0,
            _scroll_guard: guard,
        });
        self.input_mode = InputMode::Normal;
        self.outbox.push(Request::FetchDetail { seq, id });
    }

    /// Close the detail modal. Any pending detail response is discarded.
    pub fn close_modal(&mut self) {
        if self.modal.is_open() {
            tracing::debug!("closing detail modal");
        }
        self.modal = ModalState::Closed;
    }

    fn apply_detail(&mut self, seq: u64, id: u64, result: anyhow::Result<MovieDetail>) {
        let ModalState::Open(open) = &mut self.modal else {
            tracing::debug!(seq, id, "discarding detail for closed modal");
            return;
        };
        if open.seq != seq || open.movie.id != id || !open.loading {
            tracing::debug!(seq, id, current = open.seq, "discarding stale movie detail");
            return;
        }

        open.loading = false;
        match result {
            Ok(detail) => {
                tracing::info!(id, title = %detail.title, "movie detail loaded");
                open.detail = Some(detail);
            }
            Err(e) => {
                tracing::error!(id, error = %e, "error fetching movie details");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Responses
    // -------------------------------------------------------------------------

    /// Apply a completed request
    pub fn apply(&mut self, response: Response) {
        match response {
            Response::Trending(Ok(entries)) => {
                tracing::info!(count = entries.len(), "trending loaded");
                self.trending.list.set_len(entries.len());
                self.trending.entries = entries;
            }
            Response::Trending(Err(e)) => {
                tracing::error!(error = %e, "error fetching trending movies");
                self.trending = TrendingState::default();
            }
            Response::Movies { seq, term, result } => self.apply_movies(seq, term, result),
            Response::Detail { seq, id, result } => self.apply_detail(seq, id, result),
            Response::Recorded { term, result } => match result {
                Ok(count) => tracing::debug!(term = %term, count, "search count recorded"),
                Err(e) => tracing::warn!(term = %term, error = %e, "failed to record search count"),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Handle keyboard event as if it happened at `now`
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.modal.is_open() {
            self.handle_modal_key(key)
        } else if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key, now)
        } else {
            self.handle_normal_key(key, now)
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') | KeyCode::Backspace => {
                self.close_modal();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let ModalState::Open(open) = &mut self.modal {
                    open.scroll = open.scroll.saturating_sub(1);
                }
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let ModalState::Open(open) = &mut self.modal {
                    open.scroll = open.scroll.saturating_add(1);
                }
                true
            }
            _ => false,
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                self.input_mode = InputMode::Normal;
                self.focus = Focus::Movies;
                true
            }
            KeyCode::Char(c) => {
                self.search.insert(c);
                self.query_changed(now);
                true
            }
            KeyCode::Backspace => {
                self.search.backspace();
                self.query_changed(now);
                true
            }
            KeyCode::Delete => {
                self.search.delete();
                self.query_changed(now);
                true
            }
            KeyCode::Left => {
                self.search.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.cursor_end();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                return true;
            }
            KeyCode::Esc => {
                if self.search.query.is_empty() {
                    return false;
                }
                self.search.clear();
                self.query_changed(now);
                return true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Movies if self.trending.is_visible() => Focus::Trending,
                    _ => Focus::Movies,
                };
                return true;
            }
            KeyCode::Enter | KeyCode::Char('i') => {
                self.open_focused();
                return true;
            }
            _ => {}
        }

        if self.scroll_locked() {
            return false;
        }

        let list = match self.focus {
            Focus::Movies => &mut self.search.list,
            Focus::Trending => &mut self.trending.list,
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Left | KeyCode::Char('h') => list.up(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Right | KeyCode::Char('l') => list.down(),
            KeyCode::PageUp => list.page_up(10),
            KeyCode::PageDown => list.page_down(10),
            KeyCode::Home | KeyCode::Char('g') => list.first(),
            KeyCode::End | KeyCode::Char('G') => list.last(),
            _ => return false,
        }
        true
    }

    /// Open the modal for the selected item of the focused list
    fn open_focused(&mut self) {
        let movie = match self.focus {
            // The list panel shows a spinner, not the stale rows
            Focus::Movies if self.search.loading.is_loading() => None,
            Focus::Movies => self.search.selected_result().cloned(),
            Focus::Trending => self.trending.selected_entry().and_then(|entry| {
                entry.movie_id.map(|id| Movie {
                    id,
                    title: entry.search_term.clone(),
                    poster_path: None,
                    vote_average: 0.0,
                    release_date: None,
                    original_language: None,
                })
            }),
        };
        if let Some(movie) = movie {
            self.open_movie(movie);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
