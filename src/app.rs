//! Central application state shared by the event loop, input handling, and
//! rendering.
//!
//! `App` wraps the [`FeedController`] with everything the terminal front end
//! needs: the active category filter, the cursor into the filtered list, the
//! status line, and the bookkeeping that ties in-flight load tasks back to
//! the session that spawned them.

use crate::config::Config;
use crate::feed::{filter, CategoryFilter, FeedController, LoadError, LoadOutcome, LoadTicket, Story};
use std::time::{Duration, Instant};

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(4);

/// How close (in rows) the cursor must be to the end of the visible list
/// before it counts as the "near end" visibility signal.
pub const SCROLL_LOOKAHEAD: usize = 2;

// ============================================================================
// Events
// ============================================================================

/// Events delivered by background load tasks.
///
/// Each event carries the feed-session generation it belongs to. A session
/// reset bumps the generation, so a completion from a discarded session is
/// recognized and dropped instead of mutating the fresh feed.
#[derive(Debug)]
pub enum AppEvent {
    /// The simulated latency elapsed; the ticket is ready to redeem.
    LoadReady {
        generation: u64,
        ticket: LoadTicket,
    },
    /// The load failed (failure injection or a dropped task).
    LoadFailed {
        generation: u64,
        error: LoadError,
    },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state.
pub struct App {
    /// The feed session. Replaced wholesale on reset.
    pub controller: FeedController,
    /// Active category filter.
    pub selection: CategoryFilter,
    /// Cursor into the *filtered* story list.
    pub cursor: usize,

    /// Feed-session generation; in-flight loads from older generations are
    /// stale and their completions are discarded.
    pub load_generation: u64,
    /// Loads attempted this session (drives failure injection).
    pub load_attempts: u64,
    /// Simulated load latency.
    pub load_delay: Duration,
    /// When set, every Nth load attempt fails (retry-path demo).
    pub fail_every: Option<u64>,

    // UI state
    pub needs_redraw: bool,
    pub spinner_frame: usize,
    pub status_message: Option<(String, Instant)>,

    // Session parameters, kept for reset
    page_size: usize,
    max_pages: u32,
}

impl App {
    /// Build the application state from configuration, loading the first
    /// page of the feed synchronously.
    pub fn new(config: &Config) -> Self {
        let selection = match CategoryFilter::from_label(&config.category) {
            Some(sel) => sel,
            None => {
                tracing::warn!(category = %config.category, "Unknown category in config, showing all");
                CategoryFilter::All
            }
        };

        Self {
            controller: FeedController::new(config.page_size, config.max_pages),
            selection,
            cursor: 0,
            load_generation: 0,
            load_attempts: 0,
            load_delay: Duration::from_millis(config.load_delay_ms),
            fail_every: None,
            needs_redraw: true,
            spinner_frame: 0,
            status_message: None,
            page_size: config.page_size,
            max_pages: config.max_pages,
        }
    }

    // ------------------------------------------------------------------
    // Visible list
    // ------------------------------------------------------------------

    /// The loaded stories passing the active filter, in load order.
    pub fn visible(&self) -> Vec<&Story> {
        filter(self.controller.stories(), self.selection)
    }

    pub fn visible_len(&self) -> usize {
        self.visible().len()
    }

    /// The "near end of list" visibility signal.
    ///
    /// True when the cursor sits within [`SCROLL_LOOKAHEAD`] rows of the end
    /// of the visible list — and also when the filter leaves the list empty
    /// or too short to scroll, which mirrors the original feed's sentinel
    /// staying in view until enough matching stories have loaded.
    pub fn near_end(&self) -> bool {
        let len = self.visible_len();
        len == 0 || self.cursor + SCROLL_LOOKAHEAD + 1 >= len
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.visible_len();
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self) {
        self.cursor = self.visible_len().saturating_sub(1);
    }

    /// Jump the cursor by `rows`, clamping at the list edges.
    pub fn select_forward(&mut self, rows: usize) {
        let len = self.visible_len();
        if len > 0 {
            self.cursor = (self.cursor + rows).min(len - 1);
        }
    }

    pub fn select_backward(&mut self, rows: usize) {
        self.cursor = self.cursor.saturating_sub(rows);
    }

    /// Switch the category filter one step forward or backward, keeping the
    /// cursor inside the newly filtered list.
    pub fn cycle_category(&mut self, forward: bool) {
        self.selection = if forward {
            self.selection.next()
        } else {
            self.selection.prev()
        };
        let len = self.visible_len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        tracing::debug!(category = self.selection.label(), visible = len, "Filter changed");
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    /// Discard the session and start a fresh one (the terminal equivalent
    /// of reloading the page).
    ///
    /// The generation bump means a load still in flight for the old session
    /// completes into nothing: its event arrives tagged with the old
    /// generation and is dropped.
    pub fn reset(&mut self) {
        self.load_generation = self.load_generation.wrapping_add(1);
        self.controller = FeedController::new(self.page_size, self.max_pages);
        self.cursor = 0;
        self.load_attempts = 0;
        tracing::info!(generation = self.load_generation, "Feed session reset");
        self.set_status("피드를 새로 불러왔습니다");
    }

    // ------------------------------------------------------------------
    // Load completion
    // ------------------------------------------------------------------

    /// Redeem a completed load, unless it belongs to a discarded session.
    pub fn on_load_ready(&mut self, generation: u64, ticket: LoadTicket) -> Option<LoadOutcome> {
        if generation != self.load_generation {
            tracing::debug!(
                stale = generation,
                current = self.load_generation,
                "Dropping load completion from discarded session"
            );
            return None;
        }
        Some(self.controller.complete_load(ticket))
    }

    /// Record a failed load, unless it belongs to a discarded session.
    pub fn on_load_failed(&mut self, generation: u64, error: LoadError) {
        if generation != self.load_generation {
            tracing::debug!(
                stale = generation,
                current = self.load_generation,
                "Dropping load failure from discarded session"
            );
            return;
        }
        self.set_status(format!("이야기를 불러오지 못했습니다: {error}"));
        self.controller.fail_load(error);
    }

    // ------------------------------------------------------------------
    // Status line
    // ------------------------------------------------------------------

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Drop the status message once its TTL has passed. Returns true if a
    /// message was cleared (the caller should redraw).
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, shown_at)) = &self.status_message {
            if shown_at.elapsed() >= STATUS_TTL {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::Category;

    fn test_app() -> App {
        App::new(&Config::default())
    }

    #[test]
    fn test_new_app_has_first_page() {
        let app = test_app();
        assert_eq!(app.controller.stories().len(), 6);
        assert_eq!(app.visible_len(), 6);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_unknown_config_category_falls_back_to_all() {
        let config = Config {
            category: "정체불명".to_string(),
            ..Config::default()
        };
        let app = App::new(&config);
        assert_eq!(app.selection, CategoryFilter::All);
    }

    #[test]
    fn test_config_category_is_applied() {
        let config = Config {
            category: "도서".to_string(),
            ..Config::default()
        };
        let app = App::new(&config);
        assert_eq!(app.selection, CategoryFilter::Only(Category::Books));
    }

    #[test]
    fn test_near_end_tracks_cursor() {
        let mut app = test_app();
        assert!(!app.near_end()); // cursor 0 of 6, lookahead 2
        app.select_last();
        assert!(app.near_end());
        app.select_first();
        app.select_forward(3); // cursor 3 of 6 -> within lookahead
        assert!(app.near_end());
    }

    #[test]
    fn test_near_end_when_filter_empties_list() {
        let mut app = test_app();
        // Find a category with no stories in the first page.
        let loaded: Vec<Category> = app.controller.stories().iter().map(|s| s.category).collect();
        let missing = Category::ALL
            .iter()
            .copied()
            .find(|c| !loaded.contains(c))
            .expect("6 stories cannot cover 11 categories");
        app.selection = CategoryFilter::Only(missing);
        assert_eq!(app.visible_len(), 0);
        assert!(app.near_end());
    }

    #[test]
    fn test_cursor_clamps_on_filter_change() {
        let mut app = test_app();
        app.select_last();
        let before = app.cursor;
        app.cycle_category(true);
        assert!(app.cursor <= before);
        assert!(app.cursor <= app.visible_len().saturating_sub(1));
    }

    #[test]
    fn test_navigation_clamps_at_edges() {
        let mut app = test_app();
        app.select_prev();
        assert_eq!(app.cursor, 0);
        for _ in 0..20 {
            app.select_next();
        }
        assert_eq!(app.cursor, 5);
        app.select_backward(100);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_reset_discards_in_flight_load() {
        let mut app = test_app();

        let ticket = app.controller.request_load().unwrap();
        let generation = app.load_generation;
        app.reset();

        // The stale completion is dropped; the fresh session is untouched.
        assert!(app.on_load_ready(generation, ticket).is_none());
        assert_eq!(app.controller.stories().len(), 6);
        assert_eq!(app.controller.page(), 1);
        assert!(!app.controller.is_loading());
    }

    #[test]
    fn test_live_load_completion_appends() {
        let mut app = test_app();
        let ticket = app.controller.request_load().unwrap();
        let outcome = app.on_load_ready(app.load_generation, ticket);
        assert_eq!(
            outcome,
            Some(LoadOutcome::Appended {
                page: 2,
                appended: 6
            })
        );
        assert_eq!(app.controller.stories().len(), 12);
    }

    #[test]
    fn test_stale_failure_is_dropped() {
        let mut app = test_app();
        let _ticket = app.controller.request_load().unwrap();
        let generation = app.load_generation;
        app.reset();

        app.on_load_failed(generation, LoadError::Timeout);
        assert!(app.controller.last_error().is_none());
    }

    #[test]
    fn test_status_expires() {
        let mut app = test_app();
        app.set_status("hello");
        assert!(!app.clear_expired_status()); // fresh message stays
        // Backdate the message past its TTL.
        if let Some((_, shown_at)) = &mut app.status_message {
            *shown_at = Instant::now() - STATUS_TTL - Duration::from_millis(1);
        }
        assert!(app.clear_expired_status());
        assert!(app.status_message.is_none());
    }
}
