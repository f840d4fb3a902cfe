//! Pagination state machine for the story feed.
//!
//! The controller owns the loaded stories and the loading/exhaustion flags.
//! Loads are split into two halves so the simulated network latency can live
//! outside the state machine:
//!
//! 1. [`FeedController::request_load`] takes the single-flight guard and
//!    hands back a [`LoadTicket`] — or nothing, if a load is already in
//!    flight or the feed is exhausted.
//! 2. After the latency elapses, the ticket is redeemed with
//!    [`FeedController::complete_load`] (append a page, or discover the page
//!    cap and exhaust the feed) or abandoned with
//!    [`FeedController::fail_load`].
//!
//! Because a ticket can only be obtained while no other load is pending, at
//! most one load is ever in flight — duplicate triggers while loading are
//! ignored rather than double-appending a page.

use crate::feed::generator;
use crate::feed::story::Story;
use thiserror::Error;

/// Stories appended per load.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Pages per session; the feed exhausts once a load would exceed this.
pub const DEFAULT_MAX_PAGES: u32 = 5;

// ============================================================================
// Error Types
// ============================================================================

/// Why a load did not produce a page.
///
/// The simulated loader only fails when failure injection is enabled, but
/// the controller treats failure as a first-class outcome: the page counter
/// stays put, the flag clears, and the next trigger retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("load timed out")]
    Timeout,

    #[error("load failed: {0}")]
    Failed(String),
}

// ============================================================================
// Load Ticket
// ============================================================================

/// Proof that the single-flight guard was taken.
///
/// Redeemed exactly once, by [`FeedController::complete_load`] or
/// [`FeedController::fail_load`]. Not `Clone` — a ticket cannot be redeemed
/// twice, and only `request_load` can mint one.
#[derive(Debug)]
pub struct LoadTicket {
    page: u32,
}

impl LoadTicket {
    /// The page this load will produce if it completes within the cap.
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// What redeeming a ticket did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was generated and appended.
    Appended { page: u32, appended: usize },
    /// The page cap was reached; `has_more` is now permanently false.
    Exhausted,
}

// ============================================================================
// Controller
// ============================================================================

/// Owns the feed session state. Created with the first page already loaded;
/// discarded (not persisted) on teardown.
pub struct FeedController {
    stories: Vec<Story>,
    page: u32,
    is_loading: bool,
    has_more: bool,
    last_error: Option<LoadError>,
    page_size: usize,
    max_pages: u32,
}

impl FeedController {
    /// Create a session and synchronously load page 1.
    pub fn new(page_size: usize, max_pages: u32) -> Self {
        let stories = generator::generate(1, page_size);
        tracing::debug!(
            page_size = page_size,
            max_pages = max_pages,
            "Feed session started with first page"
        );
        Self {
            stories,
            page: 1,
            is_loading: false,
            has_more: true,
            last_error: None,
            page_size,
            max_pages,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGES)
    }

    /// All loaded stories, in load order. Append-only within a session.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// The last successfully loaded page (starts at 1).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// True while a ticket is outstanding.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// False once the page cap has been hit; never becomes true again.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// The most recent load failure, if the last load failed.
    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    /// Attempt the guarded load transition.
    ///
    /// Returns a ticket only when no load is in flight and the feed is not
    /// exhausted; otherwise the trigger is ignored. Taking a ticket clears
    /// any previous load error (the retry is underway).
    pub fn request_load(&mut self) -> Option<LoadTicket> {
        if self.is_loading || !self.has_more {
            return None;
        }
        self.is_loading = true;
        self.last_error = None;
        Some(LoadTicket {
            page: self.page + 1,
        })
    }

    /// Redeem a ticket after the load latency has elapsed.
    ///
    /// The cap check happens here, not at request time: the original feed
    /// only discovers exhaustion once the in-flight load resolves.
    pub fn complete_load(&mut self, ticket: LoadTicket) -> LoadOutcome {
        self.is_loading = false;

        if ticket.page > self.max_pages {
            self.has_more = false;
            tracing::info!(
                pages = self.page,
                stories = self.stories.len(),
                "Feed exhausted"
            );
            return LoadOutcome::Exhausted;
        }

        let start_id = self.stories.len() as u64 + 1;
        let batch = generator::generate(start_id, self.page_size);
        let appended = batch.len();
        self.stories.extend(batch);
        self.page = ticket.page;

        tracing::debug!(
            page = self.page,
            appended = appended,
            total = self.stories.len(),
            "Appended page"
        );
        LoadOutcome::Appended {
            page: self.page,
            appended,
        }
    }

    /// Abandon an in-flight load.
    ///
    /// Clears the loading flag without advancing the page counter or
    /// touching the loaded stories, and records the error so the UI can
    /// surface a retry. The next trigger is eligible again immediately.
    pub fn fail_load(&mut self, error: LoadError) {
        self.is_loading = false;
        tracing::warn!(error = %error, page = self.page, "Page load failed");
        self.last_error = Some(error);
    }
}

impl Default for FeedController {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_page_loads_on_construction() {
        let feed = FeedController::with_defaults();
        assert_eq!(feed.page(), 1);
        assert_eq!(feed.stories().len(), 6);
        assert!(!feed.is_loading());
        assert!(feed.has_more());
        let ids: Vec<u64> = feed.stories().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_single_flight_guard_ignores_duplicate_triggers() {
        let mut feed = FeedController::with_defaults();

        let ticket = feed.request_load().expect("first trigger takes the guard");
        assert!(feed.is_loading());

        // Rapid re-triggers while the load is pending are ignored.
        assert!(feed.request_load().is_none());
        assert!(feed.request_load().is_none());

        let outcome = feed.complete_load(ticket);
        assert_eq!(
            outcome,
            LoadOutcome::Appended {
                page: 2,
                appended: 6
            }
        );
        // Exactly one page was appended despite three triggers.
        assert_eq!(feed.stories().len(), 12);
        assert_eq!(feed.page(), 2);
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_appended_page_continues_id_sequence() {
        let mut feed = FeedController::with_defaults();
        let ticket = feed.request_load().unwrap();
        feed.complete_load(ticket);

        let ids: Vec<u64> = feed.stories().iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<u64>>());
    }

    #[test]
    fn test_exhaustion_is_permanent() {
        let mut feed = FeedController::with_defaults();

        // Pages 2..=5 append; the cap is only discovered by the next load.
        for expected_page in 2..=5 {
            let ticket = feed.request_load().unwrap();
            assert_eq!(
                feed.complete_load(ticket),
                LoadOutcome::Appended {
                    page: expected_page,
                    appended: 6
                }
            );
        }
        assert_eq!(feed.stories().len(), 30);
        assert!(feed.has_more());

        let ticket = feed.request_load().unwrap();
        assert_eq!(feed.complete_load(ticket), LoadOutcome::Exhausted);
        assert!(!feed.has_more());
        assert_eq!(feed.stories().len(), 30);
        assert_eq!(feed.page(), 5);

        // Further triggers are no-ops forever.
        assert!(feed.request_load().is_none());
        assert_eq!(feed.stories().len(), 30);
    }

    #[test]
    fn test_failed_load_keeps_page_and_allows_retry() {
        let mut feed = FeedController::with_defaults();

        let _ticket = feed.request_load().unwrap();
        feed.fail_load(LoadError::Failed("simulated network failure".into()));

        assert!(!feed.is_loading());
        assert_eq!(feed.page(), 1);
        assert_eq!(feed.stories().len(), 6);
        assert!(matches!(feed.last_error(), Some(LoadError::Failed(_))));

        // Retry succeeds and clears the recorded error.
        let ticket = feed.request_load().unwrap();
        assert!(feed.last_error().is_none());
        feed.complete_load(ticket);
        assert_eq!(feed.page(), 2);
        assert_eq!(feed.stories().len(), 12);
    }

    #[test]
    fn test_custom_page_cap() {
        let mut feed = FeedController::new(3, 1);
        assert_eq!(feed.stories().len(), 3);

        let ticket = feed.request_load().unwrap();
        assert_eq!(feed.complete_load(ticket), LoadOutcome::Exhausted);
        assert_eq!(feed.stories().len(), 3);
        assert!(!feed.has_more());
    }
}
