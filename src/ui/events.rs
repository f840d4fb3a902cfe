//! Background load event processing.

use crate::app::{App, AppEvent};
use crate::feed::LoadOutcome;

/// Apply a load completion or failure to the application state.
///
/// Stale events (from a session that was reset while the load was in
/// flight) are dropped inside the `App` handlers.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::LoadReady { generation, ticket } => {
            match app.on_load_ready(generation, ticket) {
                Some(LoadOutcome::Appended { page, appended }) => {
                    tracing::info!(
                        page,
                        appended,
                        total = app.controller.stories().len(),
                        "Page loaded"
                    );
                }
                Some(LoadOutcome::Exhausted) => {
                    tracing::info!("No more stories to load");
                }
                None => {} // stale, already logged
            }
        }
        AppEvent::LoadFailed { generation, error } => {
            app.on_load_failed(generation, error);
        }
    }
}
