//! Terminal user interface.
//!
//! The UI is the "rendering collaborator" and "visibility trigger" of the
//! feed: it draws the loaded stories, derives the near-end-of-list signal
//! from the cursor position, and spawns the delayed load tasks whose
//! completions flow back through the [`crate::app::AppEvent`] channel.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop, terminal management, load spawning
//! - `input` - Keyboard input handling
//! - `events` - Background load completion processing
//! - `render` - Layout dispatch and the feed footer
//! - `header` - Title and category selector bar
//! - `stories` - Story card list widget
//! - `status` - Status bar widget

mod events;
mod header;
mod input;
mod loop_runner;
mod render;
mod status;
mod stories;

pub use loop_runner::{run, Action};
