//! bookfeed — a terminal browser for an infinitely-scrolling book-story feed.
//!
//! The feed is synthetic but fully deterministic: every story is derived from
//! its numeric id by pure integer arithmetic, so two sessions always see the
//! same content. Stories arrive in fixed-size pages appended by a guarded
//! load transition; at most one load is ever in flight, and the feed is
//! capped at a fixed number of pages per session.
//!
//! # Module Structure
//!
//! - [`feed`] - Story generation, the pagination state machine, and filtering
//! - [`app`] - Application state shared between the event loop and renderers
//! - [`config`] - Optional TOML configuration (`~/.config/bookfeed/config.toml`)
//! - [`ui`] - Terminal front end (event loop, input, rendering)
//! - [`util`] - Unicode-aware text helpers for terminal layout

pub mod app;
pub mod config;
pub mod feed;
pub mod ui;
pub mod util;
