//! Shared utilities.
//!
//! Currently just Unicode-aware text measurement and truncation, used by the
//! renderer to fit mixed Hangul/ASCII story text into terminal columns.

mod text;

pub use text::{display_width, truncate_to_width};
