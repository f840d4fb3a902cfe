//! Story feed core: generation, pagination, and filtering.
//!
//! This module is the behavioral heart of bookfeed:
//!
//! - **Generation**: stories are synthesized deterministically from their ids
//! - **Pagination**: a guarded state machine appends fixed-size pages and
//!   exhausts at a session cap, with at most one load in flight
//! - **Filtering**: a pure projection of the loaded set by category
//!
//! # Architecture
//!
//! The module is organized into four submodules:
//!
//! - [`story`] - The `Story` record, categories, and the category filter type
//! - [`generator`] - Pure id-to-story derivation
//! - [`controller`] - The pagination/loading state machine
//! - [`filter`] - Order-preserving category filtering

pub mod controller;
pub mod filter;
pub mod generator;
pub mod story;

pub use controller::{
    FeedController, LoadError, LoadOutcome, LoadTicket, DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE,
};
pub use filter::filter;
pub use generator::generate;
pub use story::{Category, CategoryFilter, Story, ALL_LABEL};
