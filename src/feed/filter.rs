//! Category filtering over the loaded story set.

use crate::feed::story::{CategoryFilter, Story};

/// Project the subsequence of `stories` passing `selection`, preserving
/// relative order. "전체" is the identity — every story passes.
pub fn filter<'a>(stories: &'a [Story], selection: CategoryFilter) -> Vec<&'a Story> {
    stories
        .iter()
        .filter(|s| selection.matches(s.category))
        .collect()
}
