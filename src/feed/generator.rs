//! Deterministic story generation.
//!
//! The feed has no backing service; stories are synthesized on demand from
//! their numeric id. All derivations are plain integer arithmetic rather
//! than a seeded RNG, so the output is reproducible across platforms and
//! repeated calls — the property the tests below pin down.

use crate::feed::story::{Category, Story};
use chrono::{Duration, NaiveDate};

/// Multiplier that scatters categories across consecutive ids. Arbitrary,
/// but output-compatible tests depend on it staying exactly 17.
const CATEGORY_STRIDE: u64 = 17;

/// Anchor date for `created_at`: 2024-01-01, counting backwards from the
/// first story of each batch.
fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("fixed calendar date")
}

/// Generate `count` stories with ids `start_id, start_id + 1, ...`.
///
/// Within a batch, `created_at` decreases by one day per story, starting at
/// the reference date — newest-first when `start_id` denotes the most recent
/// id. Everything else depends only on the story's own id.
pub fn generate(start_id: u64, count: usize) -> Vec<Story> {
    (0..count as u64)
        .map(|offset| story(start_id + offset, offset))
        .collect()
}

/// Synthesize the story for `id`, dated `offset` days before the reference.
fn story(id: u64, offset: u64) -> Story {
    let category = Category::ALL[((id * CATEGORY_STRIDE) % Category::ALL.len() as u64) as usize];
    let label = category.label();

    Story {
        id,
        title: format!("{label} 이야기 {id}"),
        body: format!(
            "이것은 {label}에 대한 {id}번째 이야기입니다. \
             책을 읽으면서 느낀 감상과 생각들을 기록합니다."
        ),
        author: format!("독서가{id}"),
        created_at: reference_date() - Duration::days(offset as i64),
        likes: ((id * 13) % 200 + 1) as u32,
        comments: ((id * 7) % 50 + 1) as u32,
        tags: vec!["독서".to_string(), label.to_string(), format!("태그{id}")],
        category,
    }
}
