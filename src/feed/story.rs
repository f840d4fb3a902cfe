use chrono::NaiveDate;
use serde::Serialize;

// ============================================================================
// Categories
// ============================================================================

/// A story category.
///
/// The variant order is significant: [`Category::ALL`] indexes into it when
/// assigning categories during generation, so reordering variants changes
/// which category every story gets. Display labels are the Korean names the
/// feed was built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "도서")]
    Books,
    #[serde(rename = "서평")]
    Reviews,
    #[serde(rename = "독서모임")]
    BookClub,
    #[serde(rename = "추천도서")]
    Recommended,
    #[serde(rename = "아침독서")]
    MorningReading,
    #[serde(rename = "독서일기")]
    ReadingDiary,
    #[serde(rename = "독서토론")]
    BookDebate,
    #[serde(rename = "신간도서")]
    NewReleases,
    #[serde(rename = "베스트셀러")]
    Bestsellers,
    #[serde(rename = "고전")]
    Classics,
    #[serde(rename = "외국도서")]
    ForeignBooks,
}

impl Category {
    /// All real categories in generation order. "전체" (All) is a filter
    /// pseudo-category and never appears here.
    pub const ALL: [Category; 11] = [
        Category::Books,
        Category::Reviews,
        Category::BookClub,
        Category::Recommended,
        Category::MorningReading,
        Category::ReadingDiary,
        Category::BookDebate,
        Category::NewReleases,
        Category::Bestsellers,
        Category::Classics,
        Category::ForeignBooks,
    ];

    /// Korean display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Books => "도서",
            Category::Reviews => "서평",
            Category::BookClub => "독서모임",
            Category::Recommended => "추천도서",
            Category::MorningReading => "아침독서",
            Category::ReadingDiary => "독서일기",
            Category::BookDebate => "독서토론",
            Category::NewReleases => "신간도서",
            Category::Bestsellers => "베스트셀러",
            Category::Classics => "고전",
            Category::ForeignBooks => "외국도서",
        }
    }

    /// Parse a display label back into a category.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Category Filter
// ============================================================================

/// Label of the pseudo-category meaning "no filtering".
pub const ALL_LABEL: &str = "전체";

/// The active category filter: either everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// "전체" — identity filter.
    All,
    /// Only stories in the given category.
    Only(Category),
}

impl CategoryFilter {
    /// Number of selectable positions: "전체" plus every real category.
    pub const COUNT: usize = Category::ALL.len() + 1;

    /// Display label ("전체" or the category's label).
    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_LABEL,
            CategoryFilter::Only(c) => c.label(),
        }
    }

    /// Parse a display label. "전체" maps to [`CategoryFilter::All`].
    pub fn from_label(label: &str) -> Option<CategoryFilter> {
        if label == ALL_LABEL {
            return Some(CategoryFilter::All);
        }
        Category::from_label(label).map(CategoryFilter::Only)
    }

    /// Whether a story in `category` passes this filter.
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    /// Position in the selector bar: 0 = "전체", then generation order.
    pub fn index(self) -> usize {
        match self {
            CategoryFilter::All => 0,
            CategoryFilter::Only(c) => {
                1 + Category::ALL
                    .iter()
                    .position(|x| *x == c)
                    .unwrap_or_default()
            }
        }
    }

    fn from_index(index: usize) -> CategoryFilter {
        if index == 0 {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::ALL[(index - 1) % Category::ALL.len()])
        }
    }

    /// The next filter in selector order, wrapping after the last category.
    pub fn next(self) -> CategoryFilter {
        CategoryFilter::from_index((self.index() + 1) % CategoryFilter::COUNT)
    }

    /// The previous filter in selector order, wrapping before "전체".
    pub fn prev(self) -> CategoryFilter {
        CategoryFilter::from_index((self.index() + CategoryFilter::COUNT - 1) % CategoryFilter::COUNT)
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::All
    }
}

// ============================================================================
// Story
// ============================================================================

/// A single feed entry.
///
/// Every field is a pure function of `id` (and, for `created_at`, the
/// position within the batch that produced it) — see [`crate::feed::generator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Story {
    /// Positive, unique, assigned in generation order.
    pub id: u64,
    pub title: String,
    pub body: String,
    pub author: String,
    /// Calendar date, newest-first within a batch.
    pub created_at: NaiveDate,
    /// Always in `1..=200`.
    pub likes: u32,
    /// Always in `1..=50`.
    pub comments: u32,
    /// Ordered; always contains the category's label.
    pub tags: Vec<String>,
    pub category: Category,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.label()), Some(c));
        }
        assert_eq!(Category::from_label("전체"), None);
        assert_eq!(Category::from_label("bogus"), None);
    }

    #[test]
    fn test_filter_label_round_trip() {
        assert_eq!(CategoryFilter::from_label("전체"), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::from_label("도서"),
            Some(CategoryFilter::Only(Category::Books))
        );
        assert_eq!(CategoryFilter::from_label("없는카테고리"), None);
    }

    #[test]
    fn test_filter_cycle_visits_every_position_once() {
        let mut seen = Vec::new();
        let mut f = CategoryFilter::All;
        for _ in 0..CategoryFilter::COUNT {
            seen.push(f.label());
            f = f.next();
        }
        assert_eq!(f, CategoryFilter::All); // full cycle wraps
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), CategoryFilter::COUNT);
    }

    #[test]
    fn test_filter_prev_inverts_next() {
        let mut f = CategoryFilter::All;
        for _ in 0..CategoryFilter::COUNT {
            assert_eq!(f.next().prev(), f);
            f = f.next();
        }
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::Classics));
        assert!(CategoryFilter::Only(Category::Books).matches(Category::Books));
        assert!(!CategoryFilter::Only(Category::Books).matches(Category::Reviews));
    }

    #[test]
    fn test_category_serializes_as_korean_label() {
        let json = serde_json::to_string(&Category::Books).unwrap();
        assert_eq!(json, "\"도서\"");
    }
}
