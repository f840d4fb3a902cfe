use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// The feed's titles and tags are mostly Hangul, which occupies two columns
/// per character; byte or char counts would misplace every card boundary.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncate `s` to at most `max_width` terminal columns, appending "..."
/// when anything was cut.
///
/// Returns `Cow::Borrowed` when the string already fits, so the common case
/// in render loops allocates nothing. For widths of 3 columns or less there
/// is no room for "char + ellipsis", so as many characters as fit are
/// returned without an ellipsis.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = if max_width <= ELLIPSIS_WIDTH {
        max_width
    } else {
        max_width - ELLIPSIS_WIDTH
    };

    let mut taken_width = 0;
    let mut byte_end = 0;
    for (idx, c) in s.char_indices() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if taken_width + char_width > budget {
            break;
        }
        taken_width += char_width;
        byte_end = idx + c.len_utf8();
    }

    if max_width <= ELLIPSIS_WIDTH {
        Cow::Owned(s[..byte_end].to_string())
    } else {
        Cow::Owned(format!("{}{}", &s[..byte_end], ELLIPSIS))
    }
}
