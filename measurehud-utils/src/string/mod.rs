//! String helpers for terminal output
//!
//! Terminal cells are measured in display columns, not bytes, so truncation
//! walks grapheme clusters and sums their widths.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "…";

/// Display width of `text` in terminal columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Truncate `text` to at most `max_width` columns, ending with `…` when cut
pub fn safe_truncate(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut truncated = String::new();
    let mut current_width = 0;

    for grapheme in text.graphemes(true) {
        let width = display_width(grapheme);
        if current_width + width > budget {
            break;
        }
        truncated.push_str(grapheme);
        current_width += width;
    }

    truncated.push_str(ELLIPSIS);
    truncated
}

/// Join the non-empty parts with `separator`
pub fn join_non_empty<'a, I>(parts: I, separator: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}
