#![forbid(unsafe_code)]

//! Display width measurement and truncation.
//!
//! Three notions of length show up when laying out terminal text: bytes,
//! display cells, and cells after markup and escape codes are removed. Box
//! padding always uses the last one ([`visible_width`]).

use std::borrow::Cow;

use clif_style::ansi::strip_ansi;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::markup::strip_tags;

/// Display width of `text` in cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Display width after removing markup delimiters and ANSI escapes.
#[must_use]
pub fn visible_width(text: &str) -> usize {
    strip_ansi(&strip_tags(text)).width()
}

/// Truncate to at most `max_width` cells, on grapheme boundaries.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for grapheme in text.graphemes(true) {
        let grapheme_width = grapheme.width();
        if current_width + grapheme_width > max_width {
            break;
        }
        result.push_str(grapheme);
        current_width += grapheme_width;
    }

    result
}

/// Truncate to `max_width` cells, ending in `ellipsis` when anything was cut.
///
/// If the ellipsis itself does not fit, the text is cut without it.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize, ellipsis: &str) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let ellipsis_width = ellipsis.width();
    if ellipsis_width >= max_width {
        return truncate_to_width(text, max_width);
    }

    let mut result = truncate_to_width(text, max_width - ellipsis_width);
    result.push_str(ellipsis);
    result
}

/// Spaces a tab expands to in [`expand_controls`].
pub const TAB_WIDTH: usize = 4;

/// Replace characters a terminal would move the cursor for.
///
/// Each `\t` becomes [`TAB_WIDTH`] spaces, `\r\n` becomes `\n`, and every
/// other control character except `\n` and ESC is dropped. Text without
/// such characters is returned borrowed.
#[must_use]
pub fn expand_controls(text: &str) -> Cow<'_, str> {
    let needs_work = |ch: char| ch.is_control() && ch != '\n' && ch != '\x1b';
    if !text.contains(needs_work) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + TAB_WIDTH);
    for ch in text.chars() {
        match ch {
            '\t' => out.extend(std::iter::repeat_n(' ', TAB_WIDTH)),
            ch if needs_work(ch) => {}
            ch => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_counts_cells() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("中文"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn visible_width_ignores_markup_and_escapes() {
        assert_eq!(visible_width(r#"<cc format="196">error</cc>!"#), 6);
        assert_eq!(visible_width("\x1b[38;5;46mok\x1b[0m"), 2);
        assert_eq!(visible_width("╭─[ x ]─╮"), 9);
    }

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate_to_width("中文字", 3), "中");
        assert_eq!(truncate_to_width("hello", 0), "");
    }

    #[test]
    fn ellipsis_only_when_cut() {
        assert_eq!(truncate_with_ellipsis("short", 10, "…"), "short");
        assert_eq!(truncate_with_ellipsis("a long title", 6, "…"), "a lon…");
        assert_eq!(truncate_with_ellipsis("abc", 1, "…"), "a");
    }

    #[test]
    fn controls_expanded_or_dropped() {
        assert_eq!(expand_controls("a\tb"), "a    b");
        assert_eq!(expand_controls("one\r\ntwo\rx\x07"), "one\ntwox");
        assert_eq!(display_width(&expand_controls("a\tb")), 6);
    }

    #[test]
    fn clean_text_is_borrowed() {
        let text = "line\n\x1b[1mbold\x1b[0m";
        assert!(matches!(expand_controls(text), Cow::Borrowed(t) if t == text));
    }
}
