#![forbid(unsafe_code)]

//! Markup-aware line wrapping.
//!
//! [`wrap_markup`] breaks a markup string into lines of at most `max_width`
//! display cells. Each [`WrappedLine`] carries the visible text and the same
//! text with markup kept. A span cut by a line break is closed at the end of
//! the line and reopened on the next one, so every decorated line decodes on
//! its own.
//!
//! Lines break between grapheme clusters only. A wide grapheme that does not
//! fit moves to the next line; a single grapheme wider than `max_width` gets a
//! line of its own. `\n` always breaks.
//!
//! # Example
//! ```
//! use clif_text::wrap::wrap_markup;
//!
//! let lines = wrap_markup(r#"<cc format="196">abcdef</cc>"#, 4);
//! assert_eq!(lines[0].plain, "abcd");
//! assert_eq!(lines[0].decorated, r#"<cc format="196">abcd</cc>"#);
//! assert_eq!(lines[1].decorated, r#"<cc format="196">ef</cc>"#);
//! ```

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::markup::{CLOSE_TAG, MarkupToken, has_markup, tokenize};

/// One physical output line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrappedLine {
    /// Visible text.
    pub plain: String,
    /// Visible text with balanced markup.
    pub decorated: String,
}

impl WrappedLine {
    /// Display width of the visible text.
    #[must_use]
    pub fn width(&self) -> usize {
        self.plain.width()
    }
}

/// Wrap `text` to `max_width` cells. A width of 0 disables wrapping.
///
/// Always returns at least one line.
#[must_use]
pub fn wrap_markup(text: &str, max_width: usize) -> Vec<WrappedLine> {
    if max_width == 0 {
        return vec![WrappedLine {
            plain: crate::markup::visible_text(text),
            decorated: text.to_string(),
        }];
    }
    if !has_markup(text) {
        return wrap_plain(text, max_width);
    }

    let tokens = tokenize(text);
    let spans = tokens
        .iter()
        .filter(|token| matches!(token, MarkupToken::Open { .. }))
        .count();
    if spans == 0 {
        return wrap_plain(text, max_width);
    }

    let mut builder = LineBuilder::new(max_width);
    for token in tokens {
        match token {
            MarkupToken::Text(run) => run.graphemes(true).for_each(|g| builder.push(g)),
            MarkupToken::Open { tag, .. } => builder.open(tag),
            MarkupToken::Close => builder.close(),
        }
    }
    let lines = builder.finish();
    tracing::trace!(spans, lines = lines.len(), max_width, "wrapped markup");
    lines
}

/// Wrap text without markup. Plain and decorated forms are equal.
#[must_use]
pub fn wrap_plain(text: &str, max_width: usize) -> Vec<WrappedLine> {
    if max_width == 0 {
        return vec![WrappedLine {
            plain: text.to_string(),
            decorated: text.to_string(),
        }];
    }
    if is_printable_ascii(text) {
        return chunk_ascii(text, max_width);
    }

    let mut builder = LineBuilder::new(max_width);
    text.graphemes(true).for_each(|g| builder.push(g));
    builder.finish()
}

/// Printable ASCII only: one byte is one cell.
fn is_printable_ascii(text: &str) -> bool {
    text.bytes().all(|b| (0x20..0x7f).contains(&b))
}

fn chunk_ascii(text: &str, max_width: usize) -> Vec<WrappedLine> {
    if text.is_empty() {
        return vec![WrappedLine::default()];
    }
    text.as_bytes()
        .chunks(max_width)
        .map(|chunk| {
            // Printable ASCII chunks are always valid UTF-8.
            let line = String::from_utf8_lossy(chunk).into_owned();
            WrappedLine {
                plain: line.clone(),
                decorated: line,
            }
        })
        .collect()
}

/// Accumulates the current line and the state of the span it is in.
struct LineBuilder<'a> {
    lines: Vec<WrappedLine>,
    plain: String,
    decorated: String,
    width: usize,
    max_width: usize,
    open_tag: Option<&'a str>,
    tag_emitted: bool,
}

impl<'a> LineBuilder<'a> {
    fn new(max_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            plain: String::new(),
            decorated: String::new(),
            width: 0,
            max_width,
            open_tag: None,
            tag_emitted: false,
        }
    }

    fn push(&mut self, grapheme: &str) {
        if grapheme == "\n" || grapheme == "\r\n" {
            self.break_line();
            return;
        }

        let width = grapheme.width();
        if self.width + width > self.max_width && !self.plain.is_empty() {
            self.break_line();
        }

        // The opening tag is written lazily so that a line never ends with an
        // empty span.
        if let Some(tag) = self.open_tag {
            if !self.tag_emitted {
                self.decorated.push_str(tag);
                self.tag_emitted = true;
            }
        }
        self.plain.push_str(grapheme);
        self.decorated.push_str(grapheme);
        self.width += width;
    }

    fn open(&mut self, tag: &'a str) {
        self.open_tag = Some(tag);
        self.tag_emitted = false;
    }

    fn close(&mut self) {
        if self.tag_emitted {
            self.decorated.push_str(CLOSE_TAG);
        }
        self.open_tag = None;
        self.tag_emitted = false;
    }

    fn break_line(&mut self) {
        if self.tag_emitted {
            self.decorated.push_str(CLOSE_TAG);
            self.tag_emitted = false;
        }
        self.lines.push(WrappedLine {
            plain: std::mem::take(&mut self.plain),
            decorated: std::mem::take(&mut self.decorated),
        });
        self.width = 0;
    }

    fn finish(mut self) -> Vec<WrappedLine> {
        self.close();
        self.lines.push(WrappedLine {
            plain: self.plain,
            decorated: self.decorated,
        });
        self.lines
    }
}
