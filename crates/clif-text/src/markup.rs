#![forbid(unsafe_code)]

//! Inline color markup.
//!
//! Strings may carry single-level color spans:
//!
//! ```text
//! Deleted <cc format="bold 196">3 rows</cc> from users
//! ```
//!
//! The `format` attribute takes the same spec grammar as
//! [`clif_style::FormatSpec`]. Tags are case-sensitive and do not nest: inside
//! a span, another opening tag is ordinary text and the first `</cc>` ends
//! the span. An opening tag with no later `</cc>` is not a tag at all, and
//! neither is a stray `</cc>` outside a span; both are kept as literal text.
//!
//! # Example
//! ```
//! use clif_text::markup::{decode, strip_tags};
//!
//! let src = r#"size: <cc format="226">12 MB</cc>"#;
//! assert_eq!(decode(src, None).unwrap(), "size: \x1b[38;5;226m12 MB\x1b[0m");
//! assert_eq!(strip_tags(src), "size: 12 MB");
//! ```

use std::fmt;

use clif_style::{FormatError, FormatSpec, Formatter};
use memchr::memmem;

/// Start of an opening tag, up to the format spec.
pub const OPEN_PREFIX: &str = "<cc format=\"";
/// End of an opening tag, right after the format spec.
pub const OPEN_SUFFIX: &str = "\">";
/// Closing tag.
pub const CLOSE_TAG: &str = "</cc>";

/// Errors that can occur while decoding markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// A span carries a spec the formatter rejects.
    InvalidFormat {
        spec: String,
        position: usize,
        source: FormatError,
    },
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat {
                spec,
                position,
                source,
            } => write!(f, "invalid format \"{spec}\" at byte {position}: {source}"),
        }
    }
}

impl std::error::Error for MarkupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidFormat { source, .. } => Some(source),
        }
    }
}

/// One lexical unit of a markup string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupToken<'a> {
    /// Visible text.
    Text(&'a str),
    /// Opening tag. `tag` is the full `<cc format="...">` slice.
    Open {
        spec: &'a str,
        tag: &'a str,
        position: usize,
    },
    /// `</cc>` ending the current span.
    Close,
}

/// Whether `text` could contain a span (cheap pre-check).
#[must_use]
pub fn has_markup(text: &str) -> bool {
    memmem::find(text.as_bytes(), OPEN_PREFIX.as_bytes()).is_some()
}

/// Whether `text` contains at least one complete `<cc format="...">...</cc>` span.
///
/// Unlike [`has_markup`] this runs the lexer, so stray or unclosed tags do
/// not count.
#[must_use]
pub fn has_spans(text: &str) -> bool {
    has_markup(text)
        && tokenize(text)
            .iter()
            .any(|token| matches!(token, MarkupToken::Open { .. }))
}

/// Split `text` into tokens.
///
/// Every `Open` in the result is followed, eventually, by exactly one
/// `Close`, with only `Text` in between. Adjacent literal text is merged.
#[must_use]
pub fn tokenize(text: &str) -> Vec<MarkupToken<'_>> {
    let bytes = text.as_bytes();
    let close_finder = memmem::Finder::new(CLOSE_TAG.as_bytes());
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;
    let mut in_span = false;

    while let Some(offset) = memchr::memchr(b'<', &bytes[cursor..]) {
        let at = cursor + offset;
        let rest = &text[at..];

        if in_span {
            if rest.starts_with(CLOSE_TAG) {
                push_text(&mut tokens, &text[text_start..at]);
                tokens.push(MarkupToken::Close);
                in_span = false;
                cursor = at + CLOSE_TAG.len();
                text_start = cursor;
                continue;
            }
        } else if let Some((spec, tag_len)) = opening_tag(rest) {
            let body_start = at + tag_len;
            if close_finder.find(&bytes[body_start..]).is_some() {
                push_text(&mut tokens, &text[text_start..at]);
                tokens.push(MarkupToken::Open {
                    spec,
                    tag: &text[at..body_start],
                    position: at,
                });
                in_span = true;
                cursor = body_start;
                text_start = cursor;
                continue;
            }
        }
        cursor = at + 1;
    }

    push_text(&mut tokens, &text[text_start..]);
    tokens
}

/// Parse `<cc format="SPEC">` at the start of `rest`, returning the format spec and
/// the tag length. The format spec may not span lines.
fn opening_tag(rest: &str) -> Option<(&str, usize)> {
    let after_prefix = rest.strip_prefix(OPEN_PREFIX)?;
    let spec_len = memmem::find(after_prefix.as_bytes(), OPEN_SUFFIX.as_bytes())?;
    let spec = &after_prefix[..spec_len];
    if spec.contains('\n') {
        return None;
    }
    Some((spec, OPEN_PREFIX.len() + spec_len + OPEN_SUFFIX.len()))
}

fn push_text<'a>(tokens: &mut Vec<MarkupToken<'a>>, text: &'a str) {
    if !text.is_empty() {
        tokens.push(MarkupToken::Text(text));
    }
}

/// Decode markup into ANSI-styled text.
///
/// Without any span, `fallback` (when given) styles the whole string;
/// otherwise the string comes back unchanged.
pub fn decode(text: &str, fallback: Option<&FormatSpec>) -> Result<String, MarkupError> {
    decode_with(&Formatter::ansi(), text, fallback)
}

/// [`decode`] with an explicit formatter (plain formatters drop all styling).
pub fn decode_with(
    formatter: &Formatter,
    text: &str,
    fallback: Option<&FormatSpec>,
) -> Result<String, MarkupError> {
    if !has_spans(text) {
        return Ok(match fallback {
            Some(spec) => formatter.format(spec, text),
            None => text.to_string(),
        });
    }

    let mut out = String::with_capacity(text.len() + 16);
    let mut span: Option<(FormatSpec, String)> = None;
    for token in tokenize(text) {
        match token {
            MarkupToken::Text(run) => match span.as_mut() {
                Some((_, content)) => content.push_str(run),
                None => out.push_str(run),
            },
            MarkupToken::Open { spec, position, .. } => {
                let parsed = FormatSpec::parse(spec).map_err(|source| {
                    MarkupError::InvalidFormat {
                        spec: spec.to_string(),
                        position,
                        source,
                    }
                })?;
                span = Some((parsed, String::new()));
            }
            MarkupToken::Close => {
                if let Some((spec, content)) = span.take() {
                    if !content.is_empty() {
                        out.push_str(&formatter.format(&spec, &content));
                    }
                }
            }
        }
    }
    Ok(out)
}

/// Remove markup delimiters, keeping enclosed text.
///
/// Removes every `</cc>` and every `<cc` followed by `>` or whitespace up to
/// the next `>`, including malformed tags such as `<cc>` or `<cc bold>`. Used
/// to measure how wide a string will be on screen.
#[must_use]
pub fn strip_tags(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut cursor = 0;

    while let Some(offset) = memchr::memchr(b'<', &bytes[cursor..]) {
        let at = cursor + offset;
        let rest = &text[at..];
        let tag_len = if rest.starts_with(CLOSE_TAG) {
            Some(CLOSE_TAG.len())
        } else {
            rest.strip_prefix("<cc").and_then(|after| {
                let next = after.chars().next()?;
                if next == '>' {
                    Some(4)
                } else if next.is_whitespace() {
                    memchr::memchr(b'>', after.as_bytes()).map(|end| 3 + end + 1)
                } else {
                    None
                }
            })
        };
        match tag_len {
            Some(len) => {
                out.push_str(&text[copied..at]);
                cursor = at + len;
                copied = cursor;
            }
            None => cursor = at + 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Visible text of `text` as it will be displayed after [`decode`].
///
/// Unlike [`strip_tags`], literal (unmatched) tags are kept.
#[must_use]
pub fn visible_text(text: &str) -> String {
    tokenize(text)
        .into_iter()
        .filter_map(|token| match token {
            MarkupToken::Text(run) => Some(run),
            _ => None,
        })
        .collect()
}
