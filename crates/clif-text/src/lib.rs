#![forbid(unsafe_code)]

//! Text: inline color markup, markup-aware wrapping and width measurement.
//!
//! # Role in clif
//! `clif-text` sits between the raw strings callers hand to widgets and the
//! escape sequences written to the terminal. Widgets wrap with
//! [`wrap_markup`], pad by [`WrappedLine::plain`] width, and decode
//! [`WrappedLine::decorated`] through a [`clif_style::Formatter`].
//!
//! # Example
//! ```
//! use clif_text::{decode, wrap_markup};
//!
//! let lines = wrap_markup(r#"disk <cc format="196">full</cc>"#, 7);
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[1].plain, "ll");
//! assert_eq!(decode(&lines[1].decorated, None).unwrap(), "\x1b[38;5;196mll\x1b[0m");
//! ```

pub mod humanize;
pub mod markup;
pub mod width;
pub mod wrap;

pub use markup::{
    MarkupError, MarkupToken, decode, decode_with, has_markup, has_spans, strip_tags, tokenize,
    visible_text,
};
pub use width::{
    TAB_WIDTH, display_width, expand_controls, truncate_to_width, truncate_with_ellipsis,
    visible_width,
};
pub use wrap::{WrappedLine, wrap_markup};
