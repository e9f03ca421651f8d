#![forbid(unsafe_code)]

use std::fmt;
use std::io;

use clif_style::FormatError;
use clif_text::MarkupError;

/// Errors raised while rendering a widget.
#[derive(Debug)]
pub enum RenderError {
    /// A box operation was called before `init`.
    NotInitialized,
    /// The terminal is too narrow for box chrome.
    InvalidWidth {
        content_width: usize,
        terminal_width: usize,
    },
    /// A line carried invalid markup.
    Markup(MarkupError),
    /// A color spec was rejected.
    Format(FormatError),
    /// Writing to the output failed.
    Io(io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "box renderer used before init"),
            Self::InvalidWidth {
                content_width,
                terminal_width,
            } => write!(
                f,
                "terminal width {terminal_width} too narrow for a box (content width {content_width})"
            ),
            Self::Markup(err) => write!(f, "markup error: {err}"),
            Self::Format(err) => write!(f, "format error: {err}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Markup(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::NotInitialized | Self::InvalidWidth { .. } => None,
        }
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<MarkupError> for RenderError {
    fn from(err: MarkupError) -> Self {
        Self::Markup(err)
    }
}

impl From<FormatError> for RenderError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}
