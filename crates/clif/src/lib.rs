#![forbid(unsafe_code)]

//! clif public facade crate.
//!
//! Re-exports the pieces a command-line script needs: the color formatter,
//! inline markup, boxed messages, the loading bar and script arguments.
//!
//! # Example
//! ```
//! use clif::prelude::*;
//!
//! fn report() -> clif::Result<String> {
//!     let mut boxed = BoxRenderer::new(Vec::new()).with_formatter(Formatter::plain());
//!     boxed.init(12, 80, FormatSpec::fg(196))?;
//!     boxed.header(Some("Sync"), None)?;
//!     boxed.line(r#"<cc format="46">3 tables</cc>"#, &LineColor::Markup)?;
//!     boxed.footer(None, None)?;
//!     Ok(String::from_utf8_lossy(&boxed.into_inner()).into_owned())
//! }
//!
//! assert!(report().unwrap().contains("│ 3 tables     │"));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use clif_core::args::ScriptArgs;
pub use clif_core::env::{EnvInputs, OutputEnv};
pub use clif_core::prompt::{confirm, confirm_stdio};
pub use clif_core::terminal::columns;

// --- Style re-exports ------------------------------------------------------

pub use clif_style::{Attr, FormatError, FormatSpec, Formatter, StyleToken, format};

// --- Text re-exports -------------------------------------------------------

pub use clif_text::humanize::{human_filesize, plural_form};
pub use clif_text::{MarkupError, WrappedLine, decode, strip_tags, visible_width, wrap_markup};

// --- Widget re-exports -----------------------------------------------------

pub use clif_widgets::report;
pub use clif_widgets::{
    Alignment, BorderSet, BoxRenderer, BoxStyle, LineColor, LoadingBar, LoadingBarStyle,
    RenderError, measure_required_width,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for clif scripts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while writing output or reading input.
    Io(std::io::Error),
    /// A format spec was rejected.
    Format(FormatError),
    /// Inline markup could not be decoded.
    Markup(MarkupError),
    /// A widget could not be drawn.
    Render(RenderError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Format(err) => write!(f, "{err}"),
            Self::Markup(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => err.source(),
            Self::Format(err) => err.source(),
            Self::Markup(err) => err.source(),
            Self::Render(err) => err.source(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

impl From<MarkupError> for Error {
    fn from(err: MarkupError) -> Self {
        Self::Markup(err)
    }
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        Self::Render(err)
    }
}

/// Standard result type for clif APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BoxRenderer, Error, FormatSpec, Formatter, LineColor, LoadingBar, OutputEnv, Result,
        ScriptArgs, decode, format, report,
    };
}

pub use clif_core as core;
pub use clif_style as style;
pub use clif_text as text;
pub use clif_widgets as widgets;
