#![forbid(unsafe_code)]

//! Style: format specs, the ANSI/plain formatter and raw escape helpers.

pub mod ansi;
pub mod formatter;
pub mod spec;

pub use formatter::{Formatter, format};
pub use spec::{Attr, FormatError, FormatSpec, StyleToken};
