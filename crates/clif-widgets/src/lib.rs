#![forbid(unsafe_code)]

//! Widgets: bordered boxes, the loading bar and report boxes.
//!
//! Widgets are plain values owned by the caller and write to any
//! [`std::io::Write`], so several boxes or bars can coexist and tests can
//! capture output in a `Vec<u8>`.

pub mod border;
pub mod boxed;
pub mod error;
pub mod loading_bar;
pub mod report;

pub use border::{Alignment, BorderSet};
pub use boxed::{BoxRenderer, BoxStyle, LineColor, measure_required_width};
pub use error::RenderError;
pub use loading_bar::{LoadingBar, LoadingBarStyle};
