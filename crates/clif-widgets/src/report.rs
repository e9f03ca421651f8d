#![forbid(unsafe_code)]

//! Ready-made report boxes: startup banner, fatal error, traceback.
//!
//! Every function sizes the box from its inputs with
//! [`measure_required_width`], re-initializes the renderer it is given, and
//! draws a complete box.

use std::io::{self, Write};

use clif_style::{Attr, FormatSpec, Formatter, StyleToken};

use crate::boxed::{BoxRenderer, LineColor, measure_required_width};
use crate::error::RenderError;

/// Title color of banners and the `motd` line.
pub const TITLE_COLOR: u8 = 226;
/// Banner border color.
pub const BANNER_BORDER: u8 = 33;
/// Border and detail color of error boxes.
pub const ERROR_COLOR: u8 = 196;
/// Color of traceback frames.
pub const FRAME_COLOR: u8 = 250;
/// Title used when a fatal error has none.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// One-line startup message: `Script initialized: <title>`.
pub fn motd<W: Write>(out: &mut W, formatter: &Formatter, title: &str) -> io::Result<()> {
    writeln!(
        out,
        "Script initialized: {}",
        formatter.format(&FormatSpec::fg(TITLE_COLOR), title)
    )
}

/// Boxed startup banner: the title in the header, one row per description
/// line (markup allowed).
pub fn banner<W: Write, S: AsRef<str>>(
    renderer: &mut BoxRenderer<W>,
    terminal_width: usize,
    title: &str,
    description: &[S],
) -> Result<(), RenderError> {
    let width = measure_required_width(terminal_width, Some(title), description);
    renderer.init(width, terminal_width, FormatSpec::fg(BANNER_BORDER))?;
    renderer.header(Some(title), Some(&FormatSpec::fg(TITLE_COLOR)))?;
    renderer.lines(description, &LineColor::Markup)?;
    renderer.footer(None, None)?;
    renderer.flush()
}

/// Red error box. An empty `title` becomes [`UNKNOWN_ERROR`].
pub fn fatal_error<W: Write, S: AsRef<str>>(
    renderer: &mut BoxRenderer<W>,
    terminal_width: usize,
    title: &str,
    detail: &[S],
) -> Result<(), RenderError> {
    let title = if title.trim().is_empty() {
        UNKNOWN_ERROR
    } else {
        title
    };
    let width = measure_required_width(terminal_width, Some(title), detail);
    let title_spec = FormatSpec::fg(ERROR_COLOR).with(StyleToken::Attr(Attr::Bold));

    renderer.init(width, terminal_width, FormatSpec::fg(ERROR_COLOR))?;
    renderer.header(Some(title), Some(&title_spec))?;
    renderer.lines(detail, &LineColor::from(ERROR_COLOR))?;
    renderer.footer(None, None)?;
    renderer.flush()
}

/// Stack trace box: one row per frame, footer labelled with the frame count.
pub fn traceback<W: Write, S: AsRef<str>>(
    renderer: &mut BoxRenderer<W>,
    terminal_width: usize,
    title: &str,
    frames: &[S],
) -> Result<(), RenderError> {
    let count = frame_count_label(frames.len());
    let width = measure_required_width(terminal_width, Some(title), frames)
        .max(measure_required_width::<&str>(terminal_width, Some(&count), &[]));

    renderer.init(width, terminal_width, FormatSpec::fg(ERROR_COLOR))?;
    renderer.header(Some(title), Some(&FormatSpec::from(Attr::Bold)))?;
    renderer.lines(frames, &LineColor::from(FRAME_COLOR))?;
    renderer.footer(Some(&count), Some(&FormatSpec::fg(FRAME_COLOR)))?;
    renderer.flush()
}

fn frame_count_label(count: usize) -> String {
    if count == 1 {
        "1 frame".to_string()
    } else {
        format!("{count} frames")
    }
}

/// Error box for `err` and its source chain, one row per cause.
pub fn error_report<W: Write>(
    renderer: &mut BoxRenderer<W>,
    terminal_width: usize,
    err: &(dyn std::error::Error + 'static),
) -> Result<(), RenderError> {
    let mut detail = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push(format!("caused by: {cause}"));
        source = cause.source();
    }
    fatal_error(renderer, terminal_width, "Fatal error", &detail)
}

/// Print an error box for `err` on stderr and exit with status 1.
///
/// Meant for `main`; library code should return the error instead.
pub fn exit_with_error(err: &(dyn std::error::Error + 'static)) -> ! {
    clif_core::error!(error = %err, "exiting after fatal error");
    let columns = clif_core::terminal::columns();
    let mut renderer =
        BoxRenderer::new(io::stderr()).with_formatter(Formatter::stderr_from_env());
    if error_report(&mut renderer, columns, err).is_err() {
        // stderr is unusable or too narrow for a box; fall back to one line.
        eprintln!("fatal error: {err}");
    }
    std::process::exit(1)
}
