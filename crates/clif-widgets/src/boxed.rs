#![forbid(unsafe_code)]

//! Bordered message boxes, drawn one row at a time.
//!
//! A [`BoxRenderer`] writes straight to its output as each operation is
//! called, so a long-running script can open a box, print lines as work
//! progresses, and close it at the end:
//!
//! ```text
//! ╭─[ Error ]────────────╮
//! │ short text           │
//! ├─[ details ]──────────┤
//! │ disk full            │
//! ╰──────────────────────╯
//! ```
//!
//! The box is `content_width + 4` cells wide. Lines are wrapped at
//! `terminal_width - 4` and padded to `content_width` by their visible width,
//! so markup and escape codes never shift the right border.
//!
//! # Example
//! ```
//! use clif_style::{FormatSpec, Formatter};
//! use clif_widgets::boxed::{BoxRenderer, LineColor};
//!
//! let mut boxed = BoxRenderer::new(Vec::new()).with_formatter(Formatter::plain());
//! boxed.init(10, 80, FormatSpec::fg(196)).unwrap();
//! boxed.header(Some("Hi"), None).unwrap();
//! boxed.line("hello", &LineColor::Markup).unwrap();
//! boxed.footer(None, None).unwrap();
//!
//! let out = String::from_utf8(boxed.into_inner()).unwrap();
//! assert_eq!(out, "╭─[ Hi ]─────╮\n│ hello      │\n╰────────────╯\n");
//! ```

use std::io::Write;

use clif_style::{FormatSpec, Formatter};
use clif_text::{
    decode_with, display_width, expand_controls, has_spans, truncate_to_width,
    truncate_with_ellipsis, visible_text, visible_width, wrap_markup,
};

use crate::border::{Alignment, BorderSet};
use crate::error::RenderError;

/// Cells taken by `│ ` and ` │`.
pub const CHROME_WIDTH: usize = 4;

/// Smallest terminal a box can be drawn in.
pub const MIN_TERMINAL_WIDTH: usize = CHROME_WIDTH + 1;

/// Marks a label cut short.
const ELLIPSIS: &str = "…";

/// Visual options for a box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxStyle {
    /// Border characters.
    pub border_set: BorderSet,
    /// Placement of the header title.
    pub header_alignment: Alignment,
    /// Placement of divider labels.
    pub divider_alignment: Alignment,
    /// Placement of footer labels.
    pub footer_alignment: Alignment,
    /// Label color used when an operation does not pass one.
    /// `None` reuses the border color.
    pub label_spec: Option<FormatSpec>,
}

impl BoxStyle {
    /// Default style: rounded corners, labels left, footer label right.
    #[must_use]
    pub fn new() -> Self {
        Self {
            border_set: BorderSet::ROUNDED,
            header_alignment: Alignment::Left,
            divider_alignment: Alignment::Left,
            footer_alignment: Alignment::Right,
            label_spec: None,
        }
    }

    /// Set the border characters.
    #[must_use]
    pub fn border_set(mut self, border_set: BorderSet) -> Self {
        self.border_set = border_set;
        self
    }

    /// Set the header title alignment.
    #[must_use]
    pub fn header_alignment(mut self, alignment: Alignment) -> Self {
        self.header_alignment = alignment;
        self
    }

    /// Set the divider label alignment.
    #[must_use]
    pub fn divider_alignment(mut self, alignment: Alignment) -> Self {
        self.divider_alignment = alignment;
        self
    }

    /// Set the footer label alignment.
    #[must_use]
    pub fn footer_alignment(mut self, alignment: Alignment) -> Self {
        self.footer_alignment = alignment;
        self
    }

    /// Set the default label color.
    #[must_use]
    pub fn label_spec(mut self, spec: FormatSpec) -> Self {
        self.label_spec = Some(spec);
        self
    }
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// How a box line is colored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineColor {
    /// Color the whole line, unless it carries its own markup.
    Spec(FormatSpec),
    /// The text brings its own markup; decode it as is.
    Markup,
}

impl From<FormatSpec> for LineColor {
    fn from(spec: FormatSpec) -> Self {
        Self::Spec(spec)
    }
}

impl From<u8> for LineColor {
    fn from(index: u8) -> Self {
        Self::Spec(FormatSpec::fg(index))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BoxState {
    content_width: usize,
    terminal_width: usize,
    border: FormatSpec,
}

/// Stateful box writer.
#[derive(Debug)]
pub struct BoxRenderer<W: Write> {
    out: W,
    formatter: Formatter,
    style: BoxStyle,
    state: Option<BoxState>,
}

impl<W: Write> BoxRenderer<W> {
    /// Create a renderer writing ANSI output to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            formatter: Formatter::ansi(),
            style: BoxStyle::default(),
            state: None,
        }
    }

    /// Use `formatter` for every styled piece.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Use `style` for borders and labels.
    #[must_use]
    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Start a new box, replacing any previous one.
    ///
    /// `content_width` is clamped to `terminal_width - 4`. Fails with
    /// [`RenderError::InvalidWidth`] when the terminal has fewer than
    /// [`MIN_TERMINAL_WIDTH`] columns.
    pub fn init(
        &mut self,
        content_width: usize,
        terminal_width: usize,
        border: FormatSpec,
    ) -> Result<(), RenderError> {
        if terminal_width < MIN_TERMINAL_WIDTH {
            self.state = None;
            return Err(RenderError::InvalidWidth {
                content_width,
                terminal_width,
            });
        }
        let clamped = content_width.min(terminal_width - CHROME_WIDTH);
        clif_core::debug!(
            content_width = clamped,
            requested = content_width,
            terminal_width,
            "box init"
        );
        self.state = Some(BoxState {
            content_width: clamped,
            terminal_width,
            border,
        });
        Ok(())
    }

    /// Whether [`init`](Self::init) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Interior width of the current box.
    pub fn content_width(&self) -> Option<usize> {
        self.state.as_ref().map(|state| state.content_width)
    }

    /// Top border, with an optional title.
    pub fn header(
        &mut self,
        title: Option<&str>,
        title_color: Option<&FormatSpec>,
    ) -> Result<(), RenderError> {
        let set = self.style.border_set;
        let align = self.style.header_alignment;
        self.border_row(set.top_left, set.top_right, title, title_color, align)
    }

    /// Middle separator, with an optional label.
    pub fn divider(
        &mut self,
        label: Option<&str>,
        color: Option<&FormatSpec>,
    ) -> Result<(), RenderError> {
        let set = self.style.border_set;
        let align = self.style.divider_alignment;
        self.border_row(set.tee_left, set.tee_right, label, color, align)
    }

    /// Bottom border, with an optional label.
    pub fn footer(
        &mut self,
        label: Option<&str>,
        color: Option<&FormatSpec>,
    ) -> Result<(), RenderError> {
        let set = self.style.border_set;
        let align = self.style.footer_alignment;
        self.border_row(set.bottom_left, set.bottom_right, label, color, align)
    }

    /// Content rows for `text`, wrapped and padded.
    ///
    /// A [`LineColor::Spec`] colors every row only when `text` has no spans of
    /// its own, so a line is colored the same way wherever it wraps. Tabs are
    /// expanded and other control characters dropped before measuring.
    pub fn line(&mut self, text: &str, color: &LineColor) -> Result<(), RenderError> {
        let state = self.state.as_ref().ok_or(RenderError::NotInitialized)?;
        let vertical = self.style.border_set.vertical.to_string();
        let edge = self.formatter.format(&state.border, &vertical);
        let text = expand_controls(text);
        let fallback = match color {
            LineColor::Spec(spec) if !has_spans(&text) => Some(spec),
            LineColor::Spec(_) | LineColor::Markup => None,
        };

        let mut rows = String::new();
        for wrapped in wrap_markup(&text, state.terminal_width - CHROME_WIDTH) {
            let body = decode_with(&self.formatter, &wrapped.decorated, fallback)?;
            let pad = state.content_width.saturating_sub(wrapped.width());
            rows.push_str(&edge);
            rows.push(' ');
            rows.push_str(&body);
            rows.extend(std::iter::repeat_n(' ', pad));
            rows.push(' ');
            rows.push_str(&edge);
            rows.push('\n');
        }
        self.out.write_all(rows.as_bytes())?;
        Ok(())
    }

    /// One content row per item of `lines`.
    pub fn lines<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        color: &LineColor,
    ) -> Result<(), RenderError> {
        lines
            .iter()
            .try_for_each(|line| self.line(line.as_ref(), color))
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), RenderError> {
        self.out.flush()?;
        Ok(())
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn border_row(
        &mut self,
        left: char,
        right: char,
        label: Option<&str>,
        label_color: Option<&FormatSpec>,
        align: Alignment,
    ) -> Result<(), RenderError> {
        let state = self.state.as_ref().ok_or(RenderError::NotInitialized)?;
        let horizontal = self.style.border_set.horizontal;
        let run = state.content_width + 2;
        // `[ ` + label + ` ]` plus one fill cell on each side.
        let max_label = state.content_width.saturating_sub(CHROME_WIDTH);

        let label_spec = label_color
            .or(self.style.label_spec.as_ref())
            .unwrap_or(&state.border);
        let label = match label.filter(|label| !label.is_empty() && max_label > 0) {
            Some(label) => Some(self.fit_label(label, max_label, label_spec)?),
            None => None,
        };

        let mut row = String::new();
        match label {
            Some((label, label_width)) => {
                let spare = run - (label_width + CHROME_WIDTH);
                let (before, after) = align.split(spare);

                let mut lead = String::from(left);
                lead.extend(std::iter::repeat_n(horizontal, before));
                lead.push_str("[ ");
                let mut tail = String::from(" ]");
                tail.extend(std::iter::repeat_n(horizontal, after));
                tail.push(right);

                row.push_str(&self.formatter.format(&state.border, &lead));
                row.push_str(&label);
                row.push_str(&self.formatter.format(&state.border, &tail));
            }
            None => {
                let mut plain = String::from(left);
                plain.extend(std::iter::repeat_n(horizontal, run));
                plain.push(right);
                row.push_str(&self.formatter.format(&state.border, &plain));
            }
        }
        row.push('\n');
        self.out.write_all(row.as_bytes())?;
        Ok(())
    }

    /// Render `label` into at most `max_width` cells, returning it with its width.
    ///
    /// Labels with spans are decoded as markup and cut on the visible text;
    /// others are colored whole with `spec`.
    fn fit_label(
        &self,
        label: &str,
        max_width: usize,
        spec: &FormatSpec,
    ) -> Result<(String, usize), RenderError> {
        if !has_spans(label) {
            let fitted = truncate_with_ellipsis(label, max_width, ELLIPSIS);
            let width = display_width(&fitted);
            return Ok((self.formatter.format(spec, &fitted), width));
        }

        let width = display_width(&visible_text(label));
        if width <= max_width {
            return Ok((decode_with(&self.formatter, label, None)?, width));
        }

        let keep = max_width.saturating_sub(display_width(ELLIPSIS));
        let head = wrap_markup(label, keep).into_iter().next();
        match head {
            Some(head) if keep > 0 => {
                let mut decorated = decode_with(&self.formatter, &head.decorated, None)?;
                decorated.push_str(ELLIPSIS);
                Ok((decorated, head.width() + display_width(ELLIPSIS)))
            }
            _ => {
                let fitted = truncate_to_width(&visible_text(label), max_width);
                let width = display_width(&fitted);
                Ok((self.formatter.format(spec, &fitted), width))
            }
        }
    }
}

/// Smallest content width that fits `title` and every line of `lines`.
///
/// Each item of `lines` is split on `\n` and measured after
/// [`expand_controls`], as [`BoxRenderer::line`] draws it. The title needs
/// four extra cells for its `[ ` ` ]` decoration. The result is capped at
/// `terminal_width - 4`.
#[must_use]
pub fn measure_required_width<S: AsRef<str>>(
    terminal_width: usize,
    title: Option<&str>,
    lines: &[S],
) -> usize {
    let title_width = title
        .filter(|title| !title.is_empty())
        .map_or(0, |title| visible_width(title) + CHROME_WIDTH);
    let line_width = lines
        .iter()
        .filter_map(|line| {
            expand_controls(line.as_ref())
                .split('\n')
                .map(visible_width)
                .max()
        })
        .max()
        .unwrap_or(0);
    title_width
        .max(line_width)
        .min(terminal_width.saturating_sub(CHROME_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_box(content_width: usize, terminal_width: usize) -> BoxRenderer<Vec<u8>> {
        let mut boxed = BoxRenderer::new(Vec::new()).with_formatter(Formatter::plain());
        boxed
            .init(content_width, terminal_width, FormatSpec::fg(33))
            .unwrap();
        boxed
    }

    fn output(boxed: BoxRenderer<Vec<u8>>) -> String {
        String::from_utf8(boxed.into_inner()).unwrap()
    }

    #[test]
    fn operations_before_init_fail() {
        let mut boxed = BoxRenderer::new(Vec::new());
        assert!(matches!(
            boxed.header(None, None),
            Err(RenderError::NotInitialized)
        ));
        assert!(matches!(
            boxed.line("x", &LineColor::Markup),
            Err(RenderError::NotInitialized)
        ));
        assert!(boxed.get_ref().is_empty());
    }

    #[test]
    fn narrow_terminal_rejected() {
        let mut boxed = BoxRenderer::new(Vec::new());
        let err = boxed.init(10, 4, FormatSpec::Reset).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidWidth {
                content_width: 10,
                terminal_width: 4
            }
        ));
        assert!(!boxed.is_initialized());
    }

    #[test]
    fn content_width_clamped_to_terminal() {
        let boxed = plain_box(100, 30);
        assert_eq!(boxed.content_width(), Some(26));
    }

    #[test]
    fn plain_borders() {
        let mut boxed = plain_box(4, 80);
        boxed.header(None, None).unwrap();
        boxed.divider(None, None).unwrap();
        boxed.footer(None, None).unwrap();
        assert_eq!(output(boxed), "╭──────╮\n├──────┤\n╰──────╯\n");
    }

    #[test]
    fn footer_label_is_right_aligned() {
        let mut boxed = plain_box(12, 80);
        boxed.footer(Some("3 rows"), None).unwrap();
        assert_eq!(output(boxed), "╰───[ 3 rows ]─╯\n");
    }

    #[test]
    fn centered_divider() {
        let style = BoxStyle::new().divider_alignment(Alignment::Center);
        let mut boxed = BoxRenderer::new(Vec::new())
            .with_formatter(Formatter::plain())
            .with_style(style);
        boxed.init(9, 80, FormatSpec::Reset).unwrap();
        boxed.divider(Some("ab"), None).unwrap();
        assert_eq!(output(boxed), "├──[ ab ]───┤\n");
    }

    #[test]
    fn long_title_truncated() {
        let mut boxed = plain_box(10, 80);
        boxed.header(Some("a very long title"), None).unwrap();
        assert_eq!(output(boxed), "╭─[ a ver… ]─╮\n");
    }

    #[test]
    fn title_dropped_when_no_room() {
        let mut boxed = plain_box(4, 80);
        boxed.header(Some("x"), None).unwrap();
        assert_eq!(output(boxed), "╭──────╮\n");
    }

    #[test]
    fn ascii_border_set() {
        let mut boxed = BoxRenderer::new(Vec::new())
            .with_formatter(Formatter::plain())
            .with_style(BoxStyle::new().border_set(BorderSet::ASCII));
        boxed.init(3, 80, FormatSpec::Reset).unwrap();
        boxed.header(None, None).unwrap();
        boxed.line("ok", &LineColor::Markup).unwrap();
        boxed.footer(None, None).unwrap();
        assert_eq!(output(boxed), "+-----+\n| ok  |\n+-----+\n");
    }

    #[test]
    fn padding_uses_visible_width() {
        let mut boxed = plain_box(8, 80);
        boxed
            .line(r#"<cc format="196">red</cc> ok"#, &LineColor::Markup)
            .unwrap();
        assert_eq!(output(boxed), "│ red ok   │\n");
    }

    #[test]
    fn spec_color_skips_every_row_of_a_marked_line() {
        let mut boxed = BoxRenderer::new(Vec::new());
        boxed.init(8, 12, FormatSpec::Reset).unwrap();
        boxed
            .line(
                r#"<cc format="46">aaaa</cc> tail text here"#,
                &LineColor::from(250),
            )
            .unwrap();
        let out = output(boxed);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(!out.contains("38;5;250"));
        assert_eq!(rows[0], "\x1b[0m│ \x1b[38;5;46maaaa\x1b[0m tai \x1b[0m│");
        assert_eq!(rows[1], "\x1b[0m│ l text h \x1b[0m│");
        assert_eq!(rows[2], "\x1b[0m│ ere      \x1b[0m│");
    }

    #[test]
    fn spec_color_reaches_every_row_of_an_unmarked_line() {
        let mut boxed = BoxRenderer::new(Vec::new());
        boxed.init(8, 12, FormatSpec::Reset).unwrap();
        boxed.line("abcdefghij", &LineColor::from(250)).unwrap();
        let out = output(boxed);
        assert_eq!(out.matches("\x1b[38;5;250m").count(), 2);
        assert!(out.contains("\x1b[38;5;250mij\x1b[0m"));
    }

    #[test]
    fn tabs_expand_before_padding() {
        let mut boxed = plain_box(8, 80);
        boxed.line("a\tb\r", &LineColor::Markup).unwrap();
        assert_eq!(output(boxed), "│ a    b   │\n");
        assert_eq!(measure_required_width::<&str>(80, None, &["a\tb"]), 6);
    }

    #[test]
    fn marked_title_decoded_not_printed_raw() {
        let mut boxed = BoxRenderer::new(Vec::new());
        boxed.init(20, 80, FormatSpec::fg(33)).unwrap();
        boxed
            .header(Some(r#"<cc format="226">Job</cc> 7"#), None)
            .unwrap();
        let out = output(boxed);
        assert!(!out.contains("<cc"));
        assert!(out.contains("\x1b[38;5;226mJob\x1b[0m 7"));
        assert_eq!(
            display_width(&clif_style::ansi::strip_ansi(out.trim_end())),
            24
        );
    }

    #[test]
    fn marked_title_truncated_on_visible_text() {
        let mut boxed = plain_box(10, 80);
        boxed
            .header(Some(r#"<cc format="1">a very long</cc> title"#), None)
            .unwrap();
        assert_eq!(output(boxed), "╭─[ a ver… ]─╮\n");
    }

    #[test]
    fn ansi_line_colors_whole_line() {
        let mut boxed = BoxRenderer::new(Vec::new());
        boxed.init(2, 80, FormatSpec::Reset).unwrap();
        boxed.line("hi", &LineColor::from(46)).unwrap();
        assert_eq!(
            output(boxed),
            "\x1b[0m│ \x1b[38;5;46mhi\x1b[0m \x1b[0m│\n"
        );
    }

    #[test]
    fn invalid_markup_is_an_error() {
        let mut boxed = plain_box(10, 80);
        let err = boxed
            .line(r#"<cc format="shiny">x</cc>"#, &LineColor::Markup)
            .unwrap_err();
        assert!(matches!(err, RenderError::Markup(_)));
    }

    #[test]
    fn reinit_replaces_state() {
        let mut boxed = plain_box(4, 80);
        boxed.init(2, 80, FormatSpec::Reset).unwrap();
        boxed.header(None, None).unwrap();
        assert_eq!(output(boxed), "╭────╮\n");
    }

    #[test]
    fn measure_uses_widest_piece() {
        assert_eq!(measure_required_width::<&str>(80, Some("Title"), &[]), 9);
        assert_eq!(
            measure_required_width(80, Some("T"), &["short", "a\nmuch longer line"]),
            16
        );
        assert_eq!(measure_required_width(20, None, &["x".repeat(50)]), 16);
        assert_eq!(measure_required_width::<&str>(80, None, &[]), 0);
    }

    #[test]
    fn measure_ignores_markup() {
        assert_eq!(
            measure_required_width(80, None, &[r#"<cc format="1">abc</cc>"#]),
            3
        );
    }
}
