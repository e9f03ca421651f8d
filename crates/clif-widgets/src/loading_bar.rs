#![forbid(unsafe_code)]

//! In-place loading bar.
//!
//! Each [`LoadingBar::tick`] redraws one line of the form
//!
//! ```text
//! Importing orders
//!  42% [#############...................]
//! ```
//!
//! The label sits on its own line above the bar and is rewritten in place
//! (cursor up, blank, print) when it changes. Passing a finish message erases
//! the bar, prints the message once and resets the widget, so the next tick
//! starts a fresh label line.
//!
//! When redraws are not possible (output is not a terminal, or a scheduled
//! run) only label changes and the finish message are printed, one per line.

use std::io::{self, Write};

use clif_core::OutputEnv;
use clif_style::ansi::{blank_line, cha, cuu};

/// Cells taken by the percentage (`100%` or `42% `) and the two brackets.
const BAR_CHROME: usize = 6;

/// Visual options for a loading bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingBarStyle {
    /// Opening and closing bracket.
    pub brackets: [char; 2],
    /// Symbol for completed cells.
    pub fill: char,
    /// Symbol for remaining cells.
    pub empty: char,
    /// Total bar line width; `None` uses the terminal width.
    pub width: Option<usize>,
}

impl LoadingBarStyle {
    /// `[###...]` spanning the terminal.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            brackets: ['[', ']'],
            fill: '#',
            empty: '.',
            width: None,
        }
    }

    /// Set the brackets.
    #[must_use]
    pub const fn brackets(mut self, open: char, close: char) -> Self {
        self.brackets = [open, close];
        self
    }

    /// Set the fill symbol.
    #[must_use]
    pub const fn fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    /// Set the empty symbol.
    #[must_use]
    pub const fn empty(mut self, empty: char) -> Self {
        self.empty = empty;
        self
    }

    /// Set the bar line width.
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }
}

impl Default for LoadingBarStyle {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct BarState {
    label: String,
    label_drawn: bool,
}

/// Loading bar bound to an output.
#[derive(Debug)]
pub struct LoadingBar<W: Write> {
    out: W,
    columns: usize,
    style: LoadingBarStyle,
    live: bool,
    state: BarState,
}

impl LoadingBar<io::Stdout> {
    /// Loading bar on stdout, sized and configured from the environment.
    pub fn stdout() -> Self {
        let env = OutputEnv::detect();
        let columns = clif_core::terminal::columns_with(&env);
        Self::new(io::stdout(), columns).live(env.live_redraw())
    }
}

impl<W: Write> LoadingBar<W> {
    /// Create a live bar for a terminal `columns` wide.
    pub fn new(out: W, columns: usize) -> Self {
        Self {
            out,
            columns,
            style: LoadingBarStyle::default(),
            live: true,
            state: BarState::default(),
        }
    }

    /// Use `style` for the bar.
    #[must_use]
    pub fn with_style(mut self, style: LoadingBarStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable or disable in-place redraws.
    #[must_use]
    pub fn live(mut self, live: bool) -> Self {
        self.live = live;
        self
    }

    /// Whether a label line is on screen (between first tick and finish).
    pub fn is_drawing(&self) -> bool {
        self.state.label_drawn
    }

    /// Current label.
    pub fn label(&self) -> &str {
        &self.state.label
    }

    /// Advance the bar to `current` of `total`.
    ///
    /// A non-empty `finish` replaces the bar and label with that message and
    /// resets the widget.
    pub fn tick(
        &mut self,
        current: u64,
        total: u64,
        label: &str,
        finish: Option<&str>,
    ) -> io::Result<()> {
        if self.state.label != label {
            self.draw_label(label)?;
        }

        if let Some(message) = finish.filter(|message| !message.is_empty()) {
            return self.finish(message);
        }

        if self.live {
            let line = self.render_bar(current, total);
            write!(self.out, "\r{line}")?;
        }
        self.out.flush()
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// The bar line for `current` of `total`, without the leading `\r`.
    ///
    /// Percentage and fill are computed from scratch on every call.
    #[must_use]
    pub fn render_bar(&self, current: u64, total: u64) -> String {
        let ratio = progress_ratio(current, total);
        let percent = percent_complete(current, total);
        let bars_total = self
            .style
            .width
            .unwrap_or(self.columns)
            .saturating_sub(BAR_CHROME);
        let bars = ((ratio * bars_total as f64).round() as usize).min(bars_total);

        let mut line = format!("{percent}%");
        if percent < 100 {
            line.push(' ');
        }
        line.push(self.style.brackets[0]);
        line.extend(std::iter::repeat_n(self.style.fill, bars));
        line.extend(std::iter::repeat_n(self.style.empty, bars_total - bars));
        line.push(self.style.brackets[1]);
        line
    }

    fn draw_label(&mut self, label: &str) -> io::Result<()> {
        if self.live {
            if self.state.label_drawn {
                cha(&mut self.out, 0)?;
                cuu(&mut self.out, 1)?;
            }
            blank_line(&mut self.out, self.columns)?;
        }
        writeln!(self.out, "{label}")?;
        self.state.label = label.to_string();
        self.state.label_drawn = true;
        Ok(())
    }

    fn finish(&mut self, message: &str) -> io::Result<()> {
        if self.live {
            cha(&mut self.out, 0)?;
            cuu(&mut self.out, 1)?;
            blank_line(&mut self.out, self.columns)?;
            writeln!(self.out, "{message}")?;
            blank_line(&mut self.out, self.columns)?;
        } else {
            writeln!(self.out, "{message}")?;
        }
        clif_core::debug!(label = %self.state.label, "loading bar finished");
        self.state = BarState::default();
        self.out.flush()
    }
}

/// `ceil(100 * current / total)` in integer arithmetic, capped at 100.
#[must_use]
pub fn percent_complete(current: u64, total: u64) -> u32 {
    if total == 0 {
        return 100;
    }
    let current = u128::from(current.min(total));
    // At most 100 after the min above.
    (current * 100).div_ceil(u128::from(total)) as u32
}

/// `current / total` clamped to `[0, 1]`; an empty job counts as complete.
#[must_use]
pub fn progress_ratio(current: u64, total: u64) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (current as f64 / total as f64).clamp(0.0, 1.0)
}
