#![forbid(unsafe_code)]

//! Apply a [`FormatSpec`] to a piece of text.
//!
//! A [`Formatter`] is either ANSI (wraps text in SGR sequences) or plain
//! (returns text unchanged). Plain mode is what scheduled jobs get, so their
//! log files stay free of escape codes.

use clif_core::OutputEnv;

use crate::ansi::{SGR_RESET, sgr};
use crate::spec::{FormatError, FormatSpec};

/// Text formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Formatter {
    passthrough: bool,
}

impl Formatter {
    /// Formatter that emits ANSI SGR sequences.
    #[must_use]
    pub const fn ansi() -> Self {
        Self { passthrough: false }
    }

    /// Formatter that returns text unchanged.
    #[must_use]
    pub const fn plain() -> Self {
        Self { passthrough: true }
    }

    /// Pick ANSI or plain for a detected environment.
    #[must_use]
    pub const fn for_env(env: &OutputEnv) -> Self {
        if env.styled_output() {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    /// Pick ANSI or plain for the current process.
    pub fn from_env() -> Self {
        let formatter = Self::for_env(&OutputEnv::detect());
        clif_core::debug!(plain = formatter.passthrough, "formatter selected");
        formatter
    }

    /// Pick ANSI or plain for output written to stderr.
    #[must_use]
    pub const fn for_stderr(env: &OutputEnv) -> Self {
        if env.styled_stderr() {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    /// [`for_stderr`](Self::for_stderr) for the current process.
    pub fn stderr_from_env() -> Self {
        let formatter = Self::for_stderr(&OutputEnv::detect());
        clif_core::debug!(plain = formatter.passthrough, "stderr formatter selected");
        formatter
    }

    /// Whether this formatter drops styling.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.passthrough
    }

    /// Style `text` with `spec`.
    ///
    /// - plain: `text`
    /// - reset spec: `ESC[0m` + `text`
    /// - otherwise: `ESC[<params>m` + `text` + `ESC[0m` (no trailing reset when
    ///   `text` is empty)
    #[must_use]
    pub fn format(&self, spec: &FormatSpec, text: &str) -> String {
        if self.passthrough {
            return text.to_string();
        }
        match spec {
            FormatSpec::Reset => {
                let mut out = String::with_capacity(SGR_RESET.len() + text.len());
                out.push_str(SGR_RESET);
                out.push_str(text);
                out
            }
            FormatSpec::Styled(_) => {
                let mut out = sgr(&spec.sgr_params());
                if !text.is_empty() {
                    out.push_str(text);
                    out.push_str(SGR_RESET);
                }
                out
            }
        }
    }

    /// Parse `spec` and style `text` with it.
    pub fn format_str(&self, spec: &str, text: &str) -> Result<String, FormatError> {
        let spec = FormatSpec::parse(spec)?;
        Ok(self.format(&spec, text))
    }
}

/// Style `text` with an ANSI formatter.
///
/// ```
/// assert_eq!(clif_style::format("196", "x").unwrap(), "\x1b[38;5;196mx\x1b[0m");
/// assert_eq!(clif_style::format("", "").unwrap(), "\x1b[0m");
/// ```
pub fn format(spec: &str, text: &str) -> Result<String, FormatError> {
    Formatter::ansi().format_str(spec, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clif_core::EnvInputs;

    #[test]
    fn zero_with_empty_text_is_bare_reset() {
        let out = Formatter::ansi().format(&FormatSpec::from(0u8), "");
        assert_eq!(out, "\x1b[0m");
    }

    #[test]
    fn reset_spec_prefixes_text() {
        assert_eq!(format("", "hello").unwrap(), "\x1b[0mhello");
    }

    #[test]
    fn numeric_foreground() {
        let out = Formatter::ansi().format(&FormatSpec::from(196u8), "x");
        assert_eq!(out, "\x1b[38;5;196mx\x1b[0m");
    }

    #[test]
    fn bold_and_color_codes() {
        let out = format("bold 226", "Warn").unwrap();
        let (open, rest) = out.split_at(out.find('W').unwrap());
        assert!(open.starts_with("\x1b[") && open.ends_with('m'));
        let mut codes: Vec<&str> = open[2..open.len() - 1].split(';').collect();
        codes.sort_unstable();
        assert_eq!(codes, ["1", "226", "38", "5"]);
        assert_eq!(rest, "Warn\x1b[0m");
    }

    #[test]
    fn styled_empty_text_has_no_reset() {
        assert_eq!(format("italic", "").unwrap(), "\x1b[3m");
    }

    #[test]
    fn plain_passthrough() {
        let plain = Formatter::plain();
        assert_eq!(plain.format(&FormatSpec::fg(196), "x"), "x");
        assert_eq!(plain.format(&FormatSpec::Reset, "x"), "x");
        assert_eq!(plain.format_str("bold", "").unwrap(), "");
    }

    #[test]
    fn plain_still_validates_spec() {
        assert!(Formatter::plain().format_str("sparkle", "x").is_err());
    }

    #[test]
    fn invalid_token_is_reported() {
        assert_eq!(
            format("bold nope", "x"),
            Err(FormatError::InvalidToken {
                token: "nope".into()
            })
        );
    }

    #[test]
    fn environment_selects_mode() {
        let interactive = OutputEnv::from_inputs(&EnvInputs::interactive());
        assert!(!Formatter::for_env(&interactive).is_plain());

        let cron = OutputEnv::from_inputs(&EnvInputs {
            cron: Some("1".into()),
            ..EnvInputs::interactive()
        });
        assert!(Formatter::for_env(&cron).is_plain());
    }

    #[test]
    fn stderr_mode_ignores_redirected_stdout() {
        let env = OutputEnv::from_inputs(&EnvInputs {
            stdout_is_terminal: false,
            ..EnvInputs::interactive()
        });
        assert!(Formatter::for_env(&env).is_plain());
        assert!(!Formatter::for_stderr(&env).is_plain());
    }

    #[test]
    fn default_is_ansi() {
        assert_eq!(Formatter::default(), Formatter::ansi());
    }
}
