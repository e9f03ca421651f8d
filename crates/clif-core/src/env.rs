#![forbid(unsafe_code)]

//! Output environment detection.
//!
//! Decides whether styled output is appropriate for the current process.
//! Styled output is turned off when any of the following hold:
//!
//! - `CLIF_NON_INTERACTIVE` or `CRON` is set to a truthy value (scheduled
//!   jobs whose output ends up in log files),
//! - `NO_COLOR` is present (de-facto standard for disabling color),
//! - stdout is not attached to a terminal.
//!
//! Output sent to stderr is judged by stderr instead ([`OutputEnv::styled_stderr`]).
//!
//! Detection runs over an explicit [`EnvInputs`] value so callers and tests
//! can describe an environment without touching the process environment.
//! Given the same inputs, [`OutputEnv::from_inputs`] always produces the same
//! result.

use std::env;
use std::io::IsTerminal;

/// Primary switch for non-interactive output.
pub const NON_INTERACTIVE_ENV: &str = "CLIF_NON_INTERACTIVE";
/// Legacy switch honoured for scripts run from cron.
pub const CRON_ENV: &str = "CRON";

/// Raw signals read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvInputs {
    /// Value of `CLIF_NON_INTERACTIVE`, if set.
    pub non_interactive: Option<String>,
    /// Value of `CRON`, if set.
    pub cron: Option<String>,
    /// Whether `NO_COLOR` is present.
    pub no_color: bool,
    /// Value of `COLUMNS`, if set.
    pub columns: Option<String>,
    /// Whether stdout is a terminal.
    pub stdout_is_terminal: bool,
    /// Whether stderr is a terminal.
    pub stderr_is_terminal: bool,
}

impl EnvInputs {
    /// Read the inputs from the current process.
    pub fn from_env() -> Self {
        Self {
            non_interactive: env::var(NON_INTERACTIVE_ENV).ok(),
            cron: env::var(CRON_ENV).ok(),
            no_color: env::var_os("NO_COLOR").is_some(),
            columns: env::var("COLUMNS").ok(),
            stdout_is_terminal: std::io::stdout().is_terminal(),
            stderr_is_terminal: std::io::stderr().is_terminal(),
        }
    }

    /// Inputs describing an interactive color terminal.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            stdout_is_terminal: true,
            stderr_is_terminal: true,
            ..Self::default()
        }
    }
}

/// Resolved output environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputEnv {
    /// Scheduled or otherwise non-interactive run.
    pub non_interactive: bool,
    /// User asked for no color.
    pub no_color: bool,
    /// Stdout is a terminal.
    pub stdout_is_terminal: bool,
    /// Stderr is a terminal.
    pub stderr_is_terminal: bool,
    /// Column count advertised through `COLUMNS`.
    pub columns_hint: Option<usize>,
}

impl OutputEnv {
    /// Detect from the current process environment.
    pub fn detect() -> Self {
        Self::from_inputs(&EnvInputs::from_env())
    }

    /// Resolve from explicit inputs.
    #[must_use]
    pub fn from_inputs(inputs: &EnvInputs) -> Self {
        let non_interactive = inputs.non_interactive.as_deref().is_some_and(is_truthy)
            || inputs.cron.as_deref().is_some_and(is_truthy);
        let columns_hint = inputs
            .columns
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|&cols| cols > 0);

        Self {
            non_interactive,
            no_color: inputs.no_color,
            stdout_is_terminal: inputs.stdout_is_terminal,
            stderr_is_terminal: inputs.stderr_is_terminal,
            columns_hint,
        }
    }

    /// Whether ANSI styling should be emitted.
    #[must_use]
    pub const fn styled_output(&self) -> bool {
        !self.non_interactive && !self.no_color && self.stdout_is_terminal
    }

    /// Whether ANSI styling should be emitted on stderr.
    #[must_use]
    pub const fn styled_stderr(&self) -> bool {
        !self.non_interactive && !self.no_color && self.stderr_is_terminal
    }

    /// Whether in-place redraws (cursor movement) are safe.
    #[must_use]
    pub const fn live_redraw(&self) -> bool {
        !self.non_interactive && self.stdout_is_terminal
    }
}

/// Interpret an environment value as a boolean switch.
///
/// Empty, `0`, `false`, `no` and `off` (any case) are false; anything else is true.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value.eq_ignore_ascii_case("off"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interactive_terminal_is_styled() {
        let env = OutputEnv::from_inputs(&EnvInputs::interactive());
        assert!(env.styled_output());
        assert!(env.live_redraw());
        assert_eq!(env.columns_hint, None);
    }

    #[test]
    fn cron_disables_styling() {
        let inputs = EnvInputs {
            cron: Some("1".into()),
            ..EnvInputs::interactive()
        };
        let env = OutputEnv::from_inputs(&inputs);
        assert!(env.non_interactive);
        assert!(!env.styled_output());
        assert!(!env.live_redraw());
    }

    #[test]
    fn non_interactive_switch_disables_styling() {
        let inputs = EnvInputs {
            non_interactive: Some("yes".into()),
            ..EnvInputs::interactive()
        };
        assert!(!OutputEnv::from_inputs(&inputs).styled_output());
    }

    #[test]
    fn falsy_switch_keeps_styling() {
        let inputs = EnvInputs {
            non_interactive: Some("0".into()),
            cron: Some("false".into()),
            ..EnvInputs::interactive()
        };
        assert!(OutputEnv::from_inputs(&inputs).styled_output());
    }

    #[test]
    fn no_color_keeps_live_redraw() {
        let inputs = EnvInputs {
            no_color: true,
            ..EnvInputs::interactive()
        };
        let env = OutputEnv::from_inputs(&inputs);
        assert!(!env.styled_output());
        assert!(env.live_redraw());
    }

    #[test]
    fn stderr_judged_on_its_own() {
        let inputs = EnvInputs {
            stdout_is_terminal: false,
            ..EnvInputs::interactive()
        };
        let env = OutputEnv::from_inputs(&inputs);
        assert!(!env.styled_output());
        assert!(env.styled_stderr());

        let cron = EnvInputs {
            cron: Some("1".into()),
            ..inputs
        };
        assert!(!OutputEnv::from_inputs(&cron).styled_stderr());
    }

    #[test]
    fn piped_stdout_is_plain() {
        let env = OutputEnv::from_inputs(&EnvInputs::default());
        assert!(!env.styled_output());
        assert!(!env.live_redraw());
    }

    #[test]
    fn columns_hint_parsing() {
        let mut inputs = EnvInputs::interactive();
        inputs.columns = Some(" 120 ".into());
        assert_eq!(OutputEnv::from_inputs(&inputs).columns_hint, Some(120));

        inputs.columns = Some("0".into());
        assert_eq!(OutputEnv::from_inputs(&inputs).columns_hint, None);

        inputs.columns = Some("wide".into());
        assert_eq!(OutputEnv::from_inputs(&inputs).columns_hint, None);
    }

    #[test]
    fn truthiness() {
        for value in ["1", "true", "YES", "on", "cron"] {
            assert!(is_truthy(value), "{value} should be truthy");
        }
        for value in ["", " ", "0", "False", "no", "OFF"] {
            assert!(!is_truthy(value), "{value:?} should be falsy");
        }
    }
}
