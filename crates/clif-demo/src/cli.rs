#![forbid(unsafe_code)]

//! Command-line options for the demo script.
//!
//! Arguments go through [`ScriptArgs`]; `CLIF_DEMO_*` environment variables
//! provide defaults that explicit flags override.

use std::fmt;

use clif::ScriptArgs;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
clif demo: colors, boxes and a loading bar

USAGE:
    clif-demo [OPTIONS] [TITLE]

OPTIONS:
    --steps=N        Loading bar steps (default: 40)
    --delay-ms=N     Pause between steps in milliseconds (default: 25)
    --width=N        Pretend the terminal is N columns wide
    --no-color       Disable ANSI styling
    --confirm        Ask before running the loading bar
    --fail           Finish with a fatal error box
    --help, -h       Show this help message
    --version, -V    Show version

ENVIRONMENT VARIABLES:
    CLIF_DEMO_STEPS        Override --steps
    CLIF_DEMO_DELAY_MS     Override --delay-ms
    CLIF_DEMO_WIDTH        Override --width
    CLIF_NON_INTERACTIVE   Plain output without redraws (also: CRON)
    CLIF_LOG               Log filter, e.g. clif_widgets=debug";

const KNOWN_MODES: &[&str] = &[
    "steps", "delay-ms", "width", "no-color", "confirm", "fail", "help", "h", "version", "V",
];

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Banner title.
    pub title: String,
    /// Number of loading bar steps.
    pub steps: u64,
    /// Pause between steps.
    pub delay_ms: u64,
    /// Column override.
    pub width: Option<usize>,
    /// Force plain output.
    pub no_color: bool,
    /// Ask before the loading bar.
    pub confirm: bool,
    /// End with a fatal error.
    pub fail: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            title: "clif-demo".into(),
            steps: 40,
            delay_ms: 25,
            width: None,
            no_color: false,
            confirm: false,
            fail: false,
        }
    }
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    UnknownOption(String),
    InvalidValue { option: String, value: String },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownOption(name) => write!(f, "unknown option: {name}"),
            Self::InvalidValue { option, value } => {
                write!(f, "invalid --{option} value: {value}")
            }
        }
    }
}

impl std::error::Error for CliError {}

impl Command {
    /// Parse the process arguments and environment.
    pub fn from_env() -> Result<Self, CliError> {
        Self::parse(&ScriptArgs::from_env(), |key| std::env::var(key).ok())
    }

    /// Parse `args`, reading overrides through `env`.
    pub fn parse<F>(args: &ScriptArgs, env: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if args.has_any_mode(&["help", "h"]) {
            return Ok(Self::Help);
        }
        if args.has_any_mode(&["version", "V"]) {
            return Ok(Self::Version);
        }
        if let Some(unknown) = args
            .modes()
            .iter()
            .find(|mode| !KNOWN_MODES.contains(&mode.as_str()))
        {
            return Err(CliError::UnknownOption(unknown.clone()));
        }

        let mut opts = Opts::default();

        // Environment defaults first
        if let Some(val) = env("CLIF_DEMO_STEPS") {
            opts.steps = number("steps", &val)?;
        }
        if let Some(val) = env("CLIF_DEMO_DELAY_MS") {
            opts.delay_ms = number("delay-ms", &val)?;
        }
        if let Some(val) = env("CLIF_DEMO_WIDTH") {
            opts.width = Some(number("width", &val)?);
        }

        // Flags override the environment
        if let Some(val) = args.argument("steps") {
            opts.steps = number("steps", val)?;
        }
        if let Some(val) = args.argument("delay-ms") {
            opts.delay_ms = number("delay-ms", val)?;
        }
        if let Some(val) = args.argument("width") {
            opts.width = Some(number("width", val)?);
        }
        opts.no_color = args.has_mode("no-color");
        opts.confirm = args.has_mode("confirm");
        opts.fail = args.has_mode("fail");
        if let Some(title) = args.parameter() {
            opts.title = title.to_string();
        }

        Ok(Self::Run(opts))
    }
}

fn number<T: std::str::FromStr>(option: &str, value: &str) -> Result<T, CliError> {
    value.trim().parse().map_err(|_| CliError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Command, CliError> {
        let mut full = vec!["clif-demo"];
        full.extend_from_slice(argv);
        Command::parse(&ScriptArgs::parse(full), |_| None)
    }

    fn run_opts(argv: &[&str]) -> Opts {
        match parse(argv).unwrap() {
            Command::Run(opts) => opts,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(run_opts(&[]), Opts::default());
    }

    #[test]
    fn flags_and_title() {
        let opts = run_opts(&["--steps=5", "--no-color", "--fail", "Nightly import"]);
        assert_eq!(opts.steps, 5);
        assert!(opts.no_color);
        assert!(opts.fail);
        assert!(!opts.confirm);
        assert_eq!(opts.title, "Nightly import");
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn unknown_option_rejected() {
        assert_eq!(
            parse(&["--colour"]).unwrap_err(),
            CliError::UnknownOption("colour".into())
        );
    }

    #[test]
    fn invalid_number_rejected() {
        let err = parse(&["--width=wide"]).unwrap_err();
        assert_eq!(err.to_string(), "invalid --width value: wide");
    }

    #[test]
    fn env_provides_defaults_flags_override() {
        let env = |key: &str| match key {
            "CLIF_DEMO_STEPS" => Some("7".to_string()),
            "CLIF_DEMO_WIDTH" => Some("60".to_string()),
            _ => None,
        };
        let args = ScriptArgs::parse(["clif-demo", "--width=100"]);
        let Command::Run(opts) = Command::parse(&args, env).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(opts.steps, 7);
        assert_eq!(opts.width, Some(100));
    }

    #[test]
    fn help_text_lists_env_vars() {
        assert!(HELP_TEXT.contains("CLIF_DEMO_STEPS"));
        assert!(!VERSION.is_empty());
    }
}
