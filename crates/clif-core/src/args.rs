#![forbid(unsafe_code)]

//! Script argument parsing.
//!
//! Parses argv by hand in the style small maintenance scripts expect:
//!
//! | Form | Effect |
//! |------|--------|
//! | `--name=value` | mode `name`, argument `name = value` |
//! | `--name`, `--name=`, `--a=b=c` | mode `name`, `name=`, `a=b=c` (no argument) |
//! | `-abc` | modes `a`, `b`, `c` |
//! | `word`, `-`, `--` | argument of the most recent mode (if it has none yet); last word is the parameter |
//!
//! # Example
//! ```
//! use clif_core::args::ScriptArgs;
//!
//! let args = ScriptArgs::parse(["sync", "-v", "--limit=10", "--db", "main", "orders"]);
//! assert!(args.has_mode("v"));
//! assert_eq!(args.argument("limit"), Some("10"));
//! assert_eq!(args.argument("db"), Some("main"));
//! assert_eq!(args.parameter(), Some("orders"));
//! ```

use std::collections::HashMap;

/// Parsed script arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptArgs {
    program: Option<String>,
    modes: Vec<String>,
    arguments: HashMap<String, String>,
    parameter: Option<String>,
}

impl ScriptArgs {
    /// Parse the current process arguments.
    pub fn from_env() -> Self {
        Self::parse(std::env::args())
    }

    /// Parse an argv-style sequence. The first item is the program name.
    pub fn parse<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let mut parsed = Self {
            program: argv.next(),
            ..Self::default()
        };

        for arg in argv {
            if let Some(long) = arg.strip_prefix("--").filter(|long| !long.is_empty()) {
                match key_value(long) {
                    Some((name, value)) => {
                        parsed.modes.push(name.to_string());
                        parsed
                            .arguments
                            .insert(name.to_string(), value.to_string());
                    }
                    None => parsed.modes.push(long.to_string()),
                }
            } else if let Some(short) = arg
                .strip_prefix('-')
                .filter(|short| !short.is_empty() && !short.starts_with('-'))
            {
                parsed.modes.extend(short.chars().map(String::from));
            } else {
                if let Some(last) = parsed.modes.last() {
                    parsed
                        .arguments
                        .entry(last.clone())
                        .or_insert_with(|| arg.clone());
                }
                parsed.parameter = Some(arg);
            }
        }

        parsed
    }

    /// Program name (argv[0]), if any.
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// All modes in the order given.
    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    /// Whether `mode` was passed.
    pub fn has_mode(&self, mode: &str) -> bool {
        self.modes.iter().any(|m| m == mode)
    }

    /// Whether any of `modes` was passed.
    pub fn has_any_mode(&self, modes: &[&str]) -> bool {
        modes.iter().any(|mode| self.has_mode(mode))
    }

    /// Argument bound to `name`.
    pub fn argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).map(String::as_str)
    }

    /// Argument of the first name in `names` that has one.
    pub fn first_argument(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.argument(name))
    }

    /// Whether `name` is bound to exactly `value`.
    pub fn is_argument(&self, name: &str, value: &str) -> bool {
        self.argument(name) == Some(value)
    }

    /// Last bare word on the command line.
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }
}

/// Split `name=value` where both sides are non-empty and contain no other `=`.
fn key_value(long: &str) -> Option<(&str, &str)> {
    let (name, value) = long.split_once('=')?;
    if name.is_empty() || value.is_empty() || value.contains('=') {
        return None;
    }
    Some((name, value))
}
