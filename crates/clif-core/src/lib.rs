#![forbid(unsafe_code)]

//! Core: output environment detection, terminal columns, script arguments,
//! prompts and logging.

pub mod args;
pub mod env;
pub mod logging;
pub mod prompt;
pub mod terminal;

pub use args::ScriptArgs;
pub use env::{EnvInputs, OutputEnv};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
