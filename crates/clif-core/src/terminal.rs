#![forbid(unsafe_code)]

//! Terminal column queries.
//!
//! Rendering code never asks the terminal directly; callers resolve a width
//! here once and pass it down.

use crate::env::OutputEnv;

/// Width assumed when neither the terminal nor the environment can tell.
pub const FALLBACK_COLUMNS: usize = 80;

/// Current terminal column count.
///
/// Order: the terminal itself, then `COLUMNS`, then [`FALLBACK_COLUMNS`].
pub fn columns() -> usize {
    columns_with(&OutputEnv::detect())
}

/// Column count using an already detected environment for the fallback.
pub fn columns_with(env: &OutputEnv) -> usize {
    resolve_columns(query_size().map(|(cols, _)| cols as usize), env.columns_hint)
}

/// Pick the first usable width out of a terminal query and an env hint.
#[must_use]
pub fn resolve_columns(queried: Option<usize>, hint: Option<usize>) -> usize {
    queried
        .filter(|&cols| cols > 0)
        .or(hint.filter(|&cols| cols > 0))
        .unwrap_or(FALLBACK_COLUMNS)
}

#[cfg(not(target_arch = "wasm32"))]
fn query_size() -> Option<(u16, u16)> {
    match crossterm::terminal::size() {
        Ok(size) => Some(size),
        Err(_err) => {
            crate::trace!(error = %_err, "terminal size query failed");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn query_size() -> Option<(u16, u16)> {
    None
}
