#![forbid(unsafe_code)]

//! Interactive yes/no confirmation.

use std::io::{self, BufRead, Write};

/// Ask `question` and wait for an answer line.
///
/// Writes `"\n{question} (Y/N): "` to `out` and reads one line from `input`.
/// Only `y`/`Y` (surrounding whitespace ignored) counts as consent; EOF is a no.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(out, "\n{question} (Y/N): ")?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    let accepted = answer.trim().eq_ignore_ascii_case("y");
    if accepted {
        writeln!(out)?;
    }
    Ok(accepted)
}

/// [`confirm`] against the process stdin/stdout.
pub fn confirm_stdio(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();
    confirm(&mut input, &mut out, question)
}
