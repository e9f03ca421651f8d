#![forbid(unsafe_code)]

//! ANSI escape sequence generation helpers.
//!
//! Pure byte/string generation, no state tracking.
//!
//! | Category | Sequence | Description |
//! |----------|----------|-------------|
//! | CSI | `ESC [ n ; n m` | SGR (Select Graphic Rendition) |
//! | CSI | `ESC [ n G` | CHA (Cursor Horizontal Absolute, 1-indexed) |
//! | CSI | `ESC [ n A` | CUU (Cursor Up) |
//! | CSI | `ESC [ n K` | EL (Erase Line) |

use std::io::{self, Write};

// =============================================================================
// SGR (Select Graphic Rendition)
// =============================================================================

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &str = "\x1b[0m";

/// Parameter prefix selecting a 256-color foreground (`38;5;n`).
pub const FG_256: &str = "38;5";
/// Parameter prefix selecting a 256-color background (`48;5;n`).
pub const BG_256: &str = "48;5";

/// Build a complete SGR sequence from `;`-joined parameters.
///
/// An empty parameter list yields an empty string rather than `CSI m`
/// (which terminals read as a reset).
#[must_use]
pub fn sgr(params: &str) -> String {
    if params.is_empty() {
        return String::new();
    }
    format!("\x1b[{params}m")
}

/// Write SGR reset sequence.
#[inline]
pub fn sgr_reset<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET.as_bytes())
}

// =============================================================================
// Cursor movement
// =============================================================================

/// CHA: move to column `col` (0-indexed input, emitted 1-indexed).
pub fn cha<W: Write>(w: &mut W, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{}G", col.saturating_add(1))
}

/// Move cursor up: `CSI n A`
pub fn cuu<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    match n {
        0 => Ok(()),
        1 => w.write_all(b"\x1b[A"),
        _ => write!(w, "\x1b[{n}A"),
    }
}

/// Carriage return.
#[inline]
pub fn cr<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\r")
}

/// Overwrite the current row with `columns` spaces and return to column 0.
///
/// Unlike `CSI 2 K` this leaves readable output when the stream is captured.
pub fn blank_line<W: Write>(w: &mut W, columns: usize) -> io::Result<()> {
    cr(w)?;
    write!(w, "{:columns$}", "")?;
    cr(w)
}

// =============================================================================
// Scanning
// =============================================================================

/// Remove CSI escape sequences (`ESC [ ... final`) from `text`.
///
/// Lone `ESC` characters not followed by `[` are dropped as well.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    if !text.contains('\x1b') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\x1b' {
            out.push(ch);
            continue;
        }
        if chars.peek() == Some(&'[') {
            chars.next();
            // Parameters and intermediates end at the first byte in 0x40..=0x7E.
            for c in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&c) {
                    break;
                }
            }
        }
    }
    out
}
