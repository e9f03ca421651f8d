#![forbid(unsafe_code)]

//! Human-readable numbers for report lines.

/// Size units, indexed by power of 1024.
const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count as `"{value:.decimals} {unit}"`.
///
/// The unit follows the number of decimal digits in `bytes` (every three digits
/// move up one unit, up to GB). Plain byte counts never show decimals.
///
/// ```
/// use clif_text::humanize::human_filesize;
///
/// assert_eq!(human_filesize(512, 2), "512 B");
/// assert_eq!(human_filesize(2048, 1), "2.0 KB");
/// ```
#[must_use]
pub fn human_filesize(bytes: u64, decimals: usize) -> String {
    let digits = bytes.checked_ilog10().unwrap_or(0) as usize + 1;
    let factor = ((digits - 1) / 3).min(UNITS.len() - 1);
    let decimals = if factor == 0 { 0 } else { decimals };
    let value = bytes as f64 / 1024f64.powi(factor as i32);
    format!("{value:.decimals$} {}", UNITS[factor])
}

/// Pick the plural form for `n` out of `forms` = `"one/few/many"`.
///
/// Uses the one/few/many rule of East Slavic languages:
/// 1, 21, 31 → one; 2-4, 22-24 → few; 0, 5-20, 25-30 → many. A `%d` in the
/// chosen form is replaced by `n`. Missing forms fall back to the last given.
///
/// ```
/// use clif_text::humanize::plural_form;
///
/// assert_eq!(plural_form("%d файл/%d файла/%d файлов", 3), "3 файла");
/// assert_eq!(plural_form("%d файл/%d файла/%d файлов", 11), "11 файлов");
/// ```
#[must_use]
pub fn plural_form(forms: &str, n: i64) -> String {
    const CASES: [usize; 6] = [2, 0, 1, 1, 1, 2];

    let abs = n.unsigned_abs();
    let index = if (5..20).contains(&(abs % 100)) {
        2
    } else {
        CASES[(abs % 10).min(5) as usize]
    };
    let forms: Vec<&str> = forms.split('/').collect();
    let form = forms
        .get(index)
        .or_else(|| forms.last())
        .copied()
        .unwrap_or_default();
    form.replace("%d", &n.to_string())
}
