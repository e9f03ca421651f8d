#![forbid(unsafe_code)]

//! Format specs: the small styling language shared by the formatter and the
//! inline markup.
//!
//! # Grammar
//!
//! A spec is either empty (meaning "reset") or a whitespace separated list of
//! tokens:
//!
//! | Token | Meaning | SGR parameters |
//! |-------|---------|----------------|
//! | `0`..`255` | 256-color foreground | `38;5;n` |
//! | `bg:0`..`bg:255` | 256-color background | `48;5;n` |
//! | `bold` | bold | `1` |
//! | `italic` | italic | `3` |
//! | `underline` | underline | `4` |
//! | `strikethrough` | strikethrough | `9` |
//! | `default` | default foreground | `39` |
//!
//! Names are case-sensitive. Unknown tokens are rejected; format strings are
//! written by programmers, so a typo must surface instead of silently
//! rendering unstyled text. The bare spec `0` is the reset spec.
//!
//! # Example
//! ```
//! use clif_style::FormatSpec;
//!
//! let spec: FormatSpec = "bold 226".parse().unwrap();
//! assert_eq!(spec.sgr_params(), "1;38;5;226");
//! assert!("blink".parse::<FormatSpec>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::ansi::{BG_256, FG_256};

/// Errors produced while parsing a format spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A token that is neither a color index, a `bg:` index nor a known style name.
    InvalidToken { token: String },
    /// A numeric token outside the 256-color palette.
    InvalidIndex { token: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken { token } => write!(f, "invalid format code: [{token}]"),
            Self::InvalidIndex { token } => {
                write!(f, "color index out of range (0-255): [{token}]")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Named text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    /// Bold (SGR 1).
    Bold,
    /// Italic (SGR 3).
    Italic,
    /// Underline (SGR 4).
    Underline,
    /// Strikethrough (SGR 9).
    Strikethrough,
    /// Default foreground (SGR 39).
    Default,
}

impl Attr {
    /// All attributes, in SGR code order.
    pub const ALL: [Attr; 5] = [
        Attr::Bold,
        Attr::Italic,
        Attr::Underline,
        Attr::Strikethrough,
        Attr::Default,
    ];

    /// SGR parameter for this attribute.
    #[must_use]
    pub const fn sgr_code(self) -> u8 {
        match self {
            Self::Bold => 1,
            Self::Italic => 3,
            Self::Underline => 4,
            Self::Strikethrough => 9,
            Self::Default => 39,
        }
    }

    /// Spec keyword for this attribute.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Default => "default",
        }
    }

    /// Look up an attribute by its spec keyword (case-sensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }
}

/// One resolved spec token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    /// 256-color foreground index.
    Fg(u8),
    /// 256-color background index.
    Bg(u8),
    /// Named attribute.
    Attr(Attr),
}

impl StyleToken {
    /// Resolve a single token.
    pub fn parse(token: &str) -> Result<Self, FormatError> {
        if let Some(index) = token.strip_prefix("bg:") {
            return parse_index(index, token).map(Self::Bg);
        }
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            return parse_index(token, token).map(Self::Fg);
        }
        Attr::from_name(token)
            .map(Self::Attr)
            .ok_or_else(|| FormatError::InvalidToken {
                token: token.to_string(),
            })
    }

    /// Append this token's SGR parameters to `out`.
    fn push_params(self, out: &mut String) {
        use std::fmt::Write as _;
        // Writing into a String cannot fail.
        let _ = match self {
            Self::Fg(index) => write!(out, "{FG_256};{index}"),
            Self::Bg(index) => write!(out, "{BG_256};{index}"),
            Self::Attr(attr) => write!(out, "{}", attr.sgr_code()),
        };
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fg(index) => write!(f, "{index}"),
            Self::Bg(index) => write!(f, "bg:{index}"),
            Self::Attr(attr) => f.write_str(attr.name()),
        }
    }
}

fn parse_index(digits: &str, token: &str) -> Result<u8, FormatError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidToken {
            token: token.to_string(),
        });
    }
    digits.parse::<u8>().map_err(|_| FormatError::InvalidIndex {
        token: token.to_string(),
    })
}

/// A parsed format spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FormatSpec {
    /// The empty spec: emits a reset.
    #[default]
    Reset,
    /// One or more tokens, kept in the order given.
    Styled(SmallVec<[StyleToken; 4]>),
}

impl FormatSpec {
    /// Shorthand for a single 256-color foreground. Index 0 is the reset spec.
    #[must_use]
    pub fn fg(index: u8) -> Self {
        if index == 0 {
            return Self::Reset;
        }
        Self::Styled(smallvec::smallvec![StyleToken::Fg(index)])
    }

    /// Build a spec from already resolved tokens. No tokens means reset.
    #[must_use]
    pub fn from_tokens(tokens: impl IntoIterator<Item = StyleToken>) -> Self {
        let tokens: SmallVec<[StyleToken; 4]> = tokens.into_iter().collect();
        if tokens.is_empty() {
            Self::Reset
        } else {
            Self::Styled(tokens)
        }
    }

    /// Parse a spec string.
    pub fn parse(spec: &str) -> Result<Self, FormatError> {
        let spec = spec.trim();
        if spec.is_empty() || spec == "0" {
            return Ok(Self::Reset);
        }
        let tokens = spec
            .split_whitespace()
            .map(StyleToken::parse)
            .collect::<Result<SmallVec<[StyleToken; 4]>, _>>()?;
        Ok(Self::Styled(tokens))
    }

    /// Add a token, turning a reset spec into a styled one.
    #[must_use]
    pub fn with(self, token: StyleToken) -> Self {
        match self {
            Self::Reset => Self::Styled(smallvec::smallvec![token]),
            Self::Styled(mut tokens) => {
                tokens.push(token);
                Self::Styled(tokens)
            }
        }
    }

    /// Whether this is the reset spec.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        matches!(self, Self::Reset)
    }

    /// Tokens in order (empty for the reset spec).
    #[must_use]
    pub fn tokens(&self) -> &[StyleToken] {
        match self {
            Self::Reset => &[],
            Self::Styled(tokens) => tokens,
        }
    }

    /// `;`-joined SGR parameters, e.g. `1;38;5;226`. Empty for the reset spec.
    #[must_use]
    pub fn sgr_params(&self) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens().iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            token.push_params(&mut out);
        }
        out
    }
}

impl FromStr for FormatSpec {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u8> for FormatSpec {
    fn from(index: u8) -> Self {
        Self::fg(index)
    }
}

impl From<Attr> for FormatSpec {
    fn from(attr: Attr) -> Self {
        Self::Styled(smallvec::smallvec![StyleToken::Attr(attr)])
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => f.write_str("0"),
            Self::Styled(tokens) => {
                for (i, token) in tokens.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{token}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_zero_are_reset() {
        assert_eq!(FormatSpec::parse("").unwrap(), FormatSpec::Reset);
        assert_eq!(FormatSpec::parse("   ").unwrap(), FormatSpec::Reset);
        assert_eq!(FormatSpec::parse("0").unwrap(), FormatSpec::Reset);
        assert_eq!(FormatSpec::from(0u8), FormatSpec::Reset);
    }

    #[test]
    fn numeric_shorthand() {
        let spec = FormatSpec::parse("196").unwrap();
        assert_eq!(spec, FormatSpec::fg(196));
        assert_eq!(spec.sgr_params(), "38;5;196");
    }

    #[test]
    fn token_list_keeps_order() {
        let spec = FormatSpec::parse("bold 226 bg:17").unwrap();
        assert_eq!(
            spec.tokens(),
            [
                StyleToken::Attr(Attr::Bold),
                StyleToken::Fg(226),
                StyleToken::Bg(17)
            ]
        );
        assert_eq!(spec.sgr_params(), "1;38;5;226;48;5;17");
    }

    #[test]
    fn zero_inside_list_is_black() {
        let spec = FormatSpec::parse("0 bold").unwrap();
        assert_eq!(spec.sgr_params(), "38;5;0;1");
    }

    #[test]
    fn all_named_attributes() {
        let spec = FormatSpec::parse("bold italic underline strikethrough default").unwrap();
        assert_eq!(spec.sgr_params(), "1;3;4;9;39");
    }

    #[test]
    fn unknown_name_rejected() {
        assert_eq!(
            FormatSpec::parse("bold blink"),
            Err(FormatError::InvalidToken {
                token: "blink".into()
            })
        );
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(FormatSpec::parse("Bold").is_err());
    }

    #[test]
    fn index_out_of_range() {
        assert_eq!(
            FormatSpec::parse("256"),
            Err(FormatError::InvalidIndex {
                token: "256".into()
            })
        );
        assert_eq!(
            FormatSpec::parse("bg:999"),
            Err(FormatError::InvalidIndex {
                token: "bg:999".into()
            })
        );
    }

    #[test]
    fn malformed_background() {
        for bad in ["bg:", "bg:x", "bg:-1", "bg:1.5"] {
            assert!(
                matches!(FormatSpec::parse(bad), Err(FormatError::InvalidToken { .. })),
                "{bad} should be an invalid token"
            );
        }
    }

    #[test]
    fn signed_numbers_rejected() {
        assert!(FormatSpec::parse("-5").is_err());
        assert!(FormatSpec::parse("+5").is_err());
    }

    #[test]
    fn display_round_trips_canonical_form() {
        let spec = FormatSpec::parse("  italic   bg:4  33 ").unwrap();
        assert_eq!(spec.to_string(), "italic bg:4 33");
        assert_eq!(spec.to_string().parse::<FormatSpec>().unwrap(), spec);
        assert_eq!(FormatSpec::Reset.to_string(), "0");
    }

    #[test]
    fn with_extends_spec() {
        let spec = FormatSpec::Reset
            .with(StyleToken::Fg(46))
            .with(StyleToken::Attr(Attr::Underline));
        assert_eq!(spec.sgr_params(), "38;5;46;4");
    }

    #[test]
    fn from_tokens_empty_is_reset() {
        assert!(FormatSpec::from_tokens([]).is_reset());
        assert!(!FormatSpec::from_tokens([StyleToken::Bg(1)]).is_reset());
    }

    #[test]
    fn error_messages() {
        let err = FormatSpec::parse("nope").unwrap_err();
        assert_eq!(err.to_string(), "invalid format code: [nope]");
    }
}
