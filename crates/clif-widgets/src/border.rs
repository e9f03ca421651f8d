#![forbid(unsafe_code)]

//! Border character sets and label alignment.

/// Characters used to draw a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSet {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    /// Left end of a divider row.
    pub tee_left: char,
    /// Right end of a divider row.
    pub tee_right: char,
}

impl BorderSet {
    /// Rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
        tee_left: '├',
        tee_right: '┤',
    };

    /// Simple box-drawing characters (U+250x).
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
        tee_left: '├',
        tee_right: '┤',
    };

    /// ASCII-only border, for terminals and log files without box drawing.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
        tee_left: '+',
        tee_right: '+',
    };
}

impl Default for BorderSet {
    fn default() -> Self {
        Self::ROUNDED
    }
}

/// Position of a label inside a border row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    /// Next to the left corner.
    Left,
    /// Centered in the row.
    Center,
    /// Next to the right corner.
    Right,
}

impl Alignment {
    /// Split `spare` fill cells into `(before, after)` the label.
    ///
    /// Both sides keep at least one cell when `spare >= 2`.
    #[must_use]
    pub const fn split(self, spare: usize) -> (usize, usize) {
        match self {
            Self::Left => (1, spare.saturating_sub(1)),
            Self::Right => (spare.saturating_sub(1), 1),
            Self::Center => (spare / 2, spare - spare / 2),
        }
    }
}
