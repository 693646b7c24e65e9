#![forbid(unsafe_code)]

//! Styles with cascading merge semantics.

use bitflags::bitflags;

/// A terminal color: the standard 16-color palette or 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    White,
    Rgb(u8, u8, u8),
}

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StyleFlags: u8 {
        const BOLD      = 1 << 0;
        const DIM       = 1 << 1;
        const ITALIC    = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSED  = 1 << 4;
    }
}

/// Foreground/background/attributes, each independently unset.
///
/// Unset fields inherit through [`Style::merge`], giving CSS-like
/// cascading: widget base styles fill in whatever a more specific style
/// leaves open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// The empty style (everything inherited).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set attribute flags.
    #[must_use]
    pub const fn attrs(mut self, attrs: StyleFlags) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// Shorthand for the bold attribute.
    #[must_use]
    pub const fn bold(self) -> Self {
        self.attrs(StyleFlags::BOLD)
    }

    /// Shorthand for the dim attribute.
    #[must_use]
    pub const fn dim(self) -> Self {
        self.attrs(StyleFlags::DIM)
    }

    /// Shorthand for reversed video.
    #[must_use]
    pub const fn reversed(self) -> Self {
        self.attrs(StyleFlags::REVERSED)
    }

    /// Cascade: fields set on `self` win, `other` fills the gaps.
    #[must_use]
    pub fn merge(self, other: &Style) -> Style {
        Style {
            fg: self.fg.or(other.fg),
            bg: self.bg.or(other.bg),
            attrs: self.attrs.or(other.attrs),
        }
    }
}
