//! Colors for the selected appearance.

use ratatui::style::Color;

use crate::model::Appearance;

/// Named colors every screen draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub focus: Color,
    pub error: Color,
    pub success: Color,
    pub warning: Color,
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: Color::Reset,
        text: Color::White,
        muted: Color::DarkGray,
        border: Color::DarkGray,
        accent: Color::Cyan,
        focus: Color::Yellow,
        error: Color::Red,
        success: Color::Green,
        warning: Color::Yellow,
    };

    pub const LIGHT: Palette = Palette {
        background: Color::White,
        text: Color::Black,
        muted: Color::Gray,
        border: Color::Gray,
        accent: Color::Blue,
        focus: Color::Magenta,
        error: Color::Red,
        success: Color::Green,
        warning: Color::Rgb(180, 83, 9),
    };

    /// Palette for `appearance`, resolving `System` from `COLORFGBG`.
    pub fn for_appearance(appearance: Appearance) -> Self {
        let colorfgbg = std::env::var("COLORFGBG").ok();
        Self::resolved(appearance.resolve(colorfgbg.as_deref()))
    }

    /// Palette for an already resolved appearance.
    pub fn resolved(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Light => Self::LIGHT,
            Appearance::Dark | Appearance::System => Self::DARK,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DARK
    }
}
