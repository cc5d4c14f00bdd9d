//! Ordered style composition.
//!
//! A widget's style is a list of [`StyleLayer`]s from least to most specific.
//! Each layer sets only the keys it cares about; a later layer overrides an
//! earlier one key by key.

use ratatui::style::{Color, Modifier, Style};

/// A partial style. `None` leaves the key to earlier layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleLayer {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: Option<bool>,
    pub underline: Option<bool>,
    pub dim: Option<bool>,
}

impl StyleLayer {
    pub const EMPTY: StyleLayer = StyleLayer {
        fg: None,
        bg: None,
        bold: None,
        underline: None,
        dim: None,
    };

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self, on: bool) -> Self {
        self.bold = Some(on);
        self
    }

    pub const fn underline(mut self, on: bool) -> Self {
        self.underline = Some(on);
        self
    }

    pub const fn dim(mut self, on: bool) -> Self {
        self.dim = Some(on);
        self
    }

    /// `self` with every key `over` sets replaced by `over`'s value.
    pub fn then(self, over: StyleLayer) -> StyleLayer {
        StyleLayer {
            fg: over.fg.or(self.fg),
            bg: over.bg.or(self.bg),
            bold: over.bold.or(self.bold),
            underline: over.underline.or(self.underline),
            dim: over.dim.or(self.dim),
        }
    }

    pub fn to_style(self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        for (flag, modifier) in [
            (self.bold, Modifier::BOLD),
            (self.underline, Modifier::UNDERLINED),
            (self.dim, Modifier::DIM),
        ] {
            if flag == Some(true) {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

/// Folds `layers` in order; later layers win per key.
pub fn compose(layers: &[StyleLayer]) -> StyleLayer {
    layers
        .iter()
        .fold(StyleLayer::EMPTY, |acc, layer| acc.then(*layer))
}
