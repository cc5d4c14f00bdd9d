//! Button primitive.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};

use super::style::{StyleLayer, compose};
use crate::tui::theme::Palette;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonSize {
    Sm,
    #[default]
    Md,
    Lg,
    Icon,
}

impl ButtonSize {
    /// Horizontal padding on each side of the label.
    fn padding(self) -> usize {
        match self {
            Self::Sm => 1,
            Self::Md => 2,
            Self::Lg => 3,
            Self::Icon => 0,
        }
    }
}

/// A one-line button.
///
/// Its style is composed from base → variant → size → state → caller
/// override, later layers winning per key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button<'a> {
    label: &'a str,
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    focused: bool,
    palette: Palette,
    overrides: StyleLayer,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, palette: Palette) -> Self {
        Self {
            label,
            variant: ButtonVariant::Default,
            size: ButtonSize::Md,
            disabled: false,
            focused: false,
            palette,
            overrides: StyleLayer::EMPTY,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Caller styles, applied last.
    pub fn style(mut self, overrides: StyleLayer) -> Self {
        self.overrides = overrides;
        self
    }

    /// Label with size padding, e.g. `"[  Save  ]"`.
    pub fn text(&self) -> String {
        let pad = " ".repeat(self.size.padding());
        match self.variant {
            ButtonVariant::Link | ButtonVariant::Ghost => format!("{pad}{}{pad}", self.label),
            _ => format!("[{pad}{}{pad}]", self.label),
        }
    }

    /// Display width in cells.
    pub fn width(&self) -> u16 {
        u16::try_from(self.text().chars().count()).unwrap_or(u16::MAX)
    }

    /// Style layers from least to most specific.
    pub fn layers(&self) -> Vec<StyleLayer> {
        let p = self.palette;
        let base = StyleLayer::EMPTY.fg(p.text).bold(true);
        let variant = match self.variant {
            ButtonVariant::Default => StyleLayer::EMPTY.fg(p.background).bg(p.accent),
            ButtonVariant::Destructive => StyleLayer::EMPTY.fg(p.background).bg(p.error),
            ButtonVariant::Outline => StyleLayer::EMPTY.fg(p.text),
            ButtonVariant::Secondary => StyleLayer::EMPTY.fg(p.text).bg(p.border),
            ButtonVariant::Ghost => StyleLayer::EMPTY.bold(false),
            ButtonVariant::Link => StyleLayer::EMPTY.fg(p.accent).underline(true).bold(false),
        };
        let size = match self.size {
            ButtonSize::Sm => StyleLayer::EMPTY.bold(false),
            _ => StyleLayer::EMPTY,
        };
        let state = if self.disabled {
            StyleLayer::EMPTY.dim(true).underline(false)
        } else if self.focused {
            StyleLayer::EMPTY.underline(true)
        } else {
            StyleLayer::EMPTY
        };
        vec![base, variant, size, state, self.overrides]
    }
}

impl Widget for Button<'_> {
    #[mutants::skip]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = compose(&self.layers()).to_style();
        Paragraph::new(Line::styled(self.text(), style)).render(area, buf);
    }
}
