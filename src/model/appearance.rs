use serde::{Deserialize, Serialize};

/// Preferred color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
    /// Follow the terminal.
    #[default]
    System,
}

impl Appearance {
    /// All options in tab order.
    pub fn all() -> &'static [Appearance] {
        &[Self::Light, Self::Dark, Self::System]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }

    /// Position in [`all`](Self::all).
    pub fn index(self) -> usize {
        Self::all().iter().position(|a| *a == self).unwrap_or(0)
    }

    /// Next option, wrapping.
    pub fn next(self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Previous option, wrapping.
    pub fn prev(self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    /// Resolves `System` to a concrete scheme.
    ///
    /// `colorfgbg` is the terminal's `COLORFGBG` value (`"fg;bg"`); a
    /// background of 7 or 15 means a light terminal.
    pub fn resolve(self, colorfgbg: Option<&str>) -> Self {
        match self {
            Self::System => {
                let light = colorfgbg
                    .and_then(|v| v.rsplit(';').next())
                    .is_some_and(|bg| matches!(bg.trim(), "7" | "15"));
                if light { Self::Light } else { Self::Dark }
            }
            other => other,
        }
    }
}
