//! Full-screen viewer for expandable images.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Hidden,
    Shown {
        src: String,
    },
}

impl Overlay {
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }

    #[must_use]
    pub fn src(&self) -> Option<&str> {
        match self {
            Self::Shown { src } => Some(src),
            Self::Hidden => None,
        }
    }

    /// Show `src`, replacing whatever was shown.
    pub fn show(&mut self, src: impl Into<String>) {
        *self = Self::Shown { src: src.into() };
    }

    pub fn hide(&mut self) {
        *self = Self::Hidden;
    }

    /// CSS `display` value for the overlay container.
    #[must_use]
    pub const fn display(&self) -> &'static str {
        match self {
            Self::Shown { .. } => "flex",
            Self::Hidden => "none",
        }
    }
}
