// src/client/theme.rs
//! Explicit theme and board configuration handed to controllers

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub button: &'static str,
    pub border: &'static str,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            dark: false,
            background: "#f5f5f5",
            text: "#1a1a1a",
            accent: "#1a73e8",
            button: "#1a73e8",
            border: "#d0d0d0",
        }
    }

    pub fn dark() -> Self {
        Self {
            dark: true,
            background: "#121212",
            text: "#f0f0f0",
            accent: "#81b0ff",
            button: "#d4af37",
            border: "#333333",
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Per-variant knobs of the job board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    pub theme: Theme,
    pub featured_limit: usize,
    pub related_limit: usize,
    pub preview_chars: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            featured_limit: 5,
            related_limit: 3,
            preview_chars: 80,
        }
    }
}

impl BoardConfig {
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}
