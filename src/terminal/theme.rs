use std::collections::HashMap;

use crate::terminal::color::Color;

/// A semantic color palette for themes
///
/// Colors are defined once per theme, then mapped to UI roles via accessor
/// methods on [`Theme`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,
    pub error: Color,
    pub gray_dark: Color,
    pub gray: Color,
    pub gray_light: Color,
}

/// A color theme for the editor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub palette: Palette,
}

impl Theme {
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            palette,
        }
    }

    // ==================== UI Color Accessors ====================

    pub fn bg(&self) -> Color {
        self.palette.bg
    }

    pub fn fg(&self) -> Color {
        self.palette.fg
    }

    pub fn selection_bg(&self) -> Color {
        self.palette.primary
    }

    pub fn selection_fg(&self) -> Color {
        self.palette.bg
    }

    pub fn status_bg(&self) -> Color {
        self.palette.gray_dark
    }

    pub fn status_fg(&self) -> Color {
        self.palette.fg
    }

    pub fn menu_bg(&self) -> Color {
        self.palette.gray_dark
    }

    pub fn menu_fg(&self) -> Color {
        self.palette.fg
    }

    pub fn dialog_bg(&self) -> Color {
        self.palette.gray_dark
    }

    pub fn dialog_fg(&self) -> Color {
        self.palette.fg
    }

    pub fn dim(&self) -> Color {
        self.palette.gray
    }

    pub fn error(&self) -> Color {
        self.palette.error
    }

    pub fn scrollbar_track(&self) -> Color {
        self.palette.gray
    }

    pub fn scrollbar_thumb(&self) -> Color {
        self.palette.gray_light
    }

    // ==================== Built-in Themes ====================

    pub fn dark() -> Self {
        Self::new(
            "dark",
            Palette {
                bg: Color::rgb(30, 30, 30),
                fg: Color::rgb(212, 212, 212),
                primary: Color::rgb(86, 156, 214),
                error: Color::rgb(244, 71, 71),
                gray_dark: Color::rgb(51, 51, 51),
                gray: Color::rgb(110, 110, 110),
                gray_light: Color::rgb(170, 170, 170),
            },
        )
    }

    /// Black on white, like a classic desktop text widget
    pub fn light() -> Self {
        Self::new(
            "light",
            Palette {
                bg: Color::rgb(255, 255, 255),
                fg: Color::rgb(0, 0, 0),
                primary: Color::rgb(0, 120, 215),
                error: Color::rgb(200, 0, 0),
                gray_dark: Color::rgb(225, 225, 225),
                gray: Color::rgb(150, 150, 150),
                gray_light: Color::rgb(100, 100, 100),
            },
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Registry of themes by name
pub struct ThemeManager {
    themes: HashMap<String, Theme>,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut manager = Self {
            themes: HashMap::new(),
        };
        manager.register(Theme::dark());
        manager.register(Theme::light());
        manager
    }

    pub fn register(&mut self, theme: Theme) {
        self.themes.insert(theme.name.clone(), theme);
    }

    pub fn get(&self, name: &str) -> Option<Theme> {
        self.themes.get(name).cloned()
    }

    /// Theme by name, falling back to the default with a warning
    pub fn resolve(&self, name: &str) -> Theme {
        match self.get(name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(theme = name, "unknown theme; using default");
                Theme::default()
            }
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}
