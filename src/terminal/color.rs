//! Terminal colors: the cell color type, SGR codes and the 16-color
//! fallback used when the terminal lacks 24-bit color.

/// Terminal color definition - supporting Reset, RGB, and 16-color ANSI fallback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Position in the 16-color palette; bright colors are 8..16
    fn palette_index(self) -> Option<u8> {
        let idx = match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::White => 7,
            Color::BrightBlack => 8,
            Color::BrightRed => 9,
            Color::BrightGreen => 10,
            Color::BrightYellow => 11,
            Color::BrightBlue => 12,
            Color::BrightMagenta => 13,
            Color::BrightCyan => 14,
            Color::BrightWhite => 15,
            Color::Reset | Color::Rgb { .. } => return None,
        };
        Some(idx)
    }

    /// SGR parameter with `base` for normal colors (30 or 40); bright colors
    /// sit 60 above, default color is `base + 9`
    fn sgr(self, base: u8, rgb_prefix: u8) -> String {
        match self {
            Color::Rgb { r, g, b } => format!("{};2;{};{};{}", rgb_prefix, r, g, b),
            other => match other.palette_index() {
                Some(idx) if idx < 8 => (base + idx).to_string(),
                Some(idx) => (base + 60 + idx - 8).to_string(),
                None => (base + 9).to_string(),
            },
        }
    }

    /// ANSI foreground SGR parameter
    pub fn to_ansi_fg_code(self) -> String {
        self.sgr(30, 38)
    }

    /// ANSI background SGR parameter
    pub fn to_ansi_bg_code(self) -> String {
        self.sgr(40, 48)
    }

    /// Nearest 16-color ANSI value for terminals without TrueColor
    pub fn to_ansi_fallback(self) -> Self {
        match self {
            Color::Rgb { r, g, b } => {
                let luminance = (r as u32 + g as u32 + b as u32) / 3;
                let bright = luminance > 127;
                let threshold = 85;

                let has_r = r > threshold;
                let has_g = g > threshold;
                let has_b = b > threshold;

                match (has_r, has_g, has_b, bright) {
                    (false, false, false, false) => Color::Black,
                    (false, false, false, true) => Color::BrightBlack,
                    (true, false, false, false) => Color::Red,
                    (true, false, false, true) => Color::BrightRed,
                    (false, true, false, false) => Color::Green,
                    (false, true, false, true) => Color::BrightGreen,
                    (true, true, false, false) => Color::Yellow,
                    (true, true, false, true) => Color::BrightYellow,
                    (false, false, true, false) => Color::Blue,
                    (false, false, true, true) => Color::BrightBlue,
                    (true, false, true, false) => Color::Magenta,
                    (true, false, true, true) => Color::BrightMagenta,
                    (false, true, true, false) => Color::Cyan,
                    (false, true, true, true) => Color::BrightCyan,
                    (true, true, true, false) => Color::White,
                    (true, true, true, true) => Color::BrightWhite,
                }
            }
            other => other,
        }
    }
}

/// Whether the terminal advertises 24-bit color
pub fn detect_truecolor() -> bool {
    detect_truecolor_with_env(|k| std::env::var(k))
}

/// TrueColor detection with injectable environment lookup
pub fn detect_truecolor_with_env<F>(get_env: F) -> bool
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    if let Ok(colorterm) = get_env("COLORTERM") {
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return true;
        }
    }

    if let Ok(term) = get_env("TERM") {
        if term.contains("24bit")
            || term.contains("truecolor")
            || term.starts_with("xterm-kitty")
            || term.starts_with("tmux")
        {
            return true;
        }
    }

    get_env("TERM_PROGRAM").is_ok_and(|tp| {
        tp == "iTerm.app" || tp == "WezTerm" || tp == "vscode" || tp == "Apple_Terminal"
    })
}
