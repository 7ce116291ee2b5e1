//! Theme configuration for the desktop app

/// Environment variable selecting the color scheme (`light` or `dark`).
pub const THEME_ENV: &str = "STASH_THEME";

/// Resolved theme (light or dark)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    /// Parse a theme name; anything unrecognized falls back to light.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Theme requested through [`THEME_ENV`]
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(THEME_ENV)
            .map(|value| Self::from_name(&value))
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

/// Colors used by inline component styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub error: &'static str,
    pub error_bg: &'static str,
    pub overlay: &'static str,
}

pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f6f7f9",
    bg_tertiary: "#eceef2",
    text_primary: "#1b1e24",
    text_secondary: "#4a5160",
    text_muted: "#8a909c",
    border: "#d9dce3",
    accent: "#2f6fde",
    accent_text: "#ffffff",
    error: "#c62f3a",
    error_bg: "#fdecee",
    overlay: "rgba(15, 18, 24, 0.45)",
};

pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#17191e",
    bg_secondary: "#1f2229",
    bg_tertiary: "#2a2e37",
    text_primary: "#eef0f4",
    text_secondary: "#b7bcc7",
    text_muted: "#7d8391",
    border: "#363b46",
    accent: "#5b92f0",
    accent_text: "#0d1015",
    error: "#f0707a",
    error_bg: "#3a1e22",
    overlay: "rgba(0, 0, 0, 0.6)",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_names_fall_back_to_light() {
        assert_eq!(ResolvedTheme::from_name("DARK"), ResolvedTheme::Dark);
        assert_eq!(ResolvedTheme::from_name(" dark "), ResolvedTheme::Dark);
        assert_eq!(ResolvedTheme::from_name("solarized"), ResolvedTheme::Light);
    }

    #[test]
    fn palettes_differ_per_theme() {
        assert_ne!(
            ResolvedTheme::Light.palette().bg_primary,
            ResolvedTheme::Dark.palette().bg_primary
        );
    }
}
