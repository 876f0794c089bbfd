//! Theme and text-size selections.
//!
//! # Invariants
//! - `ThemeId::Ocean` is the baseline: it matches the built-in styling and
//!   needs no override rules.
//! - Unknown ids resolve to `ThemeId::Ocean` / `TextSize::Normal` through
//!   `resolve`, never to an error.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Named colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeId {
    #[default]
    Ocean,
    Emerald,
    Sunset,
    Sakura,
    Crimson,
    Amber,
    Lavender,
    Arctic,
}

impl ThemeId {
    /// Registry order, as shown in theme pickers.
    pub const ALL: [ThemeId; 8] = [
        Self::Ocean,
        Self::Emerald,
        Self::Sunset,
        Self::Sakura,
        Self::Crimson,
        Self::Amber,
        Self::Lavender,
        Self::Arctic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ocean => "ocean",
            Self::Emerald => "emerald",
            Self::Sunset => "sunset",
            Self::Sakura => "sakura",
            Self::Crimson => "crimson",
            Self::Amber => "amber",
            Self::Lavender => "lavender",
            Self::Arctic => "arctic",
        }
    }

    /// Strict parse of a stored or user-supplied id.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.as_str() == value.trim())
    }

    /// Parse with fallback to the baseline theme.
    pub fn resolve(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn is_baseline(self) -> bool {
        self == Self::Ocean
    }

    pub fn palette(self) -> &'static ThemePalette {
        match self {
            Self::Ocean => &OCEAN,
            Self::Emerald => &EMERALD,
            Self::Sunset => &SUNSET,
            Self::Sakura => &SAKURA,
            Self::Crimson => &CRIMSON,
            Self::Amber => &AMBER,
            Self::Lavender => &LAVENDER,
            Self::Arctic => &ARCTIC,
        }
    }
}

impl Display for ThemeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RGB channel triple, rendered as `r,g,b` inside `rgba(...)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

/// Colour values a theme derives every themed surface from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub name: &'static str,
    pub emoji: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub primary_light: &'static str,
    pub secondary_light: &'static str,
    pub primary_rgb: Rgb,
    pub secondary_rgb: Rgb,
}

const OCEAN: ThemePalette = ThemePalette {
    name: "Ocean",
    emoji: "🌊",
    primary: "#3b82f6",
    secondary: "#8b5cf6",
    primary_light: "#60a5fa",
    secondary_light: "#a78bfa",
    primary_rgb: Rgb(59, 130, 246),
    secondary_rgb: Rgb(139, 92, 246),
};

const EMERALD: ThemePalette = ThemePalette {
    name: "Emerald",
    emoji: "🌿",
    primary: "#10b981",
    secondary: "#06b6d4",
    primary_light: "#34d399",
    secondary_light: "#22d3ee",
    primary_rgb: Rgb(16, 185, 129),
    secondary_rgb: Rgb(6, 182, 212),
};

const SUNSET: ThemePalette = ThemePalette {
    name: "Sunset",
    emoji: "🌅",
    primary: "#f97316",
    secondary: "#ec4899",
    primary_light: "#fb923c",
    secondary_light: "#f472b6",
    primary_rgb: Rgb(249, 115, 22),
    secondary_rgb: Rgb(236, 72, 153),
};

const SAKURA: ThemePalette = ThemePalette {
    name: "Sakura",
    emoji: "🌸",
    primary: "#ec4899",
    secondary: "#a855f7",
    primary_light: "#f472b6",
    secondary_light: "#c084fc",
    primary_rgb: Rgb(236, 72, 153),
    secondary_rgb: Rgb(168, 85, 247),
};

const CRIMSON: ThemePalette = ThemePalette {
    name: "Crimson",
    emoji: "🔥",
    primary: "#ef4444",
    secondary: "#f97316",
    primary_light: "#f87171",
    secondary_light: "#fb923c",
    primary_rgb: Rgb(239, 68, 68),
    secondary_rgb: Rgb(249, 115, 22),
};

const AMBER: ThemePalette = ThemePalette {
    name: "Amber",
    emoji: "✨",
    primary: "#f59e0b",
    secondary: "#ea580c",
    primary_light: "#fbbf24",
    secondary_light: "#f97316",
    primary_rgb: Rgb(245, 158, 11),
    secondary_rgb: Rgb(234, 88, 12),
};

const LAVENDER: ThemePalette = ThemePalette {
    name: "Lavender",
    emoji: "💜",
    primary: "#8b5cf6",
    secondary: "#d946ef",
    primary_light: "#a78bfa",
    secondary_light: "#e879f9",
    primary_rgb: Rgb(139, 92, 246),
    secondary_rgb: Rgb(217, 70, 239),
};

const ARCTIC: ThemePalette = ThemePalette {
    name: "Arctic",
    emoji: "❄️",
    primary: "#06b6d4",
    secondary: "#3b82f6",
    primary_light: "#22d3ee",
    secondary_light: "#60a5fa",
    primary_rgb: Rgb(6, 182, 212),
    secondary_rgb: Rgb(59, 130, 246),
};

/// Discrete text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSize {
    Small,
    #[default]
    Normal,
    Big,
}

/// Font sizes in pixels for one text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontScale {
    pub body_px: u8,
    pub heading_px: u8,
    pub subheading_px: u8,
}

impl TextSize {
    pub const ALL: [TextSize; 3] = [Self::Small, Self::Normal, Self::Big];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Normal => "normal",
            Self::Big => "big",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.as_str() == value.trim())
    }

    /// Parse with fallback to `Normal`.
    pub fn resolve(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn font_scale(self) -> FontScale {
        match self {
            Self::Small => FontScale {
                body_px: 13,
                heading_px: 16,
                subheading_px: 14,
            },
            Self::Normal => FontScale {
                body_px: 15,
                heading_px: 20,
                subheading_px: 17,
            },
            Self::Big => FontScale {
                body_px: 18,
                heading_px: 24,
                subheading_px: 21,
            },
        }
    }
}

impl Display for TextSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Rgb, TextSize, ThemeId};

    #[test]
    fn theme_ids_roundtrip_through_wire_strings() {
        for theme in ThemeId::ALL {
            assert_eq!(ThemeId::parse(theme.as_str()), Some(theme));
        }
    }

    #[test]
    fn unknown_theme_resolves_to_ocean() {
        assert_eq!(ThemeId::resolve("neon"), ThemeId::Ocean);
        assert_eq!(ThemeId::resolve("Emerald"), ThemeId::Ocean);
        assert_eq!(ThemeId::resolve(" sakura "), ThemeId::Sakura);
    }

    #[test]
    fn rgb_renders_as_channel_list() {
        assert_eq!(Rgb(6, 182, 212).to_string(), "6,182,212");
        assert_eq!(ThemeId::Crimson.palette().primary_rgb.to_string(), "239,68,68");
    }

    #[test]
    fn unknown_text_size_resolves_to_normal() {
        assert_eq!(TextSize::resolve("huge"), TextSize::Normal);
        assert_eq!(TextSize::resolve("big").font_scale().body_px, 18);
    }
}
