//! Color theme for the TUI.
//!
//! Provides dark and light themes built on a Tailwind CSS palette, plus a
//! fixed colour per creature type used for card borders and type badges.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Theme variant (dark or light).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    /// The other variant.
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme variant.
    pub variant: ThemeVariant,

    // Base colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // Interactive elements
    pub selected: Style,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // UI elements
    pub border: Style,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,

    // Cards
    pub card_name: Style,
    pub card_number: Style,

    // Statistics chart
    pub stat_bar: Style,
    pub stat_empty: Style,

    // Progress
    pub progress_bar: Style,
    pub progress_bg: Style,

    // Header/Footer
    pub header: Style,
    pub footer: Style,

    // Search bar
    pub search_prompt: Style,
    pub search_input: Style,
    pub search_cursor: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        // Accent colors (Tailwind CSS)
        let blue_400 = Color::Rgb(96, 165, 250);
        let blue_500 = Color::Rgb(59, 130, 246);
        let green_500 = Color::Rgb(34, 197, 94);
        let yellow_500 = Color::Rgb(234, 179, 8);
        let red_500 = Color::Rgb(239, 68, 68);
        let sky_600 = Color::Rgb(90, 150, 192);

        Self {
            variant: ThemeVariant::Dark,
            background: slate_900,
            foreground: slate_100,
            muted: slate_500,

            selected: Style::new().bg(slate_700).fg(slate_50).add_modifier(Modifier::BOLD),

            success: green_500,
            warning: yellow_500,
            error: red_500,
            info: blue_400,

            border: Style::new().fg(slate_600),
            title: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_key: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_400),

            card_name: Style::new().fg(slate_50).add_modifier(Modifier::BOLD),
            card_number: Style::new().fg(slate_400),

            stat_bar: Style::new().fg(sky_600),
            stat_empty: Style::new().fg(slate_700),

            progress_bar: Style::new().fg(blue_500),
            progress_bg: Style::new().fg(slate_700),

            header: Style::new().bg(slate_800).fg(slate_100),
            footer: Style::new().bg(slate_800).fg(slate_400),

            search_prompt: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            search_input: Style::new().fg(slate_100),
            search_cursor: Style::new().add_modifier(Modifier::REVERSED),
        }
    }

    /// Light theme using a slate-based palette.
    pub fn light() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_200 = Color::Rgb(226, 232, 240);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        // Accent colors (Tailwind CSS - darker variants for light theme)
        let blue_600 = Color::Rgb(37, 99, 235);
        let blue_700 = Color::Rgb(29, 78, 216);
        let green_600 = Color::Rgb(22, 163, 74);
        let yellow_600 = Color::Rgb(202, 138, 4);
        let red_600 = Color::Rgb(220, 38, 38);
        let sky_600 = Color::Rgb(90, 150, 192);

        Self {
            variant: ThemeVariant::Light,
            background: slate_50,
            foreground: slate_900,
            muted: slate_500,

            selected: Style::new().bg(slate_200).fg(slate_900).add_modifier(Modifier::BOLD),

            success: green_600,
            warning: yellow_600,
            error: red_600,
            info: blue_600,

            border: Style::new().fg(slate_400),
            title: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            help_key: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_600),

            card_name: Style::new().fg(slate_900).add_modifier(Modifier::BOLD),
            card_number: Style::new().fg(slate_600),

            stat_bar: Style::new().fg(sky_600),
            stat_empty: Style::new().fg(slate_200),

            progress_bar: Style::new().fg(blue_600),
            progress_bg: Style::new().fg(slate_200),

            header: Style::new().bg(slate_100).fg(slate_800),
            footer: Style::new().bg(slate_100).fg(slate_600),

            search_prompt: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            search_input: Style::new().fg(slate_900),
            search_cursor: Style::new().add_modifier(Modifier::REVERSED),
        }
    }

    /// Create theme from variant.
    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Toggle between dark and light themes.
    pub fn toggle(&self) -> Self {
        Self::from_variant(self.variant.toggle())
    }

    /// Colour for a creature type name. Unknown types use the muted colour.
    pub fn type_color(&self, type_name: &str) -> Color {
        match type_name {
            "normal" => Color::Rgb(168, 167, 122),
            "fire" => Color::Rgb(238, 129, 48),
            "water" => Color::Rgb(99, 144, 240),
            "electric" => Color::Rgb(247, 208, 44),
            "grass" => Color::Rgb(122, 199, 76),
            "ice" => Color::Rgb(150, 217, 214),
            "fighting" => Color::Rgb(194, 46, 40),
            "poison" => Color::Rgb(163, 62, 161),
            "ground" => Color::Rgb(226, 191, 101),
            "flying" => Color::Rgb(169, 143, 243),
            "psychic" => Color::Rgb(249, 85, 135),
            "bug" => Color::Rgb(166, 185, 26),
            "rock" => Color::Rgb(182, 161, 54),
            "ghost" => Color::Rgb(115, 87, 151),
            "dragon" => Color::Rgb(111, 53, 252),
            "dark" => Color::Rgb(112, 87, 70),
            "steel" => Color::Rgb(183, 183, 206),
            "fairy" => Color::Rgb(214, 133, 173),
            _ => self.muted,
        }
    }

    /// Border style for a card whose primary type is `type_name`.
    pub fn card_border(&self, type_name: Option<&str>) -> Style {
        match type_name {
            Some(name) => Style::new().fg(self.type_color(name)),
            None => self.border,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
