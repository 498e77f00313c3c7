use clap::ValueEnum;
use crossterm::style::Color;
use serde::{Deserialize, Serialize};

/// Selectable theme identity, persisted by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    Classic,
    Ocean,
    Neon,
    Forest,
    Royal,
}

impl ThemeId {
    pub const ALL: [ThemeId; 5] = [
        ThemeId::Classic,
        ThemeId::Ocean,
        ThemeId::Neon,
        ThemeId::Forest,
        ThemeId::Royal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemeId::Classic => "Classic Wood",
            ThemeId::Ocean => "Ocean",
            ThemeId::Neon => "Neon",
            ThemeId::Forest => "Forest",
            ThemeId::Royal => "Royal Purple",
        }
    }

    /// The next theme in `ALL` order, wrapping at the end
    pub fn next(&self) -> ThemeId {
        let i = ThemeId::ALL.iter().position(|t| t == self).unwrap_or(0);
        ThemeId::ALL[(i + 1) % ThemeId::ALL.len()]
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeId::Classic => Theme::classic(),
            ThemeId::Ocean => Theme::ocean(),
            ThemeId::Neon => Theme::neon(),
            ThemeId::Forest => Theme::forest(),
            ThemeId::Royal => Theme::royal(),
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Board frame color
    pub border: Color,
    /// Light squares
    pub cell_light: Color,
    /// Dark squares
    pub cell_dark: Color,
    /// Queen glyph color
    pub queen: Color,
    /// Cursor cell background
    pub cursor_bg: Color,
    /// Attacked-cell shading
    pub attack_bg: Color,
    /// Safe-square highlight (Relaxed rules)
    pub safe_bg: Color,
    /// Hint marker background
    pub hint_bg: Color,
    /// Rejected placement flash
    pub error: Color,
    /// Victory color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Title accent color
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// Warm amber and wood tones (default)
    pub fn classic() -> Self {
        Self {
            bg: Color::Rgb { r: 28, g: 22, b: 16 },
            fg: Color::Rgb { r: 235, g: 225, b: 210 },
            border: Color::Rgb { r: 120, g: 95, b: 60 },
            cell_light: Color::Rgb { r: 240, g: 217, b: 181 },
            cell_dark: Color::Rgb { r: 181, g: 136, b: 99 },
            queen: Color::Rgb { r: 60, g: 30, b: 10 },
            cursor_bg: Color::Rgb { r: 255, g: 200, b: 87 },
            attack_bg: Color::Rgb { r: 170, g: 100, b: 90 },
            safe_bg: Color::Rgb { r: 140, g: 180, b: 120 },
            hint_bg: Color::Rgb { r: 110, g: 190, b: 110 },
            error: Color::Rgb { r: 220, g: 60, b: 50 },
            success: Color::Rgb { r: 80, g: 190, b: 100 },
            info: Color::Rgb { r: 180, g: 170, b: 150 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            accent: Color::Rgb { r: 255, g: 191, b: 0 },
        }
    }

    /// Cool blues and cyans
    pub fn ocean() -> Self {
        Self {
            bg: Color::Rgb { r: 12, g: 24, b: 38 },
            fg: Color::Rgb { r: 215, g: 235, b: 245 },
            border: Color::Rgb { r: 60, g: 110, b: 140 },
            cell_light: Color::Rgb { r: 176, g: 216, b: 230 },
            cell_dark: Color::Rgb { r: 70, g: 130, b: 160 },
            queen: Color::Rgb { r: 10, g: 40, b: 70 },
            cursor_bg: Color::Rgb { r: 80, g: 200, b: 220 },
            attack_bg: Color::Rgb { r: 150, g: 90, b: 110 },
            safe_bg: Color::Rgb { r: 110, g: 190, b: 160 },
            hint_bg: Color::Rgb { r: 100, g: 210, b: 170 },
            error: Color::Rgb { r: 235, g: 80, b: 80 },
            success: Color::Rgb { r: 80, g: 210, b: 160 },
            info: Color::Rgb { r: 150, g: 180, b: 200 },
            key: Color::Rgb { r: 120, g: 220, b: 240 },
            accent: Color::Rgb { r: 0, g: 200, b: 230 },
        }
    }

    /// Fuchsia on dark slate
    pub fn neon() -> Self {
        Self {
            bg: Color::Rgb { r: 15, g: 15, b: 25 },
            fg: Color::Rgb { r: 230, g: 225, b: 245 },
            border: Color::Rgb { r: 90, g: 85, b: 120 },
            cell_light: Color::Rgb { r: 55, g: 52, b: 75 },
            cell_dark: Color::Rgb { r: 35, g: 33, b: 50 },
            queen: Color::Rgb { r: 255, g: 90, b: 240 },
            cursor_bg: Color::Rgb { r: 120, g: 60, b: 160 },
            attack_bg: Color::Rgb { r: 90, g: 35, b: 70 },
            safe_bg: Color::Rgb { r: 40, g: 90, b: 80 },
            hint_bg: Color::Rgb { r: 50, g: 180, b: 140 },
            error: Color::Rgb { r: 255, g: 70, b: 120 },
            success: Color::Rgb { r: 100, g: 255, b: 180 },
            info: Color::Rgb { r: 150, g: 145, b: 180 },
            key: Color::Rgb { r: 255, g: 120, b: 250 },
            accent: Color::Rgb { r: 255, g: 60, b: 230 },
        }
    }

    /// Greens and earth tones
    pub fn forest() -> Self {
        Self {
            bg: Color::Rgb { r: 16, g: 26, b: 18 },
            fg: Color::Rgb { r: 222, g: 235, b: 220 },
            border: Color::Rgb { r: 80, g: 110, b: 75 },
            cell_light: Color::Rgb { r: 190, g: 215, b: 170 },
            cell_dark: Color::Rgb { r: 105, g: 140, b: 90 },
            queen: Color::Rgb { r: 35, g: 55, b: 30 },
            cursor_bg: Color::Rgb { r: 230, g: 200, b: 90 },
            attack_bg: Color::Rgb { r: 160, g: 105, b: 85 },
            safe_bg: Color::Rgb { r: 150, g: 200, b: 130 },
            hint_bg: Color::Rgb { r: 135, g: 205, b: 120 },
            error: Color::Rgb { r: 210, g: 80, b: 60 },
            success: Color::Rgb { r: 110, g: 205, b: 110 },
            info: Color::Rgb { r: 165, g: 185, b: 160 },
            key: Color::Rgb { r: 235, g: 210, b: 120 },
            accent: Color::Rgb { r: 90, g: 200, b: 110 },
        }
    }

    /// Deep purples and lavender
    pub fn royal() -> Self {
        Self {
            bg: Color::Rgb { r: 24, g: 16, b: 34 },
            fg: Color::Rgb { r: 234, g: 224, b: 245 },
            border: Color::Rgb { r: 115, g: 85, b: 150 },
            cell_light: Color::Rgb { r: 216, g: 190, b: 235 },
            cell_dark: Color::Rgb { r: 130, g: 90, b: 170 },
            queen: Color::Rgb { r: 76, g: 29, b: 149 },
            cursor_bg: Color::Rgb { r: 240, g: 200, b: 100 },
            attack_bg: Color::Rgb { r: 165, g: 90, b: 115 },
            safe_bg: Color::Rgb { r: 145, g: 190, b: 140 },
            hint_bg: Color::Rgb { r: 125, g: 200, b: 125 },
            error: Color::Rgb { r: 225, g: 70, b: 85 },
            success: Color::Rgb { r: 115, g: 205, b: 130 },
            info: Color::Rgb { r: 175, g: 160, b: 195 },
            key: Color::Rgb { r: 220, g: 165, b: 255 },
            accent: Color::Rgb { r: 168, g: 85, b: 247 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Store};
    use std::sync::Arc;

    #[test]
    fn test_cycle_visits_every_theme() {
        let mut seen = vec![ThemeId::Classic];
        let mut current = ThemeId::Classic;
        loop {
            current = current.next();
            if current == ThemeId::Classic {
                break;
            }
            seen.push(current);
        }
        assert_eq!(seen, ThemeId::ALL.to_vec());
    }

    #[test]
    fn test_royal_in_cycle_after_forest() {
        assert_eq!(ThemeId::Forest.next(), ThemeId::Royal);
        assert_eq!(ThemeId::Royal.next(), ThemeId::Classic);
        assert_eq!(ThemeId::Royal.name(), "Royal Purple");
    }

    #[test]
    fn test_theme_choice_persists() {
        let store = Store::new(Arc::new(MemoryStorage::new()));
        store.set("theme", &ThemeId::Royal).unwrap();
        assert_eq!(store.get::<ThemeId>("theme"), Some(ThemeId::Royal));

        // Saved under its lowercase name, same as every other theme.
        let raw = serde_json::to_value(ThemeId::Royal).unwrap();
        assert_eq!(raw, serde_json::json!("royal"));
    }
}
