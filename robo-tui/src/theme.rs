//! CRT-style themes for Robo

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    /// Primary foreground color (text, borders)
    pub fg: Color,
    /// Dimmed foreground (secondary text)
    pub fg_dim: Color,
    /// Background color
    pub bg: Color,
    /// Highlight color (active command, title)
    pub highlight: Color,
    /// Accent color (result codes, lit LEDs)
    pub accent: Color,
    /// Warning color
    pub warning: Color,
    /// Error/danger color
    pub danger: Color,
}

impl Theme {
    /// Look up a theme by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "green" | "phosphor" | "phosphor-green" => Some(CRT_GREEN),
            "amber" | "orange" => Some(CRT_AMBER),
            _ => None,
        }
    }

    /// Get style for normal text
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Get style for dimmed text
    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Get style for highlighted items
    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for borders
    pub fn border(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Get title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for an indicator that is on or off
    pub fn indicator(&self, on: bool) -> Style {
        if on {
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            self.dim()
        }
    }

    /// Style for the battery reading
    pub fn voltage_style(&self, volts: f64, min_volts: f64) -> Style {
        let color = if volts < min_volts {
            self.danger
        } else if volts < min_volts * 1.2 {
            self.warning
        } else {
            self.accent
        };
        Style::default().fg(color)
    }
}

/// Classic phosphor green CRT theme
pub const CRT_GREEN: Theme = Theme {
    name: "phosphor-green",
    fg: Color::Rgb(51, 255, 51),          // #33ff33 - phosphor green
    fg_dim: Color::Rgb(25, 128, 25),      // dimmed green
    bg: Color::Rgb(0, 10, 0),             // near black with green tint
    highlight: Color::Rgb(180, 255, 180), // bright green
    accent: Color::Rgb(100, 255, 100),    // medium green
    warning: Color::Rgb(255, 255, 100),   // yellow-green
    danger: Color::Rgb(255, 100, 100),    // red warning
};

/// Amber CRT theme (1980s monochrome)
pub const CRT_AMBER: Theme = Theme {
    name: "amber",
    fg: Color::Rgb(255, 176, 0),          // #ffb000 - amber
    fg_dim: Color::Rgb(128, 88, 0),       // dimmed amber
    bg: Color::Rgb(10, 5, 0),             // near black with amber tint
    highlight: Color::Rgb(255, 220, 128), // bright amber
    accent: Color::Rgb(255, 200, 64),     // medium amber
    warning: Color::Rgb(255, 255, 100),   // yellow
    danger: Color::Rgb(255, 100, 100),    // red warning
};

impl Default for Theme {
    fn default() -> Self {
        CRT_GREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert_eq!(Theme::by_name("Amber").unwrap().name, "amber");
        assert_eq!(Theme::by_name("phosphor").unwrap().name, "phosphor-green");
        assert!(Theme::by_name("cyberpunk").is_none());
    }
}
