use ratatui::style::Color;

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,
    pub completed_bg: ColorSpec, // Background of completed task rows

    pub footer_normal: ColorSpec,
    pub footer_debug: ColorSpec,
    pub footer_alert: ColorSpec,
}

/// RGB color specification.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::rose_pine_dawn()
    }
}

impl Theme {
    /// Rose Pine Dawn theme.
    ///
    pub fn rose_pine_dawn() -> Self {
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: rgb(144, 122, 169),  // Iris
            accent: rgb(215, 130, 126),   // Rose
            banner: rgb(180, 99, 122),    // Love
            text: rgb(87, 82, 121),       // Text
            text_muted: rgb(152, 147, 165), // Muted
            success: rgb(40, 105, 131),   // Pine
            warning: rgb(234, 157, 52),   // Gold
            error: rgb(180, 99, 122),     // Love
            border_active: rgb(144, 122, 169),
            border_normal: rgb(206, 202, 205),
            highlight_bg: rgb(223, 218, 217),
            highlight_fg: rgb(87, 82, 121),
            completed_bg: rgb(215, 255, 217),
            footer_normal: rgb(87, 82, 121),
            footer_debug: rgb(40, 105, 131),
            footer_alert: rgb(180, 99, 122),
        }
    }

    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        Theme {
            name: "tokyo-night".to_string(),
            primary: rgb(125, 207, 255),  // Blue
            accent: rgb(255, 159, 196),   // Magenta
            banner: rgb(255, 159, 196),   // Magenta
            text: rgb(169, 177, 214),     // Foreground
            text_muted: rgb(117, 121, 148), // Comment
            success: rgb(158, 206, 106),  // Green
            warning: rgb(255, 202, 40),   // Yellow
            error: rgb(247, 118, 142),    // Red
            border_active: rgb(125, 207, 255),
            border_normal: rgb(117, 121, 148),
            highlight_bg: rgb(36, 40, 59),
            highlight_fg: rgb(192, 202, 245),
            completed_bg: rgb(40, 62, 45),
            footer_normal: rgb(125, 207, 255),
            footer_debug: rgb(158, 206, 106),
            footer_alert: rgb(247, 118, 142),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        Theme {
            name: "dracula".to_string(),
            primary: rgb(189, 147, 249),  // Purple
            accent: rgb(255, 121, 198),   // Pink
            banner: rgb(255, 121, 198),   // Pink
            text: rgb(248, 248, 242),     // Foreground
            text_muted: rgb(98, 114, 164), // Comment
            success: rgb(80, 250, 123),   // Green
            warning: rgb(241, 250, 140),  // Yellow
            error: rgb(255, 85, 85),      // Red
            border_active: rgb(189, 147, 249),
            border_normal: rgb(98, 114, 164),
            highlight_bg: rgb(68, 71, 90),
            highlight_fg: rgb(248, 248, 242),
            completed_bg: rgb(38, 70, 50),
            footer_normal: rgb(189, 147, 249),
            footer_debug: rgb(80, 250, 123),
            footer_alert: rgb(255, 85, 85),
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            "tokyo-night" => Some(Self::tokyo_night()),
            "dracula" => Some(Self::dracula()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "rose-pine-dawn".to_string(),
            "tokyo-night".to_string(),
            "dracula".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_available_theme_resolves() {
        for name in Theme::available_themes() {
            let theme = Theme::from_name(&name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn test_unknown_theme() {
        assert!(Theme::from_name("solarized").is_none());
        assert_eq!(Theme::default().name, "rose-pine-dawn");
    }

    #[test]
    fn test_color_spec_to_color() {
        assert_eq!(rgb(1, 2, 3).to_color(), Color::Rgb(1, 2, 3));
    }
}
