//! Chat colors and the palette couples are colored from

use std::fmt;

/// One of the sixteen legacy chat colors a host can render a name in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChatColor {
    /// `§0`
    Black,
    /// `§1`
    DarkBlue,
    /// `§2`
    DarkGreen,
    /// `§3`
    DarkAqua,
    /// `§4`
    DarkRed,
    /// `§5`
    DarkPurple,
    /// `§6`
    Gold,
    /// `§7`
    Gray,
    /// `§8`
    DarkGray,
    /// `§9`
    Blue,
    /// `§a`
    Green,
    /// `§b`
    Aqua,
    /// `§c`
    Red,
    /// `§d`
    LightPurple,
    /// `§e`
    Yellow,
    /// `§f`
    White,
}

impl ChatColor {
    /// Every color, in legacy code order
    pub const ALL: [ChatColor; 16] = [
        ChatColor::Black,
        ChatColor::DarkBlue,
        ChatColor::DarkGreen,
        ChatColor::DarkAqua,
        ChatColor::DarkRed,
        ChatColor::DarkPurple,
        ChatColor::Gold,
        ChatColor::Gray,
        ChatColor::DarkGray,
        ChatColor::Blue,
        ChatColor::Green,
        ChatColor::Aqua,
        ChatColor::Red,
        ChatColor::LightPurple,
        ChatColor::Yellow,
        ChatColor::White,
    ];

    /// Get the color name as persisted in save files
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatColor::Black => "black",
            ChatColor::DarkBlue => "dark_blue",
            ChatColor::DarkGreen => "dark_green",
            ChatColor::DarkAqua => "dark_aqua",
            ChatColor::DarkRed => "dark_red",
            ChatColor::DarkPurple => "dark_purple",
            ChatColor::Gold => "gold",
            ChatColor::Gray => "gray",
            ChatColor::DarkGray => "dark_gray",
            ChatColor::Blue => "blue",
            ChatColor::Green => "green",
            ChatColor::Aqua => "aqua",
            ChatColor::Red => "red",
            ChatColor::LightPurple => "light_purple",
            ChatColor::Yellow => "yellow",
            ChatColor::White => "white",
        }
    }

    /// Parse a color name, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == wanted)
    }

    /// Legacy formatting code character (the one following `§`)
    pub fn code(&self) -> char {
        let index = *self as u32;
        std::char::from_digit(index, 16).unwrap_or('f')
    }

    /// 24-bit RGB value used by renderers that support true color
    pub fn rgb(&self) -> u32 {
        match self {
            ChatColor::Black => 0x000000,
            ChatColor::DarkBlue => 0x0000AA,
            ChatColor::DarkGreen => 0x00AA00,
            ChatColor::DarkAqua => 0x00AAAA,
            ChatColor::DarkRed => 0xAA0000,
            ChatColor::DarkPurple => 0xAA00AA,
            ChatColor::Gold => 0xFFAA00,
            ChatColor::Gray => 0xAAAAAA,
            ChatColor::DarkGray => 0x555555,
            ChatColor::Blue => 0x5555FF,
            ChatColor::Green => 0x55FF55,
            ChatColor::Aqua => 0x55FFFF,
            ChatColor::Red => 0xFF5555,
            ChatColor::LightPurple => 0xFF55FF,
            ChatColor::Yellow => 0xFFFF55,
            ChatColor::White => 0xFFFFFF,
        }
    }
}

impl fmt::Display for ChatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChatColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid chat color: {}", s))
    }
}

/// Error building a palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// A palette needs at least one color
    Empty,
    /// A color name was not recognized
    UnknownColor(String),
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::Empty => write!(f, "palette must contain at least one color"),
            PaletteError::UnknownColor(name) => write!(f, "unknown palette color: {}", name),
        }
    }
}

impl std::error::Error for PaletteError {}

/// Fixed, ordered, non-empty list of colors handed out to new couples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<ChatColor>,
}

impl Palette {
    /// Build a palette from an ordered list of colors
    pub fn new(colors: Vec<ChatColor>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Build a palette from color names (as written in config files)
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, PaletteError> {
        let colors = names
            .iter()
            .map(|n| {
                ChatColor::parse(n.as_ref())
                    .ok_or_else(|| PaletteError::UnknownColor(n.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of colors in the palette
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping around the palette
    pub fn get(&self, index: usize) -> ChatColor {
        self.colors[index % self.colors.len()]
    }

    /// Colors in palette order
    pub fn colors(&self) -> &[ChatColor] {
        &self.colors
    }
}

impl Default for Palette {
    /// Gold, aqua, light purple, yellow, green
    fn default() -> Self {
        Self {
            colors: vec![
                ChatColor::Gold,
                ChatColor::Aqua,
                ChatColor::LightPurple,
                ChatColor::Yellow,
                ChatColor::Green,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_names() {
        assert_eq!(ChatColor::LightPurple.as_str(), "light_purple");
        assert_eq!(ChatColor::parse("GOLD"), Some(ChatColor::Gold));
        assert_eq!(ChatColor::parse("Light_Purple"), Some(ChatColor::LightPurple));
        assert_eq!(ChatColor::parse("pink"), None);
        assert!("pink".parse::<ChatColor>().is_err());
    }

    #[test]
    fn test_every_name_parses_back() {
        for color in ChatColor::ALL {
            assert_eq!(ChatColor::parse(color.as_str()), Some(color));
        }
    }

    #[test]
    fn test_legacy_codes() {
        assert_eq!(ChatColor::Black.code(), '0');
        assert_eq!(ChatColor::Gold.code(), '6');
        assert_eq!(ChatColor::Green.code(), 'a');
        assert_eq!(ChatColor::White.code(), 'f');
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.get(0), ChatColor::Gold);
        assert_eq!(palette.get(4), ChatColor::Green);
        assert_eq!(palette.get(5), ChatColor::Gold);
    }

    #[test]
    fn test_palette_from_names() {
        let palette = Palette::from_names(&["red", "Blue"]).unwrap();
        assert_eq!(palette.colors(), &[ChatColor::Red, ChatColor::Blue]);

        assert_eq!(
            Palette::from_names(&["red", "pink"]),
            Err(PaletteError::UnknownColor("pink".to_string()))
        );
        assert_eq!(Palette::from_names::<&str>(&[]), Err(PaletteError::Empty));
    }
}
