// Colour themes for the dashboard.

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    /// Accent and secondary colour.
    pub swatch: [Rgb; 2],
    /// Light background variant.
    pub light: bool,
}

pub const THEMES: [Theme; 3] = [
    Theme {
        id: "ember",
        name: "Ember",
        swatch: [Rgb(0xf9, 0x73, 0x16), Rgb(0x14, 0xb8, 0xa6)],
        light: false,
    },
    Theme {
        id: "glacier",
        name: "Glacier",
        swatch: [Rgb(0x38, 0xbd, 0xf8), Rgb(0xa8, 0x55, 0xf7)],
        light: false,
    },
    Theme {
        id: "light",
        name: "Light",
        swatch: [Rgb(0x25, 0x63, 0xeb), Rgb(0x14, 0xb8, 0xa6)],
        light: true,
    },
];

/// Storage key the theme preference is persisted under.
pub const THEME_KEY: &str = "fi_theme";

impl Theme {
    pub fn by_id(id: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.id == id)
    }

    pub fn default_theme() -> &'static Theme {
        &THEMES[0]
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let idx = THEMES.iter().position(|t| t.id == self.id).unwrap_or(0);
        &THEMES[(idx + 1) % THEMES.len()]
    }
}
