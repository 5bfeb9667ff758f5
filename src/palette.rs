//! Dwarf Fortress-style color palette.
//!
//! Species definitions and engine snapshots name their colors with loose
//! strings ("lgray", "light_gray", "grey"...). [`NamedColor::from_name`]
//! folds all of those into a closed set and never fails: unknown names
//! resolve to [`NamedColor::White`].

use serde::{Deserialize, Serialize};

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from unit floats, clamping each channel to `[0, 1]`.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    /// Mixes `self` over `background` at the given opacity.
    pub fn blend_over(self, background: Rgb, opacity: f64) -> Rgb {
        let a = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f64 * a + bg as f64 * (1.0 - a)).round() as u8;
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }

    /// Scales every channel by `factor`, saturating at 255.
    pub fn brighten(self, factor: f64) -> Rgb {
        let scale = |v: u8| (v as f64 * factor).min(255.0).round() as u8;
        Rgb::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedColor {
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Brown,
    LightGray,
    DarkGray,
    LightBlue,
    LightGreen,
    LightCyan,
    LightRed,
    LightMagenta,
    Yellow,
    White,
    Orange,
    Purple,
}

impl NamedColor {
    pub fn rgb(self) -> Rgb {
        match self {
            NamedColor::Black => Rgb::new(38, 23, 10),
            NamedColor::Blue => Rgb::new(15, 82, 186),
            NamedColor::Green => Rgb::new(120, 134, 23),
            NamedColor::Cyan => Rgb::new(86, 184, 114),
            NamedColor::Red => Rgb::new(132, 0, 0),
            NamedColor::Magenta => Rgb::new(124, 26, 96),
            NamedColor::Brown => Rgb::new(104, 75, 58),
            NamedColor::LightGray => Rgb::new(154, 132, 109),
            NamedColor::DarkGray => Rgb::new(65, 53, 43),
            NamedColor::LightBlue => Rgb::new(0, 138, 255),
            NamedColor::LightGreen => Rgb::new(196, 219, 38),
            NamedColor::LightCyan => Rgb::new(72, 255, 184),
            NamedColor::LightRed => Rgb::new(192, 61, 36),
            NamedColor::LightMagenta => Rgb::new(255, 66, 130),
            NamedColor::Yellow => Rgb::new(255, 195, 34),
            NamedColor::White => Rgb::new(252, 250, 208),
            NamedColor::Orange => Rgb::new(255, 150, 50),
            NamedColor::Purple => Rgb::new(150, 70, 200),
        }
    }

    /// Total lookup from a species/engine color name.
    pub fn from_name(name: &str) -> NamedColor {
        match name.trim().to_ascii_lowercase().as_str() {
            "black" => NamedColor::Black,
            "blue" => NamedColor::Blue,
            "green" => NamedColor::Green,
            "cyan" => NamedColor::Cyan,
            "red" => NamedColor::Red,
            "magenta" | "pink" | "lpink" => NamedColor::Magenta,
            "brown" => NamedColor::Brown,
            "gray" | "grey" | "lgray" | "lightgray" | "light_gray" => NamedColor::LightGray,
            "dgray" | "darkgray" | "dark_gray" => NamedColor::DarkGray,
            "lblue" | "lightblue" | "light_blue" => NamedColor::LightBlue,
            "lgreen" | "lightgreen" | "light_green" => NamedColor::LightGreen,
            "lcyan" | "lightcyan" | "light_cyan" => NamedColor::LightCyan,
            "lred" | "lightred" | "light_red" => NamedColor::LightRed,
            "lmagenta" | "lightmagenta" | "light_magenta" => NamedColor::LightMagenta,
            "yellow" => NamedColor::Yellow,
            "orange" => NamedColor::Orange,
            "purple" => NamedColor::Purple,
            _ => NamedColor::White,
        }
    }
}

/// Battlefield background.
pub const BACKGROUND: NamedColor = NamedColor::Black;
/// Default team colors when a snapshot carries none.
pub const TEAM_A: NamedColor = NamedColor::LightGreen;
pub const TEAM_B: NamedColor = NamedColor::LightRed;
