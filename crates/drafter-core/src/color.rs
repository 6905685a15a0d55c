//! Color handling for Drafter diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and the fixed [`PaletteColor`] table that builders
//! accept as color names.
//!
//! The palette follows the whiteboard's open-color based swatches: stroke
//! colors use shade 4, background colors shade 1. Every stroke color has a
//! paired background color used to fill shapes drawn with it.

use std::{fmt, str::FromStr};

use color::{DynamicColor, Srgb};
use serde::{Serialize, Serializer};

use crate::error::StyleError;

/// Wrapper around the `DynamicColor` type from the color crate
///
/// Colors print as `#rrggbb` (or `#rrggbbaa` when partially transparent) and
/// as `transparent` when fully transparent, which is the notation the
/// document format expects.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use drafter_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red.to_string(), "#ff0000");
    ///
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, StyleError> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(StyleError::InvalidColor {
                value: color_str.to_string(),
                reason: err.to_string(),
            }),
        }
    }

    /// Returns the fully transparent color.
    pub fn transparent() -> Self {
        PaletteColor::Transparent.color()
    }

    /// Returns the alpha (transparency) component of this color.
    ///
    /// The alpha value is between 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns true when the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.alpha() == 0.0
    }

    /// Returns the hex notation of this color in sRGB.
    pub fn to_hex(self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        match rgba.a {
            0 => "transparent".to_string(),
            255 => format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b),
            a => format!("#{:02x}{:02x}{:02x}{a:02x}", rgba.r, rgba.g, rgba.b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        PaletteColor::Black.color()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl From<PaletteColor> for Color {
    fn from(color: PaletteColor) -> Self {
        color.color()
    }
}

/// Named colors accepted by the diagram builders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PaletteColor {
    #[default]
    Black,
    White,
    Transparent,
    Red,
    Pink,
    Grape,
    Violet,
    Blue,
    Cyan,
    Teal,
    Green,
    Yellow,
    Orange,
    Gray,
    RedBg,
    PinkBg,
    GrapeBg,
    VioletBg,
    BlueBg,
    CyanBg,
    TealBg,
    GreenBg,
    YellowBg,
    OrangeBg,
    GrayBg,
}

impl PaletteColor {
    /// All palette entries, strokes first.
    pub const ALL: [PaletteColor; 25] = [
        Self::Black,
        Self::White,
        Self::Transparent,
        Self::Red,
        Self::Pink,
        Self::Grape,
        Self::Violet,
        Self::Blue,
        Self::Cyan,
        Self::Teal,
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Gray,
        Self::RedBg,
        Self::PinkBg,
        Self::GrapeBg,
        Self::VioletBg,
        Self::BlueBg,
        Self::CyanBg,
        Self::TealBg,
        Self::GreenBg,
        Self::YellowBg,
        Self::OrangeBg,
        Self::GrayBg,
    ];

    /// Returns the name used to refer to this color.
    pub fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
            Self::Transparent => "transparent",
            Self::Red => "red",
            Self::Pink => "pink",
            Self::Grape => "grape",
            Self::Violet => "violet",
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Teal => "teal",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Gray => "gray",
            Self::RedBg => "red_bg",
            Self::PinkBg => "pink_bg",
            Self::GrapeBg => "grape_bg",
            Self::VioletBg => "violet_bg",
            Self::BlueBg => "blue_bg",
            Self::CyanBg => "cyan_bg",
            Self::TealBg => "teal_bg",
            Self::GreenBg => "green_bg",
            Self::YellowBg => "yellow_bg",
            Self::OrangeBg => "orange_bg",
            Self::GrayBg => "gray_bg",
        }
    }

    /// Returns the CSS value of this color.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Black => "#1e1e1e",
            Self::White => "#ffffff",
            Self::Transparent => "transparent",
            Self::Red => "#e03131",
            Self::Pink => "#c2255c",
            Self::Grape => "#9c36b5",
            Self::Violet => "#6741d9",
            Self::Blue => "#1971c2",
            Self::Cyan => "#0c8599",
            Self::Teal => "#099268",
            Self::Green => "#2f9e44",
            Self::Yellow => "#f08c00",
            Self::Orange => "#e8590c",
            Self::Gray => "#868e96",
            Self::RedBg => "#ffe3e3",
            Self::PinkBg => "#ffdeeb",
            Self::GrapeBg => "#f3d9fa",
            Self::VioletBg => "#e5dbff",
            Self::BlueBg => "#d0ebff",
            Self::CyanBg => "#c5f6fa",
            Self::TealBg => "#c3fae8",
            Self::GreenBg => "#d3f9d8",
            Self::YellowBg => "#fff3bf",
            Self::OrangeBg => "#ffe8cc",
            Self::GrayBg => "#e9ecef",
        }
    }

    /// Returns the fill paired with this color when used as a stroke.
    ///
    /// Black strokes and colors without a lighter pair fill transparent.
    pub fn background(self) -> PaletteColor {
        match self {
            Self::Red => Self::RedBg,
            Self::Pink => Self::PinkBg,
            Self::Grape => Self::GrapeBg,
            Self::Violet => Self::VioletBg,
            Self::Blue => Self::BlueBg,
            Self::Cyan => Self::CyanBg,
            Self::Teal => Self::TealBg,
            Self::Green => Self::GreenBg,
            Self::Yellow => Self::YellowBg,
            Self::Orange => Self::OrangeBg,
            Self::Gray => Self::GrayBg,
            _ => Self::Transparent,
        }
    }

    /// Returns this entry as a [`Color`].
    pub fn color(self) -> Color {
        Color::new(self.hex()).expect("palette entries are valid CSS colors")
    }
}

impl FromStr for PaletteColor {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.name() == s)
            .ok_or_else(|| StyleError::UnknownColor(s.to_string()))
    }
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
