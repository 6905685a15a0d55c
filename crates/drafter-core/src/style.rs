//! Style vocabulary for diagram elements.
//!
//! Each type here is a closed set of values with a fixed textual name. Names
//! parse through [`FromStr`] and anything outside the set is rejected with a
//! [`StyleError`]; there is no silent fallback to a default.
//!
//! | Type | Names |
//! |------|-------|
//! | [`ShapeKind`] | `rectangle`, `ellipse`, `diamond` |
//! | [`StrokeStyle`] | `solid`, `dashed`, `dotted` |
//! | [`FillStyle`] | `hachure`, `solid`, `cross-hatch`, `zigzag` |
//! | [`FontFamily`] | `hand`, `normal`, `code`, `excalifont` |
//! | [`TextAlign`] | `left`, `center`, `right` |
//! | [`VerticalAlign`] | `top`, `middle`, `bottom` |
//! | [`Arrowhead`] | `arrow`, `triangle`, `bar`, `circle` (alias `dot`), `diamond` |

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::error::StyleError;

/// Outline of a shape element.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Diamond,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Diamond => "diamond",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rectangle" => Ok(Self::Rectangle),
            "ellipse" => Ok(Self::Ellipse),
            "diamond" => Ok(Self::Diamond),
            _ => Err(StyleError::UnknownShape(s.to_string())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line pattern of an element outline or connector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl FromStr for StrokeStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(StyleError::UnknownStyle {
                kind: "stroke style",
                value: s.to_string(),
            }),
        }
    }
}

/// How the background color fills a shape.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStyle {
    /// Diagonal lines
    Hachure,
    #[default]
    Solid,
    CrossHatch,
    Zigzag,
}

impl FromStr for FillStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hachure" => Ok(Self::Hachure),
            "solid" => Ok(Self::Solid),
            "cross-hatch" => Ok(Self::CrossHatch),
            "zigzag" => Ok(Self::Zigzag),
            _ => Err(StyleError::UnknownStyle {
                kind: "fill style",
                value: s.to_string(),
            }),
        }
    }
}

/// Font used for text. Serialized as the numeric family code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Virgil, hand-drawn
    #[default]
    Hand,
    /// Helvetica
    Normal,
    /// Cascadia, monospace
    Code,
    Excalifont,
}

impl FontFamily {
    /// Returns the numeric code the document format uses for this family.
    pub fn code(self) -> u8 {
        match self {
            Self::Hand => 1,
            Self::Normal => 2,
            Self::Code => 3,
            Self::Excalifont => 5,
        }
    }
}

impl FromStr for FontFamily {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hand" => Ok(Self::Hand),
            "normal" => Ok(Self::Normal),
            "code" => Ok(Self::Code),
            "excalifont" => Ok(Self::Excalifont),
            _ => Err(StyleError::UnknownStyle {
                kind: "font family",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for FontFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Horizontal alignment of text lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl FromStr for TextAlign {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(StyleError::UnknownStyle {
                kind: "text alignment",
                value: s.to_string(),
            }),
        }
    }
}

/// Vertical alignment of text inside its box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl FromStr for VerticalAlign {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "middle" => Ok(Self::Middle),
            "bottom" => Ok(Self::Bottom),
            _ => Err(StyleError::UnknownStyle {
                kind: "vertical alignment",
                value: s.to_string(),
            }),
        }
    }
}

/// Marker drawn at a connector end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrowhead {
    #[default]
    Arrow,
    Triangle,
    Bar,
    Circle,
    Diamond,
}

impl FromStr for Arrowhead {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrow" => Ok(Self::Arrow),
            "triangle" => Ok(Self::Triangle),
            "bar" => Ok(Self::Bar),
            // `dot` is the legacy name of the circle marker
            "circle" | "dot" => Ok(Self::Circle),
            "diamond" => Ok(Self::Diamond),
            _ => Err(StyleError::UnknownStyle {
                kind: "arrowhead",
                value: s.to_string(),
            }),
        }
    }
}
