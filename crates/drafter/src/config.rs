//! Configuration types for Drafter builders.
//!
//! This module provides configuration structures that control document
//! styling and flowchart auto-layout. All types implement
//! [`serde::Deserialize`] so callers can load them from any serde format.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Flow direction, spacing and starting cursor of flowcharts.
//! - [`StyleConfig`] - Document-wide styling such as the background color.
//!
//! # Example
//!
//! ```
//! # use drafter::config::AppConfig;
//! let config: AppConfig = serde_json::from_str(
//!     r#"{ "layout": { "direction": "horizontal", "spacing": 40 } }"#,
//! ).unwrap();
//!
//! assert_eq!(config.layout().spacing(), 40.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use drafter_core::{
    color::{Color, PaletteColor},
    geometry::Point,
};

use crate::{error::DrafterError, flowchart::Direction};

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Auto-layout settings for flowcharts.
///
/// Defaults: vertical flow, 80px spacing, first node at `(100, 100)`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    direction: Direction,
    spacing: f32,
    origin_x: f32,
    origin_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Vertical,
            spacing: 80.0,
            origin_x: 100.0,
            origin_y: 100.0,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`] starting at the default origin.
    pub fn new(direction: Direction, spacing: f32) -> Self {
        Self {
            direction,
            spacing,
            ..Self::default()
        }
    }

    /// Sets where the first node is placed.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin_x = origin.x();
        self.origin_y = origin.y();
        self
    }

    /// Returns the flow direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the gap between consecutive nodes.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Returns the initial cursor position.
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }
}

/// Visual styling configuration for generated documents.
///
/// Fields that are not set fall back to builder defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Document background [`Color`], as a CSS color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Creates a style configuration with the given background color string.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Returns the parsed background [`Color`], white when none is configured.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Config`] if the configured color string cannot
    /// be parsed into a valid [`Color`].
    pub fn background_color(&self) -> Result<Color, DrafterError> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map(|color| color.unwrap_or_else(|| PaletteColor::White.color()))
            .map_err(|err| DrafterError::Config(format!("invalid background color: {err}")))
    }
}
