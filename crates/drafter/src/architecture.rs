//! Architecture diagrams built from component presets.
//!
//! Every component is placed explicitly and styled by a [`Preset`]; callers
//! only choose a name, a label and a position. Connections are routed
//! between facing edges like any canvas connector.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;

use drafter_core::{
    color::PaletteColor,
    error::StyleError,
    geometry::{Point, Size},
    identifier::ElementId,
    style::ShapeKind,
};

use crate::{
    canvas::{Canvas, LinkOptions, ShapeOptions},
    config::AppConfig,
    error::DrafterError,
    registry::NameRegistry,
};

/// Kind of architecture component.
///
/// | preset    | shape     | color  | size   |
/// |-----------|-----------|--------|--------|
/// | user      | ellipse   | gray   | 80×80  |
/// | service   | rectangle | violet | 140×70 |
/// | database  | ellipse   | green  | 120×60 |
/// | component | rectangle | blue   | 150×80 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    User,
    Service,
    Database,
    Component,
}

impl Preset {
    pub fn shape(self) -> ShapeKind {
        match self {
            Self::User | Self::Database => ShapeKind::Ellipse,
            Self::Service | Self::Component => ShapeKind::Rectangle,
        }
    }

    pub fn color(self) -> PaletteColor {
        match self {
            Self::User => PaletteColor::Gray,
            Self::Service => PaletteColor::Violet,
            Self::Database => PaletteColor::Green,
            Self::Component => PaletteColor::Blue,
        }
    }

    pub fn size(self) -> Size {
        match self {
            Self::User => Size::new(80.0, 80.0),
            Self::Service => Size::new(140.0, 70.0),
            Self::Database => Size::new(120.0, 60.0),
            Self::Component => Size::new(150.0, 80.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Service => "service",
            Self::Database => "database",
            Self::Component => "component",
        }
    }

    /// Shape options for this preset, optionally recolored.
    pub fn shape_options(self, color: Option<PaletteColor>) -> ShapeOptions {
        let size = self.size();
        ShapeOptions::default()
            .with_shape(self.shape())
            .with_color(color.unwrap_or_else(|| self.color()))
            .with_size(size.width(), size.height())
    }
}

impl FromStr for Preset {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "service" => Ok(Self::Service),
            "database" => Ok(Self::Database),
            "component" => Ok(Self::Component),
            _ => Err(StyleError::UnknownStyle {
                kind: "preset",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for architecture diagrams.
///
/// # Examples
///
/// ```
/// use drafter::{ArchitectureDiagram, LinkOptions};
/// use drafter::geometry::Point;
///
/// let mut diagram = ArchitectureDiagram::new();
/// diagram.user("user", "User", Point::new(100.0, 200.0)).unwrap();
/// diagram.service("api", "API Gateway", Point::new(250.0, 200.0), None).unwrap();
/// diagram.database("db", "PostgreSQL", Point::new(450.0, 200.0), None).unwrap();
///
/// diagram.connect("user", "api", &LinkOptions::labeled("HTTPS"), false).unwrap();
/// diagram.connect("api", "db", &LinkOptions::labeled("SQL"), true).unwrap();
///
/// assert_eq!(diagram.canvas().document().len(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchitectureDiagram {
    canvas: Canvas,
    components: NameRegistry,
}

impl ArchitectureDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a diagram using the style section of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Config`] if the configured background color is invalid.
    pub fn with_config(config: &AppConfig) -> Result<Self, DrafterError> {
        Ok(Self {
            canvas: Canvas::with_config(config)?,
            components: NameRegistry::default(),
        })
    }

    /// Places a component with its top-left corner at `at`.
    ///
    /// `color` overrides the preset color when set.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::DuplicateIdentifier`] if `id` is already used;
    /// the document is unchanged in that case.
    pub fn place(
        &mut self,
        preset: Preset,
        id: &str,
        label: &str,
        at: Point,
        color: Option<PaletteColor>,
    ) -> Result<ElementId, DrafterError> {
        self.components.ensure_available(id)?;

        let element = self
            .canvas
            .add_shape(at.x(), at.y(), label, &preset.shape_options(color));
        self.components.register(id, element.clone())?;

        debug!(component = id, preset:% = preset; "Placed component");
        Ok(element)
    }

    /// Places a gray 80×80 user ellipse.
    pub fn user(&mut self, id: &str, label: &str, at: Point) -> Result<ElementId, DrafterError> {
        self.place(Preset::User, id, label, at, None)
    }

    /// Places a 140×70 service rectangle, violet unless `color` is set.
    pub fn service(
        &mut self,
        id: &str,
        label: &str,
        at: Point,
        color: Option<PaletteColor>,
    ) -> Result<ElementId, DrafterError> {
        self.place(Preset::Service, id, label, at, color)
    }

    /// Places a 120×60 database ellipse, green unless `color` is set.
    pub fn database(
        &mut self,
        id: &str,
        label: &str,
        at: Point,
        color: Option<PaletteColor>,
    ) -> Result<ElementId, DrafterError> {
        self.place(Preset::Database, id, label, at, color)
    }

    /// Places a 150×80 component rectangle, blue unless `color` is set.
    pub fn component(
        &mut self,
        id: &str,
        label: &str,
        at: Point,
        color: Option<PaletteColor>,
    ) -> Result<ElementId, DrafterError> {
        self.place(Preset::Component, id, label, at, color)
    }

    /// Connects two components.
    ///
    /// A bidirectional link adds a second, unlabelled connector from `to`
    /// back to `from`. The returned id is the forward connector.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::UnknownIdentifier`] if either name was never
    /// registered; nothing is added in that case.
    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
        options: &LinkOptions,
        bidirectional: bool,
    ) -> Result<ElementId, DrafterError> {
        let source = self.components.resolve(from)?.clone();
        let target = self.components.resolve(to)?.clone();

        let forward = self.canvas.connect(&source, &target, &options.to_connect_options())?;
        if bidirectional {
            let backward = options.unlabeled().to_connect_options();
            self.canvas.connect(&target, &source, &backward)?;
        }
        Ok(forward)
    }

    /// Element id of the component registered under `id`.
    pub fn component_id(&self, id: &str) -> Option<&ElementId> {
        self.components.get(id)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Gives access to the underlying canvas, e.g. for titles and notes.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }

    /// See [`Canvas::to_json`].
    pub fn to_json(&self) -> Result<String, DrafterError> {
        self.canvas.to_json()
    }

    /// See [`Canvas::save`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, DrafterError> {
        self.canvas.save(path)
    }
}
