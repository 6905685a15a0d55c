//! The canvas builder.
//!
//! [`Canvas`] is the lowest-level way to build a document: shapes and text go
//! exactly where the caller puts them, and connectors are routed between the
//! facing edges of existing elements. The flowchart and architecture builders
//! are thin layers over it.

use std::path::{Path, PathBuf};

use log::{debug, info};

use drafter_core::{
    anchor::{self, SideHint},
    color::{Color, PaletteColor},
    document::Document,
    element::{Appearance, Connector, Element, Label, Shape, Text},
    geometry::{Bounds, Point, Size},
    identifier::{ElementId, GroupId},
    style::{Arrowhead, FontFamily, ShapeKind, StrokeStyle, TextAlign},
};

use crate::{config::AppConfig, error::DrafterError, export, outline::Outline};

/// Style and size of a labelled shape.
///
/// Defaults: 150×60 filled, rounded blue rectangle with an 18px label.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeOptions {
    size: Size,
    color: PaletteColor,
    shape: ShapeKind,
    font_size: f32,
    font_family: FontFamily,
    fill: bool,
    rounded: bool,
    stroke_style: StrokeStyle,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            size: Size::new(150.0, 60.0),
            color: PaletteColor::Blue,
            shape: ShapeKind::Rectangle,
            font_size: 18.0,
            font_family: FontFamily::Hand,
            fill: true,
            rounded: true,
            stroke_style: StrokeStyle::Solid,
        }
    }
}

impl ShapeOptions {
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_color(mut self, color: PaletteColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_shape(mut self, shape: ShapeKind) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_font_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Whether the shape is filled with the light shade of its color.
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }

    /// Whether rectangles get rounded corners. Ignored for other shapes.
    pub fn with_rounded(mut self, rounded: bool) -> Self {
        self.rounded = rounded;
        self
    }

    pub fn with_stroke_style(mut self, stroke_style: StrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn color(&self) -> PaletteColor {
        self.color
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }
}

/// Style of free-standing text.
///
/// Defaults: 20px black hand-drawn text, centered.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    font_size: f32,
    color: PaletteColor,
    font_family: FontFamily,
    align: TextAlign,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            color: PaletteColor::Black,
            font_family: FontFamily::Hand,
            align: TextAlign::Center,
        }
    }
}

impl TextOptions {
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: PaletteColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_font_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

/// Style and routing of a connector.
///
/// Defaults: unlabelled black arrow, both ends resolved automatically.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectOptions {
    label: Option<String>,
    color: PaletteColor,
    from_side: SideHint,
    to_side: SideHint,
    stroke_style: StrokeStyle,
    start_arrowhead: Option<Arrowhead>,
    end_arrowhead: Option<Arrowhead>,
    label_font_size: f32,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            label: None,
            color: PaletteColor::Black,
            from_side: SideHint::Auto,
            to_side: SideHint::Auto,
            stroke_style: StrokeStyle::Solid,
            start_arrowhead: None,
            end_arrowhead: Some(Arrowhead::Arrow),
            label_font_size: 16.0,
        }
    }
}

impl ConnectOptions {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: PaletteColor) -> Self {
        self.color = color;
        self
    }

    /// Pins the source and target edges. [`SideHint::Auto`] keeps automatic selection.
    pub fn with_sides(mut self, from: impl Into<SideHint>, to: impl Into<SideHint>) -> Self {
        self.from_side = from.into();
        self.to_side = to.into();
        self
    }

    pub fn with_stroke_style(mut self, stroke_style: StrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn with_arrowheads(mut self, start: Option<Arrowhead>, end: Option<Arrowhead>) -> Self {
        self.start_arrowhead = start;
        self.end_arrowhead = end;
        self
    }

    pub fn with_label_font_size(mut self, font_size: f32) -> Self {
        self.label_font_size = font_size;
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Connector style used by the name-based builders.
///
/// Those builders always route automatically, so only label, color and
/// stroke style can be chosen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkOptions {
    label: Option<String>,
    color: PaletteColor,
    stroke_style: StrokeStyle,
}

impl LinkOptions {
    /// Link with the given label in the default style.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self::default().with_label(label)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: PaletteColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_stroke_style(mut self, stroke_style: StrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    /// Same link without its label.
    pub(crate) fn unlabeled(&self) -> Self {
        Self {
            label: None,
            ..self.clone()
        }
    }

    pub(crate) fn to_connect_options(&self) -> ConnectOptions {
        let options = ConnectOptions::default()
            .with_color(self.color)
            .with_stroke_style(self.stroke_style);
        match &self.label {
            Some(label) => options.with_label(label.clone()),
            None => options,
        }
    }
}

/// Builder for a document with explicitly positioned elements.
///
/// # Examples
///
/// ```rust,no_run
/// use drafter::{Canvas, ConnectOptions, ShapeOptions};
/// use drafter::color::PaletteColor;
///
/// let mut canvas = Canvas::new();
/// let frontend = canvas.add_shape(100.0, 100.0, "Frontend", &ShapeOptions::default());
/// let backend = canvas.add_shape(
///     350.0,
///     100.0,
///     "Backend",
///     &ShapeOptions::default().with_color(PaletteColor::Green),
/// );
///
/// canvas
///     .connect(&frontend, &backend, &ConnectOptions::default().with_label("REST API"))
///     .expect("both ends belong to this canvas");
///
/// let path = canvas.save("architecture").expect("Failed to save");
/// assert_eq!(path.extension().unwrap(), "excalidraw");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    document: Document,
}

impl Canvas {
    /// Creates an empty canvas with a white background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty canvas with the given background color.
    pub fn with_background(background: Color) -> Self {
        Self {
            document: Document::new(background),
        }
    }

    /// Creates an empty canvas styled by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Config`] if the configured background color is invalid.
    pub fn with_config(config: &AppConfig) -> Result<Self, DrafterError> {
        Ok(Self::with_background(config.style().background_color()?))
    }

    /// Builds a canvas from an [`Outline`].
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::UnknownColor`] or [`DrafterError::UnknownShape`]
    /// for style names outside the palette, [`DrafterError::DuplicateIdentifier`]
    /// for repeated node ids and [`DrafterError::UnknownIdentifier`] for edges
    /// naming a missing node.
    pub fn from_outline(outline: &Outline) -> Result<Self, DrafterError> {
        let mut canvas = Self::new();
        outline.draw(&mut canvas)?;
        Ok(canvas)
    }

    /// Adds a labelled shape with its top-left corner at `(x, y)`.
    ///
    /// An empty label adds the bare shape.
    pub fn add_shape(&mut self, x: f32, y: f32, label: &str, options: &ShapeOptions) -> ElementId {
        let bounds = Bounds::new_from_top_left(Point::new(x, y), options.size);
        let appearance = Appearance::from_palette(options.color, options.fill)
            .with_stroke_style(options.stroke_style);

        let mut shape = Shape::new(options.shape, bounds)
            .with_appearance(appearance)
            .with_rounded(options.rounded);
        if !label.is_empty() {
            shape = shape.with_label(
                Label::new(label, options.font_size, options.color.color())
                    .with_font_family(options.font_family),
            );
        }

        let id = self.document.push(Element::from(shape));
        debug!(id:% = id, shape:% = options.shape, x, y; "Added shape");
        id
    }

    /// Adds free-standing text with its top-left corner at `(x, y)`.
    pub fn add_text(&mut self, x: f32, y: f32, content: &str, options: &TextOptions) -> ElementId {
        let text = Text::new(Point::new(x, y), content, options.font_size)
            .with_color(options.color.color())
            .with_font_family(options.font_family)
            .with_align(options.align);

        let id = self.document.push(Element::from(text));
        debug!(id:% = id, x, y; "Added text");
        id
    }

    /// Connects two elements of this canvas with an arrow.
    ///
    /// Endpoints are resolved from the current geometry of both elements and
    /// are not updated afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::DanglingReference`] if either id does not name
    /// an element of this canvas; nothing is added in that case.
    pub fn connect(
        &mut self,
        source: &ElementId,
        target: &ElementId,
        options: &ConnectOptions,
    ) -> Result<ElementId, DrafterError> {
        let source_bounds = self.resolve_bounds(source)?;
        let target_bounds = self.resolve_bounds(target)?;

        let anchors =
            anchor::resolve(source_bounds, target_bounds, options.from_side, options.to_side);
        let appearance = Appearance::from_palette(options.color, false)
            .with_stroke_style(options.stroke_style);

        let mut connector = Connector::new(
            source.clone(),
            target.clone(),
            (anchors.start(), anchors.from_side()),
            (anchors.end(), anchors.to_side()),
        )
        .with_appearance(appearance)
        .with_arrowheads(options.start_arrowhead, options.end_arrowhead);
        if let Some(label) = options.label.as_deref().filter(|label| !label.is_empty()) {
            connector = connector.with_label(Label::new(
                label,
                options.label_font_size,
                options.color.color(),
            ));
        }

        let id = self.document.push(Element::from(connector));
        debug!(
            id:% = id,
            source:% = source,
            target:% = target,
            from_side:% = anchors.from_side(),
            to_side:% = anchors.to_side();
            "Connected elements"
        );
        Ok(id)
    }

    /// Connects two elements with a plain line: same routing as
    /// [`Canvas::connect`], without arrowheads.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::DanglingReference`] if either id does not name
    /// an element of this canvas.
    pub fn connect_plain(
        &mut self,
        source: &ElementId,
        target: &ElementId,
        options: &ConnectOptions,
    ) -> Result<ElementId, DrafterError> {
        let options = options.clone().with_arrowheads(None, None);
        self.connect(source, target, &options)
    }

    /// Draws a line between the centers of two elements.
    ///
    /// Unlike [`Canvas::connect`] the line is not routed to the element
    /// edges and has no arrowheads. The facing sides are still recorded on
    /// the connector.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::DanglingReference`] if either id does not name
    /// an element of this canvas; nothing is added in that case.
    pub fn line_between(
        &mut self,
        source: &ElementId,
        target: &ElementId,
        color: PaletteColor,
    ) -> Result<ElementId, DrafterError> {
        let source_bounds = self.resolve_bounds(source)?;
        let target_bounds = self.resolve_bounds(target)?;
        let (from_side, to_side) = anchor::facing_sides(source_bounds, target_bounds);

        let connector = Connector::new(
            source.clone(),
            target.clone(),
            (source_bounds.center(), from_side),
            (target_bounds.center(), to_side),
        )
        .with_appearance(Appearance::from_palette(color, false))
        .into_line();

        let id = self.document.push(Element::from(connector));
        debug!(id:% = id, source:% = source, target:% = target; "Drew line");
        Ok(id)
    }

    /// Groups elements so they move together in the editor.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::DanglingReference`] for the first member that
    /// is not part of this canvas; no element is grouped in that case.
    pub fn group(&mut self, members: &[ElementId]) -> Result<GroupId, DrafterError> {
        let group = GroupId::generate();
        self.document
            .assign_group(members, &group)
            .map_err(DrafterError::DanglingReference)?;
        debug!(group:% = group, members = members.len(); "Grouped elements");
        Ok(group)
    }

    /// Returns the document built so far.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Consumes the canvas, returning its document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Looks up an element of this canvas.
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.document.get(id)
    }

    /// Returns the bounding box of an element of this canvas.
    pub fn bounds(&self, id: &ElementId) -> Option<Bounds> {
        self.document.get(id).map(Element::bounds)
    }

    /// Serializes the document to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DrafterError> {
        export::excalidraw::to_json(&self.document)
    }

    /// Writes the document to `path`, appending the `.excalidraw` extension
    /// when missing, and returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Io`] if `path` names no file (empty, `..` or
    /// ending in a separator) or the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<PathBuf, DrafterError> {
        let json = self.to_json()?;
        let path = export::write_document(path.as_ref(), &json)?;
        info!(path = path.display().to_string(), elements = self.document.len(); "Diagram saved");
        Ok(path)
    }

    fn resolve_bounds(&self, id: &ElementId) -> Result<Bounds, DrafterError> {
        self.bounds(id).ok_or_else(|| DrafterError::DanglingReference(id.clone()))
    }
}
