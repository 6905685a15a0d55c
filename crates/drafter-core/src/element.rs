//! The element model: shapes, free text and connectors.
//!
//! Every [`Element`] carries an identity, renderer metadata (seed, version
//! nonce, group memberships) and one of the kinds in [`ElementKind`].
//! Geometry is fixed at creation. Connectors in particular store the
//! endpoints resolved when they were created and never follow their source
//! or target afterwards.

use unicode_width::UnicodeWidthStr;

use crate::{
    color::{Color, PaletteColor},
    geometry::{Bounds, Point, Side, Size},
    identifier::{ElementId, GroupId, random_seed},
    style::{Arrowhead, FillStyle, FontFamily, ShapeKind, StrokeStyle, TextAlign, VerticalAlign},
};

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Line box height as a fraction of the font size, used for size estimates.
const LINE_HEIGHT_FACTOR: f32 = 1.35;

/// Estimates the box a piece of text occupies when rendered.
///
/// Width follows the widest line, height the number of lines. Wide
/// characters (CJK, emoji) count as two columns.
///
/// # Examples
///
/// ```
/// # use drafter_core::element::estimate_text_size;
/// let size = estimate_text_size("Hello", 20.0);
/// assert!((size.width() - 60.0).abs() < 1e-3);
/// assert!((size.height() - 27.0).abs() < 1e-3);
/// ```
pub fn estimate_text_size(content: &str, font_size: f32) -> Size {
    let lines: Vec<&str> = content.split('\n').collect();
    let widest = lines.iter().map(|line| line.width()).max().unwrap_or(0);

    Size::new(
        widest as f32 * font_size * CHAR_WIDTH_FACTOR,
        lines.len() as f32 * font_size * LINE_HEIGHT_FACTOR,
    )
}

/// Stroke and fill settings shared by all element kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    stroke_color: Color,
    background_color: Color,
    fill_style: FillStyle,
    stroke_width: f32,
    stroke_style: StrokeStyle,
    roughness: u8,
    opacity: u8,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            stroke_color: Color::default(),
            background_color: Color::transparent(),
            fill_style: FillStyle::Solid,
            stroke_width: 2.0,
            stroke_style: StrokeStyle::Solid,
            roughness: 1,
            opacity: 100,
        }
    }
}

impl Appearance {
    /// Appearance of an element stroked with a palette color.
    ///
    /// When `fill` is set the background uses the color's paired light
    /// shade, otherwise it is transparent.
    pub fn from_palette(color: PaletteColor, fill: bool) -> Self {
        let background = if fill {
            color.background()
        } else {
            PaletteColor::Transparent
        };
        Self {
            stroke_color: color.color(),
            background_color: background.color(),
            ..Self::default()
        }
    }

    pub fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_stroke_style(mut self, stroke_style: StrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn with_fill_style(mut self, fill_style: FillStyle) -> Self {
        self.fill_style = fill_style;
        self
    }

    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn with_roughness(mut self, roughness: u8) -> Self {
        self.roughness = roughness;
        self
    }

    /// Sets the opacity, clamped to `0..=100`.
    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity.min(100);
        self
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn background_color(&self) -> Color {
        self.background_color
    }

    pub fn fill_style(&self) -> FillStyle {
        self.fill_style
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn roughness(&self) -> u8 {
        self.roughness
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }
}

/// Text bound to a shape or connector.
///
/// Labels have their own identity since the document format stores them as
/// separate text records pointing back at their container.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    id: ElementId,
    text: String,
    font_size: f32,
    font_family: FontFamily,
    color: Color,
    seed: u32,
    version_nonce: u32,
}

impl Label {
    pub fn new(text: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            id: ElementId::generate(),
            text: text.into(),
            font_size,
            font_family: FontFamily::default(),
            color,
            seed: random_seed(),
            version_nonce: random_seed(),
        }
    }

    pub fn with_font_family(mut self, font_family: FontFamily) -> Self {
        self.font_family = font_family;
        self
    }

    /// Identity of the text record holding this label
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> FontFamily {
        self.font_family
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn version_nonce(&self) -> u32 {
        self.version_nonce
    }

    /// Estimated rendered size of the label text
    pub fn size(&self) -> Size {
        estimate_text_size(&self.text, self.font_size)
    }
}

/// A rectangle, ellipse or diamond.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    bounds: Bounds,
    appearance: Appearance,
    rounded: bool,
    label: Option<Label>,
}

impl Shape {
    pub fn new(kind: ShapeKind, bounds: Bounds) -> Self {
        Self {
            kind,
            bounds,
            appearance: Appearance::default(),
            rounded: false,
            label: None,
        }
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Requests rounded corners. Only rectangles can be rounded.
    pub fn with_rounded(mut self, rounded: bool) -> Self {
        self.rounded = rounded && self.kind == ShapeKind::Rectangle;
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn is_rounded(&self) -> bool {
        self.rounded
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }
}

/// Free-standing text.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    position: Point,
    content: String,
    font_size: f32,
    font_family: FontFamily,
    color: Color,
    align: TextAlign,
    vertical_align: VerticalAlign,
}

impl Text {
    pub fn new(position: Point, content: impl Into<String>, font_size: f32) -> Self {
        Self {
            position,
            content: content.into(),
            font_size,
            font_family: FontFamily::default(),
            color: Color::default(),
            align: TextAlign::default(),
            vertical_align: VerticalAlign::Top,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
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

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn font_family(&self) -> FontFamily {
        self.font_family
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    pub fn vertical_align(&self) -> VerticalAlign {
        self.vertical_align
    }

    /// Top-left corner and estimated size of the text.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(
            self.position,
            estimate_text_size(&self.content, self.font_size),
        )
    }
}

/// How a connector is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectorKind {
    /// An arrow, which may still have no arrowheads.
    #[default]
    Arrow,
    /// A bare line. Lines never carry arrowheads.
    Line,
}

impl ConnectorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arrow => "arrow",
            Self::Line => "line",
        }
    }
}

/// A straight line between two elements, optionally with arrowheads.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    kind: ConnectorKind,
    source: ElementId,
    target: ElementId,
    start: Point,
    end: Point,
    from_side: Side,
    to_side: Side,
    appearance: Appearance,
    start_arrowhead: Option<Arrowhead>,
    end_arrowhead: Option<Arrowhead>,
    label: Option<Label>,
}

impl Connector {
    /// Creates a connector with resolved endpoints and an arrowhead at its end.
    pub fn new(
        source: ElementId,
        target: ElementId,
        (start, from_side): (Point, Side),
        (end, to_side): (Point, Side),
    ) -> Self {
        Self {
            kind: ConnectorKind::Arrow,
            source,
            target,
            start,
            end,
            from_side,
            to_side,
            appearance: Appearance::default(),
            start_arrowhead: None,
            end_arrowhead: Some(Arrowhead::Arrow),
            label: None,
        }
    }

    pub fn with_appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = appearance;
        self
    }

    /// Turns the connector into a bare line, dropping its arrowheads.
    pub fn into_line(mut self) -> Self {
        self.kind = ConnectorKind::Line;
        self.start_arrowhead = None;
        self.end_arrowhead = None;
        self
    }

    /// Sets both arrowheads. Ignored for lines.
    pub fn with_arrowheads(mut self, start: Option<Arrowhead>, end: Option<Arrowhead>) -> Self {
        if self.kind == ConnectorKind::Arrow {
            self.start_arrowhead = start;
            self.end_arrowhead = end;
        }
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    pub fn kind(&self) -> ConnectorKind {
        self.kind
    }

    pub fn source(&self) -> &ElementId {
        &self.source
    }

    pub fn target(&self) -> &ElementId {
        &self.target
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn from_side(&self) -> Side {
        self.from_side
    }

    pub fn to_side(&self) -> Side {
        self.to_side
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn start_arrowhead(&self) -> Option<Arrowhead> {
        self.start_arrowhead
    }

    pub fn end_arrowhead(&self) -> Option<Arrowhead> {
        self.end_arrowhead
    }

    /// Returns true when either end carries an arrowhead.
    pub fn has_arrowhead(&self) -> bool {
        self.start_arrowhead.is_some() || self.end_arrowhead.is_some()
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Displacement from start to end.
    pub fn delta(&self) -> Point {
        self.end.sub_point(self.start)
    }

    /// Midpoint of the connector, where its label sits.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Smallest box containing both endpoints.
    pub fn bounds(&self) -> Bounds {
        let top_left = Point::new(
            self.start.x().min(self.end.x()),
            self.start.y().min(self.end.y()),
        );
        let delta = self.delta().abs();
        Bounds::new_from_top_left(top_left, Size::new(delta.x(), delta.y()))
    }
}

/// The kind-specific part of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Shape(Shape),
    Text(Text),
    Connector(Connector),
}

/// A document element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    kind: ElementKind,
    group_ids: Vec<GroupId>,
    seed: u32,
    version_nonce: u32,
}

impl Element {
    /// Wraps an element kind under a fresh identity.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::generate(),
            kind,
            group_ids: Vec::new(),
            seed: random_seed(),
            version_nonce: random_seed(),
        }
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn group_ids(&self) -> &[GroupId] {
        &self.group_ids
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn version_nonce(&self) -> u32 {
        self.version_nonce
    }

    /// Adds this element to a group.
    pub fn join_group(&mut self, group: GroupId) {
        if !self.group_ids.contains(&group) {
            self.group_ids.push(group);
        }
    }

    /// Returns the bounding box of this element.
    pub fn bounds(&self) -> Bounds {
        match &self.kind {
            ElementKind::Shape(shape) => shape.bounds(),
            ElementKind::Text(text) => text.bounds(),
            ElementKind::Connector(connector) => connector.bounds(),
        }
    }

    /// Returns the bound label, if this element has one.
    pub fn label(&self) -> Option<&Label> {
        match &self.kind {
            ElementKind::Shape(shape) => shape.label(),
            ElementKind::Connector(connector) => connector.label(),
            ElementKind::Text(_) => None,
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match &self.kind {
            ElementKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_connector(&self) -> Option<&Connector> {
        match &self.kind {
            ElementKind::Connector(connector) => Some(connector),
            _ => None,
        }
    }
}

impl From<Shape> for Element {
    fn from(shape: Shape) -> Self {
        Self::new(ElementKind::Shape(shape))
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Self::new(ElementKind::Text(text))
    }
}

impl From<Connector> for Element {
    fn from(connector: Connector) -> Self {
        Self::new(ElementKind::Connector(connector))
    }
}
