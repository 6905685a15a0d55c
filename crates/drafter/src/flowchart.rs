//! Flowcharts with automatic placement.
//!
//! A [`Flowchart`] keeps a layout cursor. Each node is placed with its
//! top-left corner at the cursor, after which the cursor moves past the node
//! by its extent plus the configured spacing, down for vertical flows and
//! right for horizontal ones. Nodes are registered under caller-chosen names
//! so edges can be declared by name.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;
use serde::Deserialize;

use drafter_core::{
    color::PaletteColor,
    error::StyleError,
    geometry::{Point, Size},
    identifier::ElementId,
    style::ShapeKind,
};

use crate::{
    canvas::{Canvas, LinkOptions, ShapeOptions},
    config::{AppConfig, LayoutConfig},
    error::DrafterError,
    registry::NameRegistry,
};

/// Name of the node added by [`Flowchart::start`].
pub const START_NODE: &str = "__start__";

/// Name of the node added by [`Flowchart::end`].
pub const END_NODE: &str = "__end__";

/// Axis along which consecutive nodes are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Top to bottom
    #[default]
    Vertical,
    /// Left to right
    Horizontal,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl FromStr for Direction {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            _ => Err(StyleError::UnknownStyle {
                kind: "direction",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a flowchart has placed any node yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// No node placed, the cursor is at its origin or where it was set
    Ready,
    /// At least one node placed
    Positioned,
}

/// Flowchart builder with auto-layout.
///
/// # Examples
///
/// ```
/// use drafter::{Flowchart, LinkOptions};
///
/// let mut flowchart = Flowchart::new();
/// flowchart.start("Begin").unwrap();
/// flowchart.process("p1", "Process Data").unwrap();
/// flowchart.decision("d1", "Valid?").unwrap();
/// flowchart.end("Done").unwrap();
///
/// flowchart.connect("__start__", "p1", &LinkOptions::default()).unwrap();
/// flowchart.connect("p1", "d1", &LinkOptions::default()).unwrap();
/// flowchart.connect("d1", "__end__", &LinkOptions::labeled("Yes")).unwrap();
///
/// assert_eq!(flowchart.canvas().document().len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct Flowchart {
    canvas: Canvas,
    nodes: NameRegistry,
    cursor: Point,
    direction: Direction,
    spacing: f32,
}

impl Default for Flowchart {
    fn default() -> Self {
        Self::with_layout(Canvas::new(), &LayoutConfig::default())
    }
}

impl Flowchart {
    /// Creates a vertical flowchart starting at `(100, 100)` with 80px spacing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flowchart with the given flow direction and spacing.
    pub fn with_direction(direction: Direction, spacing: f32) -> Self {
        Self::with_layout(Canvas::new(), &LayoutConfig::new(direction, spacing))
    }

    /// Creates a flowchart using the layout and style sections of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Config`] if the configured background color is invalid.
    pub fn with_config(config: &AppConfig) -> Result<Self, DrafterError> {
        Ok(Self::with_layout(Canvas::with_config(config)?, config.layout()))
    }

    fn with_layout(canvas: Canvas, layout: &LayoutConfig) -> Self {
        Self {
            canvas,
            nodes: NameRegistry::default(),
            cursor: layout.origin(),
            direction: layout.direction(),
            spacing: layout.spacing(),
        }
    }

    pub fn state(&self) -> LayoutState {
        if self.nodes.is_empty() {
            LayoutState::Ready
        } else {
            LayoutState::Positioned
        }
    }

    /// Position where the next node will be placed.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Moves the cursor. Direction and spacing are unchanged.
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = Point::new(x, y);
    }

    /// Places a node at the cursor and registers it under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::DuplicateIdentifier`] if `id` is already used.
    /// Neither the document nor the cursor change in that case.
    pub fn add_node(
        &mut self,
        id: &str,
        label: &str,
        options: &ShapeOptions,
    ) -> Result<ElementId, DrafterError> {
        self.nodes.ensure_available(id)?;

        let position = self.cursor;
        let element = self.canvas.add_shape(position.x(), position.y(), label, options);
        self.nodes.register(id, element.clone())?;
        self.advance(options.size());

        debug!(node = id, x = position.x(), y = position.y(); "Placed flowchart node");
        Ok(element)
    }

    /// Adds the green start ellipse, registered as [`START_NODE`].
    pub fn start(&mut self, label: &str) -> Result<ElementId, DrafterError> {
        let options = ShapeOptions::default()
            .with_shape(ShapeKind::Ellipse)
            .with_color(PaletteColor::Green);
        self.add_node(START_NODE, label, &options)
    }

    /// Adds the red end ellipse, registered as [`END_NODE`].
    pub fn end(&mut self, label: &str) -> Result<ElementId, DrafterError> {
        let options = ShapeOptions::default()
            .with_shape(ShapeKind::Ellipse)
            .with_color(PaletteColor::Red);
        self.add_node(END_NODE, label, &options)
    }

    /// Adds a blue process rectangle.
    pub fn process(&mut self, id: &str, label: &str) -> Result<ElementId, DrafterError> {
        self.add_node(id, label, &ShapeOptions::default())
    }

    /// Adds a yellow 120×80 decision diamond.
    pub fn decision(&mut self, id: &str, label: &str) -> Result<ElementId, DrafterError> {
        let options = ShapeOptions::default()
            .with_shape(ShapeKind::Diamond)
            .with_color(PaletteColor::Yellow)
            .with_size(120.0, 80.0);
        self.add_node(id, label, &options)
    }

    /// Connects two registered nodes, choosing facing edges automatically.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::UnknownIdentifier`] if either name was never
    /// registered; no connector is added in that case.
    pub fn connect(
        &mut self,
        from: &str,
        to: &str,
        options: &LinkOptions,
    ) -> Result<ElementId, DrafterError> {
        let source = self.nodes.resolve(from)?.clone();
        let target = self.nodes.resolve(to)?.clone();
        self.canvas.connect(&source, &target, &options.to_connect_options())
    }

    /// Element id of the node registered under `id`.
    pub fn node(&self, id: &str) -> Option<&ElementId> {
        self.nodes.get(id)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Gives access to the underlying canvas for free placement.
    ///
    /// Elements added this way do not move the cursor.
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

    fn advance(&mut self, size: Size) {
        self.cursor = match self.direction {
            Direction::Vertical => {
                self.cursor.with_y(self.cursor.y() + size.height() + self.spacing)
            }
            Direction::Horizontal => {
                self.cursor.with_x(self.cursor.x() + size.width() + self.spacing)
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use drafter_core::element::Element;
    use float_cmp::assert_approx_eq;

    use super::*;

    fn top_left(flowchart: &Flowchart, id: &str) -> Point {
        let element = flowchart.node(id).unwrap();
        flowchart.canvas().bounds(element).unwrap().min_point()
    }

    #[test]
    fn test_vertical_layout() {
        let mut flowchart = Flowchart::new();
        assert_eq!(flowchart.state(), LayoutState::Ready);

        flowchart.process("a", "A").unwrap();
        flowchart.process("b", "B").unwrap();

        assert_eq!(flowchart.state(), LayoutState::Positioned);
        assert_eq!(top_left(&flowchart, "a"), Point::new(100.0, 100.0));
        assert_eq!(top_left(&flowchart, "b"), Point::new(100.0, 240.0));
        assert_eq!(flowchart.cursor(), Point::new(100.0, 380.0));
    }

    #[test]
    fn test_horizontal_layout() {
        let mut flowchart = Flowchart::with_direction(Direction::Horizontal, 50.0);

        flowchart.process("a", "A").unwrap();
        flowchart.decision("b", "B?").unwrap();

        assert_eq!(top_left(&flowchart, "b"), Point::new(300.0, 100.0));
        assert_eq!(flowchart.cursor(), Point::new(470.0, 100.0));
    }

    #[test]
    fn test_set_cursor_keeps_direction() {
        let mut flowchart = Flowchart::new();
        flowchart.process("a", "A").unwrap();
        flowchart.set_cursor(400.0, 100.0);
        flowchart.process("b", "B").unwrap();

        assert_eq!(top_left(&flowchart, "b"), Point::new(400.0, 100.0));
        assert_eq!(flowchart.direction(), Direction::Vertical);
        assert_approx_eq!(f32, flowchart.cursor().y(), 240.0);
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut flowchart = Flowchart::new();
        let first = flowchart.process("p1", "First").unwrap();
        let cursor = flowchart.cursor();

        let result = flowchart.process("p1", "Second");

        assert!(matches!(result, Err(DrafterError::DuplicateIdentifier(id)) if id == "p1"));
        assert_eq!(flowchart.node("p1"), Some(&first));
        assert_eq!(flowchart.cursor(), cursor);
        assert_eq!(flowchart.canvas().document().len(), 1);
    }

    #[test]
    fn test_connect_unknown_node() {
        let mut flowchart = Flowchart::new();
        flowchart.process("p1", "P").unwrap();

        let result = flowchart.connect("p1", "ghost", &LinkOptions::default());

        assert!(matches!(result, Err(DrafterError::UnknownIdentifier(id)) if id == "ghost"));
        assert_eq!(flowchart.canvas().document().len(), 1);
    }

    #[test]
    fn test_connect_vertical_nodes_uses_bottom_top() {
        let mut flowchart = Flowchart::new();
        flowchart.process("a", "A").unwrap();
        flowchart.process("b", "B").unwrap();

        let id = flowchart.connect("a", "b", &LinkOptions::labeled("next")).unwrap();

        let connector = flowchart
            .canvas()
            .element(&id)
            .and_then(Element::as_connector)
            .unwrap();
        assert_eq!(connector.start(), Point::new(175.0, 160.0));
        assert_eq!(connector.end(), Point::new(175.0, 240.0));
        assert_eq!(connector.label().map(|label| label.text()), Some("next"));
    }

    #[test]
    fn test_convenience_nodes() {
        let mut flowchart = Flowchart::new();
        flowchart.start("Start").unwrap();
        flowchart.decision("d", "Valid?").unwrap();
        flowchart.end("End").unwrap();

        let shape = |id: &str| {
            let element = flowchart.node(id).unwrap();
            flowchart.canvas().element(element).and_then(Element::as_shape).unwrap().clone()
        };

        let start = shape(START_NODE);
        assert_eq!(start.kind(), ShapeKind::Ellipse);
        assert_eq!(start.appearance().stroke_color().to_hex(), "#2f9e44");

        let decision = shape("d");
        assert_eq!(decision.kind(), ShapeKind::Diamond);
        assert_eq!(decision.bounds().to_size(), Size::new(120.0, 80.0));
        assert_eq!(decision.appearance().stroke_color().to_hex(), "#f08c00");

        let end = shape(END_NODE);
        assert_eq!(end.appearance().stroke_color().to_hex(), "#e03131");
        assert_eq!(end.bounds().min_point(), Point::new(100.0, 400.0));
    }

    #[test]
    fn test_second_start_is_duplicate() {
        let mut flowchart = Flowchart::new();
        flowchart.start("Start").unwrap();
        assert!(matches!(
            flowchart.start("Again"),
            Err(DrafterError::DuplicateIdentifier(_))
        ));
    }

    #[test]
    fn test_with_config() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "layout": { "direction": "horizontal", "spacing": 20, "origin_x": 0, "origin_y": 0 }
            }"#,
        )
        .unwrap();
        let mut flowchart = Flowchart::with_config(&config).unwrap();

        flowchart.process("a", "A").unwrap();

        assert_eq!(flowchart.cursor(), Point::new(170.0, 0.0));
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!("horizontal".parse::<Direction>().unwrap(), Direction::Horizontal);
        assert!("diagonal".parse::<Direction>().is_err());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Vertical), Just(Direction::Horizontal)]
    }

    fn sizes_strategy() -> impl Strategy<Value = Vec<(f32, f32)>> {
        prop::collection::vec((1.0f32..400.0, 1.0f32..400.0), 1..12)
    }

    fn check_cursor_advance(
        direction: Direction,
        spacing: f32,
        sizes: &[(f32, f32)],
    ) -> Result<(), TestCaseError> {
        let mut flowchart = Flowchart::with_direction(direction, spacing);

        for (i, &(width, height)) in sizes.iter().enumerate() {
            let before = flowchart.cursor();
            let id = format!("n{i}");
            let element = flowchart
                .add_node(&id, "", &ShapeOptions::default().with_size(width, height))
                .map_err(|err| TestCaseError::fail(err.to_string()))?;

            let placed = flowchart.canvas().bounds(&element).unwrap().min_point();
            prop_assert_eq!(placed, before);

            let after = flowchart.cursor();
            match direction {
                Direction::Vertical => {
                    prop_assert_eq!(after.x(), before.x());
                    prop_assert_eq!(after.y(), before.y() + height + spacing);
                }
                Direction::Horizontal => {
                    prop_assert_eq!(after.y(), before.y());
                    prop_assert_eq!(after.x(), before.x() + width + spacing);
                }
            }
        }

        Ok(())
    }

    proptest! {
        #[test]
        fn cursor_advances_by_extent_plus_spacing(
            direction in direction_strategy(),
            spacing in 0.0f32..200.0,
            sizes in sizes_strategy(),
        ) {
            check_cursor_advance(direction, spacing, &sizes)?;
        }
    }
}
