//! Declarative diagram outlines.
//!
//! An [`Outline`] lists named nodes with explicit positions and the edges
//! between them. It deserializes from any serde format; JSON looks like:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "web", "label": "Web", "x": 100, "y": 100, "color": "blue" },
//!     { "id": "db", "label": "DB", "x": 400, "y": 100, "shape": "ellipse" }
//!   ],
//!   "edges": [{ "from": "web", "to": "db", "label": "SQL" }]
//! }
//! ```
//!
//! Color and shape names are validated while building, so a typo is an
//! error rather than a silently different diagram.

use std::str::FromStr;

use log::info;
use serde::Deserialize;

use drafter_core::{color::PaletteColor, style::ShapeKind};

use crate::{
    canvas::{Canvas, ConnectOptions, ShapeOptions},
    error::DrafterError,
    registry::NameRegistry,
};

/// A node of an [`Outline`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeOutline {
    id: String,
    #[serde(default)]
    label: String,
    x: f32,
    y: f32,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    shape: Option<String>,
    #[serde(default)]
    width: Option<f32>,
    #[serde(default)]
    height: Option<f32>,
}

impl NodeOutline {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resolves the node's style against the canvas defaults.
    fn shape_options(&self) -> Result<ShapeOptions, DrafterError> {
        let mut options = ShapeOptions::default();
        if let Some(color) = &self.color {
            options = options.with_color(PaletteColor::from_str(color)?);
        }
        if let Some(shape) = &self.shape {
            options = options.with_shape(ShapeKind::from_str(shape)?);
        }
        let size = options.size();
        Ok(options.with_size(
            self.width.unwrap_or(size.width()),
            self.height.unwrap_or(size.height()),
        ))
    }
}

/// An edge of an [`Outline`], referring to nodes by id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdgeOutline {
    from: String,
    to: String,
    #[serde(default)]
    label: Option<String>,
}

impl EdgeOutline {
    /// Id of the node the edge leaves.
    pub fn source(&self) -> &str {
        &self.from
    }

    /// Id of the node the edge reaches.
    pub fn target(&self) -> &str {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Nodes and edges describing a whole diagram.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Outline {
    #[serde(default)]
    nodes: Vec<NodeOutline>,
    #[serde(default)]
    edges: Vec<EdgeOutline>,
}

impl Outline {
    /// Parses an outline from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DrafterError::Serialize`] if the input is not a valid outline.
    pub fn from_json(json: &str) -> Result<Self, DrafterError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn nodes(&self) -> &[NodeOutline] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeOutline] {
        &self.edges
    }

    /// Draws every node, then every edge, on `canvas`.
    pub(crate) fn draw(&self, canvas: &mut Canvas) -> Result<(), DrafterError> {
        let mut names = NameRegistry::default();

        for node in &self.nodes {
            names.ensure_available(&node.id)?;
            let options = node.shape_options()?;
            let id = canvas.add_shape(node.x, node.y, &node.label, &options);
            names.register(&node.id, id)?;
        }

        for edge in &self.edges {
            let source = names.resolve(&edge.from)?;
            let target = names.resolve(&edge.to)?;
            let options = match &edge.label {
                Some(label) => ConnectOptions::default().with_label(label.clone()),
                None => ConnectOptions::default(),
            };
            canvas.connect(source, target, &options)?;
        }

        info!(nodes = self.nodes.len(), edges = self.edges.len(); "Outline drawn");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use drafter_core::{element::Element, geometry::Size};

    use super::*;

    #[test]
    fn test_from_outline() {
        let outline = Outline::from_json(
            r#"{
                "nodes": [
                    { "id": "web", "label": "Web", "x": 100, "y": 100, "color": "violet" },
                    {
                        "id": "db", "label": "DB", "x": 400, "y": 100,
                        "shape": "ellipse", "width": 120
                    }
                ],
                "edges": [{ "from": "web", "to": "db", "label": "SQL" }]
            }"#,
        )
        .unwrap();

        let canvas = Canvas::from_outline(&outline).unwrap();

        assert_eq!(canvas.document().counts(), (2, 0, 1));
        let shapes: Vec<_> = canvas.document().iter().filter_map(Element::as_shape).collect();
        assert_eq!(shapes[0].appearance().stroke_color().to_hex(), "#6741d9");
        assert_eq!(shapes[1].kind(), ShapeKind::Ellipse);
        assert_eq!(shapes[1].bounds().to_size(), Size::new(120.0, 60.0));
    }

    #[test]
    fn test_unknown_color() {
        let json = r#"{ "nodes": [{ "id": "a", "x": 0, "y": 0, "color": "purple" }] }"#;
        let outline = Outline::from_json(json).unwrap();
        assert!(matches!(
            Canvas::from_outline(&outline),
            Err(DrafterError::UnknownColor(name)) if name == "purple"
        ));
    }

    #[test]
    fn test_unknown_shape() {
        let json = r#"{ "nodes": [{ "id": "a", "x": 0, "y": 0, "shape": "hexagon" }] }"#;
        let outline = Outline::from_json(json).unwrap();
        assert!(matches!(
            Canvas::from_outline(&outline),
            Err(DrafterError::UnknownShape(_))
        ));
    }

    #[test]
    fn test_edge_to_unknown_node() {
        let outline = Outline::from_json(
            r#"{
                "nodes": [{ "id": "a", "x": 0, "y": 0 }],
                "edges": [{ "from": "a", "to": "b" }]
            }"#,
        )
        .unwrap();
        assert!(matches!(
            Canvas::from_outline(&outline),
            Err(DrafterError::UnknownIdentifier(id)) if id == "b"
        ));
    }

    #[test]
    fn test_duplicate_node() {
        let outline = Outline::from_json(
            r#"{ "nodes": [{ "id": "a", "x": 0, "y": 0 }, { "id": "a", "x": 10, "y": 0 }] }"#,
        )
        .unwrap();
        assert!(matches!(
            Canvas::from_outline(&outline),
            Err(DrafterError::DuplicateIdentifier(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Outline::from_json(r#"{ "nodes": [{ "id": "a" }] }"#),
            Err(DrafterError::Serialize(_))
        ));
    }

    #[test]
    fn test_empty_outline() {
        let canvas = Canvas::from_outline(&Outline::default()).unwrap();
        assert!(canvas.document().is_empty());
    }
}
