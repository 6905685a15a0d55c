//! Drafter - Builders for whiteboard diagrams in the Excalidraw format.
//!
//! Three builders share one document model:
//!
//! - [`Canvas`] places shapes, text and connectors at explicit coordinates.
//! - [`Flowchart`] places named nodes automatically along a flow direction.
//! - [`ArchitectureDiagram`] places named components styled by presets.
//!
//! Connectors attach to the facing edges of their endpoints unless a side is
//! pinned. Every builder serializes to a `.excalidraw` JSON file.
//!
//! ```rust,no_run
//! use drafter::{Flowchart, LinkOptions};
//!
//! let mut flowchart = Flowchart::new();
//! flowchart.start("Start").unwrap();
//! flowchart.process("load", "Load input").unwrap();
//! flowchart.end("End").unwrap();
//! flowchart.connect("__start__", "load", &LinkOptions::default()).unwrap();
//! flowchart.connect("load", "__end__", &LinkOptions::default()).unwrap();
//!
//! flowchart.save("pipeline").expect("Failed to save");
//! ```

pub mod architecture;
pub mod canvas;
pub mod config;
pub mod export;
pub mod flowchart;
pub mod outline;

mod error;
mod registry;

pub use drafter_core::{anchor, color, document, element, geometry, identifier, style};

pub use architecture::{ArchitectureDiagram, Preset};
pub use canvas::{Canvas, ConnectOptions, LinkOptions, ShapeOptions, TextOptions};
pub use error::DrafterError;
pub use flowchart::{Direction, Flowchart, LayoutState};
pub use outline::Outline;
