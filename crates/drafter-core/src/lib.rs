//! Drafter Core Types and Definitions
//!
//! This crate provides the foundational types used to assemble whiteboard
//! diagrams. It includes:
//!
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Anchors**: Connector endpoint resolution between two boxes ([`anchor`] module)
//! - **Colors**: CSS colors and the fixed drawing palette ([`color`] module)
//! - **Styles**: Shape variants, stroke and fill styles, fonts ([`style`] module)
//! - **Identifiers**: Unique element and group ids ([`identifier`] module)
//! - **Elements**: Shapes, text and connectors ([`element`] module)
//! - **Documents**: Ordered element storage ([`document`] module)

pub mod anchor;
pub mod color;
pub mod document;
pub mod element;
pub mod error;
pub mod geometry;
pub mod identifier;
pub mod style;
