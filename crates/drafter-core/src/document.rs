//! Ordered element storage.
//!
//! A [`Document`] keeps elements in insertion order, which is also their
//! stacking order once rendered: later elements draw on top of earlier ones.
//! Elements are looked up by [`ElementId`] through the same insertion-ordered
//! map, so an id either names an element of this document or nothing.

use indexmap::IndexMap;
use log::trace;

use crate::{
    color::{Color, PaletteColor},
    element::{Element, ElementKind},
    identifier::{ElementId, GroupId},
};

/// An ordered collection of elements plus a background color.
///
/// # Examples
///
/// ```
/// use drafter_core::document::Document;
/// use drafter_core::element::{Element, Shape};
/// use drafter_core::geometry::{Bounds, Point, Size};
/// use drafter_core::style::ShapeKind;
///
/// let mut document = Document::default();
/// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
/// let id = document.push(Element::from(Shape::new(ShapeKind::Rectangle, bounds)));
///
/// assert_eq!(document.len(), 1);
/// assert!(document.contains(&id));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    elements: IndexMap<ElementId, Element>,
    background: Color,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(PaletteColor::White.color())
    }
}

impl Document {
    /// Creates an empty document with the given background color.
    pub fn new(background: Color) -> Self {
        Self {
            elements: IndexMap::new(),
            background,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Appends an element and returns its id.
    pub fn push(&mut self, element: Element) -> ElementId {
        let id = element.id().clone();
        trace!(id:% = id, index = self.elements.len(); "Appending element");
        self.elements.insert(id.clone(), element);
        id
    }

    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Position of the element in insertion order.
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.get_index_of(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Adds every listed element to `group`.
    ///
    /// Returns the first id that is not part of this document, in which case
    /// no element is modified.
    pub fn assign_group(
        &mut self,
        members: &[ElementId],
        group: &GroupId,
    ) -> Result<(), ElementId> {
        if let Some(missing) = members.iter().find(|id| !self.contains(id)) {
            return Err(missing.clone());
        }
        for id in members {
            if let Some(element) = self.elements.get_mut(id) {
                element.join_group(group.clone());
            }
        }
        Ok(())
    }

    /// Returns the number of shapes, texts and connectors in the document.
    pub fn counts(&self) -> (usize, usize, usize) {
        self.iter()
            .fold((0, 0, 0), |(shapes, texts, connectors), element| match element.kind() {
                ElementKind::Shape(_) => (shapes + 1, texts, connectors),
                ElementKind::Text(_) => (shapes, texts + 1, connectors),
                ElementKind::Connector(_) => (shapes, texts, connectors + 1),
            })
    }
}
