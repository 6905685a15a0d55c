//! Symbolic names for document elements.
//!
//! The flowchart and architecture builders let callers refer to nodes by a
//! name of their choosing (`"p1"`, `"db"`, `"__start__"`). A
//! [`NameRegistry`] maps those names to the [`ElementId`] of the node in the
//! owning document.

use std::collections::HashMap;

use drafter_core::identifier::ElementId;

use crate::error::DrafterError;

/// Mapping from caller-chosen names to element ids.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: HashMap<String, ElementId>,
}

impl NameRegistry {
    /// Fails with [`DrafterError::DuplicateIdentifier`] if `name` is taken.
    ///
    /// Callers check this before creating the element so a rejected name
    /// leaves the document untouched.
    pub fn ensure_available(&self, name: &str) -> Result<(), DrafterError> {
        if self.names.contains_key(name) {
            return Err(DrafterError::DuplicateIdentifier(name.to_string()));
        }
        Ok(())
    }

    /// Binds `name` to `id`.
    pub fn register(&mut self, name: &str, id: ElementId) -> Result<(), DrafterError> {
        self.ensure_available(name)?;
        self.names.insert(name.to_string(), id);
        Ok(())
    }

    /// Looks up the element bound to `name`.
    pub fn resolve(&self, name: &str) -> Result<&ElementId, DrafterError> {
        self.names
            .get(name)
            .ok_or_else(|| DrafterError::UnknownIdentifier(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&ElementId> {
        self.names.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
