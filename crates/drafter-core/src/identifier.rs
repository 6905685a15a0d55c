//! Identifiers for document elements and groups.
//!
//! Ids are random-suffixed so that elements created by different documents
//! never collide; an id therefore also tells which document an element
//! belongs to.

use std::fmt;

use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

/// Length of generated ids, in hex digits.
const ID_LEN: usize = 20;

fn random_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

/// Identity of an element within a document.
///
/// # Examples
///
/// ```
/// use drafter_core::identifier::ElementId;
///
/// let a = ElementId::generate();
/// let b = ElementId::generate();
/// assert_ne!(a, b);
/// assert_eq!(a.as_str().len(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Creates a fresh, unique id.
    pub fn generate() -> Self {
        Self(random_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a group of elements that move together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Creates a fresh, unique group id.
    pub fn generate() -> Self {
        Self(random_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns a seed for the hand-drawn renderer, in `1..=2_000_000_000`.
pub fn random_seed() -> u32 {
    rand::rng().random_range(1..=2_000_000_000)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_element_ids_are_unique() {
        let ids: HashSet<ElementId> = (0..1000).map(|_| ElementId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_element_id_format() {
        let id = ElementId::generate();
        assert_eq!(id.as_str().len(), ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn test_group_id_format() {
        let id = GroupId::generate();
        assert_eq!(id.as_str().len(), ID_LEN);
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn test_random_seed_range() {
        for _ in 0..100 {
            let seed = random_seed();
            assert!((1..=2_000_000_000).contains(&seed));
        }
    }
}
