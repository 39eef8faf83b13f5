//! Node identifiers.
//!
//! Every node in a [`Scene`](crate::scene::Scene) and in the force layout is
//! addressed by a [`NodeId`]. Identifiers are plain integers chosen by the
//! dataset provider; the engine only requires them to be unique.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique node identifier.
///
/// Serializes as a bare integer.
///
/// # Examples
///
/// ```
/// # use settle_core::identifier::NodeId;
/// let id = NodeId::from(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a new identifier
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw integer value
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_value() {
        let mut ids = vec![NodeId::new(3), NodeId::new(1), NodeId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![NodeId::new(1), NodeId::new(2), NodeId::new(3)]);
    }

    #[test]
    fn test_from_u32() {
        assert_eq!(NodeId::from(42), NodeId::new(42));
    }
}
