//! Node instance identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity the host assigns to one node instance.
///
/// Cursors are keyed by this value, so two nodes reading the same directory
/// advance independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Creates an identity from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for InstanceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_inner() {
        let id = InstanceId::from("17");
        assert_eq!(id.to_string(), "17");
        assert_eq!(id.as_str(), "17");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = InstanceId::new("node-4");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"node-4\"");
    }
}
