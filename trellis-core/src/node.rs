//! Node kinds and the nodes themselves.
//!
//! Kinds are a closed set. Input with any other value in the `type`
//! column is rejected at the row boundary, never coerced to a default.

use serde::{Deserialize, Serialize};

/// The category of a node in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Top of a hierarchy branch (team lead, root entity).
    Lead,

    /// Regular member of the hierarchy.
    Member,

    /// Leaf-level entity owned by a member.
    Child,
}

impl NodeKind {
    /// Parses a kind from its tabular representation.
    ///
    /// Returns `None` for anything outside the known set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lead" => Some(Self::Lead),
            "member" => Some(Self::Member),
            "child" => Some(Self::Child),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Member => "member",
            Self::Child => "child",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps node kinds to display sizes.
///
/// Renderers draw nodes at these sizes; the engine only derives the
/// number, it never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeMap {
    pub lead: u32,
    pub member: u32,
    pub child: u32,
}

impl Default for SizeMap {
    fn default() -> Self {
        Self {
            lead: 30,
            member: 25,
            child: 20,
        }
    }
}

impl SizeMap {
    /// Returns the size for a kind.
    pub fn size_for(&self, kind: NodeKind) -> u32 {
        match kind {
            NodeKind::Lead => self.lead,
            NodeKind::Member => self.member,
            NodeKind::Child => self.child,
        }
    }
}

/// A node in the hierarchy graph.
///
/// Visibility is tracked per query, outside the node itself, so the same
/// value is reused across queries unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, case-sensitive identifier.
    pub id: String,

    /// Category driving default size and color.
    pub kind: NodeKind,
}

impl Node {
    /// Creates a new node.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_round_trip() {
        for kind in [NodeKind::Lead, NodeKind::Member, NodeKind::Child] {
            assert_eq!(NodeKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_kind_rejects_unknown() {
        assert_eq!(NodeKind::parse("boss"), None);
        assert_eq!(NodeKind::parse(""), None);
        // Kinds are case-sensitive, like ids.
        assert_eq!(NodeKind::parse("Lead"), None);
    }

    #[test]
    fn test_default_sizes() {
        let sizes = SizeMap::default();
        assert_eq!(sizes.size_for(NodeKind::Lead), 30);
        assert_eq!(sizes.size_for(NodeKind::Member), 25);
        assert_eq!(sizes.size_for(NodeKind::Child), 20);
    }

    #[test]
    fn test_custom_sizes() {
        let sizes = SizeMap {
            lead: 50,
            member: 40,
            child: 10,
        };
        assert_eq!(sizes.size_for(NodeKind::Child), 10);
    }
}
