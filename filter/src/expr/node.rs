//! Semantic filter tree.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::CompareOp;

/// How the children of a group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    And,
    Or,
    Not,
}

impl Combinator {
    /// Case-insensitive keyword lookup.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("and") {
            Some(Combinator::And)
        } else if keyword.eq_ignore_ascii_case("or") {
            Some(Combinator::Or)
        } else if keyword.eq_ignore_ascii_case("not") {
            Some(Combinator::Not)
        } else {
            None
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Combinator::And => "and",
            Combinator::Or => "or",
            Combinator::Not => "not",
        }
    }
}

impl std::fmt::Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A node of the semantic filter tree.
///
/// Serializes as a single-entry map: groups as `{"and": [...]}`, conditions
/// as `{"has-substring-ignore-case": ["0x1006e", "FW"]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterNode {
    Condition {
        /// Canonical lowercase hex ID, e.g. `0x1006e`.
        attribute_id: String,
        op: CompareOp,
        value: String,
    },
    Group {
        combinator: Combinator,
        children: Vec<FilterNode>,
    },
}

impl FilterNode {
    pub fn condition(attribute_id: impl Into<String>, op: CompareOp, value: impl Into<String>) -> Self {
        FilterNode::Condition {
            attribute_id: attribute_id.into(),
            op,
            value: value.into(),
        }
    }

    pub fn group(combinator: Combinator, children: Vec<FilterNode>) -> Self {
        FilterNode::Group {
            combinator,
            children,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, FilterNode::Group { .. })
    }

    /// Direct children (empty for a condition).
    pub fn children(&self) -> &[FilterNode] {
        match self {
            FilterNode::Group { children, .. } => children,
            FilterNode::Condition { .. } => &[],
        }
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(FilterNode::node_count).sum::<usize>()
    }

    /// Every condition in the tree, collected depth-first.
    pub fn conditions(&self) -> Vec<&FilterNode> {
        match self {
            FilterNode::Condition { .. } => vec![self],
            FilterNode::Group { children, .. } => children.iter().flat_map(FilterNode::conditions).collect(),
        }
    }
}

impl Serialize for FilterNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            FilterNode::Condition {
                attribute_id,
                op,
                value,
            } => map.serialize_entry(op.canonical_name(), &(attribute_id, value))?,
            FilterNode::Group {
                combinator,
                children,
            } => map.serialize_entry(combinator.keyword(), children)?,
        }
        map.end()
    }
}
