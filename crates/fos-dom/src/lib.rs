//! fOS DOM - Document Object Model
//!
//! Memory-efficient DOM tree implementation.

mod attributes;
mod classlist;
mod document;
mod events;
mod node;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::DOMTokenList;
pub use document::{Document, ReadyState};
pub use events::{DomEvent, DomEventType, EventListener};
pub use node::{ElementData, Node, NodeData};
pub use tree::{Ancestors, Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the NONE sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> Option<usize> {
        self.is_valid().then_some(self.0 as usize)
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found")]
    NotFound,

    #[error("Hierarchy request error")]
    HierarchyRequest,

    #[error("Invalid node type")]
    InvalidNodeType,

    #[error("Node is not a child")]
    NotAChild,
}
