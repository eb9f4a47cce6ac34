//! Query engine
//!
//! Classifies elements by their marker attributes and finds the items of a
//! group. An attribute with an empty value counts as absent.

use fos_dom::{DomTree, NodeId};

use crate::{ItemKind, Schema};

/// Read-only view pairing a schema with the tree it is applied to
#[derive(Debug, Clone, Copy)]
pub struct Query<'s, 't> {
    schema: &'s Schema,
    tree: &'t DomTree,
    scope: NodeId,
}

impl<'s, 't> Query<'s, 't> {
    /// Query the subtree under `scope`
    pub fn new(schema: &'s Schema, tree: &'t DomTree, scope: NodeId) -> Self {
        Self { schema, tree, scope }
    }

    fn marker(&self, element: NodeId, attr: &str) -> Option<&'t str> {
        self.tree.attribute(element, attr).filter(|v| !v.is_empty())
    }

    /// Link/content role of an element, computed from its markers
    pub fn role_of(&self, element: NodeId) -> Option<ItemKind> {
        ItemKind::from_markers(
            self.marker(element, self.schema.link_attr()).is_some(),
            self.marker(element, self.schema.content_attr()).is_some(),
        )
    }

    /// Group of an element; the link group wins when both are present
    pub fn group_of(&self, element: NodeId) -> Option<&'t str> {
        self.marker(element, self.schema.link_attr())
            .or_else(|| self.marker(element, self.schema.content_attr()))
    }

    /// Key of an element within its group
    pub fn key_of(&self, element: NodeId) -> Option<&'t str> {
        self.marker(element, self.schema.key_attr())
    }

    /// Whether the element carries the active class
    pub fn is_active(&self, element: NodeId) -> bool {
        self.tree.has_class(element, self.schema.active_class())
    }

    /// Whether `element` is an item of `kind` in `group` with `key`.
    /// `None` for group or key matches any value.
    pub fn matches(
        &self,
        element: NodeId,
        kind: ItemKind,
        group: Option<&str>,
        key: Option<&str>,
    ) -> bool {
        let Some(role) = self.role_of(element) else {
            return false;
        };
        if !role.overlaps(kind) {
            return false;
        }
        let Some(item_key) = self.key_of(element) else {
            return false;
        };
        if key.is_some_and(|k| k != item_key) {
            return false;
        }

        let in_group = |attr: &str| {
            self.marker(element, attr)
                .is_some_and(|g| group.is_none_or(|want| want == g))
        };
        (kind.includes_links() && in_group(self.schema.link_attr()))
            || (kind.includes_contents() && in_group(self.schema.content_attr()))
    }

    /// Matching elements in document order
    pub fn find_elements(
        &self,
        kind: ItemKind,
        group: Option<&str>,
        key: Option<&str>,
    ) -> Vec<NodeId> {
        self.tree
            .elements(self.scope)
            .into_iter()
            .filter(|&el| self.matches(el, kind, group, key))
            .collect()
    }

    /// Nearest element from `target` up to `boundary` (both inclusive)
    /// that carries the link marker
    pub fn link_at(&self, target: NodeId, boundary: NodeId) -> Option<NodeId> {
        if !self.tree.contains(boundary, target) {
            return None;
        }
        for node in std::iter::once(target).chain(self.tree.ancestors(target)) {
            if self.marker(node, self.schema.link_attr()).is_some() {
                return Some(node);
            }
            if node == boundary {
                break;
            }
        }
        None
    }
}
