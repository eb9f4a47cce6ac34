//! DOM Tree (arena-based allocation)

use crate::{DOMTokenList, DomError, DomResult, Node, NodeId};

/// Arena-based DOM tree for memory efficiency
///
/// Index 0 always holds the document node. Nodes are never freed; a
/// removed subtree is simply detached and left in the arena.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()?)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()?)
    }

    /// Number of nodes in the tree, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node exists from construction
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    /// Append `child` as the last child of `parent`, detaching it first if
    /// it already lives elsewhere in the tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound)?;
        if !parent_node.is_container() {
            return Err(DomError::InvalidNodeType);
        }
        self.get(child).ok_or(DomError::NotFound)?;
        if child == self.root() || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        self.attach(parent, child);
        Ok(child)
    }

    /// Link `child` as the last child of `parent` without validation.
    /// Callers guarantee both exist, `parent` is a container and `child`
    /// is not an ancestor of it.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        let last = self.nodes[parent.0 as usize].last_child;
        {
            let node = &mut self.nodes[child.0 as usize];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if let Some(prev) = self.get_mut(last) {
            prev.next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let node = self.get(child).ok_or(DomError::NotFound)?;
        if node.parent != parent {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = match self.get(id) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };
        if !parent.is_valid() {
            return;
        }
        match self.get_mut(prev) {
            Some(p) => p.next_sibling = next,
            None => self.nodes[parent.0 as usize].first_child = next,
        }
        match self.get_mut(next) {
            Some(n) => n.prev_sibling = prev,
            None => self.nodes[parent.0 as usize].last_child = prev,
        }
        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Iterate over the parent chain, nearest first
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.parent);
        Ancestors { tree: self, next }
    }

    /// Whether `node` is `ancestor` or lies inside it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// All nodes below `root` in document (pre-)order, `root` excluded
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).map(|(id, _)| id).collect();
        stack.reverse();
        while let Some(id) = stack.pop() {
            out.push(id);
            let first = stack.len();
            stack.extend(self.children(id).map(|(c, _)| c));
            stack[first..].reverse();
        }
        out
    }

    /// Element descendants of `root` in document order
    pub fn elements(&self, root: NodeId) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.is_element(id))
            .collect()
    }

    /// Whether the node exists and is an element
    pub fn is_element(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_element)
    }

    /// Tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Read an attribute; `None` for missing attributes and non-elements
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Check an attribute's presence
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let elem = self
            .get_mut(id)
            .ok_or(DomError::NotFound)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)?;
        elem.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.get_mut(id)?
            .as_element_mut()?
            .attrs
            .remove_named_item(name)
            .map(|a| a.value)
    }

    /// Token list parsed from the element's `class` attribute
    pub fn class_list(&self, id: NodeId) -> DOMTokenList {
        DOMTokenList::from_string(self.attribute(id, "class").unwrap_or(""))
    }

    /// Check class membership
    pub fn has_class(&self, id: NodeId, token: &str) -> bool {
        self.class_list(id).contains(token)
    }

    /// Add a class token; returns whether the `class` attribute changed
    pub fn add_class(&mut self, id: NodeId, token: &str) -> bool {
        self.update_classes(id, |list| list.add(&[token]))
    }

    /// Remove every occurrence of a class token; returns whether the
    /// `class` attribute changed
    pub fn remove_class(&mut self, id: NodeId, token: &str) -> bool {
        self.update_classes(id, |list| list.remove(&[token]))
    }

    fn update_classes(&mut self, id: NodeId, edit: impl FnOnce(&mut DOMTokenList)) -> bool {
        let Some(elem) = self.get_mut(id).and_then(Node::as_element_mut) else {
            return false;
        };
        let before = DOMTokenList::from_string(elem.class_name());
        let mut after = before.clone();
        edit(&mut after);
        // Untouched when no token changed, so markup keeps its exact spelling
        if after == before {
            return false;
        }
        elem.set_attr("class", &after.value());
        true
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Iterator over the ancestors of a node
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next;
        self.next = self.tree.get(id)?.parent;
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId, NodeId) {
        // root > div > (p > span), em
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        let span = tree.create_element("span");
        let em = tree.create_element("em");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, p).unwrap();
        tree.append_child(p, span).unwrap();
        tree.append_child(div, em).unwrap();
        (tree, div, p, span, em)
    }

    #[test]
    fn test_document_order() {
        let (tree, div, p, span, em) = sample();
        assert_eq!(tree.descendants(tree.root()), vec![div, p, span, em]);
        assert_eq!(tree.descendants(p), vec![span]);
    }

    #[test]
    fn test_ancestors() {
        let (tree, div, p, span, _) = sample();
        let chain: Vec<_> = tree.ancestors(span).collect();
        assert_eq!(chain, vec![p, div, tree.root()]);
        assert!(tree.contains(div, span));
        assert!(!tree.contains(span, div));
    }

    #[test]
    fn test_append_moves_node() {
        let (mut tree, div, p, span, em) = sample();
        tree.append_child(em, span).unwrap();

        assert_eq!(tree.get(p).unwrap().first_child, NodeId::NONE);
        assert_eq!(tree.get(span).unwrap().parent, em);
        assert_eq!(tree.descendants(div), vec![p, em, span]);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let (mut tree, div, _, span, _) = sample();
        assert_eq!(tree.append_child(span, div), Err(DomError::HierarchyRequest));
        assert_eq!(tree.append_child(div, div), Err(DomError::HierarchyRequest));

        let text = tree.create_text("x");
        assert_eq!(tree.append_child(text, span), Err(DomError::InvalidNodeType));
        assert_eq!(tree.append_child(NodeId(999), span), Err(DomError::NotFound));
    }

    #[test]
    fn test_remove_child() {
        let (mut tree, div, p, _, em) = sample();
        assert_eq!(tree.remove_child(div, p), Ok(p));
        assert_eq!(tree.children(div).map(|(id, _)| id).collect::<Vec<_>>(), vec![em]);
        assert_eq!(tree.remove_child(div, p), Err(DomError::NotAChild));
    }

    #[test]
    fn test_class_edits_only_write_on_change() {
        let (mut tree, div, ..) = sample();
        tree.set_attribute(div, "class", "  tab\tpane ").unwrap();

        assert!(!tree.remove_class(div, "active"));
        assert_eq!(tree.attribute(div, "class"), Some("  tab\tpane "));

        assert!(tree.add_class(div, "active"));
        assert_eq!(tree.attribute(div, "class"), Some("tab pane active"));
        assert!(!tree.add_class(div, "active"));

        assert!(tree.remove_class(div, "active"));
        assert_eq!(tree.attribute(div, "class"), Some("tab pane"));
    }

    #[test]
    fn test_remove_class_without_attribute() {
        let (mut tree, _, p, ..) = sample();
        assert!(!tree.remove_class(p, "active"));
        assert!(!tree.has_attribute(p, "class"));
    }

    #[test]
    fn test_text_nodes_have_no_attributes() {
        let mut tree = DomTree::new();
        let text = tree.create_text("hello");
        assert_eq!(tree.set_attribute(text, "id", "x"), Err(DomError::InvalidNodeType));
        assert!(!tree.add_class(text, "active"));
        assert!(tree.attribute(text, "id").is_none());
    }
}
