//! Document - High-level document API

use crate::{DomEvent, DomResult, DomTree, EventListener, NodeId};

/// Document loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    #[default]
    Loading,
    Interactive,
    Complete,
}

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    ready_state: ReadyState,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with an html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Fresh nodes under fresh containers cannot violate the hierarchy
        tree.attach(tree.root(), html);
        tree.attach(html, head);
        tree.attach(html, body);

        Self {
            tree,
            url: url.to_string(),
            ready_state: ReadyState::Loading,
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            ready_state: ReadyState::Loading,
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Current loading state
    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Get document title
    pub fn title(&self) -> String {
        let Some(title) = self
            .tree
            .children(self.head_element)
            .find(|&(id, _)| self.tree.tag_name(id) == Some("title"))
            .map(|(id, _)| id)
        else {
            return String::new();
        };
        self.tree
            .children(title)
            .filter_map(|(_, child)| child.as_text())
            .collect()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID, first in document order
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .elements(self.tree.root())
            .into_iter()
            .find(|&node| self.tree.attribute(node, "id") == Some(id))
    }

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> DomResult<NodeId> {
        let id = self.tree.create_element(tag);
        for (name, value) in attrs {
            self.tree.set_attribute(id, name, value)?;
        }
        self.tree.append_child(parent, id)
    }

    /// Finish loading: fire DOMContentLoaded then load at the document
    /// node, moving the ready state along the way.
    pub fn finish_loading(&mut self, listeners: &mut [(NodeId, &mut dyn EventListener)]) {
        let root = self.tree.root();

        self.ready_state = ReadyState::Interactive;
        self.tree.dispatch_event(&mut DomEvent::content_loaded(root), listeners);

        self.ready_state = ReadyState::Complete;
        self.tree.dispatch_event(&mut DomEvent::load(root), listeners);

        tracing::debug!("Document {} loaded", self.url);
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton() {
        let doc = Document::new("https://example.com/");
        assert_eq!(doc.tree.tag_name(doc.document_element()), Some("html"));
        assert_eq!(doc.tree.tag_name(doc.head()), Some("head"));
        assert_eq!(doc.tree.tag_name(doc.body()), Some("body"));
        assert_eq!(doc.ready_state(), ReadyState::Loading);
    }

    #[test]
    fn test_skeleton_links() {
        let doc = Document::default();
        let html = doc.tree.get(doc.document_element()).unwrap();
        assert_eq!(html.parent, doc.tree.root());
        assert_eq!(html.first_child, doc.head());
        assert_eq!(html.last_child, doc.body());

        let head = doc.tree.get(doc.head()).unwrap();
        assert_eq!(head.parent, doc.document_element());
        assert_eq!(head.next_sibling, doc.body());
        assert_eq!(doc.tree.get(doc.body()).unwrap().prev_sibling, doc.head());
        assert_eq!(doc.tree.elements(doc.tree.root()).len(), 3);
    }

    #[test]
    fn test_title() {
        let mut doc = Document::default();
        assert_eq!(doc.title(), "");

        let head = doc.head();
        let title = doc.append_element(head, "title", &[]).unwrap();
        let text = doc.tree.create_text("Tabs");
        doc.tree.append_child(title, text).unwrap();
        assert_eq!(doc.title(), "Tabs");
    }

    #[test]
    fn test_get_element_by_id() {
        let mut doc = Document::default();
        let body = doc.body();
        let a = doc.append_element(body, "div", &[("id", "main")]).unwrap();
        doc.append_element(a, "span", &[("id", "main")]).unwrap();

        assert_eq!(doc.get_element_by_id("main"), Some(a));
        assert_eq!(doc.get_element_by_id("none"), None);
    }

    #[test]
    fn test_finish_loading_sets_complete() {
        let mut doc = Document::empty("about:blank");
        doc.finish_loading(&mut []);
        assert_eq!(doc.ready_state(), ReadyState::Complete);
    }
}
