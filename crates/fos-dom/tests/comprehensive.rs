//! Comprehensive tests for fos-dom
//!
//! Tree structure, attribute and class handling, event dispatch.

use fos_dom::{DOMTokenList, Document, DomEvent, DomEventType, DomTree, EventListener, NodeId};

#[test]
fn test_dom_tree_creation() {
    let mut tree = DomTree::new();

    // Create a simple structure: div > span > text
    let div = tree.create_element("div");
    let span = tree.create_element("span");
    let text = tree.create_text("Hello, World!");

    tree.append_child(tree.root(), div).unwrap();
    tree.append_child(div, span).unwrap();
    tree.append_child(span, text).unwrap();

    // Verify structure
    assert_eq!(tree.len(), 4); // root + div + span + text

    let div_node = tree.get(div).unwrap();
    assert_eq!(div_node.parent, tree.root());
    assert_eq!(div_node.first_child, span);

    let span_node = tree.get(span).unwrap();
    assert_eq!(span_node.parent, div);
    assert_eq!(span_node.first_child, text);
}

#[test]
fn test_dom_tree_siblings() {
    let mut tree = DomTree::new();

    let div = tree.create_element("div");
    let child1 = tree.create_element("p");
    let child2 = tree.create_element("p");
    let child3 = tree.create_element("p");

    tree.append_child(tree.root(), div).unwrap();
    tree.append_child(div, child1).unwrap();
    tree.append_child(div, child2).unwrap();
    tree.append_child(div, child3).unwrap();

    let node1 = tree.get(child1).unwrap();
    assert_eq!(node1.next_sibling, child2);
    assert!(!node1.prev_sibling.is_valid());

    let node2 = tree.get(child2).unwrap();
    assert_eq!(node2.prev_sibling, child1);
    assert_eq!(node2.next_sibling, child3);

    let node3 = tree.get(child3).unwrap();
    assert_eq!(node3.prev_sibling, child2);
    assert!(!node3.next_sibling.is_valid());
}

#[test]
fn test_dom_tree_removal() {
    let mut tree = DomTree::new();

    let div = tree.create_element("div");
    let p1 = tree.create_element("p");
    let p2 = tree.create_element("p");
    let p3 = tree.create_element("p");

    tree.append_child(tree.root(), div).unwrap();
    tree.append_child(div, p1).unwrap();
    tree.append_child(div, p2).unwrap();
    tree.append_child(div, p3).unwrap();

    // Remove middle child
    tree.remove_child(div, p2).unwrap();

    // Verify sibling chain is fixed
    assert_eq!(tree.get(p1).unwrap().next_sibling, p3);
    assert_eq!(tree.get(p3).unwrap().prev_sibling, p1);
    assert_eq!(tree.elements(div), vec![p1, p3]);
}

#[test]
fn test_children_iterator() {
    let mut tree = DomTree::new();

    let parent = tree.create_element("ul");
    tree.append_child(tree.root(), parent).unwrap();

    for _ in 0..5 {
        let li = tree.create_element("li");
        tree.append_child(parent, li).unwrap();
    }

    let children: Vec<_> = tree.children(parent).collect();
    assert_eq!(children.len(), 5);
    assert!(children.iter().all(|(_, node)| node.is_element()));
}

#[test]
fn test_document_order_skips_text() {
    let mut doc = Document::default();
    let body = doc.body();
    let list = doc.append_element(body, "ul", &[]).unwrap();
    let first = doc.append_element(list, "li", &[]).unwrap();
    let text = doc.tree.create_text("one");
    doc.tree.append_child(first, text).unwrap();
    let second = doc.append_element(list, "li", &[]).unwrap();
    let after = doc.append_element(body, "p", &[]).unwrap();

    assert_eq!(doc.tree.elements(body), vec![list, first, second, after]);
    assert_eq!(doc.tree.descendants(list), vec![first, text, second]);
}

#[test]
fn test_document_structure() {
    let doc = Document::new("about:blank");

    assert!(doc.document_element().is_valid());
    assert!(doc.head().is_valid());
    assert!(doc.body().is_valid());

    // html should be child of root
    let tree = doc.tree();
    let html_node = tree.get(doc.document_element()).unwrap();
    assert_eq!(html_node.parent, tree.root());
}

#[test]
fn test_empty_document() {
    let doc = Document::empty("about:blank");
    assert!(!doc.body().is_valid());
    assert_eq!(doc.tree().len(), 1);
    assert!(doc.tree().elements(doc.tree().root()).is_empty());
}

#[test]
fn test_node_id_validity() {
    assert!(!NodeId::NONE.is_valid());
    assert!(NodeId::ROOT.is_valid());
}

// ============================================================================
// ATTRIBUTES & CLASSES
// ============================================================================

#[test]
fn test_data_attributes() {
    let mut doc = Document::default();
    let body = doc.body();
    let tab = doc
        .append_element(body, "a", &[("data-link-of-group", "tabs"), ("data-key-in-group", "1")])
        .unwrap();

    assert_eq!(doc.tree.attribute(tab, "data-link-of-group"), Some("tabs"));
    assert!(doc.tree.has_attribute(tab, "DATA-KEY-IN-GROUP"));

    assert_eq!(doc.tree.remove_attribute(tab, "data-key-in-group").as_deref(), Some("1"));
    assert!(!doc.tree.has_attribute(tab, "data-key-in-group"));
}

#[test]
fn test_class_list_round_trip_preserves_others() {
    let mut doc = Document::default();
    let body = doc.body();
    let pane = doc
        .append_element(body, "div", &[("class", "pane\n  active fade active")])
        .unwrap();

    assert!(doc.tree.has_class(pane, "active"));
    assert!(!doc.tree.has_class(pane, "act"));

    assert!(doc.tree.remove_class(pane, "active"));
    assert_eq!(doc.tree.attribute(pane, "class"), Some("pane fade"));
    assert_eq!(doc.tree.class_list(pane), DOMTokenList::from_string("pane fade"));

    assert!(doc.tree.add_class(pane, "active"));
    assert!(!doc.tree.add_class(pane, "active"));
    assert_eq!(doc.tree.attribute(pane, "class"), Some("pane fade active"));
}

// ============================================================================
// EVENTS
// ============================================================================

struct Counter {
    clicks: usize,
    loads: usize,
}

impl EventListener for Counter {
    fn handle_event(&mut self, _tree: &mut DomTree, event: &mut DomEvent) {
        match event.event_type {
            DomEventType::Click => self.clicks += 1,
            DomEventType::DOMContentLoaded | DomEventType::Load => self.loads += 1,
        }
    }
}

#[test]
fn test_delegated_click_reaches_body() {
    let mut doc = Document::default();
    let body = doc.body();
    let button = doc.append_element(body, "button", &[]).unwrap();
    let mut counter = Counter { clicks: 0, loads: 0 };

    let mut event = DomEvent::click(button);
    let proceed = doc
        .tree
        .dispatch_event(&mut event, &mut [(body, &mut counter as &mut dyn EventListener)]);

    assert!(proceed);
    assert_eq!(counter.clicks, 1);
}

#[test]
fn test_finish_loading_fires_both_events() {
    let mut doc = Document::default();
    let root = doc.tree.root();
    let mut counter = Counter { clicks: 0, loads: 0 };

    doc.finish_loading(&mut [(root, &mut counter as &mut dyn EventListener)]);

    assert_eq!(counter.loads, 2);
    assert_eq!(doc.ready_state(), fos_dom::ReadyState::Complete);
}
