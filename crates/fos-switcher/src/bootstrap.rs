//! Bootstrap and click delegation

use fos_dom::{DomEvent, DomEventType, DomTree, EventListener, NodeId};

use crate::{ItemKind, Switcher};

impl Switcher {
    /// One-time setup: fix the schema, take `root` as the delegation
    /// ancestor and query scope, then give every group without an active
    /// item its first content item. Later calls do nothing and return
    /// false.
    pub fn init(&mut self, tree: &mut DomTree, root: NodeId) -> bool {
        if self.initialized {
            tracing::debug!("Switcher already initialized");
            return false;
        }
        self.initialized = true;
        self.scope = Some(root);

        let contents = self.find_elements(tree, ItemKind::Content, None, None);
        let ignored = std::mem::take(&mut self.ignored_groups);
        tracing::info!(
            "Switcher initialized at {:?}: {} content elements, {} ignored groups",
            root,
            contents.len(),
            ignored.len()
        );
        self.activate_defaults(tree, &contents, &ignored);
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Node the click listener belongs to, once bootstrapped
    pub fn delegate_root(&self) -> Option<NodeId> {
        self.scope
    }

    /// Handle a click on `target` delegated to `boundary`. Returns `None`
    /// when no keyed link sits between them, otherwise whether the
    /// activation went through.
    pub fn handle_click(&mut self, tree: &mut DomTree, target: NodeId, boundary: NodeId) -> Option<bool> {
        let q = self.query(tree);
        let link = q.link_at(target, boundary)?;
        if q.key_of(link).is_none() {
            tracing::trace!("Link {:?} has no key, click ignored", link);
            return None;
        }
        Some(self.click_element(tree, link))
    }

    /// Dispatch a click on `target` through the tree with this switcher
    /// listening at its delegation root. Returns whether a link took the
    /// click.
    pub fn click(&mut self, tree: &mut DomTree, target: NodeId) -> bool {
        let Some(root) = self.scope else {
            tracing::trace!("Click before bootstrap ignored");
            return false;
        };
        let mut event = DomEvent::click(target);
        !tree.dispatch_event(&mut event, &mut [(root, self as &mut dyn EventListener)])
    }
}

impl EventListener for Switcher {
    fn handle_event(&mut self, tree: &mut DomTree, event: &mut DomEvent) {
        let at = event.current_target.unwrap_or_else(|| tree.root());
        match event.event_type {
            DomEventType::Click => {
                if !self.initialized {
                    return;
                }
                if self.handle_click(tree, event.target, at).is_some() {
                    event.prevent_default();
                    event.stop_propagation();
                }
            }
            DomEventType::DOMContentLoaded | DomEventType::Load => {
                self.init(tree, at);
            }
        }
    }
}
