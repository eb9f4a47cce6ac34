//! Switcher - activation engine and public API
//!
//! The switcher never owns the tree it works on. Every operation borrows
//! the host's `DomTree`, and every activation works on a snapshot of the
//! matched elements, so handlers may nest further activations freely.

use std::cell::OnceCell;
use std::rc::Rc;

use fos_dom::{DomTree, NodeId};

use crate::{
    ChangeHandler, EventBus, ItemKind, Query, Result, Schema, SwitchChange, SwitchEvent,
    SwitcherError, SwitcherOptions, Verdict,
};

/// Key-based content switcher
#[derive(Debug, Default)]
pub struct Switcher {
    /// Fixed by `configure` or by first use, whichever comes first
    schema: OnceCell<Schema>,
    /// Consumed by bootstrap
    pub(crate) ignored_groups: Vec<String>,
    bus: EventBus,
    /// Delegation root and query scope once bootstrapped
    pub(crate) scope: Option<NodeId>,
    pub(crate) initialized: bool,
}

impl Switcher {
    /// Create a switcher that will use the default schema unless
    /// configured before first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an already configured switcher
    pub fn with_options(options: SwitcherOptions) -> Self {
        let mut switcher = Self::new();
        switcher.ignored_groups = options.ignored_to_activate_groups.clone();
        switcher.schema = OnceCell::from(Schema::from_options(&options));
        switcher
    }

    /// Apply options and freeze the schema
    pub fn configure(&mut self, options: SwitcherOptions) -> Result<()> {
        self.schema
            .set(Schema::from_options(&options))
            .map_err(|_| SwitcherError::AlreadyConfigured)?;
        self.ignored_groups = options.ignored_to_activate_groups;
        tracing::debug!("Switcher configured: {:?}", self.schema());
        Ok(())
    }

    /// Whether the schema has been fixed
    pub fn is_configured(&self) -> bool {
        self.schema.get().is_some()
    }

    /// Active schema; falls back to (and freezes) the defaults
    pub fn schema(&self) -> &Schema {
        self.schema.get_or_init(Schema::default)
    }

    /// Query view over `tree`, limited to the delegated subtree once
    /// bootstrapped
    pub fn query<'s, 't>(&'s self, tree: &'t DomTree) -> Query<'s, 't> {
        let scope = self.scope.unwrap_or_else(|| tree.root());
        Query::new(self.schema(), tree, scope)
    }

    /// Items of `kind`, optionally restricted to a group and key
    pub fn find_elements(
        &self,
        tree: &DomTree,
        kind: ItemKind,
        group: Option<&str>,
        key: Option<&str>,
    ) -> Vec<NodeId> {
        self.query(tree).find_elements(kind, group, key)
    }

    /// Group of an element, link group first
    pub fn group_of<'t>(&self, tree: &'t DomTree, element: NodeId) -> Option<&'t str> {
        self.query(tree).group_of(element)
    }

    /// Key of an element
    pub fn key_of<'t>(&self, tree: &'t DomTree, element: NodeId) -> Option<&'t str> {
        self.query(tree).key_of(element)
    }

    /// Key of the first active content element of `group`
    pub fn get_active_key(&self, tree: &DomTree, group: Option<&str>) -> Result<Option<String>> {
        let group = group.ok_or(SwitcherError::MissingGroupKey)?;
        let q = self.query(tree);
        Ok(q.find_elements(ItemKind::Content, Some(group), None)
            .into_iter()
            .find(|&el| q.is_active(el))
            .and_then(|el| q.key_of(el))
            .map(str::to_owned))
    }

    /// Content elements, optionally by group and key
    pub fn get_contents(&self, tree: &DomTree, group: Option<&str>, key: Option<&str>) -> Vec<NodeId> {
        self.find_elements(tree, ItemKind::Content, group, key)
    }

    /// Link elements, optionally by group and key
    pub fn get_links(&self, tree: &DomTree, group: Option<&str>, key: Option<&str>) -> Vec<NodeId> {
        self.find_elements(tree, ItemKind::Link, group, key)
    }

    /// Make `key` the active key of `group` (every group when `None`).
    ///
    /// Returns false when a `BeforeChange` handler vetoed; nothing is
    /// touched in that case. Activating a key nothing carries is allowed
    /// and simply leaves the group without a visible item.
    pub fn set_active_key(&mut self, tree: &mut DomTree, group: Option<&str>, key: &str) -> bool {
        if !self.fire(tree, group, key, SwitchEvent::BeforeChange) {
            tracing::debug!("Change of {:?} to {:?} vetoed", group, key);
            return false;
        }

        self.un_activate_all(tree, group);
        let targets = self.find_elements(tree, ItemKind::Both, group, Some(key));
        let class = self.schema().active_class();
        for &el in &targets {
            tree.add_class(el, class);
        }
        tracing::debug!("Activated {:?} in {:?}: {} elements", key, group, targets.len());

        self.fire(tree, group, key, SwitchEvent::AfterChange);
        true
    }

    /// Clear the active class from the items of `group` (every group
    /// when `None`)
    pub fn un_activate_all(&self, tree: &mut DomTree, group: Option<&str>) {
        let class = self.schema().active_class();
        for el in self.find_elements(tree, ItemKind::Both, group, None) {
            tree.remove_class(el, class);
        }
    }

    /// Activate the first item of `group` if it has no active content,
    /// regardless of the ignore list. For groups added after bootstrap.
    pub fn activate_group(&mut self, tree: &mut DomTree, group: Option<&str>) -> Result<()> {
        let group = group.ok_or(SwitcherError::MissingGroupKey)?;
        let contents = self.get_contents(tree, Some(group), None);
        self.activate_defaults(tree, &contents, &[]);
        Ok(())
    }

    /// Give every group among `contents` that has no active member an
    /// active item: its first keyed member in the given order, clicked.
    /// Groups listed in `ignored` are left as they are.
    pub fn activate_defaults(&mut self, tree: &mut DomTree, contents: &[NodeId], ignored: &[String]) {
        struct Pending {
            group: String,
            first: Option<NodeId>,
            has_active: bool,
        }

        let mut groups: Vec<Pending> = Vec::new();
        let q = self.query(tree);
        for &el in contents {
            let Some(group) = q.group_of(el) else {
                continue;
            };
            let active = q.is_active(el);
            let keyed = q.key_of(el).map(|_| el);
            match groups.iter_mut().find(|p| p.group == group) {
                Some(pending) => {
                    pending.has_active |= active;
                    pending.first = pending.first.or(keyed);
                }
                None => groups.push(Pending {
                    group: group.to_owned(),
                    first: keyed,
                    has_active: active,
                }),
            }
        }

        for pending in groups {
            if pending.has_active || ignored.contains(&pending.group) {
                tracing::trace!("Group {:?} left as is", pending.group);
                continue;
            }
            let Some(first) = pending.first else {
                tracing::trace!("Group {:?} has no keyed item", pending.group);
                continue;
            };
            self.click_element(tree, first);
        }
    }

    /// Run the activation a click on `element` would trigger
    pub(crate) fn click_element(&mut self, tree: &mut DomTree, element: NodeId) -> bool {
        let q = self.query(tree);
        let group = q.group_of(element).map(str::to_owned);
        let Some(key) = q.key_of(element).map(str::to_owned) else {
            tracing::trace!("Ignoring item {:?} without key", element);
            return false;
        };
        self.set_active_key(tree, group.as_deref(), &key)
    }

    /// Register a handler for an event; `None` registers the global one
    pub fn on(&mut self, event: SwitchEvent, group: Option<&str>, handler: ChangeHandler) {
        self.bus.on(event, group, handler);
    }

    /// Register a `BeforeChange` handler
    pub fn on_before_change<F>(&mut self, group: Option<&str>, handler: F)
    where
        F: Fn(&mut Switcher, &mut DomTree, &SwitchChange<'_>) -> Verdict + 'static,
    {
        self.on(SwitchEvent::BeforeChange, group, Rc::new(handler));
    }

    /// Register an `AfterChange` handler
    pub fn on_changed<F>(&mut self, group: Option<&str>, handler: F)
    where
        F: Fn(&mut Switcher, &mut DomTree, &SwitchChange<'_>) -> Verdict + 'static,
    {
        self.on(SwitchEvent::AfterChange, group, Rc::new(handler));
    }

    /// Run the global handler, then the group handler unless the first
    /// vetoed. Returns false if either vetoed.
    pub fn fire(&mut self, tree: &mut DomTree, group: Option<&str>, key: &str, event: SwitchEvent) -> bool {
        let change = SwitchChange { event, group, key };

        if let Some(handler) = self.bus.handler(event, None) {
            if handler(self, tree, &change) == Verdict::Veto {
                return false;
            }
        }
        if let Some(handler) = group.and_then(|g| self.bus.handler(event, Some(g))) {
            if handler(self, tree, &change) == Verdict::Veto {
                return false;
            }
        }
        true
    }
}
