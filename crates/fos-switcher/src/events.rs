//! Change events
//!
//! One handler per (event, group) slot. A slot without a group is global
//! and runs before the group's own handler.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use fos_dom::DomTree;

use crate::Switcher;

/// Switcher lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwitchEvent {
    /// Fired before the active key changes; may veto
    BeforeChange,
    /// Fired after the active key changed
    AfterChange,
}

/// Handler decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verdict {
    #[default]
    Continue,
    Veto,
}

impl From<bool> for Verdict {
    fn from(proceed: bool) -> Self {
        if proceed { Verdict::Continue } else { Verdict::Veto }
    }
}

/// Transition being announced to a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchChange<'a> {
    pub event: SwitchEvent,
    pub group: Option<&'a str>,
    pub key: &'a str,
}

/// Change handler. Receives the switcher and tree so it can nest further
/// activations.
pub type ChangeHandler = Rc<dyn Fn(&mut Switcher, &mut DomTree, &SwitchChange<'_>) -> Verdict>;

/// Handler registry
#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<(SwitchEvent, Option<String>), ChangeHandler>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, returning the one it replaces
    pub fn on(
        &mut self,
        event: SwitchEvent,
        group: Option<&str>,
        handler: ChangeHandler,
    ) -> Option<ChangeHandler> {
        self.handlers.insert((event, group.map(str::to_owned)), handler)
    }

    /// Remove a handler
    pub fn off(&mut self, event: SwitchEvent, group: Option<&str>) -> Option<ChangeHandler> {
        self.handlers.remove(&(event, group.map(str::to_owned)))
    }

    /// Handler for a slot. Cloned out so callers can run it while the
    /// registry is modified.
    pub fn handler(&self, event: SwitchEvent, group: Option<&str>) -> Option<ChangeHandler> {
        self.handlers.get(&(event, group.map(str::to_owned))).cloned()
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}
