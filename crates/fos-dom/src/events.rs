//! DOM Events
//!
//! User-input and lifecycle events with target/bubble dispatch.

use crate::{DomTree, NodeId};

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    /// Pointer activation
    Click,
    /// Document parsed
    DOMContentLoaded,
    /// Page and subresources loaded
    Load,
}

impl DomEventType {
    /// Check if this event type can bubble
    pub fn bubbles(&self) -> bool {
        !matches!(self, DomEventType::Load)
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    /// Node whose listener is currently running
    pub current_target: Option<NodeId>,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    fn new(event_type: DomEventType, target: NodeId, cancelable: bool) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            bubbles: event_type.bubbles(),
            cancelable,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create click event
    pub fn click(target: NodeId) -> Self {
        Self::new(DomEventType::Click, target, true)
    }

    /// Create DOMContentLoaded event
    pub fn content_loaded(target: NodeId) -> Self {
        Self::new(DomEventType::DOMContentLoaded, target, false)
    }

    /// Create load event
    pub fn load(target: NodeId) -> Self {
        Self::new(DomEventType::Load, target, false)
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Check if propagation was stopped
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Something that reacts to events delivered at a node
pub trait EventListener {
    fn handle_event(&mut self, tree: &mut DomTree, event: &mut DomEvent);
}

impl DomTree {
    /// Propagation path: the target, then its ancestors up to the document
    pub fn event_path(&self, target: NodeId) -> Vec<NodeId> {
        if self.get(target).is_none() {
            return Vec::new();
        }
        std::iter::once(target).chain(self.ancestors(target)).collect()
    }

    /// Dispatch `event` along its path, running each listener registered
    /// at a node the event reaches. Returns false if a listener prevented
    /// the default action.
    pub fn dispatch_event(
        &mut self,
        event: &mut DomEvent,
        listeners: &mut [(NodeId, &mut dyn EventListener)],
    ) -> bool {
        let path = self.event_path(event.target);
        let reach = if event.bubbles { path.len() } else { path.len().min(1) };

        for &node in &path[..reach] {
            for (at, listener) in listeners.iter_mut() {
                if *at == node {
                    event.current_target = Some(node);
                    listener.handle_event(self, event);
                }
            }
            if event.is_propagation_stopped() {
                break;
            }
        }

        event.current_target = None;
        tracing::trace!(
            "Dispatched {:?} at {:?}, default prevented: {}",
            event.event_type,
            event.target,
            event.default_prevented
        );
        !event.is_default_prevented()
    }
}
