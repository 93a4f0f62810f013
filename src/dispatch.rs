//! Publish/subscribe bus and external action registry
//!
//! The bus carries popup-menu traffic between the editor's native menu
//! notifications and whoever mirrors them (the completion engine, status
//! chrome). Payloads are JSON values since they originate editor-side.
//!
//! The action registry is the seam for externally-requested UI actions. A
//! dispatch reports whether anything handled the action instead of silently
//! logging, so fire-and-forget callers can ignore the outcome while callers
//! that care can treat `Unsupported` as fatal in their own context.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::warn;

/// Native popup menu became visible; payload `{ "items": [...] }`.
pub const POPUPMENU_SHOW: &str = "popupmenu.show";
/// Native popup menu selection moved; payload is the index.
pub const POPUPMENU_SELECT: &str = "popupmenu.select";
/// Native popup menu closed; payload is null.
pub const POPUPMENU_HIDE: &str = "popupmenu.hide";

type Subscriber = Box<dyn Fn(&Value) + Send + Sync>;

/// Topic-keyed fan-out bus.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<HashMap<String, Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, topic: &str, callback: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.subscribers
            .lock()
            .entry(topic.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Deliver `payload` to every subscriber of `topic`, synchronously and
    /// in subscription order. Topics nobody subscribed to are dropped.
    pub fn publish(&self, topic: &str, payload: Value) {
        let subscribers = self.subscribers.lock();
        if let Some(callbacks) = subscribers.get(topic) {
            for callback in callbacks {
                callback(&payload);
            }
        }
    }
}

/// Whether an action dispatch found a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled,
    Unsupported,
}

type ActionHandler = Box<dyn Fn(Value) + Send + Sync>;

/// Capability-checked registry of named action handlers.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: Mutex<HashMap<String, ActionHandler>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&self, name: &str, handler: F)
    where
        F: Fn(Value) + Send + Sync + 'static,
    {
        self.handlers.lock().insert(name.to_string(), Box::new(handler));
    }

    pub fn supports(&self, name: &str) -> bool {
        self.handlers.lock().contains_key(name)
    }

    /// Invoke the handler for `name`. Unregistered names warn and no-op;
    /// this must never panic since it is reachable from fire-and-forget
    /// event dispatch.
    pub fn dispatch(&self, name: &str, payload: Value) -> DispatchOutcome {
        let handlers = self.handlers.lock();
        match handlers.get(name) {
            Some(handler) => {
                handler(payload);
                DispatchOutcome::Handled
            }
            None => {
                warn!(action = name, "action not registered");
                DispatchOutcome::Unsupported
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn publish_reaches_all_subscribers_in_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            bus.subscribe(POPUPMENU_SELECT, move |payload| {
                seen.lock().push((tag, payload.clone()));
            });
        }

        bus.publish(POPUPMENU_SELECT, Value::from(3));
        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], ("first", Value::from(3)));
        assert_eq!(seen[1], ("second", Value::from(3)));
    }

    #[test]
    fn publish_without_subscribers_is_a_noop() {
        let bus = EventBus::new();
        bus.publish(POPUPMENU_HIDE, Value::Null);
    }

    #[test]
    fn registered_action_is_handled() {
        let registry = ActionRegistry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        registry.register("devtools", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(registry.supports("devtools"));
        assert_eq!(registry.dispatch("devtools", Value::Null), DispatchOutcome::Handled);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unregistered_action_is_unsupported() {
        let registry = ActionRegistry::new();
        assert!(!registry.supports("missing"));
        assert_eq!(registry.dispatch("missing", Value::Null), DispatchOutcome::Unsupported);
    }
}
