//! Editor sessions
//!
//! A [`Session`] bundles the RPC channel, the render grid, and the
//! per-session completion context the engine mirrors into editor variables.
//! The registry belongs to the external session manager; the engine itself
//! only ever holds the session it was handed, never a shared global.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::error;

use super::grid::CoordinateGrid;
use super::rpc::EditorRpc;
use crate::error::EditorError;

pub type SessionId = u64;

/// Mirror of what has been pushed into the editor's native completion
/// variables, so the native list and the overlay can be reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub start_index: usize,
    pub completion_items: Vec<String>,
}

pub struct Session {
    id: SessionId,
    rpc: Arc<dyn EditorRpc>,
    grid: Arc<dyn CoordinateGrid>,
    filetype: Mutex<String>,
    context: Mutex<SessionContext>,
    /// Monotonic completion-pass counter; stale passes compare against it
    /// and drop their responses.
    pass: AtomicU64,
}

impl Session {
    pub fn new(id: SessionId, rpc: Arc<dyn EditorRpc>, grid: Arc<dyn CoordinateGrid>) -> Arc<Self> {
        Arc::new(Self {
            id,
            rpc,
            grid,
            filetype: Mutex::new("javascript".to_string()),
            context: Mutex::new(SessionContext::default()),
            pass: AtomicU64::new(0),
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn rpc(&self) -> &Arc<dyn EditorRpc> {
        &self.rpc
    }

    pub fn grid(&self) -> &Arc<dyn CoordinateGrid> {
        &self.grid
    }

    pub fn filetype(&self) -> String {
        self.filetype.lock().clone()
    }

    /// Updated by the session manager on buffer switches.
    pub fn set_filetype(&self, filetype: &str) {
        *self.filetype.lock() = filetype.to_string();
    }

    pub fn context(&self) -> SessionContext {
        self.context.lock().clone()
    }

    pub(crate) fn set_completion_items(&self, items: Vec<String>) {
        self.context.lock().completion_items = items;
    }

    pub(crate) fn set_start_index(&self, start_index: usize) {
        self.context.lock().start_index = start_index;
    }

    /// Start a completion pass; returns its sequence number.
    pub(crate) fn begin_pass(&self) -> u64 {
        self.pass.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `pass` is still the most recently started pass.
    pub(crate) fn is_latest_pass(&self, pass: u64) -> bool {
        self.pass.load(Ordering::SeqCst) == pass
    }
}

/// Session lookup owned by the external session manager. Requests with no
/// active session log a diagnostic and degrade to an empty result; they are
/// never fatal.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, Arc<Session>>,
    active: Mutex<Option<SessionId>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, session: Arc<Session>) {
        let id = session.id();
        self.sessions.insert(id, session);
        let mut active = self.active.lock();
        if active.is_none() {
            *active = Some(id);
        }
    }

    pub fn set_active(&self, id: SessionId) {
        *self.active.lock() = Some(id);
    }

    pub fn remove(&self, id: SessionId) {
        self.sessions.remove(&id);
        let mut active = self.active.lock();
        if *active == Some(id) {
            *active = None;
        }
    }

    pub fn get(&self, id: SessionId) -> Option<Arc<Session>> {
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }

    /// The active session, if any.
    pub fn active(&self) -> Option<Arc<Session>> {
        let id = (*self.active.lock())?;
        self.sessions.get(&id).map(|entry| entry.value().clone())
    }

    /// The active session, or [`EditorError::NoActiveSession`] for callers
    /// that cannot degrade.
    pub fn require_active(&self) -> Result<Arc<Session>, EditorError> {
        self.active().ok_or_else(|| {
            error!("request made with no active session");
            EditorError::NoActiveSession
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;

    use crate::editor::grid::CellGrid;
    use crate::editor::rpc::CursorPos;

    struct NullRpc;

    #[async_trait]
    impl EditorRpc for NullRpc {
        async fn command(&self, _cmd: &str) -> Result<(), EditorError> {
            Ok(())
        }
        async fn set_var(&self, _name: &str, _value: Value) -> Result<(), EditorError> {
            Ok(())
        }
        async fn eval(&self, _expr: &str) -> Result<Value, EditorError> {
            Ok(Value::Null)
        }
        async fn current_line(&self) -> Result<String, EditorError> {
            Ok(String::new())
        }
        async fn cursor(&self) -> Result<CursorPos, EditorError> {
            Ok(CursorPos { row: 1, column: 1 })
        }
    }

    fn session(id: SessionId) -> Arc<Session> {
        Session::new(
            id,
            Arc::new(NullRpc),
            Arc::new(CellGrid { cell_width: 8.0, cell_height: 16.0 }),
        )
    }

    #[test]
    fn empty_registry_has_no_active_session() {
        let registry = SessionRegistry::new();
        assert!(registry.active().is_none());
        assert!(matches!(registry.require_active(), Err(EditorError::NoActiveSession)));
    }

    #[test]
    fn first_insert_becomes_active() {
        let registry = SessionRegistry::new();
        registry.insert(session(7));
        assert_eq!(registry.active().unwrap().id(), 7);
    }

    #[test]
    fn removing_active_clears_it() {
        let registry = SessionRegistry::new();
        registry.insert(session(1));
        registry.insert(session(2));
        registry.set_active(2);
        registry.remove(2);
        assert!(registry.active().is_none());
        assert!(registry.get(1).is_some());
    }

    #[test]
    fn pass_counter_is_monotonic() {
        let s = session(1);
        let first = s.begin_pass();
        let second = s.begin_pass();
        assert!(second > first);
        assert!(!s.is_latest_pass(first));
        assert!(s.is_latest_pass(second));
    }
}
