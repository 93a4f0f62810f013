//! Narrow interface to the editor RPC transport
//!
//! The completion subsystem only ever needs four primitives: fire-and-forget
//! ex commands and variable writes, plus expression evaluation and the two
//! position/line reads. Each request is an independent asynchronous round
//! trip; the engine joins the reads it wants in parallel.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::EditorError;

/// 1-based cursor position as the editor reports it. In insert mode the
/// cursor column sits one past the last typed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub row: usize,
    pub column: usize,
}

#[async_trait]
pub trait EditorRpc: Send + Sync {
    /// Execute an ex command (notification, no reply).
    async fn command(&self, cmd: &str) -> Result<(), EditorError>;

    /// Set a session-scoped editor variable (notification, no reply).
    async fn set_var(&self, name: &str, value: Value) -> Result<(), EditorError>;

    /// Evaluate an expression and return its value.
    async fn eval(&self, expr: &str) -> Result<Value, EditorError>;

    /// Text of the line the cursor is on.
    async fn current_line(&self) -> Result<String, EditorError>;

    /// Current cursor position.
    async fn cursor(&self) -> Result<CursorPos, EditorError>;
}
