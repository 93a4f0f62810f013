//! Error taxonomy for the completion subsystem
//!
//! Everything here is non-fatal by policy: completion is assistive, so a
//! fault must never interrupt editing. Errors are absorbed and logged at the
//! event-pump boundary; nothing propagates into the session manager.

use thiserror::Error;

/// Failures talking to the embedded editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A request was made with no session attached. Callers degrade to an
    /// empty result rather than surfacing this to the user.
    #[error("no active editor session")]
    NoActiveSession,

    /// The RPC transport rejected or dropped a request.
    #[error("editor request failed: {0}")]
    Rpc(String),

    /// An expression evaluation round-trip failed or returned an
    /// uninterpretable value.
    #[error("failed to evaluate {expr:?}: {reason}")]
    Evaluate { expr: String, reason: String },
}

/// Configuration rejected at engine construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid trigger pattern for filetype {filetype:?}")]
    InvalidTrigger {
        filetype: String,
        #[source]
        source: regex::Error,
    },
}
