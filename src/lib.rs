//! Inline completion subsystem for an embedded-editor front-end.
//!
//! Watches insert-mode cursor movement, extracts the token being typed,
//! fuzzy-ranks a candidate pool against it, and keeps the editor's native
//! completion list and a custom popup overlay synchronized from the same
//! ranked result.

pub mod completion;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod error;
pub mod logging;

pub use completion::{Autocomplete, CandidateSource, KeywordSource, PopupRenderer};
pub use config::CompletionConfig;
pub use dispatch::{ActionRegistry, DispatchOutcome, EventBus};
pub use editor::{InsertEvent, Session, SessionRegistry};
pub use error::{ConfigError, EditorError};
