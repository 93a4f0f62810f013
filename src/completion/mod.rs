//! Inline completion: query extraction, ranking, view state, editor sync
//!
//! The pipeline per insert-mode cursor move:
//! query extraction → fuzzy ranking → state-machine update → native list +
//! overlay, both fed from the same ranked list.

pub mod engine;
pub mod query;
pub mod ranking;
pub mod sources;
pub mod state;

pub use engine::Autocomplete;
pub use query::{CompletionQuery, TriggerTable, find_query};
pub use ranking::rank;
pub use sources::{CandidateSource, KeywordSource};
pub use state::{CompletionOption, PopupAction, PopupHandle, PopupRenderer, PopupState, reduce};
