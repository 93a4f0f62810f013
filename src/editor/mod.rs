//! Interfaces to the embedded editor: RPC primitives, insert-mode events,
//! coordinate mapping, and session handles.

pub mod events;
pub mod grid;
pub mod rpc;
pub mod session;

pub use events::{InsertEvent, spawn_event_pump};
pub use grid::{CellGrid, CoordinateGrid};
pub use rpc::{CursorPos, EditorRpc};
pub use session::{Session, SessionContext, SessionId, SessionRegistry};
