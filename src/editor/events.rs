//! Insert-mode event stream
//!
//! The session manager forwards the three autocmd-style events the engine
//! cares about onto a per-session channel; one spawned task drains it, so
//! all session state is touched from a single logical flow of control and
//! handlers interleave only at await points.

use std::future::Future;

use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tracing::debug;

use super::session::SessionId;

/// Editor events that drive the completion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertEvent {
    /// Cursor moved while inserting; re-run the query pipeline.
    CursorMoved,
    /// A native completion was accepted.
    CompleteDone,
    /// Insert mode left; force-hide and reset.
    InsertLeave,
}

/// Drain `rx` until the sender side closes, feeding each event to `handler`.
/// Events are handled strictly in arrival order.
pub fn spawn_event_pump<H, Fut>(
    session: SessionId,
    mut rx: Receiver<InsertEvent>,
    handler: H,
) -> JoinHandle<()>
where
    H: Fn(InsertEvent) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            handler(event).await;
        }
        debug!(session, "insert event stream closed");
    })
}
