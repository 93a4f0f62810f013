//! Editor sync bridge
//!
//! Keeps the editor's native completion mechanism and the popup overlay in
//! lockstep. Each insert-mode cursor move runs the full pipeline: fetch the
//! line and cursor concurrently, extract the query, rank the pool, then push
//! the same ranked list to the native variables and the overlay so the two
//! views can never disagree.
//!
//! Cursor-moved events can outpace a prior pass's round trips, so every pass
//! takes a monotonic sequence number and discards itself if a newer pass has
//! started by the time its responses land. Without this, a slow response for
//! an old keystroke would overwrite the state of a newer one.

use std::sync::Arc;

use serde_json::{Value, json};
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::config::CompletionConfig;
use crate::dispatch::{EventBus, POPUPMENU_HIDE, POPUPMENU_SELECT, POPUPMENU_SHOW};
use crate::editor::events::{InsertEvent, spawn_event_pump};
use crate::editor::session::Session;
use crate::error::{ConfigError, EditorError};

use super::query::{TriggerTable, find_query};
use super::ranking::rank;
use super::sources::CandidateSource;
use super::state::{CompletionOption, PopupAction, PopupHandle, PopupRenderer};

/// Session variable holding the candidate list the native menu polls.
const VAR_COMPLETIONS: &str = "autocomplete_completions";
/// Session variable holding the token start offset for `completefunc`.
const VAR_COMPLETE_POS: &str = "autocomplete_complete_pos";
/// Session flag: a native completion cycle is in progress.
const VAR_COMPLETING: &str = "autocomplete_completing";

/// `completefunc` backing: first call reports where completion starts,
/// second call returns the candidates.
const COMPLETE_FN: &str = "\
function! AutocompleteComplete(findstart, base)
  return a:findstart ? g:autocomplete_complete_pos : g:autocomplete_completions
endfunction";

/// Tab/shift-tab double duty: open the user completion menu when candidates
/// exist and no cycle is running, cycle it while one is, fall back to a
/// literal tab otherwise.
const SCROLL_FN: &str = r#"function! AutocompleteScroll(forward)
  if len(g:autocomplete_completions)
    if g:autocomplete_completing
      return a:forward ? "\<c-n>" : "\<c-p>"
    endif
    let g:autocomplete_completing = 1
    return a:forward ? "\<c-x>\<c-u>" : "\<c-x>\<c-u>\<c-p>\<c-p>"
  endif
  return a:forward ? "\<tab>" : "\<s-tab>"
endfunction"#;

/// The completion engine: query extraction, ranking, and two-view sync.
pub struct Autocomplete {
    triggers: TriggerTable,
    max_results: usize,
    source: Arc<dyn CandidateSource>,
    popup: Arc<PopupHandle>,
    bus: Arc<EventBus>,
}

impl Autocomplete {
    /// Build the engine and wire it to the popup-menu topics on `bus`
    /// (native-menu selection and dismissal mirror into the overlay).
    pub fn new(
        config: &CompletionConfig,
        source: Arc<dyn CandidateSource>,
        renderer: Box<dyn PopupRenderer>,
        bus: Arc<EventBus>,
    ) -> Result<Arc<Self>, ConfigError> {
        let engine = Arc::new(Self {
            triggers: config.trigger_table()?,
            max_results: config.max_results,
            source,
            popup: PopupHandle::new(renderer),
            bus,
        });

        let popup = engine.popup.clone();
        engine.bus.subscribe(POPUPMENU_SELECT, move |payload| {
            if let Some(index) = payload.as_i64() {
                popup.dispatch(PopupAction::Select { index: index as i32 });
            }
        });
        let popup = engine.popup.clone();
        engine.bus.subscribe(POPUPMENU_HIDE, move |_| {
            popup.dispatch(PopupAction::Hide);
        });

        Ok(engine)
    }

    pub fn popup(&self) -> &Arc<PopupHandle> {
        &self.popup
    }

    /// One-time editor-side setup for a new session: the completion
    /// function, the scroll function, the three session variables, and the
    /// tab mappings that drive native-menu navigation.
    pub async fn attach(&self, session: &Session) -> Result<(), EditorError> {
        let rpc = session.rpc();

        rpc.command("aug Autocomplete | au! | aug END").await?;
        rpc.command(COMPLETE_FN).await?;
        rpc.command(SCROLL_FN).await?;

        rpc.set_var(VAR_COMPLETING, json!(0)).await?;
        rpc.set_var(VAR_COMPLETE_POS, json!(1)).await?;
        rpc.set_var(VAR_COMPLETIONS, json!([])).await?;

        rpc.command("set completefunc=AutocompleteComplete").await?;
        rpc.command(r"ino <expr> <tab> AutocompleteScroll(1)").await?;
        rpc.command(r"ino <expr> <s-tab> AutocompleteScroll(0)").await?;

        info!(session = session.id(), "completion attached");
        Ok(())
    }

    /// Spawn the event pump for a session. Errors inside handlers are
    /// absorbed here; a completion fault must never interrupt editing.
    pub fn drive(
        self: Arc<Self>,
        session: Arc<Session>,
        rx: Receiver<InsertEvent>,
    ) -> JoinHandle<()> {
        let engine = self;
        let id = session.id();
        spawn_event_pump(id, rx, move |event| {
            let engine = engine.clone();
            let session = session.clone();
            async move {
                engine.handle_event(&session, event).await;
            }
        })
    }

    /// Dispatch one insert-mode event, absorbing failures.
    pub async fn handle_event(&self, session: &Arc<Session>, event: InsertEvent) {
        let result = match event {
            InsertEvent::CursorMoved => self.refresh(session).await,
            InsertEvent::CompleteDone => self.complete_done(session).await,
            InsertEvent::InsertLeave => self.insert_leave(session).await,
        };
        if let Err(error) = result {
            debug!(session = session.id(), %error, "completion pass failed");
        }
    }

    /// Replace the native candidate list and the session mirror as one
    /// unit; the two must never be updated independently.
    async fn update_editor(&self, session: &Session, items: &[String]) -> Result<(), EditorError> {
        session.set_completion_items(items.to_vec());
        session.rpc().set_var(VAR_COMPLETIONS, json!(items)).await
    }

    /// Hide the overlay and clear the native list; terminal state for both
    /// the empty-query and the no-candidates outcome.
    async fn dismiss(&self, session: &Session) -> Result<(), EditorError> {
        self.popup.dispatch(PopupAction::Hide);
        self.update_editor(session, &[]).await
    }

    /// The full query→rank→show/hide pipeline for one cursor move.
    async fn refresh(&self, session: &Arc<Session>) -> Result<(), EditorError> {
        let pass = session.begin_pass();

        // Line and cursor are independent round trips; join them.
        let (line, cursor) =
            futures::join!(session.rpc().current_line(), session.rpc().cursor());
        let (line, cursor) = (line?, cursor?);

        if !session.is_latest_pass(pass) {
            trace!(session = session.id(), pass, "stale completion pass discarded");
            return Ok(());
        }

        let query = find_query(&self.triggers, &session.filetype(), &line, cursor.column);
        trace!(
            session = session.id(),
            start_index = query.start_index,
            query = %query.query,
            "query extracted"
        );

        if query.query.is_empty() {
            return self.dismiss(session).await;
        }

        let pool = self.source.candidates();
        let ranked = rank(&pool, &query.query, self.max_results);
        if ranked.is_empty() {
            return self.dismiss(session).await;
        }

        self.update_editor(session, &ranked).await?;

        let options: Vec<CompletionOption> = ranked
            .iter()
            .enumerate()
            .map(|(id, text)| CompletionOption { id, text: text.clone() })
            .collect();
        let x = session.grid().col_to_x(query.start_index.saturating_sub(1));
        let y = session.grid().row_to_y(cursor.row);
        self.popup.dispatch(PopupAction::Show { options, selected: -1, x, y });
        self.bus.publish(POPUPMENU_SHOW, json!({ "items": ranked }));

        session.set_start_index(query.start_index);
        session.rpc().set_var(VAR_COMPLETE_POS, json!(query.start_index)).await
    }

    /// A native completion was accepted: end the cycle, note the word,
    /// clear the list.
    async fn complete_done(&self, session: &Arc<Session>) -> Result<(), EditorError> {
        session.rpc().set_var(VAR_COMPLETING, json!(0)).await?;

        let item = session.rpc().eval("v:completed_item").await?;
        let word = item.get("word").and_then(Value::as_str).unwrap_or_default();
        debug!(session = session.id(), word, "completion accepted");

        self.update_editor(session, &[]).await
    }

    /// Insert mode left: force-hide the overlay and reset the token start
    /// offset, regardless of current state.
    async fn insert_leave(&self, session: &Arc<Session>) -> Result<(), EditorError> {
        session.set_start_index(0);
        self.popup.dispatch(PopupAction::Hide);
        Ok(())
    }
}
