//! Completion view state and its reducer
//!
//! The popup's entire visible state lives in one struct, replaced wholesale
//! by `Show` and only ever partially mutated by `Select`. Transitions are a
//! closed action enum consumed by a single exhaustive reducer, so every
//! action is handled at compile time rather than dispatched by string name.

use std::sync::Arc;

use parking_lot::Mutex;

/// One ranked candidate as rendered. `id` is the candidate's rank position
/// at render time and doubles as the overlay's diffing key and the selection
/// index space; the set is rebuilt on every successful ranking pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOption {
    pub id: usize,
    pub text: String,
}

/// Overlay view state.
///
/// Invariants: `selected` is `-1` or a valid index into `options`;
/// `x`/`y` are pixel coordinates meaningful only while `visible`.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub options: Vec<CompletionOption>,
    pub visible: bool,
    pub selected: i32,
    pub x: f64,
    pub y: f64,
}

impl Default for PopupState {
    fn default() -> Self {
        Self { options: Vec::new(), visible: false, selected: -1, x: 0.0, y: 0.0 }
    }
}

/// State transitions, driven by the sync bridge and by native-menu events.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupAction {
    /// Replace the whole view state and become visible.
    Show { options: Vec<CompletionOption>, selected: i32, x: f64, y: f64 },
    /// Become hidden; selection resets, options and position go stale.
    Hide,
    /// Move only the selection. No bounds check: the native menu supplies
    /// indices from the list it was handed, out-of-range is a caller error.
    Select { index: i32 },
}

/// Apply one action. Exhaustive by construction.
pub fn reduce(state: &mut PopupState, action: PopupAction) {
    match action {
        PopupAction::Show { options, selected, x, y } => {
            state.options = options;
            state.selected = selected;
            state.x = x;
            state.y = y;
            state.visible = true;
        }
        PopupAction::Hide => {
            state.visible = false;
            state.selected = -1;
            state.options.clear();
        }
        PopupAction::Select { index } => {
            state.selected = index;
        }
    }
}

/// The external overlay: re-renders after every transition.
pub trait PopupRenderer: Send + Sync {
    fn render(&self, state: &PopupState);
}

/// Owns the view state and notifies the renderer on each dispatch. The
/// single entry point the engine and the popup-menu subscriptions drive.
pub struct PopupHandle {
    state: Mutex<PopupState>,
    renderer: Box<dyn PopupRenderer>,
}

impl PopupHandle {
    pub fn new(renderer: Box<dyn PopupRenderer>) -> Arc<Self> {
        Arc::new(Self { state: Mutex::new(PopupState::default()), renderer })
    }

    pub fn dispatch(&self, action: PopupAction) {
        let mut state = self.state.lock();
        reduce(&mut state, action);
        self.renderer.render(&state);
    }

    /// Copy of the current view state, for reconciliation and tests.
    pub fn snapshot(&self) -> PopupState {
        self.state.lock().clone()
    }
}
