use std::sync::{Arc, Mutex};
use std::thread;

/// Lifecycle of a widget's one-shot background fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Loading,
    Error(String),
    Ready(T),
}

/// Shared slot a background fetch writes its outcome into.
///
/// The job runs at most once per slot. A completion arriving after the
/// owning widget is gone only touches the shared state and is otherwise
/// discarded. Failures are terminal: the slot stays in `Error` for the rest
/// of the run.
pub struct FetchSlot<T> {
    state: Arc<Mutex<FetchState<T>>>,
    started: bool,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(FetchState::Loading)),
            started: false,
        }
    }
}

impl<T: Send + 'static> FetchSlot<T> {
    /// Spawn `job` on the first call; later calls are no-ops.
    ///
    /// The UI is asked to repaint when the job finishes so the result shows
    /// up without waiting for the next input event.
    pub fn ensure_started(
        &mut self,
        egui_ctx: &eframe::egui::Context,
        job: impl FnOnce() -> anyhow::Result<T> + Send + 'static,
    ) {
        if self.started {
            return;
        }
        self.started = true;

        let state = Arc::clone(&self.state);
        let egui_ctx = egui_ctx.clone();
        thread::spawn(move || {
            let outcome = match job() {
                Ok(data) => FetchState::Ready(data),
                Err(err) => {
                    tracing::warn!(%err, "background fetch failed");
                    FetchState::Error(err.to_string())
                }
            };
            if let Ok(mut slot) = state.lock() {
                *slot = outcome;
            }
            egui_ctx.request_repaint();
        });
    }

    /// Mark the slot as resolved without spawning anything.
    pub fn resolve(&mut self, outcome: FetchState<T>) {
        self.started = true;
        if let Ok(mut slot) = self.state.lock() {
            *slot = outcome;
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// Inspect the current state under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&FetchState<T>) -> R) -> R {
        match self.state.lock() {
            Ok(slot) => f(&slot),
            Err(_) => f(&FetchState::Error("poisoned fetch slot".into())),
        }
    }
}
