//! Terminal rendering of workflow updates.

use docpilot_core::{Stage, StageTracker, WorkflowState};
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tracing::debug;

/// Renders the tracker every time the stage changes.
#[derive(Debug, Default)]
pub struct TrackerPrinter {
    last: Option<Stage>,
}

impl TrackerPrinter {
    /// The frame for `state`, or `None` when the stage was already shown
    /// or the tracker is hidden.
    pub fn frame(&mut self, state: &WorkflowState) -> Option<String> {
        if self.last == Some(state.stage()) {
            return None;
        }
        self.last = Some(state.stage());
        let rendered = StageTracker::view(state.stage(), state.error()).to_string();
        (!rendered.is_empty()).then_some(rendered)
    }

    pub fn show(&mut self, state: &WorkflowState) {
        if let Some(frame) = self.frame(state) {
            println!("{}\n", frame);
        }
    }

    /// Handle one `recv` result. Returns `false` once the channel is closed.
    pub fn handle(&mut self, update: Result<WorkflowState, RecvError>) -> bool {
        match update {
            Ok(state) => {
                self.show(&state);
                true
            }
            Err(RecvError::Lagged(skipped)) => {
                debug!("Tracker skipped {} updates", skipped);
                true
            }
            Err(RecvError::Closed) => false,
        }
    }

    /// Frames for every update already queued on `rx`.
    pub fn drain_frames(&mut self, rx: &mut broadcast::Receiver<WorkflowState>) -> Vec<String> {
        let mut frames = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(state) => frames.extend(self.frame(&state)),
                Err(TryRecvError::Lagged(skipped)) => {
                    debug!("Tracker skipped {} updates", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        frames
    }

    /// Print every update already queued on `rx`.
    pub fn drain(&mut self, rx: &mut broadcast::Receiver<WorkflowState>) {
        for frame in self.drain_frames(rx) {
            println!("{}\n", frame);
        }
    }
}
