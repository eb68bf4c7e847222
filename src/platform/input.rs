//! Input buffering
//!
//! DOM handlers fire between frames; their actions wait here until the next
//! frame drains them into a `TickInput`.

use crate::sim::{Action, TimedAction};

/// Upper bound on buffered actions (a stalled tab can pile up taps)
const MAX_BUFFERED: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: Vec<TimedAction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action, at_ms: f64) {
        if self.pending.len() >= MAX_BUFFERED {
            log::debug!("Input queue full, dropping {:?}", action);
            return;
        }
        self.pending.push(TimedAction::new(action, at_ms));
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take everything in arrival order
    pub fn drain(&mut self) -> Vec<TimedAction> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
