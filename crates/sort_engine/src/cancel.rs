//! Cooperative cancellation shared between the controller and a run.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared stop signal. Engines poll it at step boundaries; setting it never
/// interrupts an in-flight step.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
