use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

/// Running counters for the current session plus the latest step label.
/// Counters only grow during a run; they are zeroed solely by the
/// controller's reset and regenerate operations.
#[derive(Debug, Default)]
pub struct StatsCollector {
    comparisons: AtomicU64,
    swaps: AtomicU64,
    step_label: Mutex<String>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            comparisons: AtomicU64::new(0),
            swaps: AtomicU64::new(0),
            step_label: Mutex::new(label.into()),
        }
    }

    pub fn record_comparison(&self) {
        self.comparisons.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_swap(&self) {
        self.swaps.fetch_add(1, Ordering::Relaxed);
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons.load(Ordering::Relaxed)
    }

    pub fn swaps(&self) -> u64 {
        self.swaps.load(Ordering::Relaxed)
    }

    pub async fn set_step_label(&self, label: impl Into<String>) {
        *self.step_label.lock().await = label.into();
    }

    pub async fn step_label(&self) -> String {
        self.step_label.lock().await.clone()
    }

    pub fn reset(&self) {
        self.comparisons.store(0, Ordering::Relaxed);
        self.swaps.store(0, Ordering::Relaxed);
    }
}
