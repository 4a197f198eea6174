//! Speed-to-delay mapping for the stepwise scheduler.

use std::time::Duration;

use shared::domain::Speed;

/// Paces a run: one `tick` per comparison and one more per triggered swap.
#[derive(Debug, Clone, Copy)]
pub struct StepClock {
    delay: Duration,
}

impl StepClock {
    pub fn new(speed: Speed) -> Self {
        Self {
            delay: Duration::from_millis(u64::from(101 - speed.get())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspends until the next step may begin. Cancellation is observed at
    /// these boundaries only, never mid-step.
    pub async fn tick(&self) {
        tokio::time::sleep(self.delay).await;
    }
}
