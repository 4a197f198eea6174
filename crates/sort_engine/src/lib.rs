use std::sync::Arc;

use rand::Rng;
use shared::{
    domain::{Algorithm, ElementState, Phase, RunState, Speed},
    snapshot::StepSnapshot,
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info};

pub mod algorithms;
pub mod cancel;
pub mod clock;
pub mod stats;

pub use algorithms::{NullSink, SnapshotSink, StepContext};
pub use cancel::CancelToken;
pub use clock::StepClock;
pub use stats::StatsCollector;

const ELEMENT_COUNT: usize = 30;
const VALUE_MIN: u16 = 10;
const VALUE_MAX: u16 = 309;
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Events broadcast to renderers and other observers. A `Step` carries the
/// full snapshot; `PhaseChanged` marks lifecycle transitions.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    Step(StepSnapshot),
    PhaseChanged(Phase),
}

impl SnapshotSink for broadcast::Sender<EngineEvent> {
    fn emit(&self, snapshot: StepSnapshot) {
        let _ = self.send(EngineEvent::Step(snapshot));
    }
}

/// Owns the run/pause/reset/regenerate state machine, the element sequence,
/// and the cancellation signal shared with the running algorithm. At most
/// one run task is alive at a time; every control operation is an
/// idempotent no-op in phases where it does not apply.
pub struct SortController {
    inner: Mutex<ControllerState>,
    elements: Mutex<Vec<ElementState>>,
    stats: StatsCollector,
    active_run: Mutex<Option<ActiveRun>>,
    events: broadcast::Sender<EngineEvent>,
}

struct ControllerState {
    phase: Phase,
    algorithm: Algorithm,
    speed: Speed,
}

struct ActiveRun {
    cancel: CancelToken,
    task: JoinHandle<()>,
}

impl SortController {
    /// Creates a controller over a freshly generated random sequence.
    pub fn new() -> Arc<Self> {
        Self::from_elements(generate_elements(ELEMENT_COUNT))
    }

    /// Creates a controller over a fixed sequence of values.
    pub fn with_sequence(values: &[u16]) -> Arc<Self> {
        Self::from_elements(values.iter().copied().map(ElementState::new).collect())
    }

    fn from_elements(elements: Vec<ElementState>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            inner: Mutex::new(ControllerState {
                phase: Phase::Idle,
                algorithm: Algorithm::default(),
                speed: Speed::default(),
            }),
            elements: Mutex::new(elements),
            stats: StatsCollector::with_label("Array generated"),
            active_run: Mutex::new(None),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    pub async fn state(&self) -> RunState {
        let inner = self.inner.lock().await;
        RunState {
            phase: inner.phase,
            algorithm: inner.algorithm,
            speed: inner.speed,
            comparisons: self.stats.comparisons(),
            swaps: self.stats.swaps(),
            step_label: self.stats.step_label().await,
        }
    }

    /// An owned copy of the current sequence.
    pub async fn sequence(&self) -> Vec<ElementState> {
        self.elements.lock().await.clone()
    }

    /// Stored immediately; takes effect at the next `start`.
    pub async fn set_algorithm(&self, algorithm: Algorithm) {
        self.inner.lock().await.algorithm = algorithm;
    }

    /// Stored immediately; takes effect at the next `start`.
    pub async fn set_speed(&self, speed: Speed) {
        self.inner.lock().await.speed = speed;
    }

    /// Begins a fresh pass over the current sequence. A no-op while a run
    /// is already in progress. Starting after a pause restarts the
    /// algorithm from scratch on the current values; the counters keep
    /// accumulating rather than restarting from zero.
    pub async fn start(self: &Arc<Self>) {
        {
            let inner = self.inner.lock().await;
            if inner.phase == Phase::Running {
                return;
            }
        }
        self.teardown_active_run().await;

        {
            let mut elements = self.elements.lock().await;
            for element in elements.iter_mut() {
                element.clear_flags();
            }
        }

        let (algorithm, speed) = {
            let mut inner = self.inner.lock().await;
            inner.phase = Phase::Running;
            (inner.algorithm, inner.speed)
        };
        debug!(?algorithm, speed = speed.get(), "starting sort run");
        let _ = self.events.send(EngineEvent::PhaseChanged(Phase::Running));

        let cancel = CancelToken::new();
        let token = cancel.clone();
        let controller = Arc::clone(self);
        let task = tokio::spawn(async move {
            let clock = StepClock::new(speed);
            let ctx = StepContext {
                elements: &controller.elements,
                clock: &clock,
                stats: &controller.stats,
                cancel: &token,
                sink: &controller.events,
            };
            algorithms::run(algorithm, &ctx).await;
            if token.is_cancelled() {
                return;
            }

            controller.stats.set_step_label("Sorting complete!").await;
            controller.inner.lock().await.phase = Phase::Completed;
            algorithms::emit_snapshot(&controller.elements, &controller.stats, &controller.events)
                .await;
            let _ = controller
                .events
                .send(EngineEvent::PhaseChanged(Phase::Completed));
            info!(
                ?algorithm,
                comparisons = controller.stats.comparisons(),
                swaps = controller.stats.swaps(),
                "sort run completed"
            );
        });

        *self.active_run.lock().await = Some(ActiveRun { cancel, task });
    }

    /// Requests a cooperative stop. The in-flight step finishes its
    /// mutation and delay on its own; highlight flags stay as-is until the
    /// next `start` clears them.
    pub async fn pause(&self) {
        {
            let mut inner = self.inner.lock().await;
            if inner.phase != Phase::Running {
                return;
            }
            inner.phase = Phase::Paused;
        }
        if let Some(active) = self.active_run.lock().await.as_ref() {
            active.cancel.cancel();
        }
        self.stats.set_step_label("Paused").await;
        algorithms::emit_snapshot(&self.elements, &self.stats, &self.events).await;
        let _ = self.events.send(EngineEvent::PhaseChanged(Phase::Paused));
        debug!("sort run paused");
    }

    /// Stops any run, clears all flags and counters; values and order are
    /// untouched.
    pub async fn reset(&self) {
        self.teardown_active_run().await;
        {
            let mut elements = self.elements.lock().await;
            for element in elements.iter_mut() {
                element.clear_flags();
            }
        }
        self.stats.reset();
        self.stats.set_step_label("Ready to sort").await;
        self.inner.lock().await.phase = Phase::Idle;
        algorithms::emit_snapshot(&self.elements, &self.stats, &self.events).await;
        let _ = self.events.send(EngineEvent::PhaseChanged(Phase::Idle));
        debug!("controller reset");
    }

    /// Stops any run and replaces the sequence with fresh random draws.
    pub async fn regenerate(&self) {
        self.teardown_active_run().await;
        *self.elements.lock().await = generate_elements(ELEMENT_COUNT);
        self.stats.reset();
        self.stats.set_step_label("Array generated").await;
        self.inner.lock().await.phase = Phase::Idle;
        algorithms::emit_snapshot(&self.elements, &self.stats, &self.events).await;
        let _ = self.events.send(EngineEvent::PhaseChanged(Phase::Idle));
        debug!("sequence regenerated");
    }

    /// Cancels the active run, if any, and waits for its task to observe
    /// the token and exit. Cooperative: the in-flight step completes first.
    async fn teardown_active_run(&self) {
        let active = self.active_run.lock().await.take();
        if let Some(active) = active {
            active.cancel.cancel();
            let _ = active.task.await;
        }
    }
}

fn generate_elements(count: usize) -> Vec<ElementState> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| ElementState::new(rng.gen_range(VALUE_MIN..=VALUE_MAX)))
        .collect()
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
