//! The three step-emitting sort engines. Each runs in place over the shared
//! sequence, emitting one snapshot per step and suspending on the clock
//! between steps. Cancellation stops a run at the next step boundary,
//! leaving whatever highlight flags the last mutation set; clearing them is
//! the controller's job.

use shared::{
    domain::{Algorithm, ElementState},
    snapshot::StepSnapshot,
};
use tokio::sync::Mutex;

use crate::{cancel::CancelToken, clock::StepClock, stats::StatsCollector};

/// Receives the snapshot emitted after every step.
pub trait SnapshotSink: Send + Sync {
    fn emit(&self, snapshot: StepSnapshot);
}

/// Discards every snapshot. Useful for driving the engine headless.
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn emit(&self, _snapshot: StepSnapshot) {}
}

/// Everything one run needs: the sequence, the pacing clock, the counters,
/// the stop signal, and the snapshot consumer.
pub struct StepContext<'a> {
    pub elements: &'a Mutex<Vec<ElementState>>,
    pub clock: &'a StepClock,
    pub stats: &'a StatsCollector,
    pub cancel: &'a CancelToken,
    pub sink: &'a dyn SnapshotSink,
}

impl StepContext<'_> {
    async fn emit(&self) {
        emit_snapshot(self.elements, self.stats, self.sink).await;
    }
}

pub(crate) async fn emit_snapshot(
    elements: &Mutex<Vec<ElementState>>,
    stats: &StatsCollector,
    sink: &dyn SnapshotSink,
) {
    let elements = elements.lock().await.clone();
    sink.emit(StepSnapshot {
        elements,
        comparisons: stats.comparisons(),
        swaps: stats.swaps(),
        step_label: stats.step_label().await,
    });
}

/// Runs the selected algorithm to completion or cancellation.
pub async fn run(algorithm: Algorithm, ctx: &StepContext<'_>) {
    match algorithm {
        Algorithm::Bubble => bubble_sort(ctx).await,
        Algorithm::Selection => selection_sort(ctx).await,
        Algorithm::Insertion => insertion_sort(ctx).await,
    }
}

fn swap_slots(elements: &mut [ElementState], a: usize, b: usize) {
    debug_assert!(
        !elements[a].is_sorted && !elements[b].is_sorted,
        "sorted slots are finalized and must not move"
    );
    elements.swap(a, b);
}

pub async fn bubble_sort(ctx: &StepContext<'_>) {
    let n = ctx.elements.lock().await.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            if ctx.cancel.is_cancelled() {
                return;
            }

            let (a, b) = {
                let mut elements = ctx.elements.lock().await;
                elements[j].is_comparing = true;
                elements[j + 1].is_comparing = true;
                (elements[j].value, elements[j + 1].value)
            };
            ctx.stats.record_comparison();
            ctx.stats
                .set_step_label(format!("Comparing {a} and {b}"))
                .await;
            ctx.emit().await;
            ctx.clock.tick().await;

            if a > b {
                {
                    let mut elements = ctx.elements.lock().await;
                    elements[j].is_swapping = true;
                    elements[j + 1].is_swapping = true;
                    swap_slots(&mut elements, j, j + 1);
                }
                ctx.stats.record_swap();
                ctx.stats
                    .set_step_label(format!("Swapping {a} and {b}"))
                    .await;
                ctx.emit().await;
                ctx.clock.tick().await;
            }

            let mut elements = ctx.elements.lock().await;
            elements[j].clear_highlight();
            elements[j + 1].clear_highlight();
        }

        {
            let mut elements = ctx.elements.lock().await;
            elements[n - 1 - i].is_sorted = true;
        }
        ctx.emit().await;
    }

    if n > 0 {
        ctx.elements.lock().await[0].is_sorted = true;
        ctx.emit().await;
    }
}

pub async fn selection_sort(ctx: &StepContext<'_>) {
    let n = ctx.elements.lock().await.len();
    for i in 0..n.saturating_sub(1) {
        if ctx.cancel.is_cancelled() {
            return;
        }

        // The scan anchor keeps its highlight for the whole pass; the
        // current minimum candidate keeps its own until superseded.
        let mut min_idx = i;
        ctx.elements.lock().await[i].is_comparing = true;

        for j in i + 1..n {
            if ctx.cancel.is_cancelled() {
                return;
            }

            ctx.elements.lock().await[j].is_comparing = true;
            ctx.stats.record_comparison();
            ctx.stats
                .set_step_label(format!("Finding minimum from position {i}"))
                .await;
            ctx.emit().await;
            ctx.clock.tick().await;

            let mut elements = ctx.elements.lock().await;
            if elements[j].value < elements[min_idx].value {
                if min_idx != i {
                    elements[min_idx].is_comparing = false;
                }
                min_idx = j;
            } else {
                elements[j].is_comparing = false;
            }
        }

        if min_idx != i {
            let (a, b) = {
                let mut elements = ctx.elements.lock().await;
                elements[i].is_swapping = true;
                elements[min_idx].is_swapping = true;
                let pair = (elements[i].value, elements[min_idx].value);
                swap_slots(&mut elements, i, min_idx);
                pair
            };
            ctx.stats.record_swap();
            ctx.stats
                .set_step_label(format!("Swapping {a} and {b}"))
                .await;
            ctx.emit().await;
            ctx.clock.tick().await;
        }

        {
            let mut elements = ctx.elements.lock().await;
            elements[i].clear_highlight();
            elements[min_idx].clear_highlight();
            elements[i].is_sorted = true;
        }
        ctx.emit().await;
    }

    if n > 0 {
        ctx.elements.lock().await[n - 1].is_sorted = true;
        ctx.emit().await;
    }
}

pub async fn insertion_sort(ctx: &StepContext<'_>) {
    let n = ctx.elements.lock().await.len();
    if n == 0 {
        return;
    }

    // A single-element prefix is trivially sorted.
    ctx.elements.lock().await[0].is_sorted = true;
    ctx.emit().await;

    for i in 1..n {
        if ctx.cancel.is_cancelled() {
            return;
        }

        let key = {
            let mut elements = ctx.elements.lock().await;
            elements[i].is_comparing = true;
            elements[i]
        };
        ctx.stats
            .set_step_label(format!("Inserting {} into sorted portion", key.value))
            .await;
        ctx.emit().await;
        ctx.clock.tick().await;

        let mut gap = i;
        loop {
            if ctx.cancel.is_cancelled() {
                return;
            }

            // The guard check is deliberately uncounted: comparison counting
            // starts inside the shift loop, so comparisons track shifts.
            {
                let elements = ctx.elements.lock().await;
                if gap == 0 || elements[gap - 1].value <= key.value {
                    break;
                }
            }

            ctx.elements.lock().await[gap - 1].is_comparing = true;
            ctx.stats.record_comparison();
            ctx.emit().await;
            ctx.clock.tick().await;

            {
                // Shift the larger neighbor right. Sorted-prefix slots carry
                // their mark along with the shift.
                let mut elements = ctx.elements.lock().await;
                elements[gap] = elements[gap - 1];
                elements[gap].is_comparing = false;
                elements[gap - 1].is_comparing = false;
            }
            ctx.stats.record_swap();
            ctx.emit().await;
            ctx.clock.tick().await;
            gap -= 1;
        }

        {
            let mut elements = ctx.elements.lock().await;
            elements[gap] = ElementState {
                value: key.value,
                is_comparing: false,
                is_swapping: false,
                is_sorted: true,
            };
        }
        ctx.emit().await;
    }
}

#[cfg(test)]
#[path = "tests/algorithms_tests.rs"]
mod tests;
