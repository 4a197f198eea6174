use super::*;
use shared::domain::Highlight;

fn fast() -> Speed {
    Speed::new(100).expect("speed")
}

fn values_of(elements: &[ElementState]) -> Vec<u16> {
    elements.iter().map(|element| element.value).collect()
}

/// Consumes events until the run completes, returning the last step
/// snapshot seen before the phase change.
async fn drain_until_completed(
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Option<StepSnapshot> {
    let mut last_step = None;
    loop {
        match events.recv().await {
            Ok(EngineEvent::Step(snapshot)) => last_step = Some(snapshot),
            Ok(EngineEvent::PhaseChanged(Phase::Completed)) => return last_step,
            Ok(EngineEvent::PhaseChanged(_)) => {}
            Err(_) => return last_step,
        }
    }
}

#[tokio::test]
async fn every_algorithm_sorts_and_finalizes_all_slots() {
    for algorithm in [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
    ] {
        let controller = SortController::with_sequence(&[5, 3, 8, 1, 4, 4, 2]);
        controller.set_algorithm(algorithm).await;
        controller.set_speed(fast()).await;
        let mut events = controller.subscribe_events();
        controller.start().await;
        let final_snapshot = drain_until_completed(&mut events)
            .await
            .expect("final snapshot");

        assert_eq!(
            values_of(&final_snapshot.elements),
            vec![1, 2, 3, 4, 4, 5, 8],
            "{algorithm:?}"
        );
        assert!(final_snapshot.elements.iter().all(|e| e.is_sorted));
        assert!(final_snapshot
            .elements
            .iter()
            .all(|e| !e.is_comparing && !e.is_swapping));
        assert_eq!(final_snapshot.step_label, "Sorting complete!");
        assert_eq!(controller.state().await.phase, Phase::Completed);
    }
}

#[tokio::test]
async fn bubble_counts_every_adjacent_comparison_and_each_exchange() {
    let controller = SortController::with_sequence(&[5, 3, 8, 1]);
    controller.set_speed(fast()).await;
    let mut events = controller.subscribe_events();
    controller.start().await;
    drain_until_completed(&mut events).await;

    let state = controller.state().await;
    assert_eq!(state.comparisons, 6);
    // Exchanges on this input: 5/3, 8/1, 5/1, 3/1.
    assert_eq!(state.swaps, 4);
    assert_eq!(values_of(&controller.sequence().await), vec![1, 3, 5, 8]);
}

#[tokio::test]
async fn insertion_counts_comparisons_only_inside_shift_loop() {
    // The leftward guard check that ends each key's scan is deliberately
    // uncounted, so the comparison counter always equals the shift counter.
    let controller = SortController::with_sequence(&[5, 3, 8, 1]);
    controller.set_algorithm(Algorithm::Insertion).await;
    controller.set_speed(fast()).await;
    let mut events = controller.subscribe_events();
    controller.start().await;
    drain_until_completed(&mut events).await;

    let state = controller.state().await;
    assert_eq!(state.comparisons, 4);
    assert_eq!(state.swaps, 4);
    assert_eq!(values_of(&controller.sequence().await), vec![1, 3, 5, 8]);
}

#[tokio::test]
async fn selection_orders_duplicates() {
    let controller = SortController::with_sequence(&[4, 2, 2, 1]);
    controller.set_algorithm(Algorithm::Selection).await;
    controller.set_speed(fast()).await;
    let mut events = controller.subscribe_events();
    controller.start().await;
    drain_until_completed(&mut events).await;

    let sequence = controller.sequence().await;
    assert_eq!(values_of(&sequence), vec![1, 2, 2, 4]);
    assert!(sequence.iter().all(|e| e.is_sorted));
}

#[tokio::test]
async fn pause_preserves_progress_and_start_resumes_accumulating() {
    let controller = SortController::with_sequence(&[9, 1, 2]);
    controller.set_speed(Speed::new(1).expect("speed")).await;
    let mut events = controller.subscribe_events();
    controller.start().await;

    // Wait for the first comparison, then request the stop.
    loop {
        match events.recv().await.expect("event") {
            EngineEvent::Step(snapshot) if snapshot.comparisons >= 1 => break,
            _ => {}
        }
    }
    controller.pause().await;

    let paused = controller.state().await;
    assert_eq!(paused.phase, Phase::Paused);
    let comparisons_at_pause = paused.comparisons;
    assert!(comparisons_at_pause >= 1);

    // A valid intermediate state: same values, possibly reordered.
    let mut paused_values = values_of(&controller.sequence().await);
    paused_values.sort_unstable();
    assert_eq!(paused_values, vec![1, 2, 9]);

    // Restarting runs a fresh pass over current values and keeps adding to
    // the same counters.
    controller.set_speed(fast()).await;
    let mut events = controller.subscribe_events();
    controller.start().await;
    let final_snapshot = drain_until_completed(&mut events)
        .await
        .expect("final snapshot");

    assert_eq!(values_of(&final_snapshot.elements), vec![1, 2, 9]);
    let state = controller.state().await;
    // A fresh pass over three elements costs three comparisons on top of
    // whatever the interrupted pass already recorded.
    assert!(state.comparisons >= comparisons_at_pause + 3);
    assert_eq!(state.phase, Phase::Completed);
}

#[tokio::test]
async fn empty_and_single_sequences_complete_immediately() {
    for values in [Vec::new(), vec![7u16]] {
        let controller = SortController::with_sequence(&values);
        controller.set_speed(fast()).await;
        let mut events = controller.subscribe_events();
        controller.start().await;
        drain_until_completed(&mut events).await;

        let state = controller.state().await;
        assert_eq!(state.phase, Phase::Completed);
        assert_eq!(state.comparisons, 0);
        assert_eq!(state.swaps, 0);
        assert!(controller.sequence().await.iter().all(|e| e.is_sorted));
    }
}

#[tokio::test]
async fn reset_clears_flags_and_counters_but_not_values() {
    let controller = SortController::with_sequence(&[3, 1, 2]);
    controller.set_speed(fast()).await;
    let mut events = controller.subscribe_events();
    controller.start().await;
    drain_until_completed(&mut events).await;

    controller.reset().await;

    let state = controller.state().await;
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.comparisons, 0);
    assert_eq!(state.swaps, 0);
    assert_eq!(state.step_label, "Ready to sort");

    let sequence = controller.sequence().await;
    assert_eq!(values_of(&sequence), vec![1, 2, 3]);
    assert!(sequence
        .iter()
        .all(|e| e.highlight() == Highlight::Unsorted));
}

#[tokio::test]
async fn regenerate_draws_a_fresh_bounded_sequence() {
    let controller = SortController::with_sequence(&[1, 2]);
    controller.regenerate().await;

    let state = controller.state().await;
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.comparisons, 0);
    assert_eq!(state.swaps, 0);
    assert_eq!(state.step_label, "Array generated");

    let sequence = controller.sequence().await;
    assert_eq!(sequence.len(), ELEMENT_COUNT);
    assert!(sequence
        .iter()
        .all(|e| (VALUE_MIN..=VALUE_MAX).contains(&e.value)));
    assert!(sequence
        .iter()
        .all(|e| e.highlight() == Highlight::Unsorted));
}

#[tokio::test]
async fn start_is_a_noop_while_running() {
    let controller = SortController::with_sequence(&[5, 3, 8, 1]);
    controller.set_speed(fast()).await;
    let mut events = controller.subscribe_events();
    controller.start().await;
    controller.start().await;
    drain_until_completed(&mut events).await;

    // A second pass would have doubled the counters.
    assert_eq!(controller.state().await.comparisons, 6);
}

#[tokio::test]
async fn pause_outside_a_run_is_a_noop() {
    let controller = SortController::with_sequence(&[2, 1]);
    controller.pause().await;
    assert_eq!(controller.state().await.phase, Phase::Idle);
    assert_eq!(controller.state().await.step_label, "Array generated");
}
