// Engine-level tests driving the real sampler with a manual clock.

use std::{sync::Arc, time::Duration};

use keypad_countdown::{
    state::{CountdownState, TimerEngine, MIN_TICK_INTERVAL},
    EngineError, ManualClock,
};
use tokio::time::{sleep, timeout};

const FAST_TICK: Duration = Duration::from_millis(1);
// Long enough that only the sampler's immediate first tick ever fires.
const IDLE_TICK: Duration = Duration::from_secs(3600);

fn engine_with(tick: Duration) -> (TimerEngine, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_000_000));
    let engine = TimerEngine::new(clock.clone(), tick);
    (engine, clock)
}

fn type_digits(engine: &TimerEngine, digits: &[i64]) {
    for &d in digits {
        engine.append_digit(d).unwrap();
    }
}

#[tokio::test]
async fn sampler_completes_the_countdown() {
    let (engine, clock) = engine_with(FAST_TICK);
    type_digits(&engine, &[5]);
    let mut rx = engine.subscribe();

    let started = engine.start();
    assert_eq!(started.state, CountdownState::Running);
    assert!(engine.is_sampling());

    clock.advance(5_001);
    let completed = timeout(Duration::from_secs(5), rx.wait_for(|s| s.is_completed))
        .await
        .expect("sampler never completed the countdown")
        .unwrap()
        .clone();

    assert_eq!(completed.state, CountdownState::Completed);
    assert_eq!(completed.text, "0 m 0 s 000");
    assert_eq!(completed.progress, 0.0);
    assert!(!engine.is_sampling());

    // Display stays frozen however much later we look.
    clock.advance(60_000);
    assert_eq!(engine.sample().text, "0 m 0 s 000");
}

#[tokio::test]
async fn sampler_keeps_running_until_time_is_negative() {
    let (engine, clock) = engine_with(FAST_TICK);
    type_digits(&engine, &[2]);
    let mut rx = engine.subscribe();
    engine.start();

    clock.advance(2_000);
    let at_zero = timeout(
        Duration::from_secs(5),
        rx.wait_for(|s| s.remaining_millis == 0),
    )
    .await
    .expect("sampler never observed the zero remainder")
    .unwrap()
    .clone();
    assert_eq!(at_zero.state, CountdownState::Running);
    assert!(engine.is_sampling());

    engine.stop();
}

#[tokio::test]
async fn manual_sample_detects_completion() {
    let (engine, clock) = engine_with(IDLE_TICK);
    type_digits(&engine, &[5]);
    engine.start();

    clock.advance(4_000);
    assert_eq!(engine.sample().text, "0 m 1 s 000");

    clock.advance(1_001);
    let snapshot = engine.sample();
    assert_eq!(snapshot.state, CountdownState::Completed);
    assert_eq!(snapshot.text, "0 m 0 s 000");
}

#[tokio::test]
async fn pause_cancels_the_sampler_and_freezes_time() {
    let (engine, clock) = engine_with(FAST_TICK);
    type_digits(&engine, &[1, 0]);
    engine.start();

    clock.advance(3_000);
    let paused = engine.pause();
    assert_eq!(paused.state, CountdownState::Paused);
    assert_eq!(paused.remaining_millis, 7_000);
    assert!(!engine.is_sampling());

    clock.advance(30_000);
    sleep(Duration::from_millis(20)).await;
    assert_eq!(engine.state(), CountdownState::Paused);
    assert_eq!(engine.remaining_millis(), 7_000);
}

#[tokio::test]
async fn pause_resume_round_trip_preserves_remaining_time() {
    let (engine, clock) = engine_with(IDLE_TICK);
    type_digits(&engine, &[1, 3, 0]);
    engine.start();

    clock.advance(10_000);
    engine.pause();
    clock.advance(45_000);
    engine.start();
    assert!(engine.is_sampling());
    clock.advance(20_000);

    // 90s configured, 30s of running time in total.
    assert_eq!(engine.sample().remaining_millis, 60_000);
    assert_eq!(engine.sample().text, "1 m 0 s 000");
}

#[tokio::test]
async fn resume_replaces_the_previous_sampler() {
    let (engine, clock) = engine_with(FAST_TICK);
    type_digits(&engine, &[3]);
    let mut rx = engine.subscribe();

    for _ in 0..5 {
        engine.start();
        engine.pause();
    }
    engine.start();
    assert!(engine.is_sampling());

    clock.advance(3_001);
    timeout(Duration::from_secs(5), rx.wait_for(|s| s.is_completed))
        .await
        .expect("sampler never completed the countdown")
        .unwrap();
    assert!(!engine.is_sampling());
}

#[tokio::test]
async fn start_is_ignored_without_duration_or_while_running() {
    let (engine, clock) = engine_with(IDLE_TICK);
    let snapshot = engine.start();
    assert_eq!(snapshot.state, CountdownState::Stopped);
    assert!(!snapshot.is_start_enabled);
    assert!(!engine.is_sampling());

    type_digits(&engine, &[9]);
    engine.start();
    clock.advance(2_000);
    engine.start();
    assert_eq!(engine.sample().remaining_millis, 7_000);
}

#[tokio::test]
async fn idempotent_pause_and_stop() {
    let (engine, clock) = engine_with(IDLE_TICK);
    type_digits(&engine, &[4, 2]);

    let stopped = engine.stop();
    assert_eq!(stopped.state, CountdownState::Stopped);
    assert_eq!(stopped.duration_text, "42");

    engine.start();
    clock.advance(2_000);
    let first = engine.pause();
    clock.advance(2_000);
    let second = engine.pause();
    assert_eq!(first.state, CountdownState::Paused);
    assert_eq!(second, first);
}

#[tokio::test]
async fn reset_returns_to_stopped_with_typed_text() {
    let (engine, clock) = engine_with(IDLE_TICK);
    type_digits(&engine, &[2, 0]);

    engine.start();
    clock.advance(5_000);
    engine.pause();
    let reset = engine.reset();
    assert_eq!(reset.state, CountdownState::Stopped);
    assert_eq!(reset.duration_text, "20");
    assert_eq!(reset.text, "0 m 20 s");
    assert!(reset.is_num_pad_visible);

    engine.start();
    clock.advance(25_000);
    assert!(engine.sample().is_completed);
    let reset = engine.reset();
    assert_eq!(reset.state, CountdownState::Stopped);
    assert_eq!(reset.remaining_millis, 20_000);
}

#[tokio::test]
async fn keypad_is_locked_while_counting() {
    let (engine, _clock) = engine_with(IDLE_TICK);
    type_digits(&engine, &[1, 5]);
    engine.start();

    engine.append_digit(7).unwrap();
    engine.backspace();
    engine.clear();
    assert_eq!(engine.duration_text(), "15");

    assert_eq!(
        engine.append_digit(-1),
        Err(EngineError::InvalidArgument { digit: -1 })
    );
    engine.stop();
}

#[tokio::test]
async fn keypad_edits_publish_snapshots() {
    let (engine, _clock) = engine_with(IDLE_TICK);
    let mut rx = engine.subscribe();

    type_digits(&engine, &[1, 3, 0]);
    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.duration_text, "130");
    assert_eq!(snapshot.text, "1 m 30 s");
    assert_eq!(engine.parsed_seconds(), 90);

    engine.backspace();
    assert_eq!(rx.borrow_and_update().duration_text, "13");

    assert!(engine.append_digit(10).is_err());
    assert!(!rx.has_changed().unwrap());
    assert_eq!(engine.duration_text(), "13");
}

#[tokio::test]
async fn teardown_stops_sampling() {
    let (engine, clock) = engine_with(FAST_TICK);
    type_digits(&engine, &[5]);
    engine.start();

    engine.teardown();
    assert!(!engine.is_sampling());

    clock.advance(10_000);
    sleep(Duration::from_millis(20)).await;
    assert_eq!(engine.state(), CountdownState::Running);
    assert_eq!(engine.remaining_millis(), 5_000);
}

#[tokio::test]
async fn dropping_the_engine_releases_it() {
    let (engine, _clock) = engine_with(IDLE_TICK);
    type_digits(&engine, &[5]);
    engine.start();
    let weak = engine.downgrade();

    drop(engine);
    sleep(Duration::from_millis(20)).await;
    assert!(weak.upgrade().is_none());
}

#[tokio::test]
async fn zero_tick_is_raised_to_the_minimum() {
    let (engine, clock) = engine_with(Duration::ZERO);
    assert_eq!(engine.tick_interval(), MIN_TICK_INTERVAL);

    type_digits(&engine, &[1]);
    let mut rx = engine.subscribe();
    engine.start();
    assert!(engine.is_sampling());

    clock.advance(1_001);
    timeout(Duration::from_secs(5), rx.wait_for(|s| s.is_completed))
        .await
        .expect("sampler never completed the countdown")
        .unwrap();
    assert_eq!(engine.state(), CountdownState::Completed);
}

#[tokio::test]
async fn ignored_intents_do_not_wake_watchers() {
    let (engine, clock) = engine_with(IDLE_TICK);
    type_digits(&engine, &[4, 2]);
    let mut rx = engine.subscribe();

    engine.stop();
    engine.reset();
    assert!(!rx.has_changed().unwrap());

    engine.start();
    clock.advance(2_000);
    engine.pause();
    assert!(rx.has_changed().unwrap());
    let _ = rx.borrow_and_update();

    engine.pause();
    engine.append_digit(7).unwrap();
    engine.clear();
    engine.backspace();
    assert!(!rx.has_changed().unwrap());
    assert_eq!(rx.borrow().remaining_millis, 40_000);
}
