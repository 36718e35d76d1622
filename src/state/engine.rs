//! Shared timer engine
//!
//! `TimerEngine` serializes every operation on a [`Countdown`] behind one
//! mutex, owns the single sampler of the current running period, and
//! publishes a [`TimerSnapshot`] on a watch channel after each mutation.
//! Starting a countdown spawns the sampler, so intents must be issued from
//! inside a tokio runtime.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{Countdown, CountdownState, TimerSnapshot};
use crate::{
    clock::{Clock, SystemClock},
    error::EngineError,
    tasks::{spawn_sampler, SamplerHandle},
};

/// Default sampler period, fine enough for a smooth millisecond readout
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(30);

/// Shortest sampler period; tokio intervals reject a zero period
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Default)]
struct EngineCore {
    countdown: Countdown,
    sampler: Option<SamplerHandle>,
    /// Bumped whenever a running period begins or the sampler is revoked
    run_id: u64,
}

impl EngineCore {
    fn cancel_sampler(&mut self) {
        if let Some(sampler) = self.sampler.take() {
            debug!("Cancelling sampler {}", sampler.run_id());
            sampler.cancel();
        }
    }
}

#[derive(Debug)]
struct EngineShared {
    core: Mutex<EngineCore>,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

impl Drop for EngineShared {
    fn drop(&mut self) {
        let core = self.core.get_mut().unwrap_or_else(PoisonError::into_inner);
        core.cancel_sampler();
    }
}

/// Cheaply cloneable handle to one countdown engine
#[derive(Debug, Clone)]
pub struct TimerEngine {
    shared: Arc<EngineShared>,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::with_system_clock(DEFAULT_TICK_INTERVAL)
    }
}

/// Non-owning engine handle held by the sampler
#[derive(Debug, Clone)]
pub struct WeakTimerEngine {
    shared: Weak<EngineShared>,
}

impl WeakTimerEngine {
    pub fn upgrade(&self) -> Option<TimerEngine> {
        self.shared.upgrade().map(|shared| TimerEngine { shared })
    }
}

impl TimerEngine {
    /// Create a stopped engine with duration text `"0"`.
    ///
    /// A tick interval below [`MIN_TICK_INTERVAL`] is raised to it.
    pub fn new(clock: Arc<dyn Clock>, tick_interval: Duration) -> Self {
        if tick_interval < MIN_TICK_INTERVAL {
            warn!(
                "Sampler tick {:?} is too short, using {:?}",
                tick_interval, MIN_TICK_INTERVAL
            );
        }
        let tick_interval = tick_interval.max(MIN_TICK_INTERVAL);
        let core = EngineCore::default();
        let (snapshot_tx, _) = watch::channel(core.countdown.snapshot());

        info!("Timer engine created with {:?} sampler tick", tick_interval);
        Self {
            shared: Arc::new(EngineShared {
                core: Mutex::new(core),
                clock,
                tick_interval,
                snapshot_tx,
            }),
        }
    }

    pub fn with_system_clock(tick_interval: Duration) -> Self {
        Self::new(Arc::new(SystemClock), tick_interval)
    }

    pub fn downgrade(&self) -> WeakTimerEngine {
        WeakTimerEngine {
            shared: Arc::downgrade(&self.shared),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.shared.tick_interval
    }

    fn lock(&self) -> MutexGuard<'_, EngineCore> {
        self.shared
            .core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> i64 {
        self.shared.clock.now_millis()
    }

    /// Publish while still holding the lock so watchers see mutations in order.
    /// Watchers are only woken when the snapshot actually differs.
    fn publish(&self, core: &EngineCore) -> TimerSnapshot {
        let snapshot = core.countdown.snapshot();
        self.shared.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot.clone();
            true
        });
        snapshot
    }

    /// Start from `Stopped` or resume from `Paused`
    pub fn start(&self) -> TimerSnapshot {
        let mut core = self.lock();
        if core.countdown.start(self.now()) {
            core.cancel_sampler();
            core.run_id += 1;
            let sampler = spawn_sampler(self.downgrade(), core.run_id, self.shared.tick_interval);
            core.sampler = Some(sampler);
        }
        self.publish(&core)
    }

    pub fn pause(&self) -> TimerSnapshot {
        let mut core = self.lock();
        if core.countdown.pause(self.now()) {
            core.cancel_sampler();
        }
        self.publish(&core)
    }

    pub fn stop(&self) -> TimerSnapshot {
        let mut core = self.lock();
        if core.countdown.stop() {
            core.cancel_sampler();
        }
        self.publish(&core)
    }

    pub fn reset(&self) -> TimerSnapshot {
        let mut core = self.lock();
        if core.countdown.reset() {
            core.cancel_sampler();
        }
        self.publish(&core)
    }

    pub fn append_digit(&self, digit: i64) -> Result<TimerSnapshot, EngineError> {
        let mut core = self.lock();
        core.countdown.append_digit(digit)?;
        Ok(self.publish(&core))
    }

    pub fn clear(&self) -> TimerSnapshot {
        let mut core = self.lock();
        core.countdown.clear();
        self.publish(&core)
    }

    pub fn backspace(&self) -> TimerSnapshot {
        let mut core = self.lock();
        core.countdown.backspace();
        self.publish(&core)
    }

    /// Take one sample from the clock, completing the countdown if it ran out
    pub fn sample(&self) -> TimerSnapshot {
        let mut core = self.lock();
        if core.countdown.sample(self.now()) {
            core.cancel_sampler();
        }
        self.publish(&core)
    }

    /// Sampler tick for run `run_id`. Returns whether the sampler should keep going.
    pub(crate) fn sample_run(&self, run_id: u64) -> bool {
        let mut core = self.lock();
        if core.run_id != run_id || core.countdown.state() != CountdownState::Running {
            return false;
        }

        let completed = core.countdown.sample(self.now());
        if completed {
            // The sampler exits after this tick.
            core.sampler = None;
        }
        self.publish(&core);
        !completed
    }

    /// Cancel any sampler. Call when the hosting view goes away.
    pub fn teardown(&self) {
        let mut core = self.lock();
        core.cancel_sampler();
        core.run_id += 1;
        info!("Timer engine torn down in state {}", core.countdown.state());
    }

    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.lock().countdown.snapshot()
    }

    pub fn state(&self) -> CountdownState {
        self.lock().countdown.state()
    }

    pub fn remaining_millis(&self) -> i64 {
        self.lock().countdown.remaining_millis()
    }

    pub fn progress_fraction(&self) -> f64 {
        self.lock().countdown.progress_fraction()
    }

    pub fn duration_text(&self) -> String {
        self.lock().countdown.duration_text().to_string()
    }

    pub fn parsed_seconds(&self) -> u64 {
        self.lock().countdown.parsed_seconds()
    }

    /// Whether a live sampler exists for the current period
    pub fn is_sampling(&self) -> bool {
        self.lock()
            .sampler
            .as_ref()
            .is_some_and(|sampler| !sampler.is_finished())
    }
}
