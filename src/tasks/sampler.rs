//! Countdown sampler background task

use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::state::engine::WeakTimerEngine;

/// Handle to the one sampler of a running period.
///
/// Cancelling (or dropping) the handle stops the task at its next await point.
/// The task also re-checks its run id under the engine lock on every tick, so
/// a sampler from an earlier period can never mutate the countdown.
#[derive(Debug)]
pub struct SamplerHandle {
    run_id: u64,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SamplerHandle {
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn cancel(&self) {
        self.token.cancel();
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawn the sampler for run `run_id` onto the current tokio runtime
pub fn spawn_sampler(engine: WeakTimerEngine, run_id: u64, tick: Duration) -> SamplerHandle {
    let token = CancellationToken::new();
    let task = tokio::spawn(sampler_task(engine, run_id, tick, token.clone()));
    SamplerHandle {
        run_id,
        token,
        task,
    }
}

async fn sampler_task(
    engine: WeakTimerEngine,
    run_id: u64,
    tick: Duration,
    token: CancellationToken,
) {
    debug!("Sampler {} started with {:?} tick", run_id, tick);

    let mut interval = interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                debug!("Sampler {} cancelled", run_id);
                break;
            }
            _ = interval.tick() => {
                let Some(engine) = engine.upgrade() else {
                    debug!("Sampler {} outlived its engine", run_id);
                    break;
                };
                if !engine.sample_run(run_id) {
                    debug!("Sampler {} finished", run_id);
                    break;
                }
            }
        }
    }
}
