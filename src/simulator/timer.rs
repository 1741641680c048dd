//! Timer ownership and the async driver
//!
//! One driver task per guidance session runs the calibration delay and then
//! the fixed-interval tick. The task is owned through a [`TimerHandle`] that
//! aborts it when dropped.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::Core;

/// Owned handle to a running driver task
#[derive(Debug)]
pub struct TimerHandle {
    task: Option<JoinHandle<()>>,
}

impl TimerHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Abort the task now
    pub fn cancel(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Let a task that is about to finish on its own run to completion
    pub fn release(mut self) {
        self.task.take();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Timing inputs for one session
#[derive(Debug, Clone, Copy)]
pub(crate) struct DriverTiming {
    pub calibration_delay: Duration,
    pub tick_interval: Duration,
}

/// Calibration delay, then ticks until arrival or until the session epoch goes stale
pub(crate) async fn drive(core: Arc<Core>, epoch: u64, timing: DriverTiming) {
    time::sleep(timing.calibration_delay).await;
    let activated = core.activate(epoch);
    if !activated {
        debug!("Guidance session {} ended during calibration", epoch);
        return;
    }

    let mut ticker = time::interval_at(
        Instant::now() + timing.tick_interval,
        timing.tick_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        ticker.tick().await;
        let keep_ticking = core.tick(epoch);
        if !keep_ticking {
            break;
        }
    }
    debug!("Guidance driver {} finished", epoch);
}
