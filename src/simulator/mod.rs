//! Simulated AR guidance
//!
//! [`GuidanceSimulator`] walks a user from the parking entrance to a reserved
//! spot. A calibration delay precedes guidance; afterwards a fixed-interval
//! tick lowers the remaining distance and advances through the route steps
//! until the spot is reached.
//!
//! Mutable state sits behind a state lock together with a session epoch.
//! `stop()` and drop bump the epoch and abort the driver while holding it, so
//! a stale tick can never mutate state. Channel subscribers are fed under the
//! state lock. Callbacks are queued there and run afterwards under a separate
//! re-entrant delivery lock, so a callback may call back into the simulator;
//! anything it triggers is delivered once it returns. `stop()` drains the
//! queue before returning, so no callback fires after it, unless `stop()` was
//! itself called from a callback.

use crossbeam_channel::Receiver;
use parking_lot::{Mutex, ReentrantMutex};
use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::config::{ConfigValidation, SimulatorConfig};
use crate::error::GuidanceResult;
use crate::route::NavigationStep;
use crate::view::GuidanceView;

pub mod events;
pub mod state;
pub mod timer;

pub use events::{ListenerId, SharedCallback, StateCallback, StateObservers};
pub use state::{GuidanceMachine, GuidanceMode, GuidanceState, TickOutcome};
pub use timer::TimerHandle;

use timer::DriverTiming;

/// State guarded by the state lock
struct Shared {
    machine: GuidanceMachine,
    observers: StateObservers,
    /// Incremented on every start and stop; drivers holding an older value are stale
    epoch: u64,
    timer: Option<TimerHandle>,
    /// Published states whose callbacks have not run yet
    pending: VecDeque<(GuidanceState, Vec<SharedCallback>)>,
}

impl Shared {
    fn publish(&mut self) {
        let state = self.machine.state();
        self.observers.broadcast(&state);
        let callbacks = self.observers.callbacks();
        if !callbacks.is_empty() {
            self.pending.push_back((state, callbacks));
        }
    }

    /// Drop the running session, if any
    fn invalidate(&mut self) {
        self.epoch += 1;
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn activate(&mut self, epoch: u64) -> bool {
        if self.epoch != epoch || !self.machine.activate() {
            return false;
        }
        info!("Calibration complete, guidance active");
        self.publish();
        true
    }

    fn tick(&mut self, epoch: u64) -> bool {
        if self.epoch != epoch {
            return false;
        }

        let outcome = self.machine.tick();
        let state = self.machine.state();
        match outcome {
            TickOutcome::Ignored => false,
            TickOutcome::Advanced { steps_reached } => {
                if steps_reached > 0 {
                    info!(
                        "Reached step {} at {}m",
                        state.current_step_index, state.remaining_distance
                    );
                }
                self.publish();
                true
            }
            TickOutcome::Arrived { .. } => {
                info!("Arrived at destination");
                if let Some(timer) = self.timer.take() {
                    timer.release();
                }
                self.publish();
                false
            }
        }
    }
}

/// Clears the delivering flag, also when a callback panics
struct DeliveryPass<'a>(&'a Cell<bool>);

impl Drop for DeliveryPass<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Everything the simulator shares with its driver task
pub(crate) struct Core {
    shared: Mutex<Shared>,
    /// True while this thread is running callbacks
    delivery: ReentrantMutex<Cell<bool>>,
}

impl Core {
    /// Run queued callbacks outside the state lock, in publish order
    fn deliver(&self) {
        let delivering = self.delivery.lock();
        if delivering.replace(true) {
            // Re-entered from a callback; the outer pass drains the queue
            return;
        }
        let _pass = DeliveryPass(&delivering);

        loop {
            let next = self.shared.lock().pending.pop_front();
            let Some((state, callbacks)) = next else {
                break;
            };
            events::notify(&callbacks, &state);
        }
    }

    pub(crate) fn activate(&self, epoch: u64) -> bool {
        let activated = self.shared.lock().activate(epoch);
        self.deliver();
        activated
    }

    /// Apply one tick; returns whether the driver should keep ticking
    pub(crate) fn tick(&self, epoch: u64) -> bool {
        let keep_ticking = self.shared.lock().tick(epoch);
        self.deliver();
        keep_ticking
    }
}

/// Timer-driven guidance state machine
pub struct GuidanceSimulator {
    config: SimulatorConfig,
    core: Arc<Core>,
}

impl GuidanceSimulator {
    /// Create a simulator in Idle from a validated config
    pub fn new(config: SimulatorConfig) -> GuidanceResult<Self> {
        config.validate()?;
        let shared = Shared {
            machine: GuidanceMachine::new(&config),
            observers: StateObservers::new(),
            epoch: 0,
            timer: None,
            pending: VecDeque::new(),
        };
        Ok(Self {
            config,
            core: Arc::new(Core {
                shared: Mutex::new(shared),
                delivery: ReentrantMutex::new(Cell::new(false)),
            }),
        })
    }

    /// Idle -> Calibrating, then Active after the calibration delay.
    ///
    /// Fails with [`crate::GuidanceError::InvalidState`] outside Idle and with
    /// [`crate::GuidanceError::Runtime`] when called outside a tokio runtime.
    pub fn start(&self) -> GuidanceResult<()> {
        let runtime = Handle::try_current()?;
        {
            let mut shared = self.core.shared.lock();

            if let Err(err) = shared.machine.begin_calibration() {
                warn!("Ignoring start request: {}", err);
                return Err(err);
            }

            shared.invalidate();
            let epoch = shared.epoch;
            info!("Guidance calibrating (session {})", epoch);
            shared.publish();

            let timing = DriverTiming {
                calibration_delay: self.config.calibration_delay(),
                tick_interval: self.config.tick_interval(),
            };
            let task = runtime.spawn(timer::drive(Arc::clone(&self.core), epoch, timing));
            shared.timer = Some(TimerHandle::new(task));
        }
        self.core.deliver();
        Ok(())
    }

    /// Return to Idle from any mode, cancelling pending timers
    pub fn stop(&self) {
        {
            let mut shared = self.core.shared.lock();
            shared.invalidate();
            if shared.machine.reset() {
                info!("Guidance stopped");
                shared.publish();
            } else {
                debug!("Stop requested while already idle");
            }
        }
        self.core.deliver();
    }

    /// Current state snapshot
    pub fn state(&self) -> GuidanceState {
        self.core.shared.lock().machine.state()
    }

    /// Register a callback for every state change
    pub fn on_state_change<F>(&self, callback: F) -> ListenerId
    where
        F: FnMut(&GuidanceState) + Send + 'static,
    {
        self.core
            .shared
            .lock()
            .observers
            .add_callback(Box::new(callback))
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.core.shared.lock().observers.remove_callback(id)
    }

    /// Channel receiving every state change
    pub fn subscribe(&self) -> Receiver<GuidanceState> {
        self.core.shared.lock().observers.subscribe()
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn steps(&self) -> &[NavigationStep] {
        &self.config.steps
    }

    /// Presentation snapshot of the current state
    pub fn view(&self) -> GuidanceView {
        GuidanceView::new(&self.state(), &self.config)
    }
}

impl Drop for GuidanceSimulator {
    fn drop(&mut self) {
        let mut shared = self.core.shared.lock();
        shared.invalidate();
        shared.pending.clear();
    }
}
