//! Guidance state machine
//!
//! Pure, synchronous transitions. Timers live in [`super::timer`]; this module
//! only decides what a start, activation, tick or reset does to the state.

use serde::{Deserialize, Serialize};

use crate::config::SimulatorConfig;
use crate::error::{GuidanceError, GuidanceResult};

/// Phase of a guidance session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GuidanceMode {
    #[default]
    Idle,
    Calibrating,
    Active,
    Arrived,
}

/// Snapshot published to observers on every change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceState {
    pub mode: GuidanceMode,
    /// Meters left to the spot
    pub remaining_distance: u32,
    /// Number of route thresholds crossed so far
    pub current_step_index: usize,
}

impl GuidanceState {
    pub fn idle(initial_distance: u32) -> Self {
        Self {
            mode: GuidanceMode::Idle,
            remaining_distance: initial_distance,
            current_step_index: 0,
        }
    }
}

/// Result of applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not active; nothing happened
    Ignored,
    /// Distance decreased; `steps_reached` thresholds were crossed
    Advanced { steps_reached: usize },
    /// Distance hit zero; ticking must stop
    Arrived { steps_reached: usize },
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Arrived { .. })
    }
}

/// State plus the constants that drive it
#[derive(Debug, Clone)]
pub struct GuidanceMachine {
    state: GuidanceState,
    initial_distance: u32,
    step_size: u32,
    /// Activation distances in route order
    thresholds: Vec<u32>,
}

impl GuidanceMachine {
    pub fn new(config: &SimulatorConfig) -> Self {
        Self {
            state: GuidanceState::idle(config.initial_distance),
            initial_distance: config.initial_distance,
            step_size: config.step_size_meters,
            thresholds: config
                .steps
                .iter()
                .map(|step| step.activation_distance)
                .collect(),
        }
    }

    pub fn state(&self) -> GuidanceState {
        self.state
    }

    /// Idle -> Calibrating
    pub fn begin_calibration(&mut self) -> GuidanceResult<()> {
        if self.state.mode != GuidanceMode::Idle {
            return Err(GuidanceError::InvalidState {
                expected: GuidanceMode::Idle,
                found: self.state.mode,
            });
        }
        self.state.mode = GuidanceMode::Calibrating;
        Ok(())
    }

    /// Calibrating -> Active. Returns false when not calibrating.
    pub fn activate(&mut self) -> bool {
        if self.state.mode != GuidanceMode::Calibrating {
            return false;
        }
        self.state.mode = GuidanceMode::Active;
        true
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.mode != GuidanceMode::Active {
            return TickOutcome::Ignored;
        }

        self.state.remaining_distance = self.state.remaining_distance.saturating_sub(self.step_size);

        let mut steps_reached = 0;
        while let Some(&threshold) = self.thresholds.get(self.state.current_step_index) {
            if self.state.remaining_distance > threshold {
                break;
            }
            self.state.current_step_index += 1;
            steps_reached += 1;
        }

        if self.state.remaining_distance == 0 {
            self.state.mode = GuidanceMode::Arrived;
            TickOutcome::Arrived { steps_reached }
        } else {
            TickOutcome::Advanced { steps_reached }
        }
    }

    /// Any -> Idle with initial distance and first step. Returns true if the state changed.
    pub fn reset(&mut self) -> bool {
        let idle = GuidanceState::idle(self.initial_distance);
        if self.state == idle {
            return false;
        }
        self.state = idle;
        true
    }
}
