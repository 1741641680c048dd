//! Presentation helpers
//!
//! Read-only projections of a [`GuidanceState`] for whatever renders the
//! guidance screen: progress, the instruction to show, per-step status.

use serde::Serialize;

use crate::config::SimulatorConfig;
use crate::route::{Destination, NavigationStep};
use crate::simulator::{GuidanceMode, GuidanceState};

/// Display status of one route step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// Share of the route covered, 0.0..=100.0
pub fn progress_percent(state: &GuidanceState, initial_distance: u32) -> f32 {
    if initial_distance == 0 {
        return 100.0;
    }
    let covered = initial_distance.saturating_sub(state.remaining_distance);
    covered as f32 / initial_distance as f32 * 100.0
}

/// [`progress_percent`] rounded to a whole percent
pub fn progress_rounded(state: &GuidanceState, initial_distance: u32) -> u8 {
    progress_percent(state, initial_distance).round().clamp(0.0, 100.0) as u8
}

/// Step shown to the user, none once every threshold is crossed
pub fn current_step<'a>(
    state: &GuidanceState,
    steps: &'a [NavigationStep],
) -> Option<&'a NavigationStep> {
    steps.get(state.current_step_index)
}

pub fn step_status(index: usize, state: &GuidanceState) -> StepStatus {
    use std::cmp::Ordering;
    match index.cmp(&state.current_step_index) {
        Ordering::Less => StepStatus::Completed,
        Ordering::Equal => StepStatus::Current,
        Ordering::Greater => StepStatus::Pending,
    }
}

/// "Step k of n", saturating at the last step
pub fn step_label(state: &GuidanceState, steps: &[NavigationStep]) -> String {
    let total = steps.len();
    let shown = (state.current_step_index + 1).min(total);
    format!("Step {} of {}", shown, total)
}

/// One line describing the current instruction
pub fn instruction_line(state: &GuidanceState, config: &SimulatorConfig) -> String {
    match state.mode {
        GuidanceMode::Idle => "Guidance idle".to_string(),
        GuidanceMode::Calibrating => "Calibrating sensors...".to_string(),
        GuidanceMode::Arrived => match &config.destination {
            Some(destination) => format!("You have arrived at spot {}", destination.spot),
            None => "You have arrived".to_string(),
        },
        GuidanceMode::Active => match current_step(state, &config.steps) {
            Some(step) => format!(
                "{} {} ({}m, {}) - {}m to go",
                step.direction.arrow(),
                step.instruction,
                step.activation_distance,
                step.floor,
                state.remaining_distance
            ),
            None => format!("{}m to go", state.remaining_distance),
        },
    }
}

/// Serializable view of one step
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: NavigationStep,
    pub status: StepStatus,
}

/// Everything a guidance screen needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct GuidanceView {
    pub state: GuidanceState,
    pub progress_percent: u8,
    pub step_label: String,
    pub instruction: String,
    pub steps: Vec<StepView>,
    pub destination: Option<Destination>,
}

impl GuidanceView {
    pub fn new(state: &GuidanceState, config: &SimulatorConfig) -> Self {
        Self {
            state: *state,
            progress_percent: progress_rounded(state, config.initial_distance),
            step_label: step_label(state, &config.steps),
            instruction: instruction_line(state, config),
            steps: config
                .steps
                .iter()
                .enumerate()
                .map(|(index, step)| StepView {
                    step: step.clone(),
                    status: step_status(index, state),
                })
                .collect(),
            destination: config.destination.clone(),
        }
    }
}
