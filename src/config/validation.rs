//! Configuration validation
//!
//! Rules a config must satisfy before a simulator runs it. The threshold
//! rules guarantee that a single tick crosses at most one step threshold.

use tracing::warn;

use super::SimulatorConfig;
use crate::error::{GuidanceError, GuidanceResult};
use crate::route::NavigationStep;

/// Consistency checks for configuration components
pub trait ConfigValidation {
    /// Validate the component for consistency
    fn validate(&self) -> GuidanceResult<()>;
}

fn invalid(message: String) -> GuidanceError {
    warn!("Rejected simulator config: {}", message);
    GuidanceError::InvalidConfig(message)
}

impl ConfigValidation for NavigationStep {
    fn validate(&self) -> GuidanceResult<()> {
        if self.instruction.trim().is_empty() {
            return Err(invalid(format!(
                "Step {} has an empty instruction",
                self.sequence
            )));
        }
        if self.floor.trim().is_empty() {
            return Err(invalid(format!("Step {} has an empty floor", self.sequence)));
        }
        Ok(())
    }
}

impl ConfigValidation for SimulatorConfig {
    fn validate(&self) -> GuidanceResult<()> {
        if self.initial_distance == 0 {
            return Err(invalid("Initial distance must be positive".to_string()));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("Tick interval must be positive".to_string()));
        }
        if self.step_size_meters == 0 {
            return Err(invalid("Step size must be positive".to_string()));
        }
        if self.steps.is_empty() {
            return Err(invalid("Route must contain at least one step".to_string()));
        }

        for (index, step) in self.steps.iter().enumerate() {
            step.validate()?;
            let expected = index as u32 + 1;
            if step.sequence != expected {
                return Err(invalid(format!(
                    "Step sequence out of order: expected {}, found {}",
                    expected, step.sequence
                )));
            }
        }

        let first = &self.steps[0];
        if first.activation_distance >= self.initial_distance {
            return Err(invalid(format!(
                "First threshold {}m must be below the {}m initial distance",
                first.activation_distance, self.initial_distance
            )));
        }

        for pair in self.steps.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            if lower.activation_distance >= upper.activation_distance {
                return Err(invalid(format!(
                    "Thresholds must strictly decrease: step {} at {}m follows step {} at {}m",
                    lower.sequence,
                    lower.activation_distance,
                    upper.sequence,
                    upper.activation_distance
                )));
            }
            let gap = upper.activation_distance - lower.activation_distance;
            if gap < self.step_size_meters {
                return Err(invalid(format!(
                    "Threshold gap {}m between steps {} and {} is smaller than the {}m step size",
                    gap, upper.sequence, lower.sequence, self.step_size_meters
                )));
            }
        }

        Ok(())
    }
}
