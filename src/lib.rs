//! Parking Guidance Library
//!
//! Simulated augmented-reality guidance to a reserved parking spot: a
//! calibration phase followed by a timer-driven walk through an ordered list
//! of navigation steps, published to observers as a stream of states.

pub mod config;
pub mod error;
pub mod logging;
pub mod route;
pub mod simulator;
pub mod view;

// Re-export commonly used types
pub use config::{ConfigValidation, SimulatorConfig};
pub use error::{GuidanceError, GuidanceResult};
pub use route::{default_route, Destination, Direction, NavigationStep};
pub use simulator::{GuidanceMode, GuidanceSimulator, GuidanceState, ListenerId};
pub use view::{GuidanceView, StepStatus};
