//! Navigation route data
//!
//! A route is the fixed, ordered list of [`NavigationStep`]s the guidance
//! simulator walks through. Steps are immutable once a simulator is built.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading of a navigation instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Left,
    Right,
    Backward,
}

impl Direction {
    /// Arrow glyph for text rendering
    pub fn arrow(&self) -> char {
        match self {
            Direction::Forward => '↑',
            Direction::Left => '←',
            Direction::Right => '→',
            Direction::Backward => '↓',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Forward => "forward",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Backward => "backward",
        };
        f.write_str(name)
    }
}

/// One instruction along the route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStep {
    /// Position in the route, starting at 1
    pub sequence: u32,
    /// Human-readable instruction
    pub instruction: String,
    pub direction: Direction,
    /// Remaining distance (meters) at or below which this step is reached
    pub activation_distance: u32,
    /// Floor label shown alongside the instruction
    pub floor: String,
}

impl NavigationStep {
    pub fn new(
        sequence: u32,
        instruction: impl Into<String>,
        direction: Direction,
        activation_distance: u32,
        floor: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            instruction: instruction.into(),
            direction,
            activation_distance,
            floor: floor.into(),
        }
    }
}

/// Reserved spot the route leads to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub parking_name: String,
    pub spot: String,
    pub floor: String,
    pub section: String,
    /// Spot category, e.g. "Regular"
    pub kind: String,
}

impl Default for Destination {
    fn default() -> Self {
        Self {
            parking_name: "Jardin Plaza Mall Parking".to_string(),
            spot: "A-24".to_string(),
            floor: "Ground Floor".to_string(),
            section: "Zone A".to_string(),
            kind: "Regular".to_string(),
        }
    }
}

/// Route from the main entrance to spot A-24
pub fn default_route() -> Vec<NavigationStep> {
    vec![
        NavigationStep::new(
            1,
            "Enter through the main entrance",
            Direction::Forward,
            45,
            "Ground Floor",
        ),
        NavigationStep::new(
            2,
            "Turn right at aisle A",
            Direction::Right,
            23,
            "Ground Floor",
        ),
        NavigationStep::new(
            3,
            "Continue straight for 15 meters",
            Direction::Forward,
            15,
            "Ground Floor",
        ),
        NavigationStep::new(
            4,
            "Your spot is on the left",
            Direction::Left,
            5,
            "Ground Floor",
        ),
    ]
}
