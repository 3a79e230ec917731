//! Configuration for simulation execution
//!
//! Pacing of the manager and system loops, the low-resource reporting
//! threshold, and the names of the resources that end the mission.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resources whose state ends the mission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionRules {
    /// Running out of this resource terminates every system
    pub life_support: String,
    /// Filling this resource to capacity terminates every system
    pub destination: String,
}

impl Default for MissionRules {
    fn default() -> Self {
        Self {
            life_support: "Oxygen".to_string(),
            destination: "Distance".to_string(),
        }
    }
}

/// Configuration for simulation execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Milliseconds the manager sleeps between drain passes
    pub manager_wait_ms: u64,
    /// Milliseconds a system backs off after a failed consume or partial deposit
    pub system_wait_ms: u64,
    /// Fraction of capacity below which a consume also reports LOW
    pub low_threshold: Option<f64>,
    /// Halt the run after this many manager iterations
    pub max_manager_iterations: Option<u64>,
    pub mission: MissionRules,
}

impl SimulationConfig {
    /// Create a new simulation configuration with default values
    pub fn new() -> Self {
        Self {
            manager_wait_ms: 5,
            system_wait_ms: 20,
            low_threshold: Some(0.3),
            max_manager_iterations: None,
            mission: MissionRules::default(),
        }
    }

    pub fn with_manager_wait_ms(mut self, ms: u64) -> Self {
        self.manager_wait_ms = ms;
        self
    }

    pub fn with_system_wait_ms(mut self, ms: u64) -> Self {
        self.system_wait_ms = ms;
        self
    }

    /// Set the LOW threshold; `None` turns LOW reporting off
    pub fn with_low_threshold(mut self, threshold: Option<f64>) -> Self {
        self.low_threshold = threshold;
        self
    }

    pub fn with_max_manager_iterations(mut self, iterations: u64) -> Self {
        self.max_manager_iterations = Some(iterations);
        self
    }

    pub fn with_mission(mut self, mission: MissionRules) -> Self {
        self.mission = mission;
        self
    }

    pub fn manager_wait(&self) -> Duration {
        Duration::from_millis(self.manager_wait_ms)
    }

    pub fn system_wait(&self) -> Duration {
        Duration::from_millis(self.system_wait_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
