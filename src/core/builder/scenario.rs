//! Scenario data: which resources and systems exist and how they are wired.

use super::simulation_builder::SimulationBuilder;
use crate::core::errors::SimError;
use crate::core::execution::config::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub name: String,
    pub amount: u32,
    pub max_capacity: u32,
}

/// Amount of a named resource moved per cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSpec {
    pub resource: String,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSpec {
    pub name: String,
    #[serde(default)]
    pub consumes: Option<FlowSpec>,
    #[serde(default)]
    pub produces: Option<FlowSpec>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub resources: Vec<ResourceSpec>,
    pub systems: Vec<SystemSpec>,
    #[serde(default)]
    pub config: SimulationConfig,
}

fn resource(name: &str, amount: u32, max_capacity: u32) -> ResourceSpec {
    ResourceSpec {
        name: name.to_string(),
        amount,
        max_capacity,
    }
}

fn flow(resource: &str, amount: u32) -> Option<FlowSpec> {
    Some(FlowSpec {
        resource: resource.to_string(),
        amount,
    })
}

impl Scenario {
    /// The reference rocket: fuel, oxygen, energy and distance with four systems
    pub fn default_mission() -> Self {
        Self {
            resources: vec![
                resource("Fuel", 1000, 1000),
                resource("Oxygen", 20, 50),
                resource("Energy", 30, 50),
                resource("Distance", 0, 5000),
            ],
            systems: vec![
                SystemSpec {
                    name: "Propulsion".to_string(),
                    consumes: flow("Fuel", 5),
                    produces: flow("Distance", 25),
                    processing_time_ms: 50,
                },
                SystemSpec {
                    name: "Life Support".to_string(),
                    consumes: flow("Energy", 7),
                    produces: flow("Oxygen", 4),
                    processing_time_ms: 10,
                },
                SystemSpec {
                    name: "Crew".to_string(),
                    consumes: flow("Oxygen", 1),
                    produces: None,
                    processing_time_ms: 2,
                },
                SystemSpec {
                    name: "Generator".to_string(),
                    consumes: flow("Fuel", 5),
                    produces: flow("Energy", 10),
                    processing_time_ms: 20,
                },
            ],
            config: SimulationConfig::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and wire the scenario into a builder
    pub fn into_builder(self) -> Result<SimulationBuilder, SimError> {
        let mut builder = SimulationBuilder::new(self.config);

        for spec in &self.resources {
            builder.add_resource(&spec.name, spec.amount, spec.max_capacity)?;
        }

        for spec in &self.systems {
            let consumes = spec.consumes.as_ref().map(|f| (f.resource.as_str(), f.amount));
            let produces = spec.produces.as_ref().map(|f| (f.resource.as_str(), f.amount));
            builder.add_system(&spec.name, consumes, produces, spec.processing_time_ms)?;
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mission_builds() {
        let manager = Scenario::default_mission().into_builder().unwrap().build();
        let snapshot = manager.snapshot();

        assert_eq!(snapshot.resources.len(), 4);
        assert_eq!(snapshot.resource("Oxygen").map(|r| (r.amount, r.max_capacity)), Some((20, 50)));
        let crew = manager.system("Crew").unwrap();
        assert!(crew.produced().resource.is_none());
        assert_eq!(crew.processing_time_ms(), 2);
    }

    #[test]
    fn test_json_scenario_parses() {
        let json = r#"{
            "resources": [
                { "name": "Oxygen", "amount": 1, "max_capacity": 50 }
            ],
            "systems": [
                { "name": "Crew", "consumes": { "resource": "Oxygen", "amount": 1 }, "processing_time_ms": 2 }
            ],
            "config": { "system_wait_ms": 1 }
        }"#;

        let scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.systems[0].produces, None);
        assert_eq!(scenario.config.system_wait_ms, 1);
        assert_eq!(scenario.config.manager_wait_ms, 5);
    }

    #[test]
    fn test_malformed_json_is_a_scenario_error() {
        let err = Scenario::from_json_str("{ \"resources\": 3 }").unwrap_err();
        assert!(matches!(err, SimError::Scenario(_)));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = Scenario::from_path("/nonexistent/mission.json").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
