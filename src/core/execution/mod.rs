pub mod config;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::{MissionRules, SimulationConfig};
pub use simulation_engine::{RunSummary, SimulationEngine};
