pub mod scenario;
pub mod simulation_builder;

pub use scenario::{FlowSpec, ResourceSpec, Scenario, SystemSpec};
pub use simulation_builder::SimulationBuilder;
