pub mod core;

// Re-export commonly used types
pub use crate::core::builder::{Scenario, SimulationBuilder};
pub use crate::core::errors::SimError;
pub use crate::core::event::{Event, EventId};
pub use crate::core::event_queue::EventQueue;
pub use crate::core::execution::{MissionRules, RunSummary, SimulationConfig, SimulationEngine};
pub use crate::core::manager::{Decision, Manager, MissionOutcome};
pub use crate::core::observer::{ConsoleRenderer, LogObserver, SimulationSnapshot, StateObserver};
pub use crate::core::resource::{Deposit, Resource, ResourceAmount};
pub use crate::core::system::System;
pub use crate::core::types::{Priority, ResourceStatus, SystemStatus};
