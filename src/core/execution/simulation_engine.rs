use crate::core::errors::SimError;
use crate::core::manager::{Manager, MissionOutcome};
use crate::core::observer::SimulationSnapshot;
use crate::core::system::System;
use crate::core::types::SystemStatus;
use log::{info, warn};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// What a finished run looked like
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub outcome: Option<MissionOutcome>,
    pub manager_iterations: u64,
    pub final_snapshot: SimulationSnapshot,
}

/// Runs a manager and its systems on one OS thread each until shutdown
pub struct SimulationEngine {
    manager: Manager,
}

impl SimulationEngine {
    pub fn new(manager: Manager) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    /// Start every thread and block until all of them have exited
    pub fn run(self) -> Result<RunSummary, SimError> {
        let systems: Vec<Arc<System>> = self.manager.systems().to_vec();
        info!("Starting simulation with {} systems", systems.len());

        let mut system_handles = Vec::with_capacity(systems.len());
        for system in &systems {
            match spawn_system(Arc::clone(system)) {
                Ok(handle) => system_handles.push((system.name().to_string(), handle)),
                Err(err) => {
                    stop_all(&systems);
                    join_systems(system_handles)?;
                    return Err(err);
                }
            }
        }

        let mut manager = self.manager;
        let manager_handle = thread::Builder::new()
            .name("manager".to_string())
            .spawn(move || {
                manager.run();
                manager
            });

        let manager_handle = match manager_handle {
            Ok(handle) => handle,
            Err(source) => {
                stop_all(&systems);
                join_systems(system_handles)?;
                return Err(SimError::ThreadSpawn {
                    name: "manager".to_string(),
                    source,
                });
            }
        };

        let manager = match manager_handle.join() {
            Ok(manager) => manager,
            Err(_) => {
                warn!("Manager thread panicked; stopping systems");
                stop_all(&systems);
                join_systems(system_handles)?;
                return Err(SimError::ThreadPanicked("manager".to_string()));
            }
        };

        join_systems(system_handles)?;

        let summary = RunSummary {
            outcome: manager.outcome(),
            manager_iterations: manager.iteration(),
            final_snapshot: manager.snapshot(),
        };
        info!(
            "Simulation finished after {} manager iterations ({:?})",
            summary.manager_iterations, summary.outcome
        );
        Ok(summary)
    }
}

fn spawn_system(system: Arc<System>) -> Result<JoinHandle<()>, SimError> {
    let name = system.name().to_string();
    thread::Builder::new()
        .name(format!("system-{}", name))
        .spawn(move || system.run())
        .map_err(|source| SimError::ThreadSpawn { name, source })
}

fn stop_all(systems: &[Arc<System>]) {
    for system in systems {
        system.set_status(SystemStatus::Terminate);
    }
}

fn join_systems(handles: Vec<(String, JoinHandle<()>)>) -> Result<(), SimError> {
    let mut first_panic = None;
    for (name, handle) in handles {
        if handle.join().is_err() {
            warn!("System thread '{}' panicked", name);
            first_panic.get_or_insert(name);
        }
    }
    match first_panic {
        Some(name) => Err(SimError::ThreadPanicked(name)),
        None => Ok(()),
    }
}
