use super::errors::SimError;
use super::event::Event;
use super::event_queue::EventQueue;
use super::execution::config::SimulationConfig;
use super::observer::{SimulationSnapshot, StateObserver};
use super::resource::Resource;
use super::system::System;
use super::types::{ResourceStatus, SystemStatus};
use log::{debug, info};
use serde::Serialize;
use std::sync::Arc;
use std::thread;

/// Why the simulation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissionOutcome {
    OxygenDepleted,
    DestinationReached,
    /// The configured iteration limit was hit
    Halted,
}

impl MissionOutcome {
    pub fn message(self) -> &'static str {
        match self {
            MissionOutcome::OxygenDepleted => "Oxygen depleted. Terminating all systems.",
            MissionOutcome::DestinationReached => "Destination reached. Terminating all systems.",
            MissionOutcome::Halted => "Iteration limit reached. Terminating all systems.",
        }
    }
}

/// What the decision table makes of one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Terminate(MissionOutcome),
    /// Producers of the event's resource go FAST
    Accelerate,
    /// Producers of the event's resource go SLOW
    Throttle,
    Ignore,
}

/// Central coordinator: owns systems, resources and the event queue, and turns
/// drained events into operating modes.
pub struct Manager {
    simulation_running: bool,
    systems: Vec<Arc<System>>,
    resources: Vec<Arc<Resource>>,
    event_queue: Arc<EventQueue>,
    config: SimulationConfig,
    observers: Vec<Box<dyn StateObserver>>,
    iteration: u64,
    outcome: Option<MissionOutcome>,
}

impl Manager {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            simulation_running: true,
            systems: Vec::new(),
            resources: Vec::new(),
            event_queue: Arc::new(EventQueue::new()),
            config,
            observers: Vec::new(),
            iteration: 0,
            outcome: None,
        }
    }

    pub fn add_resource(&mut self, resource: Arc<Resource>) -> Result<(), SimError> {
        if self.resource(resource.name()).is_some() {
            return Err(SimError::DuplicateResource(resource.name().to_string()));
        }
        self.resources.push(resource);
        Ok(())
    }

    pub fn add_system(&mut self, system: Arc<System>) -> Result<(), SimError> {
        if self.system(system.name()).is_some() {
            return Err(SimError::DuplicateSystem(system.name().to_string()));
        }
        self.systems.push(system);
        Ok(())
    }

    pub fn add_observer(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    /// Queue shared with every system
    pub fn event_queue(&self) -> &Arc<EventQueue> {
        &self.event_queue
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn systems(&self) -> &[Arc<System>] {
        &self.systems
    }

    pub fn resources(&self) -> &[Arc<Resource>] {
        &self.resources
    }

    pub fn resource(&self, name: &str) -> Option<&Arc<Resource>> {
        self.resources.iter().find(|r| r.name() == name)
    }

    pub fn system(&self, name: &str) -> Option<&Arc<System>> {
        self.systems.iter().find(|s| s.name() == name)
    }

    pub fn is_running(&self) -> bool {
        self.simulation_running
    }

    pub fn outcome(&self) -> Option<MissionOutcome> {
        self.outcome
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            iteration: self.iteration,
            resources: self.resources.iter().map(|r| r.snapshot()).collect(),
            systems: self.systems.iter().map(|s| s.snapshot()).collect(),
        }
    }

    /// Classify an event without acting on it
    pub fn decide(&self, event: &Event) -> Decision {
        let mission = &self.config.mission;

        if event.resource == mission.life_support && event.status == ResourceStatus::Empty {
            return Decision::Terminate(MissionOutcome::OxygenDepleted);
        }
        if event.resource == mission.destination && self.destination_reached(event) {
            return Decision::Terminate(MissionOutcome::DestinationReached);
        }

        match event.status {
            status if status.is_shortage() => Decision::Accelerate,
            ResourceStatus::Capacity => Decision::Throttle,
            _ => Decision::Ignore,
        }
    }

    fn destination_reached(&self, event: &Event) -> bool {
        match event.status {
            ResourceStatus::Capacity => true,
            // An OK deposit that lands exactly on capacity
            ResourceStatus::Produced => self
                .resource(&event.resource)
                .map_or(false, |r| event.amount >= r.max_capacity()),
            _ => false,
        }
    }

    /// Run one event through the decision table and apply the result
    pub fn apply_event(&mut self, event: &Event) -> Decision {
        let decision = self.decide(event);
        match decision {
            Decision::Terminate(outcome) => self.terminate(outcome),
            Decision::Accelerate => self.set_producer_status(&event.resource, SystemStatus::Fast),
            Decision::Throttle => self.set_producer_status(&event.resource, SystemStatus::Slow),
            Decision::Ignore => {}
        }
        decision
    }

    fn set_producer_status(&self, resource: &str, status: SystemStatus) {
        for system in self.systems.iter().filter(|s| s.produces(resource)) {
            let previous = system.status();
            if previous != status && system.set_status(status) {
                debug!(
                    "[Manager] {} {} -> {} ({})",
                    system.name(),
                    previous,
                    status,
                    resource
                );
            }
        }
    }

    /// Stop every system and clear the running flag. Repeated calls are no-ops.
    pub fn terminate(&mut self, outcome: MissionOutcome) {
        if self.simulation_running {
            self.simulation_running = false;
            self.outcome = Some(outcome);
            info!("[Manager] {}", outcome.message());
            for observer in &mut self.observers {
                observer.on_mission_end(outcome);
            }
        }
        for system in &self.systems {
            system.set_status(SystemStatus::Terminate);
        }
    }

    /// Pop events until the queue is empty, applying each in turn
    pub fn process_events(&mut self) -> usize {
        let mut processed = 0;
        while let Some(event) = self.event_queue.pop() {
            for observer in &mut self.observers {
                observer.on_event(&event);
            }
            let decision = self.apply_event(&event);
            debug!(
                "[Manager] {} {} on {} ({}) -> {:?}",
                event.source, event.status, event.resource, event.amount, decision
            );
            processed += 1;
        }
        processed
    }

    /// One manager iteration: render, then drain. Returns whether the run continues.
    pub fn step(&mut self) -> bool {
        self.iteration += 1;

        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.observe(&snapshot);
        }

        self.process_events();

        if let Some(limit) = self.config.max_manager_iterations {
            if self.simulation_running && self.iteration >= limit {
                self.terminate(MissionOutcome::Halted);
            }
        }
        self.simulation_running
    }

    /// Loop until a terminal event clears the running flag
    pub fn run(&mut self) {
        info!("[Manager] Started with {} systems", self.systems.len());
        while self.simulation_running {
            if self.step() {
                thread::sleep(self.config.manager_wait());
            }
        }
        info!("[Manager] Stopped after {} iterations", self.iteration);
    }
}
