use super::event::Event;
use super::event_queue::EventQueue;
use super::execution::config::SimulationConfig;
use super::resource::{Resource, ResourceAmount};
use super::types::{Priority, ResourceStatus, StatusCell, SystemStatus};
use log::debug;
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Autonomous unit that consumes one resource, processes, and produces another.
///
/// Output is buffered in `amount_stored` between the consume and deposit
/// phases, so a full downstream resource never blocks the system: the
/// remainder is kept and retried on the next iteration.
#[derive(Debug)]
pub struct System {
    name: String,
    consumed: ResourceAmount,
    produced: ResourceAmount,
    processing_time_ms: u64,
    amount_stored: AtomicU32,
    status: StatusCell,
    event_queue: Arc<EventQueue>,
    system_wait: Duration,
    low_threshold: Option<f64>,
}

impl System {
    pub fn new(
        name: impl Into<String>,
        consumed: ResourceAmount,
        produced: ResourceAmount,
        processing_time_ms: u64,
        event_queue: Arc<EventQueue>,
    ) -> Self {
        let defaults = SimulationConfig::default();
        Self {
            name: name.into(),
            consumed,
            produced,
            processing_time_ms,
            amount_stored: AtomicU32::new(0),
            status: StatusCell::new(SystemStatus::Standard),
            event_queue,
            system_wait: defaults.system_wait(),
            low_threshold: defaults.low_threshold,
        }
    }

    /// Apply the backoff and LOW-threshold settings of `config`
    pub fn with_config(mut self, config: &SimulationConfig) -> Self {
        self.system_wait = config.system_wait();
        self.low_threshold = config.low_threshold;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn consumed(&self) -> &ResourceAmount {
        &self.consumed
    }

    pub fn produced(&self) -> &ResourceAmount {
        &self.produced
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }

    pub fn amount_stored(&self) -> u32 {
        self.amount_stored.load(Ordering::Acquire)
    }

    pub fn status(&self) -> SystemStatus {
        self.status.load()
    }

    /// Set the operating mode; returns false if the system is already terminated
    pub fn set_status(&self, status: SystemStatus) -> bool {
        self.status.store(status).is_some()
    }

    /// Whether this system deposits into the named resource
    pub fn produces(&self, resource: &str) -> bool {
        self.produced.resource_name() == Some(resource)
    }

    pub fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot {
            name: self.name.clone(),
            status: self.status(),
            amount_stored: self.amount_stored(),
        }
    }

    /// Run iterations until the status becomes `Terminate`
    pub fn run(&self) {
        debug!("[System {}] Started", self.name);
        while self.status() != SystemStatus::Terminate {
            self.run_once();
        }
        debug!(
            "[System {}] Terminated with {} units stored",
            self.name,
            self.amount_stored()
        );
    }

    /// One iteration: acquire input if nothing is buffered, then deposit the buffer
    pub fn run_once(&self) {
        if self.status() == SystemStatus::Disabled {
            thread::sleep(self.system_wait);
            return;
        }

        if self.amount_stored() == 0 {
            let status = self.convert();
            if status != ResourceStatus::Ok {
                if let Some(resource) = self.consumed.resource.as_deref() {
                    self.report(resource, status, Priority::High, resource.amount());
                }
                thread::sleep(self.system_wait);
            }
        }

        if self.amount_stored() > 0 {
            let status = self.store();
            if status != ResourceStatus::Ok {
                thread::sleep(self.system_wait);
            }
        }
    }

    fn convert(&self) -> ResourceStatus {
        if let Some(resource) = self.consumed.resource.as_deref() {
            let status = resource.try_consume(self.consumed.amount);
            if status != ResourceStatus::Ok {
                return status;
            }
            self.report_low(resource);
        }

        self.simulate_processing_time();

        if self.produced.resource.is_some() {
            self.amount_stored
                .fetch_add(self.produced.amount, Ordering::AcqRel);
        }
        ResourceStatus::Ok
    }

    fn simulate_processing_time(&self) {
        let ms = self.status().scale_processing_time(self.processing_time_ms);
        thread::sleep(Duration::from_millis(ms));
    }

    fn store(&self) -> ResourceStatus {
        let stored = self.amount_stored();
        let resource = match self.produced.resource.as_deref() {
            Some(resource) if stored > 0 => resource,
            _ => return ResourceStatus::Ok,
        };

        let deposit = resource.try_produce(stored);
        self.amount_stored.store(deposit.leftover, Ordering::Release);

        match deposit.status {
            ResourceStatus::Ok => {
                if deposit.amount_after == resource.max_capacity() {
                    self.report(resource, ResourceStatus::Produced, Priority::Low, deposit.amount_after);
                }
            }
            status => self.report(resource, status, Priority::Low, deposit.amount_after),
        }
        deposit.status
    }

    fn report_low(&self, resource: &Resource) {
        let Some(threshold) = self.low_threshold else {
            return;
        };
        let remaining = resource.amount();
        if f64::from(remaining) < threshold * f64::from(resource.max_capacity()) {
            self.report(resource, ResourceStatus::Low, Priority::Med, remaining);
        }
    }

    fn report(&self, resource: &Resource, status: ResourceStatus, priority: Priority, amount: u32) {
        debug!(
            "[System {}] {} on {} ({} / {})",
            self.name,
            status,
            resource.name(),
            amount,
            resource.max_capacity()
        );
        self.event_queue
            .push(Event::new(&self.name, resource.name(), status, priority, amount));
    }
}

/// Read-only view of a system
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemSnapshot {
    pub name: String,
    pub status: SystemStatus,
    pub amount_stored: u32,
}
