use crate::core::errors::SimError;
use crate::core::execution::config::SimulationConfig;
use crate::core::manager::Manager;
use crate::core::observer::StateObserver;
use crate::core::resource::{Resource, ResourceAmount};
use crate::core::system::System;
use std::sync::Arc;

/// Imperative API for wiring resources and systems into a manager
///
/// Resources are registered first and referenced by name from systems; every
/// system is created against the manager's shared event queue.
pub struct SimulationBuilder {
    manager: Manager,
}

impl SimulationBuilder {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            manager: Manager::new(config),
        }
    }

    /// Register a resource, validating its bounds
    pub fn add_resource(
        &mut self,
        name: &str,
        amount: u32,
        max_capacity: u32,
    ) -> Result<Arc<Resource>, SimError> {
        let resource = Arc::new(Resource::try_new(name, amount, max_capacity)?);
        self.manager.add_resource(Arc::clone(&resource))?;
        Ok(resource)
    }

    /// Register a system; `consumes`/`produces` name previously added resources
    pub fn add_system(
        &mut self,
        name: &str,
        consumes: Option<(&str, u32)>,
        produces: Option<(&str, u32)>,
        processing_time_ms: u64,
    ) -> Result<Arc<System>, SimError> {
        let consumed = self.resource_amount(name, consumes)?;
        let produced = self.resource_amount(name, produces)?;

        let system = System::new(
            name,
            consumed,
            produced,
            processing_time_ms,
            Arc::clone(self.manager.event_queue()),
        )
        .with_config(self.manager.config());

        let system = Arc::new(system);
        self.manager.add_system(Arc::clone(&system))?;
        Ok(system)
    }

    pub fn add_observer(&mut self, observer: Box<dyn StateObserver>) -> &mut Self {
        self.manager.add_observer(observer);
        self
    }

    fn resource_amount(
        &self,
        system: &str,
        flow: Option<(&str, u32)>,
    ) -> Result<ResourceAmount, SimError> {
        match flow {
            None => Ok(ResourceAmount::none()),
            Some((resource, amount)) => {
                let resource = self.manager.resource(resource).ok_or_else(|| {
                    SimError::UnknownResource {
                        system: system.to_string(),
                        resource: resource.to_string(),
                    }
                })?;
                Ok(ResourceAmount::new(Arc::clone(resource), amount))
            }
        }
    }

    pub fn build(self) -> Manager {
        self.manager
    }
}
