use super::errors::SimError;
use super::types::ResourceStatus;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Result of depositing into a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deposit {
    pub status: ResourceStatus,
    /// Amount that did not fit and stays with the caller
    pub leftover: u32,
    /// Resource amount after the deposit
    pub amount_after: u32,
}

#[derive(Debug)]
struct Level {
    amount: u32,
}

/// A named, capacity-bounded counter with its own lock
#[derive(Debug)]
pub struct Resource {
    name: String,
    max_capacity: u32,
    level: Mutex<Level>,
}

impl Resource {
    pub fn new(name: impl Into<String>, amount: u32, max_capacity: u32) -> Self {
        Self {
            name: name.into(),
            max_capacity,
            level: Mutex::new(Level {
                amount: amount.min(max_capacity),
            }),
        }
    }

    /// Create a resource, rejecting capacities that cannot hold the initial amount
    pub fn try_new(name: impl Into<String>, amount: u32, max_capacity: u32) -> Result<Self, SimError> {
        let name = name.into();
        if max_capacity == 0 {
            return Err(SimError::ZeroCapacity(name));
        }
        if amount > max_capacity {
            return Err(SimError::AmountExceedsCapacity {
                resource: name,
                amount,
                max_capacity,
            });
        }
        Ok(Self::new(name, amount, max_capacity))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Current amount (briefly takes the lock)
    pub fn amount(&self) -> u32 {
        self.level().amount
    }

    // The guarded state is a single integer that is always valid, so a
    // poisoned lock is recovered rather than propagated.
    fn level(&self) -> MutexGuard<'_, Level> {
        self.level.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Take `requested` units if they are all available
    pub fn try_consume(&self, requested: u32) -> ResourceStatus {
        let mut level = self.level();
        if level.amount >= requested {
            level.amount -= requested;
            ResourceStatus::Ok
        } else if level.amount == 0 {
            ResourceStatus::Empty
        } else {
            ResourceStatus::Insufficient
        }
    }

    /// Add up to `requested` units, keeping whatever does not fit
    pub fn try_produce(&self, requested: u32) -> Deposit {
        let mut level = self.level();
        let available = self.max_capacity - level.amount;

        if available >= requested {
            level.amount += requested;
            Deposit {
                status: ResourceStatus::Ok,
                leftover: 0,
                amount_after: level.amount,
            }
        } else {
            level.amount += available;
            Deposit {
                status: ResourceStatus::Capacity,
                leftover: requested - available,
                amount_after: level.amount,
            }
        }
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            name: self.name.clone(),
            amount: self.amount(),
            max_capacity: self.max_capacity,
        }
    }
}

/// Per-cycle consumption or production of one resource
#[derive(Debug, Clone, Default)]
pub struct ResourceAmount {
    pub resource: Option<Arc<Resource>>,
    pub amount: u32,
}

impl ResourceAmount {
    pub fn new(resource: Arc<Resource>, amount: u32) -> Self {
        Self {
            resource: Some(resource),
            amount,
        }
    }

    /// No resource dependency
    pub fn none() -> Self {
        Self::default()
    }

    pub fn resource_name(&self) -> Option<&str> {
        self.resource.as_deref().map(Resource::name)
    }
}

/// Read-only view of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSnapshot {
    pub name: String,
    pub amount: u32,
    pub max_capacity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_consume_all_available() {
        let fuel = Resource::new("Fuel", 10, 100);
        assert_eq!(fuel.try_consume(10), ResourceStatus::Ok);
        assert_eq!(fuel.amount(), 0);
    }

    #[test]
    fn test_consume_from_empty_reports_empty() {
        let fuel = Resource::new("Fuel", 0, 100);
        assert_eq!(fuel.try_consume(5), ResourceStatus::Empty);
        assert_eq!(fuel.amount(), 0);
    }

    #[test]
    fn test_consume_short_reports_insufficient() {
        let energy = Resource::new("Energy", 6, 50);
        assert_eq!(energy.try_consume(7), ResourceStatus::Insufficient);
        assert_eq!(energy.amount(), 6, "Failed consume must not change the amount");
    }

    #[test]
    fn test_produce_exact_fit_is_ok() {
        let distance = Resource::new("Distance", 4975, 5000);
        let deposit = distance.try_produce(25);
        assert_eq!(deposit.status, ResourceStatus::Ok);
        assert_eq!(deposit.leftover, 0);
        assert_eq!(deposit.amount_after, 5000);
    }

    #[test]
    fn test_produce_partial_keeps_leftover() {
        let distance = Resource::new("Distance", 4980, 5000);
        let deposit = distance.try_produce(25);
        assert_eq!(deposit.status, ResourceStatus::Capacity);
        assert_eq!(deposit.leftover, 5);
        assert_eq!(distance.amount(), 5000);
    }

    #[test]
    fn test_produce_into_full_returns_everything() {
        let oxygen = Resource::new("Oxygen", 50, 50);
        let deposit = oxygen.try_produce(4);
        assert_eq!(deposit.status, ResourceStatus::Capacity);
        assert_eq!(deposit.leftover, 4);
        assert_eq!(oxygen.amount(), 50);
    }

    #[test]
    fn test_try_new_validates_bounds() {
        assert!(matches!(
            Resource::try_new("Fuel", 11, 10),
            Err(SimError::AmountExceedsCapacity { .. })
        ));
        assert!(matches!(Resource::try_new("Fuel", 0, 0), Err(SimError::ZeroCapacity(_))));
        assert!(Resource::try_new("Fuel", 10, 10).is_ok());
    }

    #[test]
    fn test_concurrent_access_stays_in_bounds() {
        let energy = Arc::new(Resource::new("Energy", 25, 50));
        let mut handles = Vec::new();

        for i in 0..8 {
            let energy = Arc::clone(&energy);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    if i % 2 == 0 {
                        energy.try_consume(3);
                    } else {
                        energy.try_produce(4);
                    }
                    let amount = energy.amount();
                    assert!(amount <= energy.max_capacity());
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(energy.amount() <= 50);
    }

    #[test]
    fn test_concurrent_consumers_never_oversubscribe() {
        let fuel = Arc::new(Resource::new("Fuel", 1000, 1000));
        let mut handles = Vec::new();

        for _ in 0..4 {
            let fuel = Arc::clone(&fuel);
            handles.push(thread::spawn(move || {
                let mut taken = 0;
                while fuel.try_consume(5) == ResourceStatus::Ok {
                    taken += 5;
                }
                taken
            }));
        }

        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 1000);
        assert_eq!(fuel.amount(), 0);
    }
}
