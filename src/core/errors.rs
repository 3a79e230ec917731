use std::fmt;

/// Setup and lifecycle failures. Resource shortages and overflows are not
/// errors; they travel as events.
#[derive(Debug)]
pub enum SimError {
    DuplicateResource(String),
    DuplicateSystem(String),
    UnknownResource { system: String, resource: String },
    ZeroCapacity(String),
    AmountExceedsCapacity {
        resource: String,
        amount: u32,
        max_capacity: u32,
    },
    Scenario(String),
    Io(std::io::Error),
    ThreadSpawn { name: String, source: std::io::Error },
    ThreadPanicked(String),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::DuplicateResource(name) => {
                write!(f, "Resource '{}' is already registered", name)
            }
            SimError::DuplicateSystem(name) => write!(f, "System '{}' is already registered", name),
            SimError::UnknownResource { system, resource } => write!(
                f,
                "System '{}' references unknown resource '{}'",
                system, resource
            ),
            SimError::ZeroCapacity(name) => {
                write!(f, "Resource '{}' must have a non-zero capacity", name)
            }
            SimError::AmountExceedsCapacity {
                resource,
                amount,
                max_capacity,
            } => write!(
                f,
                "Resource '{}' starts at {} but its capacity is {}",
                resource, amount, max_capacity
            ),
            SimError::Scenario(message) => write!(f, "Invalid scenario: {}", message),
            SimError::Io(err) => write!(f, "I/O error: {}", err),
            SimError::ThreadSpawn { name, source } => {
                write!(f, "Failed to spawn thread '{}': {}", name, source)
            }
            SimError::ThreadPanicked(name) => write!(f, "Thread '{}' panicked", name),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(err) => Some(err),
            SimError::ThreadSpawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::Io(err)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Scenario(err.to_string())
    }
}
