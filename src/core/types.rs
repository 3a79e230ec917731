use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Operating mode of a system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemStatus {
    Terminate,
    Disabled,
    Slow,
    Standard,
    Fast,
}

impl SystemStatus {
    fn to_u8(self) -> u8 {
        match self {
            SystemStatus::Terminate => 0,
            SystemStatus::Disabled => 1,
            SystemStatus::Slow => 2,
            SystemStatus::Standard => 3,
            SystemStatus::Fast => 4,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => SystemStatus::Terminate,
            1 => SystemStatus::Disabled,
            2 => SystemStatus::Slow,
            4 => SystemStatus::Fast,
            _ => SystemStatus::Standard,
        }
    }

    /// Scale a nominal processing time for this mode
    ///
    /// Slow doubles, fast halves (truncating), everything else is nominal.
    pub fn scale_processing_time(self, nominal_ms: u64) -> u64 {
        match self {
            SystemStatus::Slow => nominal_ms.saturating_mul(2),
            SystemStatus::Fast => nominal_ms / 2,
            _ => nominal_ms,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SystemStatus::Terminate => "TERMINATE",
            SystemStatus::Disabled => "DISABLED",
            SystemStatus::Slow => "SLOW",
            SystemStatus::Standard => "STANDARD",
            SystemStatus::Fast => "FAST",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status cell shared between the manager (writer) and one system thread (reader).
///
/// Once `Terminate` is stored the cell never leaves it.
#[derive(Debug)]
pub struct StatusCell(AtomicU8);

impl StatusCell {
    pub fn new(status: SystemStatus) -> Self {
        Self(AtomicU8::new(status.to_u8()))
    }

    pub fn load(&self) -> SystemStatus {
        SystemStatus::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Store a new status, returning the previous one.
    ///
    /// Returns `None` when the cell is already terminated and was left untouched.
    pub fn store(&self, status: SystemStatus) -> Option<SystemStatus> {
        let terminate = SystemStatus::Terminate.to_u8();
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                if current == terminate {
                    None
                } else {
                    Some(status.to_u8())
                }
            })
            .ok()
            .map(SystemStatus::from_u8)
    }
}

/// Outcome of a resource operation, as carried by events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceStatus {
    Ok,
    Empty,
    Low,
    Insufficient,
    Capacity,
    Produced,
}

impl ResourceStatus {
    /// Shortage statuses ask the manager for more of a resource
    pub fn is_shortage(self) -> bool {
        matches!(
            self,
            ResourceStatus::Low | ResourceStatus::Empty | ResourceStatus::Insufficient
        )
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceStatus::Ok => "OK",
            ResourceStatus::Empty => "EMPTY",
            ResourceStatus::Low => "LOW",
            ResourceStatus::Insufficient => "INSUFFICIENT",
            ResourceStatus::Capacity => "CAPACITY",
            ResourceStatus::Produced => "PRODUCED",
        };
        f.write_str(s)
    }
}

/// Event priority; higher variants are delivered first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low = 1,
    Med = 2,
    High = 3,
}
