use crate::error::ConfigError;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize), serde(default))]
pub struct WorldConfig {
    /// Fixed simulation rate driven by `World::advance`.
    pub ticks_per_second: u32,
    /// Most ticks a single `advance` call may run before deferring the backlog.
    pub max_frameskip: u32,
    /// Log every solver contact at trace level.
    pub trace_contacts: bool,
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            ticks_per_second: 60,
            max_frameskip: 5,
            trace_contacts: false,
        }
    }
}
