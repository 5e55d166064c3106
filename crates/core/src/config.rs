use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of sealed frames retained when no config says otherwise.
pub const DEFAULT_HISTORY_CAPACITY: usize = 128;

/// Session settings. Fixed once a [`Profiler`](crate::Profiler) is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// How many sealed frames the history ring keeps before evicting the oldest.
    pub history_capacity: usize,
    /// Prefix of the synthesized frame root name, followed by the frame number.
    pub frame_label_prefix: String,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            frame_label_prefix: "Frame".to_string(),
        }
    }
}

impl ProfilerConfig {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    pub fn frame_label(&self, frame_number: u64) -> String {
        format!("{} {}", self.frame_label_prefix, frame_number)
    }
}
