use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Redraw the road as text after every tick
    Console,
    /// Headless, periodic status lines through the logger
    Log,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    pub delay_ms: u64,
    pub max_ticks: Option<u64>,
    pub display: DisplayMode,
    /// Log presenter reports every this many ticks.
    pub status_interval: u64,
    pub timing_samples: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            delay_ms: 200,
            max_ticks: None,
            display: DisplayMode::Console,
            status_interval: 10,
            timing_samples: 60,
        }
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        if self.status_interval == 0 {
            return Err(anyhow!("Status interval must be greater than zero"));
        }

        if self.timing_samples == 0 {
            return Err(anyhow!("Timing samples must be greater than zero"));
        }

        Ok(())
    }
}
