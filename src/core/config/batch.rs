use std::time::Duration;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::core::data_loader::{DEFAULT_DELAY, DEFAULT_MAX_BATCH_SIZE};

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Setters)]
#[serde(rename_all = "camelCase", default)]
/// Batching settings of one data loader.
pub struct Batch {
    /// Milliseconds a batch collects keys before it is loaded.
    pub delay: u64,

    /// Maximum number of keys per batch, `0` for no limit.
    pub max_size: usize,
}

impl Default for Batch {
    fn default() -> Self {
        Batch {
            delay: DEFAULT_DELAY.as_millis() as u64,
            max_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

impl Batch {
    /// How long a batch waits for more keys.
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.delay)
    }
}
