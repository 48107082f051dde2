//! Configuration for hybrid analysis

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the hybrid orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridConfig {
    /// Clauses with this many words or fewer are skipped
    pub trivial_word_count: usize,

    /// Clauses per classifier call
    pub batch_size: usize,

    /// Upper bound on concurrently running classifier calls
    pub max_in_flight_batches: usize,

    /// Time allowed for a single classifier call (seconds)
    pub batch_timeout_secs: u64,
}

impl HybridConfig {
    /// Get the batch timeout as a Duration
    pub fn batch_timeout(&self) -> Duration {
        Duration::from_secs(self.batch_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.max_in_flight_batches == 0 {
            return Err("max_in_flight_batches must be greater than 0".to_string());
        }
        if self.batch_timeout_secs == 0 {
            return Err("batch_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            trivial_word_count: 15,
            batch_size: 15,
            max_in_flight_batches: 4,
            batch_timeout_secs: 60,
        }
    }
}
