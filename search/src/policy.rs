//! Exploration policy: optional budgets and progress cadence.

use crate::error::ExploreError;

/// Default number of pops between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 10_000;

/// Operability knobs for one exploration.
///
/// Budgets stop the loop; they never change which successors are admitted.
/// With both budgets unset the search runs until the frontier is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorePolicyV1 {
    /// Stop before the pop that would exceed this many pops.
    pub max_pops: Option<u64>,
    /// Stop after an expansion leaves more than this many known states.
    pub max_known_states: Option<u64>,
    /// Pops between `on_progress` notifications. Must be non-zero.
    pub progress_interval: u64,
}

impl ExplorePolicyV1 {
    /// Pre-flight validation.
    ///
    /// # Errors
    ///
    /// Returns [`ExploreError::InvalidPolicy`] if `progress_interval` is zero.
    pub fn validate(&self) -> Result<(), ExploreError> {
        if self.progress_interval == 0 {
            return Err(ExploreError::InvalidPolicy {
                detail: "progress_interval must be non-zero".into(),
            });
        }
        Ok(())
    }

    /// Policy echo embedded in reports and bundles.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "max_known_states": self.max_known_states,
            "max_pops": self.max_pops,
            "progress_interval": self.progress_interval,
        })
    }
}

impl Default for ExplorePolicyV1 {
    fn default() -> Self {
        Self {
            max_pops: None,
            max_known_states: None,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}
