//! Search view configuration.
//!
//! # Example Configuration
//!
//! ```toml
//! [search]
//! recursion_depth = 1
//! commit_interval_msec = 1000
//! consolidation_interval_msec = 1000
//! ```

use serde::{Deserialize, Serialize};

/// Tuning applied to every computed search view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfiguration {
    /// How often the same field may appear on one path of nested links.
    /// Default: 1
    #[serde(default = "default_recursion_depth")]
    pub recursion_depth: usize,

    /// Default: 1000
    #[serde(default = "default_commit_interval_msec")]
    pub commit_interval_msec: u64,

    /// Default: 1000
    #[serde(default = "default_consolidation_interval_msec")]
    pub consolidation_interval_msec: u64,
}

fn default_recursion_depth() -> usize {
    1
}

fn default_commit_interval_msec() -> u64 {
    1000
}

fn default_consolidation_interval_msec() -> u64 {
    1000
}

impl Default for SearchConfiguration {
    fn default() -> Self {
        Self {
            recursion_depth: default_recursion_depth(),
            commit_interval_msec: default_commit_interval_msec(),
            consolidation_interval_msec: default_consolidation_interval_msec(),
        }
    }
}

impl SearchConfiguration {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.recursion_depth == 0 {
            return Err("search.recursion_depth must be > 0".into());
        }
        if self.commit_interval_msec == 0 {
            return Err("search.commit_interval_msec must be > 0".into());
        }
        Ok(())
    }
}
