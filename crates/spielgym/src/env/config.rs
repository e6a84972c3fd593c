//! Environment configuration.

use super::RecoveryPolicy;
use crate::{Result, SpielError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for [`SpielEnv`](super::SpielEnv)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpielEnvConfig {
    /// Seed for chance sampling and action substitution. Entropy when unset.
    pub seed: Option<u64>,
    /// Handling of illegal sequential actions
    pub recovery: RecoveryPolicy,
}

impl SpielEnvConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_recovery(mut self, recovery: RecoveryPolicy) -> Self {
        self.recovery = recovery;
        self
    }

    /// Reject penalties that would reward or corrupt an illegal submission.
    pub fn validate(&self) -> Result<()> {
        if let RecoveryPolicy::RandomLegal { penalty } = self.recovery {
            if !penalty.is_finite() || penalty > 0.0 {
                return Err(SpielError::Config(format!(
                    "illegal action penalty must be finite and non-positive, got {}",
                    penalty
                )));
            }
        }
        Ok(())
    }
}
