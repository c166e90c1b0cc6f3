/*!
 * Allocator Configuration
 * Capacity, compaction policy and pressure thresholds
 */

use super::types::{MemoryError, MemoryResult};
use crate::core::limits::{
    DEFAULT_CAPACITY, DEFAULT_CRITICAL_THRESHOLD, DEFAULT_WARNING_THRESHOLD, ENV_CAPACITY,
    ENV_COMPACTION,
};
use crate::core::types::Size;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When released extents are merged with their free neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompactionPolicy {
    /// Compact after every release
    #[default]
    Eager,
    /// Compact only when an allocation finds no fit, or on explicit request
    OnDemand,
}

impl FromStr for CompactionPolicy {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eager" => Ok(CompactionPolicy::Eager),
            "on-demand" | "on_demand" | "ondemand" => Ok(CompactionPolicy::OnDemand),
            other => Err(MemoryError::InvalidArgument(format!(
                "unknown compaction policy '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for CompactionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompactionPolicy::Eager => write!(f, "eager"),
            CompactionPolicy::OnDemand => write!(f, "on-demand"),
        }
    }
}

/// Allocator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Number of address units managed
    pub capacity: Size,
    pub compaction: CompactionPolicy,
    /// Usage ratio reported as HIGH pressure
    pub warning_threshold: f64,
    /// Usage ratio reported as CRITICAL pressure
    pub critical_threshold: f64,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            compaction: CompactionPolicy::default(),
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
        }
    }
}

impl AllocatorConfig {
    pub fn with_capacity(capacity: Size) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    pub fn with_compaction(mut self, compaction: CompactionPolicy) -> Self {
        self.compaction = compaction;
        self
    }

    pub fn with_thresholds(mut self, warning: f64, critical: f64) -> Self {
        self.warning_threshold = warning;
        self.critical_threshold = critical;
        self
    }

    /// Load configuration from the environment, falling back to defaults
    ///
    /// Environment variables:
    /// - MEMSPACE_CAPACITY: number of address units (default: 1024)
    /// - MEMSPACE_COMPACTION: `eager` or `on-demand` (default: eager)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AllocatorConfig::from_env`] with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_CAPACITY) {
            match raw.trim().parse::<Size>() {
                Ok(capacity) if capacity > 0 => config.capacity = capacity,
                _ => warn!(
                    "Ignoring invalid {}='{}', using default capacity {}",
                    ENV_CAPACITY, raw, config.capacity
                ),
            }
        }

        if let Some(raw) = lookup(ENV_COMPACTION) {
            match raw.parse::<CompactionPolicy>() {
                Ok(policy) => config.compaction = policy,
                Err(e) => warn!("Ignoring {}: {}", ENV_COMPACTION, e),
            }
        }

        config
    }

    /// Reject configurations the allocator cannot be built from
    pub fn validate(&self) -> MemoryResult<()> {
        if self.capacity == 0 {
            return Err(MemoryError::InvalidArgument(
                "capacity must be greater than zero".to_string(),
            ));
        }

        let in_range = |t: f64| t > 0.0 && t <= 1.0;
        if !in_range(self.warning_threshold) || !in_range(self.critical_threshold) {
            return Err(MemoryError::InvalidArgument(format!(
                "pressure thresholds must be in (0, 1], got warning={} critical={}",
                self.warning_threshold, self.critical_threshold
            )));
        }

        if self.warning_threshold > self.critical_threshold {
            return Err(MemoryError::InvalidArgument(format!(
                "warning threshold {} exceeds critical threshold {}",
                self.warning_threshold, self.critical_threshold
            )));
        }

        Ok(())
    }
}
