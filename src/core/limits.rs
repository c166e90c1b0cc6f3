/*!
 * System Limits and Constants
 *
 * Centralized location for the allocator's defaults and thresholds.
 */

// =============================================================================
// ADDRESS SPACE
// =============================================================================

/// Default simulated address space (1024 units)
/// Used when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 1024;

// =============================================================================
// MEMORY PRESSURE
// =============================================================================

/// Usage ratio at which pressure is reported as HIGH
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.80;

/// Usage ratio at which pressure is reported as CRITICAL
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.95;

/// Usage ratio at which pressure is reported as MEDIUM
pub const MEDIUM_PRESSURE_THRESHOLD: f64 = 0.60;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Capacity override for [`crate::memory::AllocatorConfig::from_env`]
pub const ENV_CAPACITY: &str = "MEMSPACE_CAPACITY";

/// Compaction policy override (`eager` or `on-demand`)
pub const ENV_COMPACTION: &str = "MEMSPACE_COMPACTION";

/// Enables JSON trace output in the binary
pub const ENV_TRACE_JSON: &str = "MEMSPACE_TRACE_JSON";
