/*!
 * Memory Types
 * Common types for address space management
 */

use crate::core::types::{Address, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant is a pure rejection: the allocator state is left untouched.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum MemoryError {
    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(memory::invalid_argument),
        help("Lengths and capacities must be greater than zero.")
    )]
    InvalidArgument(String),

    #[error("No allocated extent at address 0x{0:x}")]
    #[diagnostic(
        code(memory::not_found),
        help("The address may have been released already or was never returned by allocate.")
    )]
    NotFound(Address),

    #[error("Memory corruption detected: {0}")]
    #[diagnostic(code(memory::corruption_detected))]
    CorruptionDetected(String),
}

/// A contiguous run of address units `[base, base + length)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub base: Address,
    pub length: Size,
}

impl Extent {
    pub const fn new(base: Address, length: Size) -> Self {
        Self { base, length }
    }

    /// One past the last address unit of the extent
    #[inline]
    pub const fn end(&self) -> Address {
        self.base + self.length
    }

    /// True when `other` starts exactly where this extent ends
    #[inline]
    pub const fn precedes(&self, other: &Extent) -> bool {
        self.end() == other.base
    }

    #[inline]
    pub const fn overlaps(&self, other: &Extent) -> bool {
        self.base < other.end() && other.base < self.end()
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.base, self.length)
    }
}

/// Outcome of an allocation request
///
/// Running out of space is an expected result, not an error, so it is
/// reported as a value callers branch on.
#[must_use = "an allocation may be exhausted and must be checked"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Allocation {
    /// The request was carved out at this base address
    Granted(Address),
    /// No free extent fits, even after a compaction retry
    Exhausted {
        requested: Size,
        free_total: Size,
        largest_free: Size,
    },
}

impl Allocation {
    /// Base address of a granted allocation
    pub fn address(&self) -> Option<Address> {
        match self {
            Allocation::Granted(address) => Some(*address),
            Allocation::Exhausted { .. } => None,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Allocation::Granted(_))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Allocation::Exhausted { .. })
    }
}

/// Memory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: Size,
    /// `1 - largest_free_block / available_memory`, 0 when nothing is free
    pub fragmentation: f64,
    /// Pressure level under the allocator's configured thresholds
    pub pressure: MemoryPressure,
    pub counters: AllocatorCounters,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        self.pressure
    }
}

/// Lifetime operation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatorCounters {
    pub allocations: u64,
    pub exhausted: u64,
    pub releases: u64,
    pub compactions: u64,
    pub merges: u64,
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    /// Bucket a usage ratio (0.0..=1.0) into a pressure level
    pub fn from_usage(ratio: f64, warning: f64, critical: f64) -> Self {
        if ratio >= critical {
            MemoryPressure::Critical
        } else if ratio >= warning {
            MemoryPressure::High
        } else if ratio >= crate::core::limits::MEDIUM_PRESSURE_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Read-only copy of both extent lists, in their current order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub capacity: Size,
    pub free: Vec<Extent>,
    pub allocated: Vec<Extent>,
}
