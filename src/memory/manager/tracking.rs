/*!
 * Memory Space Tracking
 * Statistics and operation counters
 */

use super::super::types::{AllocatorCounters, MemoryPressure, MemoryStats};
use super::MemorySpace;
use crate::core::types::Size;

impl MemorySpace {
    /// Lifetime operation counters
    pub fn counters(&self) -> AllocatorCounters {
        self.counters
    }

    /// Get memory info as (total, used, available)
    pub fn info(&self) -> (Size, Size, Size) {
        (self.capacity(), self.allocated_total(), self.free_total())
    }

    /// Snapshot of usage, fragmentation and pressure
    pub fn stats(&self) -> MemoryStats {
        let total = self.capacity();
        let used = self.allocated_total();
        let available = self.free_total();
        let largest = self.largest_free();

        let usage = used as f64 / total as f64;
        let fragmentation = if available == 0 {
            0.0
        } else {
            1.0 - largest as f64 / available as f64
        };

        MemoryStats {
            total_memory: total,
            used_memory: used,
            available_memory: available,
            usage_percentage: usage * 100.0,
            allocated_blocks: self.allocated.len(),
            free_blocks: self.free.len(),
            largest_free_block: largest,
            fragmentation,
            pressure: MemoryPressure::from_usage(
                usage,
                self.config.warning_threshold,
                self.config.critical_threshold,
            ),
            counters: self.counters,
        }
    }
}
