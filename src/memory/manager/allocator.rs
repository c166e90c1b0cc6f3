/*!
 * Memory Allocator Implementation
 * Allocation, release and compaction logic
 */

use super::super::config::CompactionPolicy;
use super::super::types::{Allocation, MemoryError, MemoryPressure, MemoryResult};
use super::MemorySpace;
use crate::core::types::{Address, Size};
use log::{debug, info, warn};

impl MemorySpace {
    /// Allocate `length` units using first-fit over the current free list order
    ///
    /// When nothing fits, the free list is compacted once and scanned again.
    /// Exhaustion after the retry is reported as [`Allocation::Exhausted`];
    /// the compaction it triggered is kept.
    pub fn allocate(&mut self, length: Size) -> MemoryResult<Allocation> {
        if length == 0 {
            return Err(MemoryError::InvalidArgument(
                "allocation length must be greater than zero".to_string(),
            ));
        }

        let index = match self.free.first_fit(length) {
            Some(index) => index,
            None => {
                debug!(
                    "No free extent fits {} units ({} extents, largest {}), compacting and retrying",
                    length,
                    self.free.len(),
                    self.free.largest()
                );
                self.compact();

                match self.free.first_fit(length) {
                    Some(index) => index,
                    None => {
                        self.counters.exhausted += 1;
                        let free_total = self.free.total();
                        let largest_free = self.free.largest();
                        warn!(
                            "Exhausted: requested {} units, largest free extent {} ({} free in {} extents)",
                            length,
                            largest_free,
                            free_total,
                            self.free.len()
                        );
                        return Ok(Allocation::Exhausted {
                            requested: length,
                            free_total,
                            largest_free,
                        });
                    }
                }
            }
        };

        let extent = self.free.take(index, length);
        self.allocated.push(extent);
        self.counters.allocations += 1;

        let used = self.allocated_total();
        if let Some(level) = self.check_memory_pressure(used) {
            warn!(
                "Memory pressure {}: allocated {} units at 0x{:x} ({:.1}% used: {} / {})",
                level,
                length,
                extent.base,
                used as f64 / self.capacity() as f64 * 100.0,
                used,
                self.capacity()
            );
        } else {
            debug!("Allocated {} units at 0x{:x}", length, extent.base);
        }

        Ok(Allocation::Granted(extent.base))
    }

    /// Release the allocated extent based at `address`
    ///
    /// The extent is inserted into the free list by base address. Under the
    /// eager policy the free list is compacted right away.
    pub fn release(&mut self, address: Address) -> MemoryResult<()> {
        let Some(position) = self.allocated.iter().position(|e| e.base == address) else {
            warn!(
                "Attempted to release invalid or already released address: 0x{:x}",
                address
            );
            return Err(MemoryError::NotFound(address));
        };

        let extent = self.allocated.remove(position);
        self.free.insert_sorted(extent);
        self.counters.releases += 1;

        debug!(
            "Released {} units at 0x{:x} ({} units now free)",
            extent.length,
            address,
            self.free.total()
        );

        if self.config.compaction == CompactionPolicy::Eager {
            self.compact();
        }

        Ok(())
    }

    /// Sort the free list by base and merge adjacent extents
    ///
    /// Idempotent; never touches allocated extents. Returns the number of merges.
    pub fn compact(&mut self) -> usize {
        let before = self.free.len();
        let merges = self.free.coalesce();

        self.counters.compactions += 1;
        self.counters.merges += merges as u64;

        if merges > 0 {
            info!(
                "Coalesced {} pairs of adjacent free extents, reduced from {} to {} extents",
                merges,
                before,
                self.free.len()
            );
        }

        merges
    }

    /// Check if an address is the base of a currently allocated extent
    pub fn is_allocated(&self, address: Address) -> bool {
        self.allocated.iter().any(|e| e.base == address)
    }

    /// Get the length of the allocated extent based at `address`
    pub fn block_size(&self, address: Address) -> Option<Size> {
        self.allocated
            .iter()
            .find(|e| e.base == address)
            .map(|e| e.length)
    }

    /// Pressure level worth reporting for `used` units, if any
    pub(super) fn check_memory_pressure(&self, used: Size) -> Option<MemoryPressure> {
        let ratio = used as f64 / self.capacity() as f64;
        match MemoryPressure::from_usage(
            ratio,
            self.config.warning_threshold,
            self.config.critical_threshold,
        ) {
            level @ (MemoryPressure::High | MemoryPressure::Critical) => Some(level),
            _ => None,
        }
    }
}
