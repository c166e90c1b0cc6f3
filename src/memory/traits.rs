/*!
 * Memory Traits
 * Address space management abstractions
 */

use super::types::*;
use crate::core::types::{Address, Size};

/// Memory allocator interface
pub trait Allocator {
    /// Carve `length` units out of the free space
    fn allocate(&mut self, length: Size) -> MemoryResult<Allocation>;

    /// Return the extent based at `address` to the free space
    fn release(&mut self, address: Address) -> MemoryResult<()>;

    /// Merge adjacent free extents, returning the number of merges
    fn compact(&mut self) -> usize;

    /// Check if an address is the base of an allocated extent
    fn is_allocated(&self, address: Address) -> bool;

    /// Get the length of the allocated extent based at `address`
    fn block_size(&self, address: Address) -> Option<Size>;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
