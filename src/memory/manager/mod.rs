/*!
 * Memory Space Management
 *
 * First-fit allocator over a simulated linear address space.
 *
 * ## Model
 *
 * The space is described by two extent lists:
 * - **free**: scanned in current list order for the first extent that fits
 * - **allocated**: one extent per live allocation, keyed by its base address
 *
 * ## Features
 *
 * - **Block splitting**: a larger free extent is split, the remainder stays in place
 * - **Compaction**: adjacent free extents are sorted and merged, eagerly on release
 *   or on demand depending on [`CompactionPolicy`]
 * - **Exhaustion retry**: a failed scan compacts once and retries before giving up
 * - **Memory pressure tracking**: warns past the configured thresholds
 */

mod allocator;
mod free_list;
mod inspect;
mod shared;
mod tracking;

pub use shared::SharedMemorySpace;

use super::config::{AllocatorConfig, CompactionPolicy};
use super::traits::{Allocator, MemoryInfo};
use super::types::{
    Allocation, AllocatorCounters, Extent, MemoryError, MemoryResult, MemorySnapshot, MemoryStats,
};
use crate::core::types::{Address, Size};
use free_list::FreeList;
use log::info;

/// A managed address space
#[derive(Debug, Clone)]
pub struct MemorySpace {
    config: AllocatorConfig,
    free: FreeList,
    allocated: Vec<Extent>,
    // Units covered by either list at construction; only `from_parts` can leave
    // this below capacity
    managed: Size,
    counters: AllocatorCounters,
}

impl MemorySpace {
    /// Create a space of `capacity` units with a single free extent `(0, capacity)`
    pub fn new(capacity: Size) -> MemoryResult<Self> {
        Self::with_config(AllocatorConfig::with_capacity(capacity))
    }

    /// Create a space from a full configuration
    pub fn with_config(config: AllocatorConfig) -> MemoryResult<Self> {
        config.validate()?;

        let capacity = config.capacity;
        info!(
            "Memory space initialized with {} units, first-fit allocation, {} compaction",
            capacity, config.compaction
        );

        Ok(Self {
            free: FreeList::from_extents(vec![Extent::new(0, capacity)]),
            allocated: Vec::new(),
            managed: capacity,
            counters: AllocatorCounters::default(),
            config,
        })
    }

    /// Rebuild a space from explicit extent lists, keeping the given free order
    ///
    /// Units covered by neither list are left unmanaged.
    pub fn from_parts(
        capacity: Size,
        free: Vec<Extent>,
        allocated: Vec<Extent>,
    ) -> MemoryResult<Self> {
        Self::from_parts_with_config(AllocatorConfig::with_capacity(capacity), free, allocated)
    }

    pub fn from_parts_with_config(
        config: AllocatorConfig,
        free: Vec<Extent>,
        allocated: Vec<Extent>,
    ) -> MemoryResult<Self> {
        config.validate()?;
        inspect::validate_layout(config.capacity, &free, &allocated)?;

        let managed: Size = free.iter().chain(&allocated).map(|e| e.length).sum();
        info!(
            "Memory space restored with {} units ({} free extents, {} allocated, {} managed)",
            config.capacity,
            free.len(),
            allocated.len(),
            managed
        );

        Ok(Self {
            free: FreeList::from_extents(free),
            allocated,
            managed,
            counters: AllocatorCounters::default(),
            config,
        })
    }

    /// Rebuild a space from a snapshot taken with [`MemorySpace::snapshot`]
    pub fn from_snapshot(snapshot: &MemorySnapshot) -> MemoryResult<Self> {
        Self::from_parts(
            snapshot.capacity,
            snapshot.free.clone(),
            snapshot.allocated.clone(),
        )
    }

    #[inline]
    pub fn capacity(&self) -> Size {
        self.config.capacity
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    pub fn compaction_policy(&self) -> CompactionPolicy {
        self.config.compaction
    }

    /// Free extents in current scan order
    pub fn free_extents(&self) -> &[Extent] {
        self.free.as_slice()
    }

    /// Allocated extents in allocation order
    pub fn allocated_extents(&self) -> &[Extent] {
        &self.allocated
    }

    pub fn free_total(&self) -> Size {
        self.free.total()
    }

    pub fn allocated_total(&self) -> Size {
        self.allocated.iter().map(|e| e.length).sum()
    }

    pub fn largest_free(&self) -> Size {
        self.free.largest()
    }

    /// Whether `address` lies inside some free extent
    pub fn is_free(&self, address: Address) -> bool {
        self.free.contains(address)
    }
}

// Implement trait interfaces
impl Allocator for MemorySpace {
    fn allocate(&mut self, length: Size) -> MemoryResult<Allocation> {
        MemorySpace::allocate(self, length)
    }

    fn release(&mut self, address: Address) -> MemoryResult<()> {
        MemorySpace::release(self, address)
    }

    fn compact(&mut self) -> usize {
        MemorySpace::compact(self)
    }

    fn is_allocated(&self, address: Address) -> bool {
        MemorySpace::is_allocated(self, address)
    }

    fn block_size(&self, address: Address) -> Option<Size> {
        MemorySpace::block_size(self, address)
    }
}

impl MemoryInfo for MemorySpace {
    fn stats(&self) -> MemoryStats {
        MemorySpace::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemorySpace::info(self)
    }
}

impl Default for MemorySpace {
    fn default() -> Self {
        let config = AllocatorConfig::default();
        let capacity = config.capacity;
        Self {
            free: FreeList::from_extents(vec![Extent::new(0, capacity)]),
            allocated: Vec::new(),
            managed: capacity,
            counters: AllocatorCounters::default(),
            config,
        }
    }
}

impl From<&MemorySpace> for MemorySnapshot {
    fn from(space: &MemorySpace) -> Self {
        space.snapshot()
    }
}

impl TryFrom<&MemorySnapshot> for MemorySpace {
    type Error = MemoryError;

    fn try_from(snapshot: &MemorySnapshot) -> Result<Self, Self::Error> {
        MemorySpace::from_snapshot(snapshot)
    }
}
