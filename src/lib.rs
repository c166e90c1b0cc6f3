/*!
 * Memspace Library
 * First-fit allocation over a simulated linear address space
 */

pub mod core;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use crate::core::types::{Address, Size};
pub use memory::{
    Allocation, AllocatorConfig, CompactionPolicy, Extent, MemoryError, MemoryResult,
    MemorySnapshot, MemorySpace, MemoryStats, SharedMemorySpace,
};
pub use monitoring::init_tracing;
