/*!
 * Memory Module
 * Simulated address space management
 */

pub mod config;
pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use config::{AllocatorConfig, CompactionPolicy};
pub use manager::{MemorySpace, SharedMemorySpace};
pub use traits::*;
pub use types::*;
