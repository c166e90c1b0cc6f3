/*!
 * Shared Memory Space
 * Mutex-guarded handle for using one address space from several threads
 */

use super::super::types::{Allocation, Extent, MemoryResult, MemorySnapshot, MemoryStats};
use super::MemorySpace;
use crate::core::types::{Address, Size};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a single [`MemorySpace`]
///
/// One mutex guards the whole state, so every operation sees and leaves the
/// space consistent. Clones share the same space.
#[derive(Debug, Clone)]
pub struct SharedMemorySpace {
    inner: Arc<Mutex<MemorySpace>>,
}

impl SharedMemorySpace {
    pub fn new(space: MemorySpace) -> Self {
        Self {
            inner: Arc::new(Mutex::new(space)),
        }
    }

    pub fn allocate(&self, length: Size) -> MemoryResult<Allocation> {
        self.inner.lock().allocate(length)
    }

    pub fn release(&self, address: Address) -> MemoryResult<()> {
        self.inner.lock().release(address)
    }

    pub fn compact(&self) -> usize {
        self.inner.lock().compact()
    }

    pub fn is_allocated(&self, address: Address) -> bool {
        self.inner.lock().is_allocated(address)
    }

    pub fn free_extents(&self) -> Vec<Extent> {
        self.inner.lock().free_extents().to_vec()
    }

    pub fn allocated_extents(&self) -> Vec<Extent> {
        self.inner.lock().allocated_extents().to_vec()
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        self.inner.lock().snapshot()
    }

    pub fn stats(&self) -> MemoryStats {
        self.inner.lock().stats()
    }

    pub fn describe(&self) -> String {
        self.inner.lock().describe()
    }

    /// Run `f` with exclusive access, for multi-step operations that must not interleave
    pub fn with<R>(&self, f: impl FnOnce(&mut MemorySpace) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<MemorySpace> for SharedMemorySpace {
    fn from(space: MemorySpace) -> Self {
        Self::new(space)
    }
}
