/*!
 * Memory Space Inspection
 * Snapshots, human-readable dumps and invariant checks
 */

use super::super::types::{Extent, MemoryError, MemoryResult, MemorySnapshot};
use super::MemorySpace;
use crate::core::types::Size;
use std::fmt;

impl MemorySpace {
    /// Read-only copy of both extent lists in their current order
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            capacity: self.capacity(),
            free: self.free.as_slice().to_vec(),
            allocated: self.allocated.clone(),
        }
    }

    /// Human-readable dump of the free and allocated extents
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Verify that no extents overlap, all lie inside the space, and no
    /// managed unit has been lost
    pub fn check_invariants(&self) -> MemoryResult<()> {
        validate_layout(self.capacity(), self.free.as_slice(), &self.allocated)?;

        let accounted = self.free_total() + self.allocated_total();
        if accounted != self.managed {
            return Err(MemoryError::CorruptionDetected(format!(
                "{} units accounted for, {} managed",
                accounted, self.managed
            )));
        }

        Ok(())
    }
}

fn write_extents(f: &mut fmt::Formatter<'_>, extents: &[Extent]) -> fmt::Result {
    if extents.is_empty() {
        return write!(f, " (none)");
    }
    for extent in extents {
        write!(f, " {}", extent)?;
    }
    Ok(())
}

impl fmt::Display for MemorySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "capacity {} (free {}, allocated {})",
            self.capacity(),
            self.free_total(),
            self.allocated_total()
        )?;
        write!(f, "free:     ")?;
        write_extents(f, self.free.as_slice())?;
        writeln!(f)?;
        write!(f, "allocated:")?;
        write_extents(f, &self.allocated)
    }
}

/// Check extent lists against a space of `capacity` units
pub(super) fn validate_layout(
    capacity: Size,
    free: &[Extent],
    allocated: &[Extent],
) -> MemoryResult<()> {
    let mut all: Vec<Extent> = Vec::with_capacity(free.len() + allocated.len());

    for extent in free.iter().chain(allocated) {
        if extent.length == 0 {
            return Err(MemoryError::InvalidArgument(format!(
                "extent at 0x{:x} has zero length",
                extent.base
            )));
        }
        match extent.base.checked_add(extent.length) {
            Some(end) if end <= capacity => {}
            _ => {
                return Err(MemoryError::CorruptionDetected(format!(
                    "extent {} exceeds capacity {}",
                    extent, capacity
                )))
            }
        }
        all.push(*extent);
    }

    all.sort_by_key(|e| e.base);
    if let Some(pair) = all.windows(2).find(|pair| pair[0].overlaps(&pair[1])) {
        return Err(MemoryError::CorruptionDetected(format!(
            "extents {} and {} overlap",
            pair[0], pair[1]
        )));
    }

    Ok(())
}
