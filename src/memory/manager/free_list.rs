/*!
 * Ordered Free List
 * First-fit scan, sorted insertion and coalescing of free extents
 */

use crate::core::types::{Address, Size};
use crate::memory::types::Extent;

/// Free extents in their current list order
///
/// The order is whatever the history of operations left behind: splits keep
/// an extent's position, releases insert by base, and only [`FreeList::coalesce`]
/// sorts the whole list. First-fit scans honour that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct FreeList {
    extents: Vec<Extent>,
}

impl FreeList {
    /// Take `extents` verbatim, keeping their order
    pub fn from_extents(extents: Vec<Extent>) -> Self {
        Self { extents }
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn as_slice(&self) -> &[Extent] {
        &self.extents
    }

    /// Sum of all free lengths
    pub fn total(&self) -> Size {
        self.extents.iter().map(|e| e.length).sum()
    }

    /// Length of the largest single free extent
    pub fn largest(&self) -> Size {
        self.extents.iter().map(|e| e.length).max().unwrap_or(0)
    }

    /// Index of the first extent, in list order, that can hold `length` units
    pub fn first_fit(&self, length: Size) -> Option<usize> {
        self.extents.iter().position(|e| e.length >= length)
    }

    /// Carve `length` units from the front of the extent at `index`
    ///
    /// An exact fit removes the extent from the list; otherwise it shrinks in
    /// place so its position in the scan order is kept.
    pub fn take(&mut self, index: usize, length: Size) -> Extent {
        debug_assert!(self.extents[index].length >= length);
        if self.extents[index].length == length {
            return self.extents.remove(index);
        }

        let found = &mut self.extents[index];
        let carved = Extent::new(found.base, length);
        found.base += length;
        found.length -= length;
        carved
    }

    /// Insert before the first extent with a strictly greater base
    pub fn insert_sorted(&mut self, extent: Extent) {
        let at = self
            .extents
            .iter()
            .position(|e| e.base > extent.base)
            .unwrap_or(self.extents.len());
        self.extents.insert(at, extent);
    }

    /// Sort by base and merge exactly adjacent extents
    ///
    /// Returns the number of merges performed. Never changes the free total.
    pub fn coalesce(&mut self) -> usize {
        if self.extents.len() < 2 {
            return 0;
        }

        self.extents.sort_by_key(|e| e.base);

        let mut merged: Vec<Extent> = Vec::with_capacity(self.extents.len());
        let mut current = self.extents[0];
        for next in &self.extents[1..] {
            if current.precedes(next) {
                current.length += next.length;
            } else {
                merged.push(current);
                current = *next;
            }
        }
        merged.push(current);

        let merges = self.extents.len() - merged.len();
        self.extents = merged;
        merges
    }

    /// Whether `address` falls inside any free extent
    pub fn contains(&self, address: Address) -> bool {
        self.extents
            .iter()
            .any(|e| e.base <= address && address < e.end())
    }
}
