/*!
 * Memory Space Tests
 * First-fit selection, splitting, exact matches and argument validation
 */

use memspace::memory::{Allocation, Allocator, Extent, MemoryError, MemoryInfo, MemorySpace};
use pretty_assertions::assert_eq;

#[test]
fn test_memory_space_initialization() {
    let space = MemorySpace::new(1000).unwrap();

    assert_eq!(space.capacity(), 1000);
    assert_eq!(space.free_extents(), &[Extent::new(0, 1000)]);
    assert!(space.allocated_extents().is_empty());
    assert_eq!(space.info(), (1000, 0, 1000));
}

#[test]
fn test_zero_capacity_rejected() {
    match MemorySpace::new(0) {
        Err(MemoryError::InvalidArgument(_)) => {}
        other => panic!("Expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn test_first_fit_prefers_earlier_extent() {
    // The later extent is larger, but the first one already fits
    let mut space = MemorySpace::from_parts(
        30,
        vec![Extent::new(0, 5), Extent::new(10, 20)],
        vec![Extent::new(5, 5)],
    )
    .unwrap();

    assert_eq!(space.allocate(5).unwrap(), Allocation::Granted(0));
    assert_eq!(space.free_extents(), &[Extent::new(10, 20)]);
}

#[test]
fn test_first_fit_scans_list_order_not_address_order() {
    let mut space = MemorySpace::from_parts(
        30,
        vec![Extent::new(10, 20), Extent::new(0, 5)],
        vec![Extent::new(5, 5)],
    )
    .unwrap();

    assert_eq!(space.allocate(5).unwrap(), Allocation::Granted(10));
    assert_eq!(
        space.free_extents(),
        &[Extent::new(15, 15), Extent::new(0, 5)]
    );
}

#[test]
fn test_exact_match_removes_free_extent() {
    let mut space = MemorySpace::from_parts(5, vec![Extent::new(0, 5)], vec![]).unwrap();

    assert_eq!(space.allocate(5).unwrap(), Allocation::Granted(0));
    assert!(space.free_extents().is_empty());
    assert_eq!(space.allocated_extents(), &[Extent::new(0, 5)]);
}

#[test]
fn test_split_leaves_remainder_in_place() {
    let mut space = MemorySpace::from_parts(
        270,
        vec![Extent::new(250, 20)],
        vec![Extent::new(0, 250)],
    )
    .unwrap();

    assert_eq!(space.allocate(17).unwrap(), Allocation::Granted(250));
    assert_eq!(space.free_extents(), &[Extent::new(267, 3)]);
    assert_eq!(
        space.allocated_extents(),
        &[Extent::new(0, 250), Extent::new(250, 17)]
    );
}

#[test]
fn test_zero_length_allocation_rejected() {
    let mut space = MemorySpace::new(10).unwrap();

    let result = space.allocate(0);
    assert!(matches!(result, Err(MemoryError::InvalidArgument(_))));
    assert_eq!(space.free_extents(), &[Extent::new(0, 10)]);
    assert!(space.allocated_extents().is_empty());
}

#[test]
fn test_oversized_request_is_exhausted_not_error() {
    let mut space = MemorySpace::new(100).unwrap();

    let result = space.allocate(101).unwrap();
    assert_eq!(
        result,
        Allocation::Exhausted {
            requested: 101,
            free_total: 100,
            largest_free: 100,
        }
    );
    assert_eq!(space.free_extents(), &[Extent::new(0, 100)]);
}

#[test]
fn test_block_size_and_is_allocated() {
    let mut space = MemorySpace::new(64).unwrap();
    let address = space.allocate(24).unwrap().address().unwrap();

    assert!(space.is_allocated(address));
    assert_eq!(space.block_size(address), Some(24));
    assert_eq!(space.block_size(address + 1), None);
    assert!(!space.is_allocated(address + 1));
    assert!(space.is_free(24));
    assert!(!space.is_free(0));
}

#[test]
fn test_trait_object_dispatch() {
    let mut space = MemorySpace::new(50).unwrap();
    let allocator: &mut dyn Allocator = &mut space;

    let address = allocator.allocate(10).unwrap().address().unwrap();
    assert_eq!(allocator.block_size(address), Some(10));
    allocator.release(address).unwrap();
    assert!(!allocator.is_allocated(address));
    assert_eq!(allocator.compact(), 0);

    let info: &dyn MemoryInfo = &space;
    assert_eq!(info.info(), (50, 0, 50));
}

#[test]
fn test_from_parts_rejects_overlap() {
    let result = MemorySpace::from_parts(
        20,
        vec![Extent::new(0, 10)],
        vec![Extent::new(9, 5)],
    );
    assert!(matches!(result, Err(MemoryError::CorruptionDetected(_))));
}

#[test]
fn test_from_parts_allows_unmanaged_units() {
    let space = MemorySpace::from_parts(100, vec![Extent::new(50, 10)], vec![]).unwrap();

    assert_eq!(space.free_total(), 10);
    assert!(space.check_invariants().is_ok());
}
