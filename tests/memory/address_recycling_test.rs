/*!
 * Address Recycling Test
 * Verifies that released extents return to the free list and are reused
 */

use memspace::memory::{Allocation, Extent, MemoryError, MemorySpace};
use pretty_assertions::assert_eq;

#[test]
fn test_release_then_reuse_restores_full_extent() {
    let mut space = MemorySpace::new(100).unwrap();

    let address = space.allocate(10).unwrap().address().unwrap();
    space.release(address).unwrap();

    assert_eq!(space.free_extents(), &[Extent::new(0, 100)]);
    assert!(space.allocated_extents().is_empty());
}

#[test]
fn test_released_address_is_recycled() {
    let mut space = MemorySpace::new(100).unwrap();

    let a = space.allocate(10).unwrap().address().unwrap();
    let b = space.allocate(20).unwrap().address().unwrap();
    let c = space.allocate(10).unwrap().address().unwrap();
    assert_eq!((a, b, c), (0, 10, 30));

    space.release(b).unwrap();
    assert_eq!(
        space.free_extents(),
        &[Extent::new(10, 20), Extent::new(40, 60)]
    );

    // First fit lands in the hole left by `b`
    assert_eq!(space.allocate(15).unwrap(), Allocation::Granted(10));
    assert_eq!(space.allocate(5).unwrap(), Allocation::Granted(25));
    assert_eq!(space.free_extents(), &[Extent::new(40, 60)]);
}

#[test]
fn test_release_inserts_by_base_address() {
    let mut space = MemorySpace::new(60).unwrap();
    let blocks: Vec<_> = (0..6)
        .map(|_| space.allocate(10).unwrap().address().unwrap())
        .collect();

    space.release(blocks[4]).unwrap();
    space.release(blocks[0]).unwrap();
    space.release(blocks[2]).unwrap();

    assert_eq!(
        space.free_extents(),
        &[Extent::new(0, 10), Extent::new(20, 10), Extent::new(40, 10)]
    );
}

#[test]
fn test_double_release_rejected() {
    let mut space = MemorySpace::new(32).unwrap();
    let address = space.allocate(8).unwrap().address().unwrap();

    space.release(address).unwrap();
    let before = space.snapshot();

    assert_eq!(space.release(address), Err(MemoryError::NotFound(address)));
    assert_eq!(space.snapshot(), before);
}

#[test]
fn test_release_of_interior_address_rejected() {
    let mut space = MemorySpace::new(32).unwrap();
    let address = space.allocate(8).unwrap().address().unwrap();

    assert_eq!(
        space.release(address + 4),
        Err(MemoryError::NotFound(address + 4))
    );
    assert!(space.is_allocated(address));
}

#[test]
fn test_repeated_cycles_do_not_fragment() {
    let mut space = MemorySpace::new(1024).unwrap();

    for round in 0..50 {
        let addresses: Vec<_> = (1..=8)
            .map(|i| space.allocate(i * 8).unwrap().address().unwrap())
            .collect();

        // Release in an order that is neither allocation nor address order
        for &i in &[3, 7, 0, 5, 1, 6, 2, 4] {
            space.release(addresses[i]).unwrap();
        }

        assert_eq!(
            space.free_extents(),
            &[Extent::new(0, 1024)],
            "fragmented after round {}",
            round
        );
    }

    assert_eq!(space.counters().allocations, 400);
    assert_eq!(space.counters().releases, 400);
}
