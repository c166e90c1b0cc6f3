/*!
 * Memspace - Demo Entry Point
 *
 * Drives a small workload against a simulated address space:
 * - fills the space with equal blocks
 * - releases alternating blocks to fragment it
 * - shows a request failing despite enough free units in aggregate
 * - releases a neighbour so compaction makes room, then retries
 */

use anyhow::{Context, Result};
use memspace::{init_tracing, Address, Allocation, AllocatorConfig, MemorySpace, Size};
use tracing::{info, warn};

fn allocate(space: &mut MemorySpace, length: Size) -> Result<Option<Address>> {
    match space
        .allocate(length)
        .with_context(|| format!("allocating {} units", length))?
    {
        Allocation::Granted(address) => {
            info!(address, length, "granted");
            Ok(Some(address))
        }
        Allocation::Exhausted {
            requested,
            free_total,
            largest_free,
        } => {
            warn!(requested, free_total, largest_free, "exhausted");
            Ok(None)
        }
    }
}

fn release(space: &mut MemorySpace, address: Option<Address>) -> Result<()> {
    if let Some(address) = address {
        space
            .release(address)
            .with_context(|| format!("releasing 0x{:x}", address))?;
        info!(address, "released");
    }
    Ok(())
}

fn show(step: &str, space: &MemorySpace) {
    println!("== {}", step);
    println!("{}", space);
    println!();
}

fn main() -> Result<()> {
    init_tracing();

    let config = AllocatorConfig::from_env();
    info!(
        capacity = config.capacity,
        compaction = %config.compaction,
        "memspace starting"
    );
    let mut space = MemorySpace::with_config(config).context("invalid allocator configuration")?;
    show("initial", &space);

    let quarter = (space.capacity() / 4).max(1);
    let mut blocks = Vec::with_capacity(4);
    for _ in 0..4 {
        blocks.push(allocate(&mut space, quarter)?);
    }
    show("four quarter blocks", &space);

    release(&mut space, blocks[0])?;
    release(&mut space, blocks[2])?;
    show("released blocks 0 and 2", &space);

    let wide = allocate(&mut space, quarter * 2)?;
    if wide.is_none() {
        show("half-size request exhausted", &space);

        release(&mut space, blocks[1])?;
        show("released block 1", &space);

        let retry = allocate(&mut space, quarter * 2)?;
        show(
            if retry.is_some() {
                "half-size request granted"
            } else {
                "half-size request still exhausted"
            },
            &space,
        );
    }

    space
        .check_invariants()
        .context("allocator invariants violated")?;

    let stats = space.stats();
    println!(
        "pressure {} | usage {:.1}% | fragmentation {:.2}",
        stats.memory_pressure(),
        stats.usage_percentage,
        stats.fragmentation
    );
    println!("{}", serde_json::to_string_pretty(&stats)?);
    println!("{}", serde_json::to_string_pretty(&space.snapshot())?);

    Ok(())
}
