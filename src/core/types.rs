/*!
 * Core Types
 * Common types used across the allocator
 */

/// Address type for memory operations
///
/// Addresses are offsets into a notional arena, never real pointers.
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;
