//! signout-store — Record store implementations.
//!
//! Implements the `HandoffStore` trait from `signout-core`.

pub mod memory;

pub use memory::MemoryStore;
