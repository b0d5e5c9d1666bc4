//! Background Tasks Module
//!
//! # Tasks
//! - Expiry sweep: purges expired entries from a [`MemoryProvider`](crate::providers::MemoryProvider)

mod cleanup;

pub use cleanup::spawn_cleanup_task;
