//! Providers Module
//!
//! Concrete [`CacheProvider`](crate::cache::CacheProvider) backends.

mod entry;
mod memory;
mod redis;

pub use memory::MemoryProvider;
pub use redis::{ConnectionOptions, RedisProvider};
