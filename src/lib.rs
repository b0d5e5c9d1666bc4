//! nscache - A namespaced caching facade
//!
//! Prefixes keys and resolves TTLs on top of a pluggable provider, with a
//! Redis backend and an in-memory backend.

pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod providers;
pub mod tasks;

pub use cache::{Cache, CacheOptions, CacheProvider};
pub use config::Config;
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use error::{CacheError, Result};
pub use providers::{ConnectionOptions, MemoryProvider, RedisProvider};
pub use tasks::spawn_cleanup_task;
