//! Cache Module
//!
//! Backend-agnostic caching facade: key namespacing, TTL resolution and
//! the provider contract.

mod facade;
mod key;
mod provider;
mod stats;
mod ttl;


// Re-export public types
pub use facade::{Cache, CacheBuilder, CacheOptions, DEFAULT_PREFIX};
pub use key::{make_key, KEY_SEPARATOR};
pub use provider::CacheProvider;
pub use stats::CacheStats;
pub use ttl::{parse_ttl, resolve_ttl, DEFAULT_TTL};
