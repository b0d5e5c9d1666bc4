//! Memory Entry Module
//!
//! A serialized value with its expiry deadline.

use std::time::{Duration, Instant};

// == Memory Entry ==
/// A stored JSON text and the instant after which it reads as absent.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    /// The serialized value
    pub value: String,
    /// Expiry deadline, None = no expiration
    pub expires_at: Option<Instant>,
}

impl MemoryEntry {
    /// Creates an entry expiring `ttl_seconds` from now. Zero, or a TTL
    /// whose deadline does not fit in an `Instant`, means no expiry.
    pub fn new(value: String, ttl_seconds: u64) -> Self {
        let expires_at = (ttl_seconds > 0)
            .then(|| Instant::now().checked_add(Duration::from_secs(ttl_seconds)))
            .flatten();
        Self { value, expires_at }
    }

    /// An entry is expired once now >= its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        matches!(self.expires_at, Some(deadline) if now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_no_ttl_never_expires() {
        let entry = MemoryEntry::new("\"v\"".to_string(), 0);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired_at(Instant::now() + Duration::from_secs(3600)));
    }

    #[test]
    fn test_entry_with_ttl() {
        let entry = MemoryEntry::new("\"v\"".to_string(), 60);
        assert!(!entry.is_expired());
        assert!(entry.is_expired_at(Instant::now() + Duration::from_secs(61)));
    }

    #[test]
    fn test_entry_huge_ttl_never_expires() {
        let entry = MemoryEntry::new("\"v\"".to_string(), u64::MAX);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = MemoryEntry::new("\"v\"".to_string(), 1);
        sleep(Duration::from_millis(1100));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = MemoryEntry {
            value: "1".to_string(),
            expires_at: Some(now),
        };
        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
    }
}
