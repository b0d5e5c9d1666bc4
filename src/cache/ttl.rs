//! TTL Resolver Module
//!
//! Chooses the effective time-to-live from a per-call override and a
//! default.

/// Fallback default TTL in seconds when none is configured.
pub const DEFAULT_TTL: u64 = 60;

// == Resolve ==
/// Returns `override_ttl` unless it is absent or zero, in which case
/// `default_ttl` is returned.
///
/// A zero override means "not provided", never "expire immediately".
pub fn resolve_ttl(override_ttl: Option<u64>, default_ttl: u64) -> u64 {
    match override_ttl {
        Some(ttl) if ttl > 0 => ttl,
        _ => default_ttl,
    }
}

// == Parse ==
/// Parses a TTL from text, yielding `None` for anything that is not a
/// positive whole number of seconds.
///
/// Pair with [`resolve_ttl`] so non-numeric input falls back to the default.
pub fn parse_ttl(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|ttl| *ttl > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_override() {
        assert_eq!(resolve_ttl(Some(40), 60), 40);
    }

    #[test]
    fn test_resolve_absent() {
        assert_eq!(resolve_ttl(None, 35), 35);
    }

    #[test]
    fn test_resolve_zero_falls_back() {
        assert_eq!(resolve_ttl(Some(0), 35), 35);
    }

    #[test]
    fn test_resolve_non_numeric_falls_back() {
        assert_eq!(resolve_ttl(parse_ttl("ahjk"), DEFAULT_TTL), 60);
        assert_eq!(resolve_ttl(parse_ttl("nan"), 22), 22);
    }

    #[test]
    fn test_parse_ttl() {
        assert_eq!(parse_ttl("22"), Some(22));
        assert_eq!(parse_ttl(" 22 "), Some(22));
        assert_eq!(parse_ttl("0"), None);
        assert_eq!(parse_ttl("-5"), None);
        assert_eq!(parse_ttl("1.5"), None);
        assert_eq!(parse_ttl(""), None);
    }
}
