//! Configuration constants for the rental lifecycle library.
//!
//! This module centralizes magic numbers and configuration values
//! to improve maintainability and enable easier tuning.

/// Seconds in one rental day. Start and end dates are inclusive, so a
/// rental spanning `n * SECONDS_PER_DAY` seconds is billed for `n + 1` days.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Maximum length of the free-text notes attached to a rental request.
/// Matches the column width of the persisted schema.
pub const MAX_NOTES_LEN: usize = 500;

/// Return the current Unix timestamp in seconds.
///
/// This is a convenience wrapper that avoids the boilerplate of
/// `SystemTimeProvider::new().now_unix()` in production code paths.
/// For testable code, prefer accepting a `TimeProvider` parameter instead.
pub fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
