//! # Timestamps and Buckets
//!
//! Timestamps are unsigned Unix seconds. Commitments bind the timestamp at
//! 60-second granularity: any two timestamps in the same minute share a
//! bucket and therefore (all else equal) a commitment.

use chrono::Utc;

/// Width of a timestamp bucket in seconds.
pub const TIMESTAMP_BUCKET_SECONDS: u64 = 60;

/// `floor(timestamp / 60)`.
pub fn timestamp_bucket(timestamp: u64) -> u64 {
    timestamp / TIMESTAMP_BUCKET_SECONDS
}

/// Current UTC time in whole Unix seconds.
///
/// Clamps pre-epoch clocks to zero.
pub fn now_unix_seconds() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or(0)
}
