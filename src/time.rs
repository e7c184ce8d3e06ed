//! Helper functions for [`chrono`] timestamps.

use crate::prelude::*;

/// Truncates the timestamp down to the start of its minute.
pub fn floor_to_minute(timestamp: DateTime) -> DateTime {
    timestamp
        - Duration::seconds(timestamp.timestamp().rem_euclid(60))
        - Duration::nanoseconds(i64::from(timestamp.timestamp_subsec_nanos()))
}
