//! Deadlines applied to store round trips.

use std::time::Duration;

/// Upper bound for a single repository call, from issuing the statement to
/// reading the last row.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);
