use std::time::{SystemTime, UNIX_EPOCH};

use crate::TimeSource;

/// The operating system's wall clock.
///
/// This clock follows NTP steps and manual adjustments, so it may go
/// backward. [`IdWorker::next_id`] detects that and fails with
/// [`Error::ClockMovedBackward`] rather than reissuing old timestamps.
///
/// A system time before 1970 reads as `0`.
///
/// [`IdWorker::next_id`]: crate::IdWorker::next_id
/// [`Error::ClockMovedBackward`]: crate::Error::ClockMovedBackward
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}
