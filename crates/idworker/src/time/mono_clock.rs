use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

use crate::{SystemClock, TimeSource};

/// A wall-clock-anchored time source that never goes backward.
///
/// At construction the clock samples the system time once, then a background
/// thread advances a shared counter once per millisecond using `Instant`.
/// Reads are a single atomic load, and later NTP steps or manual adjustments
/// of the system clock are not observed.
///
/// Clones share the same ticker. The thread exits on its next tick after the
/// last clone is dropped.
///
/// Because it cannot regress, an [`IdWorker`] driven by this clock never
/// reports [`Error::ClockMovedBackward`]. The trade-off is drift: the reported
/// time follows the monotonic timer, not later corrections of the wall clock.
///
/// ```
/// use idworker::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::new();
/// let a = clock.current_millis();
/// std::thread::sleep(std::time::Duration::from_millis(5));
/// let b = clock.current_millis();
/// assert!(b >= a);
/// ```
///
/// [`IdWorker`]: crate::IdWorker
/// [`Error::ClockMovedBackward`]: crate::Error::ClockMovedBackward
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    ticks: Arc<AtomicU64>,
    anchor: u64, // unix millis at construction
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::anchored_at(SystemClock.current_millis())
    }

    /// Constructs a clock that reports `anchor` (Unix milliseconds) at the
    /// moment of construction and advances from there.
    pub fn anchored_at(anchor: u64) -> Self {
        let start = Instant::now();
        let ticks = Arc::new(AtomicU64::new(0));

        let weak_ticks = Arc::downgrade(&ticks);
        thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(ticks) = weak_ticks.upgrade() else {
                    break;
                };

                // Absolute target time of the next tick
                let target = start + Duration::from_millis(tick);
                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let elapsed = start.elapsed().as_millis() as u64;
                ticks.store(elapsed, Ordering::Relaxed);

                // Align to the tick after the actual elapsed time
                tick = elapsed + 1;
            }
        });

        Self { ticks, anchor }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.anchor + self.ticks.load(Ordering::Relaxed)
    }
}
