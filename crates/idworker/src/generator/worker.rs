use core::time::Duration;
use std::time::Instant;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    IdGenStatus, IdWorkerBuilder, SnowflakeId, SystemClock, TimeSource,
    generator::{Error, Mutex, MutexGuard, Result},
};

/// Mutable half of the generator, guarded by one lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct State {
    pub(crate) sequence: u64,
    /// Unix millis of the last issued ID; `None` until the first one.
    pub(crate) last_timestamp: Option<u64>,
}

/// A lock-based Snowflake ID worker, safe to share between threads.
///
/// Each worker owns an immutable `(datacenter_id, worker_id, epoch)` triple
/// and a mutable `(sequence, last_timestamp)` pair. Every call to
/// [`next_id`] reads the clock, arbitrates against the last timestamp and
/// packs the result in one critical section, so concurrent callers always
/// observe a consistent state.
///
/// There is no global instance. Create one worker per `(datacenter, worker)`
/// pair and share it by reference or `Arc`; independent workers can coexist
/// in one process.
///
/// ## Clock handling
/// - Same millisecond as the last ID: the sequence is incremented. After 4096
///   IDs the call spins until the clock ticks forward.
/// - Later millisecond: the sequence resets to zero.
/// - Earlier millisecond: [`Error::ClockMovedBackward`] with the drift.
///
/// ```
/// use std::sync::Arc;
/// use idworker::IdWorker;
///
/// let worker = Arc::new(IdWorker::new(3, 7).unwrap());
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let worker = Arc::clone(&worker);
///         std::thread::spawn(move || worker.next_id().unwrap())
///     })
///     .collect();
///
/// for handle in handles {
///     let id = handle.join().unwrap();
///     assert_eq!(id.datacenter_id(), 7);
///     assert_eq!(id.worker_id(), 3);
/// }
/// ```
///
/// [`next_id`]: IdWorker::next_id
pub struct IdWorker<T: TimeSource = SystemClock> {
    #[cfg(feature = "cache-padded")]
    pub(crate) state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Mutex<State>,
    pub(crate) worker_id: u64,
    pub(crate) datacenter_id: u64,
    pub(crate) epoch: u64,
    pub(crate) max_wait: Option<Duration>,
    pub(crate) time: T,
}

impl IdWorker<SystemClock> {
    /// Creates a worker on the system clock with the default epoch
    /// ([`TWITTER_EPOCH`]) and an initial sequence of zero.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if either ID is greater than 31.
    ///
    /// ```
    /// use idworker::{Error, IdWorker};
    ///
    /// assert!(IdWorker::new(31, 0).is_ok());
    /// assert!(matches!(
    ///     IdWorker::new(32, 0),
    ///     Err(Error::InvalidArgument { field: "worker_id", .. })
    /// ));
    /// ```
    ///
    /// [`TWITTER_EPOCH`]: crate::TWITTER_EPOCH
    pub fn new(worker_id: u64, datacenter_id: u64) -> Result<Self> {
        Self::builder()
            .worker_id(worker_id)
            .datacenter_id(datacenter_id)
            .build()
    }

    /// Like [`Self::new`], for callers holding signed integers. Negative
    /// values are rejected with [`Error::InvalidArgument`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if either ID is outside `[0, 31]`.
    pub fn try_from_signed(worker_id: i64, datacenter_id: i64) -> Result<Self> {
        let worker_id = to_unsigned("worker_id", worker_id, SnowflakeId::MAX_WORKER_ID)?;
        let datacenter_id =
            to_unsigned("datacenter_id", datacenter_id, SnowflakeId::MAX_DATACENTER_ID)?;
        Self::new(worker_id, datacenter_id)
    }

    /// Starts a [`IdWorkerBuilder`] on the system clock.
    pub fn builder() -> IdWorkerBuilder<SystemClock> {
        IdWorkerBuilder::new()
    }
}

impl<T: TimeSource> IdWorker<T> {
    /// Creates a worker from explicit component values and time source, with
    /// the default epoch.
    ///
    /// `sequence` seeds the sequence counter. It only matters if the first
    /// call happens in the same millisecond as a restored `last_timestamp`,
    /// which a fresh worker never has, so zero is the usual choice.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if an ID is greater than 31 or `sequence` is
    /// greater than 4095.
    pub fn from_components(
        worker_id: u64,
        datacenter_id: u64,
        sequence: u64,
        time: T,
    ) -> Result<Self> {
        IdWorkerBuilder::new()
            .worker_id(worker_id)
            .datacenter_id(datacenter_id)
            .sequence(sequence)
            .time(time)
            .build()
    }

    pub fn worker_id(&self) -> u64 {
        self.worker_id
    }

    pub fn datacenter_id(&self) -> u64 {
        self.datacenter_id
    }

    /// Unix milliseconds subtracted from every timestamp.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Current value of the sequence counter.
    ///
    /// # Errors
    ///
    /// [`Error::LockPoisoned`] if the lock is poisoned (std mutex only).
    pub fn sequence(&self) -> Result<u64> {
        Ok(self.lock_state()?.sequence)
    }

    /// Unix millis of the last issued ID, or `None` before the first one.
    ///
    /// # Errors
    ///
    /// [`Error::LockPoisoned`] if the lock is poisoned (std mutex only).
    pub fn last_timestamp(&self) -> Result<Option<u64>> {
        Ok(self.lock_state()?.last_timestamp)
    }

    /// Generates the next ID, spinning through sequence exhaustion.
    ///
    /// The returned ID is strictly greater than every ID this worker returned
    /// before. If 4096 IDs were already issued in the current millisecond, the
    /// call holds the lock and polls the clock until it moves to a later
    /// millisecond. Without a [`max_wait`] bound this wait is unbounded when
    /// the clock stalls.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockMovedBackward`] if the clock reads earlier than the
    ///   last issued ID. State is not modified.
    /// - [`Error::ClockBeforeEpoch`] if the clock reads earlier than the
    ///   epoch.
    /// - [`Error::SequenceWaitTimeout`] if a [`max_wait`] bound was exceeded.
    /// - [`Error::LockPoisoned`] if the lock is poisoned (std mutex only).
    ///
    /// ```
    /// use idworker::{IdWorker, TimeSource, TWITTER_EPOCH};
    ///
    /// struct FixedTime;
    /// impl TimeSource for FixedTime {
    ///     fn current_millis(&self) -> u64 {
    ///         TWITTER_EPOCH + 1000
    ///     }
    /// }
    ///
    /// let worker = IdWorker::from_components(1, 1, 0, FixedTime).unwrap();
    /// let id = worker.next_id().unwrap();
    /// assert_eq!(id.to_raw(), (1000 << 22) | (1 << 17) | (1 << 12));
    /// ```
    ///
    /// [`max_wait`]: IdWorkerBuilder::max_wait
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id(&self) -> Result<SnowflakeId> {
        let mut state = self.lock_state()?;
        let mut now = self.time.current_millis();

        let sequence = match state.last_timestamp {
            Some(last) if now < last => return Err(Self::cold_clock_behind(now, last)),
            Some(last) if now == last => {
                let sequence = (state.sequence + 1) & SnowflakeId::MAX_SEQUENCE;
                if sequence == 0 {
                    now = self.wait_next_millis(last)?;
                }
                sequence
            }
            _ => 0,
        };

        self.commit(&mut state, now, sequence)
    }

    /// Attempts to generate the next ID without waiting.
    ///
    /// Same arbitration as [`Self::next_id`], except that an exhausted
    /// millisecond yields [`IdGenStatus::Pending`] instead of spinning under
    /// the lock. The lock is released on return, so callers can sleep or
    /// yield between attempts and every retry re-validates against the
    /// latest state.
    ///
    /// # Errors
    ///
    /// Same as [`Self::next_id`], minus [`Error::SequenceWaitTimeout`].
    ///
    /// ```
    /// use idworker::{IdGenStatus, IdWorker};
    ///
    /// let worker = IdWorker::new(0, 0).unwrap();
    /// let id = loop {
    ///     match worker.try_poll_id().unwrap() {
    ///         IdGenStatus::Ready { id } => break id,
    ///         IdGenStatus::Pending { .. } => std::thread::yield_now(),
    ///     }
    /// };
    /// assert!(id.is_valid());
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<IdGenStatus> {
        let mut state = self.lock_state()?;
        let now = self.time.current_millis();

        let sequence = match state.last_timestamp {
            Some(last) if now < last => return Err(Self::cold_clock_behind(now, last)),
            Some(last) if now == last => {
                if state.sequence >= SnowflakeId::MAX_SEQUENCE {
                    return Ok(IdGenStatus::Pending {
                        yield_until: last + 1,
                    });
                }
                state.sequence + 1
            }
            _ => 0,
        };

        self.commit(&mut state, now, sequence)
            .map(|id| IdGenStatus::Ready { id })
    }

    /// Records `(now, sequence)` as the latest issued ID and packs it.
    fn commit(&self, state: &mut State, now: u64, sequence: u64) -> Result<SnowflakeId> {
        let Some(timestamp) = now.checked_sub(self.epoch) else {
            return Err(Error::ClockBeforeEpoch {
                now,
                epoch: self.epoch,
            });
        };
        debug_assert!(timestamp <= SnowflakeId::MAX_TIMESTAMP, "timestamp overflow");

        state.sequence = sequence;
        state.last_timestamp = Some(now);

        Ok(SnowflakeId::from_components(
            timestamp,
            self.datacenter_id,
            self.worker_id,
            sequence,
        ))
    }

    /// Polls the clock until it reads later than `last`.
    fn wait_next_millis(&self, last: u64) -> Result<u64> {
        let started = Instant::now();
        loop {
            let now = self.time.current_millis();
            if now > last {
                return Ok(now);
            }
            if let Some(max_wait) = self.max_wait {
                let waited = started.elapsed();
                if waited >= max_wait {
                    return Err(Error::SequenceWaitTimeout { waited });
                }
            }
            core::hint::spin_loop();
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(now: u64, last: u64) -> Error {
        let drift_millis = last - now;
        #[cfg(feature = "tracing")]
        tracing::warn!(
            drift_millis,
            last_timestamp = last,
            now,
            "clock moved backward, refusing to generate id"
        );
        Error::ClockMovedBackward { drift_millis }
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, State>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }
}

fn to_unsigned(field: &'static str, value: i64, max: u64) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::InvalidArgument {
        field,
        value: value.into(),
        max,
    })
}
