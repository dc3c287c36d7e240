use core::time::Duration;

#[cfg(feature = "cache-padded")]
use crossbeam_utils::CachePadded;

use crate::{
    IdWorker, SnowflakeId, SystemClock, TWITTER_EPOCH, TimeSource,
    generator::{Error, Mutex, Result, State},
};

/// Configures and validates an [`IdWorker`].
///
/// Defaults: worker and datacenter ID `0`, sequence `0`, epoch
/// [`TWITTER_EPOCH`], no bound on the sequence-exhaustion wait, and the
/// [`SystemClock`].
///
/// ```
/// use std::time::Duration;
/// use idworker::{DISCORD_EPOCH, IdWorkerBuilder, MonotonicClock};
///
/// let worker = IdWorkerBuilder::new()
///     .worker_id(4)
///     .datacenter_id(2)
///     .epoch(DISCORD_EPOCH)
///     .max_wait(Duration::from_millis(50))
///     .time(MonotonicClock::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(worker.epoch(), DISCORD_EPOCH);
/// assert_eq!(worker.next_id().unwrap().worker_id(), 4);
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct IdWorkerBuilder<T = SystemClock> {
    worker_id: u64,
    datacenter_id: u64,
    sequence: u64,
    epoch: u64,
    max_wait: Option<Duration>,
    time: T,
}

impl Default for IdWorkerBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl IdWorkerBuilder<SystemClock> {
    pub fn new() -> Self {
        Self {
            worker_id: 0,
            datacenter_id: 0,
            sequence: 0,
            epoch: TWITTER_EPOCH,
            max_wait: None,
            time: SystemClock,
        }
    }
}

impl<T> IdWorkerBuilder<T> {
    /// Worker ID, `0..=31`.
    pub fn worker_id(mut self, worker_id: u64) -> Self {
        self.worker_id = worker_id;
        self
    }

    /// Datacenter ID, `0..=31`.
    pub fn datacenter_id(mut self, datacenter_id: u64) -> Self {
        self.datacenter_id = datacenter_id;
        self
    }

    /// Initial sequence value, `0..=4095`.
    pub fn sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Reference instant in Unix milliseconds. Every worker of a deployment
    /// must use the same epoch, otherwise their IDs do not sort together.
    pub fn epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    /// Upper bound on how long [`IdWorker::next_id`] spins waiting for the
    /// next millisecond once the sequence is exhausted. Past it the call
    /// fails with [`Error::SequenceWaitTimeout`].
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Replaces the time source.
    pub fn time<U: TimeSource>(self, time: U) -> IdWorkerBuilder<U> {
        IdWorkerBuilder {
            worker_id: self.worker_id,
            datacenter_id: self.datacenter_id,
            sequence: self.sequence,
            epoch: self.epoch,
            max_wait: self.max_wait,
            time,
        }
    }

    /// Validates the configuration and creates the worker.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the worker or datacenter ID is greater
    /// than 31, or the sequence is greater than 4095.
    pub fn build(self) -> Result<IdWorker<T>>
    where
        T: TimeSource,
    {
        check_range("worker_id", self.worker_id, SnowflakeId::MAX_WORKER_ID)?;
        check_range(
            "datacenter_id",
            self.datacenter_id,
            SnowflakeId::MAX_DATACENTER_ID,
        )?;
        check_range("sequence", self.sequence, SnowflakeId::MAX_SEQUENCE)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            worker_id = self.worker_id,
            datacenter_id = self.datacenter_id,
            epoch = self.epoch,
            max_wait = ?self.max_wait,
            "created id worker"
        );

        let state = Mutex::new(State {
            sequence: self.sequence,
            last_timestamp: None,
        });

        Ok(IdWorker {
            #[cfg(feature = "cache-padded")]
            state: CachePadded::new(state),
            #[cfg(not(feature = "cache-padded"))]
            state,
            worker_id: self.worker_id,
            datacenter_id: self.datacenter_id,
            epoch: self.epoch,
            max_wait: self.max_wait,
            time: self.time,
        })
    }
}

fn check_range(field: &'static str, value: u64, max: u64) -> Result<()> {
    if value > max {
        return Err(Error::InvalidArgument {
            field,
            value: value.into(),
            max,
        });
    }
    Ok(())
}
