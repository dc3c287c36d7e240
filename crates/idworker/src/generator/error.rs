use core::time::Duration;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors an [`IdWorker`] can report.
///
/// Construction errors and clock errors are separate variants on purpose: the
/// first calls for fixing configuration, the second for investigating clock
/// synchronisation. None of them are retried internally.
///
/// [`IdWorker`]: crate::IdWorker
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A constructor argument is outside its bit range.
    #[error("{field} must be between 0 and {max}, got {value}")]
    InvalidArgument {
        field: &'static str,
        value: i128,
        max: u64,
    },

    /// The clock reads earlier than the timestamp of the last issued ID.
    ///
    /// No ID is generated and the generator state is left untouched. The
    /// caller decides whether to abort, alert, or retry later.
    #[error("clock moved backward by {drift_millis}ms, refusing to generate an id")]
    ClockMovedBackward {
        /// `last_timestamp - now`, in milliseconds.
        drift_millis: u64,
    },

    /// The clock reads earlier than the configured epoch, so the timestamp
    /// field cannot be encoded.
    #[error("clock reads {now}ms which is before the epoch {epoch}ms")]
    ClockBeforeEpoch { now: u64, epoch: u64 },

    /// The sequence space of the current millisecond was exhausted and the
    /// clock did not advance within the configured maximum wait.
    ///
    /// Only reported when a bound was set with
    /// [`IdWorkerBuilder::max_wait`]; the default wait is unbounded.
    ///
    /// [`IdWorkerBuilder::max_wait`]: crate::IdWorkerBuilder::max_wait
    #[error("sequence exhausted and the clock did not advance within {waited:?}")]
    SequenceWaitTimeout { waited: Duration },

    /// Another thread panicked while holding the generator lock.
    ///
    /// Not present with the `parking-lot` feature, whose mutex does not
    /// poison.
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
