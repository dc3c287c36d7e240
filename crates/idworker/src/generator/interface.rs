use crate::{IdGenStatus, IdWorker, Result, SnowflakeId, TimeSource};

/// A minimal interface over Snowflake generators.
///
/// Lets drivers and benchmarks be written once against any generator, or a
/// wrapper around one.
pub trait IdGenerator {
    /// Generates the next ID, blocking through sequence exhaustion.
    ///
    /// # Errors
    ///
    /// Implementation specific; see [`IdWorker::next_id`].
    fn next_id(&self) -> Result<SnowflakeId>;

    /// Attempts to generate the next ID without blocking.
    ///
    /// # Errors
    ///
    /// Implementation specific; see [`IdWorker::try_poll_id`].
    fn try_poll_id(&self) -> Result<IdGenStatus>;

    fn worker_id(&self) -> u64;

    fn datacenter_id(&self) -> u64;
}

impl<T: TimeSource> IdGenerator for IdWorker<T> {
    fn next_id(&self) -> Result<SnowflakeId> {
        self.next_id()
    }

    fn try_poll_id(&self) -> Result<IdGenStatus> {
        self.try_poll_id()
    }

    fn worker_id(&self) -> u64 {
        self.worker_id()
    }

    fn datacenter_id(&self) -> u64 {
        self.datacenter_id()
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for &G {
    fn next_id(&self) -> Result<SnowflakeId> {
        (**self).next_id()
    }

    fn try_poll_id(&self) -> Result<IdGenStatus> {
        (**self).try_poll_id()
    }

    fn worker_id(&self) -> u64 {
        (**self).worker_id()
    }

    fn datacenter_id(&self) -> u64 {
        (**self).datacenter_id()
    }
}
