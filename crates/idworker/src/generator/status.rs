use crate::SnowflakeId;

/// Outcome of a non-blocking generation attempt
/// ([`IdWorker::try_poll_id`]).
///
/// - [`IdGenStatus::Ready`] carries a freshly generated ID.
/// - [`IdGenStatus::Pending`] means all 4096 sequence values of the current
///   millisecond are used up. Nothing was mutated; retry once the clock
///   reaches `yield_until`.
///
/// [`IdWorker::try_poll_id`]: crate::IdWorker::try_poll_id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdGenStatus {
    Ready {
        id: SnowflakeId,
    },
    Pending {
        /// Unix millisecond (inclusive) from which generation can resume.
        yield_until: u64,
    },
}
