/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC, in Unix
/// milliseconds. The default epoch of every [`IdWorker`].
///
/// [`IdWorker`]: crate::IdWorker
pub const TWITTER_EPOCH: u64 = 1_288_834_974_657;

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: u64 = 1_420_070_400_000;

/// Unix epoch. Timestamps are then plain Unix milliseconds.
pub const UNIX_EPOCH: u64 = 0;

/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// Generators read the clock through this trait so that tests can plug in a
/// fixed or stepping clock, and deployments can pick between the raw system
/// clock ([`SystemClock`]) and a ticker that never goes backward
/// ([`MonotonicClock`]).
///
/// The value is absolute. Subtracting the epoch is the generator's job.
///
/// # Example
///
/// ```
/// use idworker::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
///
/// [`SystemClock`]: crate::SystemClock
/// [`MonotonicClock`]: crate::MonotonicClock
pub trait TimeSource {
    /// Returns the current time in milliseconds since 1970-01-01 UTC.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
