use core::fmt;

/// A 64-bit Snowflake ID with a split machine identifier.
///
/// - 1 bit reserved (always zero, so the value fits in an `i64`)
/// - 41 bits timestamp (ms since the worker's epoch)
/// - 5 bits datacenter ID
/// - 5 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21              17 16            12 11             0
///              +--------------+----------------+------------------+----------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | datacenter (5)   | worker (5)     | sequence (12) |
///              +--------------+----------------+------------------+----------------+---------------+
///              |<----------------- MSB ------------- 64 bits ------------- LSB ------------------->|
/// ```
///
/// All decoding is done from the raw value alone; no generator is needed to
/// take an ID apart.
///
/// ```
/// use idworker::SnowflakeId;
///
/// let id = SnowflakeId::from_components(1000, 1, 1, 0);
/// assert_eq!(id.to_raw(), (1000 << 22) | (1 << 17) | (1 << 12));
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.datacenter_id(), 1);
/// assert_eq!(id.worker_id(), 1);
/// assert_eq!(id.sequence(), 0);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 41;

    /// Width of the datacenter ID field.
    pub const DATACENTER_ID_BITS: u32 = 5;

    /// Width of the worker ID field.
    pub const WORKER_ID_BITS: u32 = 5;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 12;

    /// Number of bits to shift the worker ID to its correct position (bit 12).
    pub const WORKER_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Number of bits to shift the datacenter ID to its correct position (bit
    /// 17).
    pub const DATACENTER_ID_SHIFT: u32 = Self::SEQUENCE_BITS + Self::WORKER_ID_BITS;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 =
        Self::SEQUENCE_BITS + Self::WORKER_ID_BITS + Self::DATACENTER_ID_BITS;

    /// Largest encodable timestamp, roughly 69 years past the epoch.
    pub const MAX_TIMESTAMP: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Largest valid datacenter ID (31).
    pub const MAX_DATACENTER_ID: u64 = (1 << Self::DATACENTER_ID_BITS) - 1;

    /// Largest valid worker ID (31).
    pub const MAX_WORKER_ID: u64 = (1 << Self::WORKER_ID_BITS) - 1;

    /// Largest sequence value within one millisecond (4095). Also the mask
    /// applied when the sequence is incremented.
    pub const MAX_SEQUENCE: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    const RESERVED_MASK: u64 = 1 << 63;

    /// Packs the four fields into an ID. Each field is masked to its width.
    pub const fn from_components(
        timestamp: u64,
        datacenter_id: u64,
        worker_id: u64,
        sequence: u64,
    ) -> Self {
        let timestamp = (timestamp & Self::MAX_TIMESTAMP) << Self::TIMESTAMP_SHIFT;
        let datacenter_id =
            (datacenter_id & Self::MAX_DATACENTER_ID) << Self::DATACENTER_ID_SHIFT;
        let worker_id = (worker_id & Self::MAX_WORKER_ID) << Self::WORKER_ID_SHIFT;
        let sequence = sequence & Self::MAX_SEQUENCE;
        Self {
            id: timestamp | datacenter_id | worker_id | sequence,
        }
    }

    /// Wraps a raw value without validation. See [`Self::is_valid`].
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Returns the ID as a signed integer, the representation most databases
    /// and languages without unsigned types expect. Never negative for IDs
    /// produced by a generator.
    pub const fn to_i64(&self) -> i64 {
        self.id as i64
    }

    /// Milliseconds since the epoch of the worker that produced this ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::MAX_TIMESTAMP
    }

    pub const fn datacenter_id(&self) -> u64 {
        (self.id >> Self::DATACENTER_ID_SHIFT) & Self::MAX_DATACENTER_ID
    }

    pub const fn worker_id(&self) -> u64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::MAX_WORKER_ID
    }

    pub const fn sequence(&self) -> u64 {
        self.id & Self::MAX_SEQUENCE
    }

    /// Absolute generation time in Unix milliseconds, given the epoch the ID
    /// was generated against.
    pub const fn unix_millis(&self, epoch: u64) -> u64 {
        self.timestamp() + epoch
    }

    /// Returns `false` if the reserved sign bit is set. Such a value can never
    /// come out of a generator.
    pub const fn is_valid(&self) -> bool {
        self.id & Self::RESERVED_MASK == 0
    }

    /// Returns the ID as a zero-padded 20-digit string, which sorts
    /// lexicographically in the same order as the integers.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl From<SnowflakeId> for i64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_i64()
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("raw", &format_args!("0x{:016x} ({})", self.id, self.id))
            .field("timestamp", &self.timestamp())
            .field("datacenter_id", &self.datacenter_id())
            .field("worker_id", &self.worker_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}
