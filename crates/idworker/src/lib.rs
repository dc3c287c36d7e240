//! A thread-safe Snowflake ID worker.
//!
//! Every ID is a positive 64-bit integer packed as:
//!
//! ```text
//!  Bit Index:  63           63 62            22 21                17 16            12 11             0
//!              +--------------+----------------+--------------------+----------------+---------------+
//!  Field:      | reserved (1) | timestamp (41) | datacenter ID (5)  | worker ID (5)  | sequence (12) |
//!              +--------------+----------------+--------------------+----------------+---------------+
//! ```
//!
//! The timestamp is the number of milliseconds elapsed since a fixed epoch
//! ([`TWITTER_EPOCH`] unless configured otherwise). IDs issued by one
//! [`IdWorker`] are strictly increasing. If the clock reports a time earlier
//! than the last issued ID, generation fails with
//! [`Error::ClockMovedBackward`] instead of fabricating an ID.
//!
//! ```
//! use idworker::IdWorker;
//!
//! let worker = IdWorker::new(1, 1).unwrap();
//! let a = worker.next_id().unwrap();
//! let b = worker.next_id().unwrap();
//! assert!(a < b);
//! assert_eq!(b.worker_id(), 1);
//! assert_eq!(b.datacenter_id(), 1);
//! ```
mod generator;
mod id;
mod time;

pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
