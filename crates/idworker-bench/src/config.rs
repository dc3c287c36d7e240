use std::time::Duration;

use anyhow::bail;
use clap::{Parser, ValueEnum};
use idworker::{SnowflakeId, SystemClock, TWITTER_EPOCH, TimeSource};

/// Which clock drives the worker.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    /// The OS wall clock. Regressions surface as errors.
    System,
    /// A ticker anchored to the wall clock at startup. Never goes backward.
    Monotonic,
}

/// Runtime configuration for the `idworker-bench` binary.
///
/// Every flag can also be set through the environment or a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "idworker-bench",
    version,
    about = "Generates Snowflake IDs in a tight loop and reports the elapsed time"
)]
pub struct CliArgs {
    /// Worker ID embedded in every generated ID (0-31).
    ///
    /// Environment variable: `WORKER_ID`
    #[arg(long, env = "WORKER_ID", default_value_t = 1)]
    pub worker_id: u64,

    /// Datacenter ID embedded in every generated ID (0-31).
    ///
    /// Environment variable: `DATACENTER_ID`
    #[arg(long, env = "DATACENTER_ID", default_value_t = 1)]
    pub datacenter_id: u64,

    /// Total number of IDs to generate, across all threads.
    ///
    /// Environment variable: `ID_COUNT`
    #[arg(long, env = "ID_COUNT", default_value_t = 1_000_000)]
    pub count: usize,

    /// Number of threads sharing the one worker.
    ///
    /// Environment variable: `THREADS`
    #[arg(long, env = "THREADS", default_value_t = 1)]
    pub threads: usize,

    /// Epoch in Unix milliseconds. Must not lie in the future.
    ///
    /// Environment variable: `EPOCH_MILLIS`
    #[arg(long, env = "EPOCH_MILLIS", default_value_t = TWITTER_EPOCH)]
    pub epoch: u64,

    /// Time source for the worker.
    ///
    /// Environment variable: `CLOCK`
    #[arg(long, env = "CLOCK", value_enum, default_value_t = ClockKind::System)]
    pub clock: ClockKind,

    /// Optional bound, in milliseconds, on the wait for the next millisecond
    /// once a millisecond's sequence space is used up. Unbounded if unset.
    ///
    /// Environment variable: `MAX_WAIT_MS`
    #[arg(long, env = "MAX_WAIT_MS")]
    pub max_wait_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub worker_id: u64,
    pub datacenter_id: u64,
    pub count: usize,
    pub threads: usize,
    pub epoch: u64,
    pub clock: ClockKind,
    pub max_wait: Option<Duration>,
}

impl TryFrom<CliArgs> for BenchConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.worker_id > SnowflakeId::MAX_WORKER_ID {
            bail!(
                "WORKER_ID ({}) exceeds the worker ID space (max = {})",
                args.worker_id,
                SnowflakeId::MAX_WORKER_ID
            );
        }

        if args.datacenter_id > SnowflakeId::MAX_DATACENTER_ID {
            bail!(
                "DATACENTER_ID ({}) exceeds the datacenter ID space (max = {})",
                args.datacenter_id,
                SnowflakeId::MAX_DATACENTER_ID
            );
        }

        if args.count == 0 {
            bail!("ID_COUNT must be greater than 0");
        }

        if args.threads == 0 {
            bail!("THREADS must be greater than 0");
        }

        if args.threads > args.count {
            bail!(
                "THREADS ({}) must not exceed ID_COUNT ({})",
                args.threads,
                args.count
            );
        }

        let now = SystemClock.current_millis();
        if args.epoch > now {
            bail!(
                "EPOCH_MILLIS ({}) lies in the future (now = {})",
                args.epoch,
                now
            );
        }

        if args.max_wait_ms == Some(0) {
            bail!("MAX_WAIT_MS must be greater than 0 when set");
        }

        Ok(Self {
            worker_id: args.worker_id,
            datacenter_id: args.datacenter_id,
            count: args.count,
            threads: args.threads,
            epoch: args.epoch,
            clock: args.clock,
            max_wait: args.max_wait_ms.map(Duration::from_millis),
        })
    }
}
