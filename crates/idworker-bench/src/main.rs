mod config;
mod run;
mod telemetry;

use clap::Parser;
use config::{BenchConfig, CliArgs, ClockKind};
use idworker::{IdWorker, IdWorkerBuilder, MonotonicClock, SystemClock, TimeSource};
use run::{Report, run};
use telemetry::init_telemetry;

// Using mimalloc so that allocator contention does not skew multi-threaded
// runs.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = BenchConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let report = match config.clock {
        ClockKind::System => execute(&config, SystemClock)?,
        ClockKind::Monotonic => execute(&config, MonotonicClock::new())?,
    };

    log_report(&config, &report);
    println!("{}ms", report.elapsed.as_millis());
    Ok(())
}

fn execute<T>(config: &BenchConfig, time: T) -> anyhow::Result<Report>
where
    T: TimeSource + Sync,
{
    let worker = build_worker(config, time)?;
    run(&worker, config.count, config.threads)
}

fn build_worker<T: TimeSource>(config: &BenchConfig, time: T) -> idworker::Result<IdWorker<T>> {
    let builder = IdWorkerBuilder::new()
        .worker_id(config.worker_id)
        .datacenter_id(config.datacenter_id)
        .epoch(config.epoch);
    let builder = match config.max_wait {
        Some(max_wait) => builder.max_wait(max_wait),
        None => builder,
    };
    builder.time(time).build()
}

fn log_startup_info(config: &BenchConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting id generation with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Generating {} ids on {} thread(s) as worker {}/{}",
            config.count,
            config.threads,
            config.datacenter_id,
            config.worker_id
        );
    }
}

fn log_report(config: &BenchConfig, report: &Report) {
    tracing::info!(
        generated = report.generated,
        elapsed_ms = report.elapsed.as_millis() as u64,
        ids_per_sec = report.ids_per_sec() as u64,
        "Run finished"
    );

    if let Some(id) = report.max_id {
        tracing::info!(
            id = %id,
            timestamp = id.timestamp(),
            unix_millis = id.unix_millis(config.epoch),
            datacenter_id = id.datacenter_id(),
            worker_id = id.worker_id(),
            sequence = id.sequence(),
            "Largest id"
        );
    }
}
