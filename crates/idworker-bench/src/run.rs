use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, anyhow};
use idworker::{IdGenerator, SnowflakeId};

/// Outcome of one timed run.
#[derive(Debug, Clone, Copy)]
pub struct Report {
    pub generated: usize,
    pub elapsed: Duration,
    /// Largest ID observed across all threads.
    pub max_id: Option<SnowflakeId>,
}

impl Report {
    pub fn ids_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return f64::INFINITY;
        }
        self.generated as f64 / secs
    }
}

/// Calls `next_id` `count` times, split over `threads` threads sharing
/// `generator`, and times the whole run.
///
/// The first generation error aborts the run.
pub fn run<G>(generator: &G, count: usize, threads: usize) -> anyhow::Result<Report>
where
    G: IdGenerator + Sync,
{
    let threads = threads.max(1);
    let per_thread = count / threads;
    let remainder = count % threads;

    let start = Instant::now();
    let results = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let quota = per_thread + usize::from(i < remainder);
                s.spawn(move || generate(generator, quota))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .map_err(|_| anyhow!("generator thread panicked"))?
            })
            .collect::<anyhow::Result<Vec<_>>>()
    });
    let elapsed = start.elapsed();

    let results = results?;
    Ok(Report {
        generated: results.iter().map(|(n, _)| n).sum(),
        elapsed,
        max_id: results.into_iter().filter_map(|(_, id)| id).max(),
    })
}

fn generate<G: IdGenerator>(
    generator: &G,
    quota: usize,
) -> anyhow::Result<(usize, Option<SnowflakeId>)> {
    let mut last = None;
    for n in 0..quota {
        let id = generator
            .next_id()
            .with_context(|| format!("failed after {n} ids"))?;
        last = Some(id);
    }
    Ok((quota, last))
}
