use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use idworker::{
    IdGenStatus, IdGenerator, IdWorker, MonotonicClock, SystemClock, TWITTER_EPOCH, TimeSource,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// One full millisecond of sequence space. With a fixed clock a fresh worker
// never has to wait within this many IDs.
const TOTAL_IDS: usize = 4096;

fn mock_worker() -> IdWorker<FixedMockTime> {
    IdWorker::from_components(
        1,
        1,
        0,
        FixedMockTime {
            millis: TWITTER_EPOCH + 1,
        },
    )
    .unwrap()
}

/// Hot path: every call is answered from the current millisecond.
fn bench_generator<G: IdGenerator>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Non-blocking path, yielding on `Pending`.
fn bench_generator_poll<G: IdGenerator>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    loop {
                        match generator.try_poll_id().unwrap() {
                            IdGenStatus::Ready { id } => {
                                black_box(id);
                                break;
                            }
                            IdGenStatus::Pending { .. } => std::thread::yield_now(),
                        }
                    }
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// One worker shared by several threads.
fn bench_generator_contended<G: IdGenerator + Send + Sync>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) {
    let mut group = c.benchmark_group(group_name);
    let max_threads = num_cpus::get().max(1);

    for thread_count in [1, 2, 4, 8, 16].into_iter().filter(|t| *t <= max_threads) {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(
            format!("elems/{TOTAL_IDS}/threads/{thread_count}"),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let generator = Arc::new(generator_factory());
                        let barrier = Arc::new(Barrier::new(thread_count + 1));
                        scope(|s| {
                            for _ in 0..thread_count {
                                let generator = Arc::clone(&generator);
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    barrier.wait();
                                    for _ in 0..ids_per_thread {
                                        black_box(generator.next_id().unwrap());
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

fn benchmark_mock_sequential(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/next_id", mock_worker);
}

fn benchmark_mock_sequential_poll(c: &mut Criterion) {
    bench_generator_poll(c, "mock/sequential/try_poll_id", mock_worker);
}

fn benchmark_mock_contended(c: &mut Criterion) {
    bench_generator_contended(c, "mock/contended/next_id", mock_worker);
}

fn benchmark_system_sequential(c: &mut Criterion) {
    bench_generator(c, "system/sequential/next_id", || {
        IdWorker::<SystemClock>::new(1, 1).unwrap()
    });
}

fn benchmark_system_contended(c: &mut Criterion) {
    bench_generator_contended(c, "system/contended/next_id", || {
        IdWorker::<SystemClock>::new(1, 1).unwrap()
    });
}

fn benchmark_mono_sequential(c: &mut Criterion) {
    let clock = MonotonicClock::new();
    bench_generator(c, "mono/sequential/next_id", || {
        IdWorker::from_components(1, 1, 0, clock.clone()).unwrap()
    });
}

fn benchmark_mono_sequential_poll(c: &mut Criterion) {
    let clock = MonotonicClock::new();
    bench_generator_poll(c, "mono/sequential/try_poll_id", || {
        IdWorker::from_components(1, 1, 0, clock.clone()).unwrap()
    });
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential,
    benchmark_mock_sequential_poll,
    benchmark_mock_contended,
    // Wall clock
    benchmark_system_sequential,
    benchmark_system_contended,
    // Monotonic clock
    benchmark_mono_sequential,
    benchmark_mono_sequential_poll,
);
criterion_main!(benches);
