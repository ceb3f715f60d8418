use bitmap::{
    bitmaps::{Bitmap, GuardedBitmap, LockFreeBitmap, PlainBitmap, SyncBitmap},
    statistics::Stats,
};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use std::{
    hint::black_box,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};
use tqdm::tqdm;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum Variant {
    Plain,
    Guarded,
    LockFree,
}

/// Throughput sweep over the bitmap concurrency strategies
#[derive(Parser, Debug)]
#[command(name = "bitmap-bench")]
#[command(about = "Compares plain, lock-guarded and lock-free bitmaps", long_about = None)]
struct Args {
    /// Number of bits in each bitmap
    #[arg(long, default_value_t = 1_000_000)]
    bits: usize,

    /// Read-then-toggle operations performed by each worker thread
    #[arg(long, default_value_t = 1_000_000)]
    ops: usize,

    /// Distance between two consecutive bits touched by a worker
    #[arg(long, default_value_t = 50)]
    stride: usize,

    /// Number of worker threads (comma-separated list, e.g., "1,2,4,8")
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![1, 2, 4, 8])]
    threads: Vec<usize>,

    /// Bitmap variants to run (comma-separated list). `plain` only runs single-threaded
    #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = vec![Variant::Plain, Variant::Guarded, Variant::LockFree])]
    variants: Vec<Variant>,

    /// Seed for the workers' starting offsets
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print one JSON report per job instead of a summary line
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct JobReport {
    variant: Variant,
    threads: usize,
    bits: usize,
    stats: Stats,
    elapsed_secs: f64,
    ops_per_sec: f64,
}

/// Walks `ops` strided indices over `len` bits starting at `start`, handing
/// each one to `flip`, which reads the bit and writes back its negation.
fn toggle_loop(
    len: usize,
    start: usize,
    ops: usize,
    stride: usize,
    mut flip: impl FnMut(usize),
) -> Stats {
    let mut stats = Stats::new();
    let mut index = start;
    for _ in 0..ops {
        flip(index);
        stats.bump_reads();
        stats.bump_writes();
        index = (index + stride) % len;
    }
    stats
}

fn toggle_exclusive<B: Bitmap>(bitmap: &mut B, start: usize, ops: usize, stride: usize) -> Stats {
    toggle_loop(bitmap.len(), start, ops, stride, |i| {
        let value = black_box(bitmap.get(i));
        bitmap.set(i, !value);
    })
}

fn toggle_shared<B: SyncBitmap>(bitmap: &B, start: usize, ops: usize, stride: usize) -> Stats {
    toggle_loop(bitmap.len(), start, ops, stride, |i| {
        let value = black_box(bitmap.get(i));
        bitmap.set(i, !value);
    })
}

fn run_shared_job<B: SyncBitmap + 'static>(
    bitmap: Arc<B>,
    num_threads: usize,
    ops: usize,
    stride: usize,
    seed: u64,
) -> (Stats, Duration) {
    let mut rng = StdRng::seed_from_u64(seed);
    let starts: Vec<usize> = (0..num_threads)
        .map(|_| rng.random_range(0..bitmap.len()))
        .collect();

    let start_time = Instant::now();
    let handles: Vec<_> = starts
        .into_iter()
        .map(|start| {
            let bitmap = Arc::clone(&bitmap);
            thread::spawn(move || toggle_shared(bitmap.as_ref(), start, ops, stride))
        })
        .collect();

    let mut combined_stats = Stats::new();
    for handle in handles {
        let local_stats = handle.join().expect("Thread panicked");
        combined_stats = combined_stats.merge(&local_stats)
    }

    (combined_stats, start_time.elapsed())
}

fn run_job(args: &Args, variant: Variant, num_threads: usize) -> JobReport {
    let (stats, elapsed) = match variant {
        Variant::Plain => {
            let mut bitmap = PlainBitmap::new(args.bits);
            let start = StdRng::seed_from_u64(args.seed).random_range(0..bitmap.len());
            let start_time = Instant::now();
            let stats = toggle_exclusive(&mut bitmap, start, args.ops, args.stride);
            (stats, start_time.elapsed())
        }
        Variant::Guarded => run_shared_job(
            Arc::new(GuardedBitmap::new(args.bits)),
            num_threads,
            args.ops,
            args.stride,
            args.seed,
        ),
        Variant::LockFree => run_shared_job(
            Arc::new(LockFreeBitmap::new(args.bits)),
            num_threads,
            args.ops,
            args.stride,
            args.seed,
        ),
    };

    JobReport {
        variant,
        threads: num_threads,
        bits: args.bits,
        stats,
        elapsed_secs: elapsed.as_secs_f64(),
        ops_per_sec: stats.get_total_ops() as f64 / elapsed.as_secs_f64(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    assert!(args.bits > 0, "--bits must be greater than 0");

    let mut jobs = Vec::new();
    for &variant in &args.variants {
        for &num_threads in &args.threads {
            if variant == Variant::Plain && num_threads != 1 {
                warn!(num_threads, "plain bitmap is unsynchronized, skipping");
                continue;
            }
            jobs.push((variant, num_threads));
        }
    }

    info!(
        bits = args.bits,
        ops = args.ops,
        stride = args.stride,
        total_jobs = jobs.len(),
        "starting sweep"
    );

    for (variant, num_threads) in tqdm(jobs.into_iter()) {
        let report = run_job(&args, variant, num_threads);
        if args.json {
            println!(
                "{}",
                serde_json::to_string(&report).expect("report serializes")
            );
        } else {
            info!(
                ?variant,
                threads = report.threads,
                ops = report.stats.get_total_ops(),
                elapsed_secs = report.elapsed_secs,
                ops_per_sec = report.ops_per_sec,
                "job done"
            );
        }
    }

    info!("all jobs completed");
}
