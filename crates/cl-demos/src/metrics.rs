//! Host-side latency and allocation counters, compiled in with the
//! `metrics` feature.

use once_cell::sync::Lazy;
use std::{
    collections::BTreeMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Instant,
};

/* ───────────── raw latencies ───────────────────────── */

static TIMES: Lazy<Mutex<Vec<(&'static str, u128)>>> =
    Lazy::new(|| Mutex::new(Vec::new()));

/// Call from the wrapper: `let t = Instant::now();` before the operation,
/// `record("upload", t)` after it.
pub fn record(name: &'static str, start: Instant) {
    let dur = start.elapsed().as_micros();
    let mut times = TIMES.lock().unwrap_or_else(|p| p.into_inner());
    times.push((name, dur));
}

/* ───────────── live device buffers ─────────────────── */

pub static ALLOCS:      AtomicUsize = AtomicUsize::new(0);
pub static ALLOC_BYTES: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn track_alloc(bytes: usize) {
    ALLOCS.fetch_add(1, Ordering::Relaxed);
    ALLOC_BYTES.fetch_add(bytes, Ordering::Relaxed);
}

pub(crate) fn track_free(bytes: usize) {
    ALLOCS.fetch_sub(1, Ordering::Relaxed);
    ALLOC_BYTES.fetch_sub(bytes, Ordering::Relaxed);
}

/// Per-operation `(samples, mean µs, p95 µs)`, drained from the log.
pub fn drain() -> BTreeMap<&'static str, (usize, u128, u128)> {
    let samples: Vec<_> = {
        let mut times = TIMES.lock().unwrap_or_else(|p| p.into_inner());
        times.drain(..).collect()
    };
    aggregate(samples)
}

fn aggregate(
    samples: impl IntoIterator<Item = (&'static str, u128)>,
) -> BTreeMap<&'static str, (usize, u128, u128)> {
    let mut map: BTreeMap<&'static str, Vec<u128>> = BTreeMap::new();
    for (name, us) in samples {
        map.entry(name).or_default().push(us);
    }

    map.into_iter()
        .map(|(name, mut v)| {
            v.sort_unstable();
            let mean = v.iter().sum::<u128>() / v.len() as u128;
            let p95 = v[((v.len() * 95) / 100).saturating_sub(1)];
            (name, (v.len(), mean, p95))
        })
        .collect()
}

/* ───────────── summary ─────────────────────────────── */

/// Call once at the end of `main()`.
pub fn summary() {
    log::info!("── metrics summary ──");
    for (name, (n, mean, p95)) in drain() {
        log::info!("{:<18} n={:>3} mean={:>7} µs   p95={:>7} µs", name, n, mean, p95);
    }

    let allocs = ALLOCS.load(Ordering::Relaxed);
    let bytes  = ALLOC_BYTES.load(Ordering::Relaxed);
    log::info!("live GPU buffers: {}   ({} KiB)", allocs, bytes / 1024);
}
