//! Workers partitioning a shared index space through a mutex-guarded
//! registry.
//!
//! Each worker repeatedly picks a chunk of the space and claims it before
//! processing. The registry is single-threaded by design, so every claim
//! goes through one critical section; a `false` return means another worker
//! already processed the whole chunk and this one moves on.

use std::sync::{Arc, Mutex};
use std::thread;

use disjoint_intervals::{Interval, IntervalRegistry};

const SPACE: u64 = 10_000;
const CHUNK: u64 = 64;
const WORKERS: u64 = 4;

fn main() {
    let registry = Arc::new(Mutex::new(IntervalRegistry::new()));

    let handles: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let mut processed = 0u64;
                let mut skipped = 0u64;
                // stride the chunks so workers collide on purpose
                let mut low = (worker * CHUNK / 2) % SPACE;
                while low < SPACE {
                    let high = (low + CHUNK - 1).min(SPACE - 1);
                    let fresh = registry
                        .lock()
                        .expect("registry lock poisoned")
                        .claim(Interval::new(low, high));
                    if fresh {
                        processed += 1;
                    } else {
                        skipped += 1;
                    }
                    low += CHUNK;
                }
                (worker, processed, skipped)
            })
        })
        .collect();

    for handle in handles {
        let (worker, processed, skipped) = handle.join().expect("worker panicked");
        println!("worker {worker}: processed {processed} chunks, skipped {skipped}");
    }

    let registry = registry.lock().expect("registry lock poisoned");
    let stored: Vec<_> = registry.iter().collect();
    println!("coverage collapsed to {} interval(s): {stored:?}", stored.len());
    assert!(registry.covers(&Interval::new(0, SPACE - 1)));
}
