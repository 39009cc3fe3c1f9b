//! Concurrent stress test for the sharded accumulator.

use std::collections::BTreeMap;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use search_server::search::ConcurrentAccumulator;

const THREADS: u64 = 8;
const OPERATIONS: usize = 5_000;

fn planned_adds(seed: u64) -> Vec<(i32, i64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..OPERATIONS)
        .map(|_| (rng.random_range(0..64), rng.random_range(-100..=100)))
        .collect()
}

fn planned_erases(seed: u64) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..OPERATIONS / 10)
        .map(|_| rng.random_range(1000..1100))
        .collect()
}

#[test]
fn test_concurrent_add_and_erase_match_sequential() {
    let adds: Vec<_> = (0..THREADS).map(planned_adds).collect();
    let erases: Vec<_> = (0..THREADS).map(|t| planned_erases(t + 100)).collect();

    for shards in [1, 3, 8, 32] {
        let accumulator = ConcurrentAccumulator::new(shards);
        for key in 1000..1100 {
            accumulator.add(key, 1i64);
        }

        thread::scope(|scope| {
            for plan in &adds {
                let accumulator = &accumulator;
                scope.spawn(move || {
                    for &(key, delta) in plan {
                        accumulator.add(key, delta);
                    }
                });
            }
            for plan in &erases {
                let accumulator = &accumulator;
                scope.spawn(move || {
                    for key in plan {
                        accumulator.erase(key);
                    }
                });
            }
        });

        let mut expected = BTreeMap::new();
        for key in 1000..1100 {
            expected.insert(key, 1i64);
        }
        for &(key, delta) in adds.iter().flatten() {
            *expected.entry(key).or_insert(0) += delta;
        }
        for key in erases.iter().flatten() {
            expected.remove(key);
        }

        assert_eq!(accumulator.snapshot(), expected, "shards = {shards}");
    }
}

#[test]
fn test_erase_after_add_phase_removes_everything_erased() {
    let accumulator = ConcurrentAccumulator::new(8);
    let adds = planned_adds(42);

    thread::scope(|scope| {
        for chunk in adds.chunks(OPERATIONS / 4) {
            let accumulator = &accumulator;
            scope.spawn(move || {
                for &(key, delta) in chunk {
                    accumulator.add(key, delta);
                }
            });
        }
    });

    thread::scope(|scope| {
        for start in [0, 16, 32, 48] {
            let accumulator = &accumulator;
            scope.spawn(move || {
                for key in (start..start + 16).filter(|key| key % 2 == 0) {
                    accumulator.erase(&key);
                }
            });
        }
    });

    let snapshot = accumulator.into_snapshot();
    assert!(snapshot.keys().all(|key| key % 2 == 1));
    assert_eq!(snapshot.len(), 32);
}
