//! Concurrent access tests
//!
//! Many threads share one store. Appends must partition the file into
//! contiguous, non-overlapping records, and reads racing with appends must
//! never see a partial record.

use std::collections::HashSet;
use std::fs;
use std::sync::Arc;
use std::thread;

use commitlog::store::{Store, StoreConfig};
use rand::Rng;
use tempfile::TempDir;

const THREADS: usize = 8;
const APPENDS_PER_THREAD: usize = 50;

fn payload_for(thread_id: usize, i: usize, filler: usize) -> Vec<u8> {
    let mut payload = format!("t{}-r{}:", thread_id, i).into_bytes();
    payload.extend(std::iter::repeat(b'x').take(filler));
    payload
}

/// Concurrent appends get distinct ranges that tile the file with no gaps.
#[test]
fn test_concurrent_appends_partition_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("concurrent.store");
    // Small buffer so appends regularly spill into the file mid-run.
    let config = StoreConfig::with_buffer_capacity(64);
    let store = Arc::new(Store::open_path(&path, &config).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut rng = rand::thread_rng();
                let mut results = Vec::with_capacity(APPENDS_PER_THREAD);
                for i in 0..APPENDS_PER_THREAD {
                    let payload = payload_for(t, i, rng.gen_range(0..200));
                    let (n, pos) = store.append(&payload).unwrap();
                    results.push((n, pos, payload));
                }
                results
            })
        })
        .collect();

    let mut records: Vec<(u64, u64, Vec<u8>)> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(records.len(), THREADS * APPENDS_PER_THREAD);

    records.sort_by_key(|(_, pos, _)| *pos);

    let positions: HashSet<u64> = records.iter().map(|(_, pos, _)| *pos).collect();
    assert_eq!(positions.len(), records.len(), "positions must be unique");

    let mut expected = 0u64;
    for (n, pos, payload) in &records {
        assert_eq!(*pos, expected, "gap or overlap at offset {}", expected);
        assert_eq!(*n, 8 + payload.len() as u64);
        expected += n;
    }
    assert_eq!(store.size().unwrap(), expected);

    for (_, pos, payload) in &records {
        assert_eq!(&store.read(*pos).unwrap(), payload);
    }

    let store = Arc::try_unwrap(store).ok().unwrap();
    store.close().unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), expected);
}

/// Each thread reads back its own record right after appending it while
/// other threads keep appending.
#[test]
fn test_reads_interleaved_with_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("interleaved.store");
    let store = Arc::new(Store::open_path(&path, &StoreConfig::default()).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..APPENDS_PER_THREAD {
                    let payload = payload_for(t, i, i);
                    let (_, pos) = store.append(&payload).unwrap();
                    assert_eq!(store.read(pos).unwrap(), payload);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

/// Readers scanning already-known records never fail while writers append.
#[test]
fn test_readers_see_complete_records_during_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scan.store");
    let store = Arc::new(Store::open_path(&path, &StoreConfig::default()).unwrap());

    let seeded: Vec<(u64, Vec<u8>)> = (0..20)
        .map(|i| {
            let payload = payload_for(99, i, 16);
            (store.append(&payload).unwrap().1, payload)
        })
        .collect();
    let seeded = Arc::new(seeded);

    let writers: Vec<_> = (0..THREADS / 2)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..APPENDS_PER_THREAD {
                    store.append(&payload_for(t, i, 32)).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..THREADS / 2)
        .map(|_| {
            let store = Arc::clone(&store);
            let seeded = Arc::clone(&seeded);
            thread::spawn(move || {
                for _ in 0..10 {
                    for (pos, payload) in seeded.iter() {
                        assert_eq!(&store.read(*pos).unwrap(), payload);
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    let seeded_bytes: u64 = seeded.iter().map(|(_, p)| 8 + p.len() as u64).sum();
    let written_bytes: u64 = (0..THREADS / 2)
        .flat_map(|t| (0..APPENDS_PER_THREAD).map(move |i| payload_for(t, i, 32)))
        .map(|p| 8 + p.len() as u64)
        .sum();
    assert_eq!(store.size().unwrap(), seeded_bytes + written_bytes);
}
