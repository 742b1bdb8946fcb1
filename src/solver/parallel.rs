//! Multi-threaded expansion of one depth level.
//!
//! Workers pull fixed-size chunks of the frontier from a shared counter and
//! expand them against the read-only visited map of earlier levels. Results
//! are parked per chunk behind a mutex and handed back in chunk order, so the
//! single-threaded merge sees successors in exactly the order a sequential
//! run would produce them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use parking_lot::Mutex;

use crate::board::IllegalMoveError;

use super::engine::{expand, Expansion, FrontierEntry, Level};

/// Chunks handed to each worker on average; more chunks balance better.
const CHUNKS_PER_WORKER: usize = 8;
const MIN_CHUNK: usize = 16;

type ChunkResult = Option<Result<Expansion, IllegalMoveError>>;

/// Expand `frontier` on `workers` threads.
///
/// The returned expansions are in chunk order and end with the first chunk
/// that reached the target, if any. Chunks after it are not needed and may be
/// skipped by the workers.
pub(crate) fn expand_parallel(
    frontier: &[FrontierEntry],
    level: &Level<'_>,
    workers: usize,
) -> Result<Vec<Expansion>, IllegalMoveError> {
    let chunk_size = (frontier.len() / (workers * CHUNKS_PER_WORKER)).max(MIN_CHUNK);
    let chunks: Vec<&[FrontierEntry]> = frontier.chunks(chunk_size).collect();

    let next_chunk = AtomicUsize::new(0);
    let first_stop = AtomicUsize::new(usize::MAX);
    let results: Mutex<Vec<ChunkResult>> = Mutex::new((0..chunks.len()).map(|_| None).collect());

    thread::scope(|scope| {
        for _ in 0..workers.min(chunks.len()) {
            scope.spawn(|| loop {
                let i = next_chunk.fetch_add(1, Ordering::Relaxed);
                if i >= chunks.len() || i > first_stop.load(Ordering::Relaxed) {
                    break;
                }
                let result = expand(chunks[i], level);
                if result.as_ref().map_or(true, Expansion::found_target) {
                    first_stop.fetch_min(i, Ordering::Relaxed);
                }
                results.lock()[i] = Some(result);
            });
        }
    });

    let mut ordered = Vec::with_capacity(chunks.len());
    for slot in results.into_inner() {
        match slot {
            Some(Ok(expansion)) => {
                let hit = expansion.found_target();
                ordered.push(expansion);
                if hit {
                    break;
                }
            }
            Some(Err(err)) => return Err(err),
            None => break,
        }
    }
    Ok(ordered)
}
