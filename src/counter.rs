//! Dynamic, lock-free work distribution.  A handful of threads share
//! one atomic counter; each `fetch_add` hands out the next unclaimed
//! cell, so no two threads ever see the same index and nobody waits on
//! anybody.  Expensive cells (the ones deep in the set) don't hold up
//! a statically assigned share, since whoever is free takes the next
//! cell.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam;

use error::{Error, Result};
use grid::SharedGrid;
use job::Job;
use render::Renderer;
use spawned::join_all;

/// Fill `grid` with `workers` threads pulling cells off a counter.
pub fn pull(renderer: &Renderer, grid: &SharedGrid, workers: usize) -> Result<()> {
    if workers == 0 {
        return Err(Error::NoWorkers);
    }
    let (total, width) = (grid.len(), grid.width());
    let next = AtomicUsize::new(0);
    let next = &next;
    debug!("{} counter workers pulling from {} cells", workers, total);

    let outcome = crossbeam::scope(|spawner| {
        let mut handles = Vec::with_capacity(workers);
        for id in 0..workers {
            let spawned = spawner
                .builder()
                .name(format!("mandel-counter-{}", id))
                .spawn(move |_| {
                    let mut claimed = 0;
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        if index >= total {
                            break;
                        }
                        renderer.run(&Job::cell(index, width), grid);
                        claimed += 1;
                    }
                    trace!("counter worker {} computed {} cells", id, claimed);
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => return Err(Error::Spawn(e)),
            }
        }
        join_all(handles)
    });
    outcome.map_err(|_| Error::WorkerPanicked)?
}
