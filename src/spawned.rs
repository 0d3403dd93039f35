//! The unmanaged strategies: a brand new thread for every job, all of
//! them spawned before any is joined.  Thread creation dominates the
//! cost here, which is the point; these are the floor the pooled
//! strategies are measured against.
//!
//! There is no cap on how many threads get spawned.  A grid large
//! enough to exhaust the operating system's threads fails with
//! `Error::Spawn`; threads already running are still joined before we
//! return.

use crossbeam;
use crossbeam::thread::ScopedJoinHandle;

use error::{Error, Result};
use grid::SharedGrid;
use job::Job;
use render::Renderer;

/// One thread per cell.
pub fn per_cell(renderer: &Renderer, grid: &SharedGrid) -> Result<()> {
    spawn_each(renderer, grid, Job::cells(grid.width(), grid.height()))
}

/// One thread per row.
pub fn per_row(renderer: &Renderer, grid: &SharedGrid) -> Result<()> {
    spawn_each(renderer, grid, Job::rows(grid.width(), grid.height()))
}

fn spawn_each(renderer: &Renderer, grid: &SharedGrid, jobs: Vec<Job>) -> Result<()> {
    debug!("spawning {} threads", jobs.len());
    let outcome = crossbeam::scope(|spawner| {
        let mut handles: Vec<ScopedJoinHandle<()>> = Vec::with_capacity(jobs.len());
        for job in jobs {
            match spawner.builder().spawn(move |_| renderer.run(&job, grid)) {
                Ok(handle) => handles.push(handle),
                // The scope joins whatever already started.
                Err(e) => return Err(Error::Spawn(e)),
            }
        }
        join_all(handles)
    });
    outcome.map_err(|_| Error::WorkerPanicked)?
}

/// Join every handle, reporting a panic in any of them.
pub(crate) fn join_all(handles: Vec<ScopedJoinHandle<()>>) -> Result<()> {
    let mut panicked = false;
    for handle in handles {
        panicked |= handle.join().is_err();
    }
    if panicked {
        Err(Error::WorkerPanicked)
    } else {
        Ok(())
    }
}
