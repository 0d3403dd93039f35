// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Strategies that hand their jobs to a ThreadPool.  Each builds a
//! pool that expects exactly as many jobs as the partition produces,
//! posts all of them, and joins the pool; the count has to be exact or
//! the join never returns.

use std::sync::Arc;

use error::{Error, Result};
use grid::SharedGrid;
use job::Job;
use pool::ThreadPool;
use render::Renderer;

/// One pool job per row.
pub fn rows(renderer: Arc<Renderer>, grid: &Arc<SharedGrid>, workers: usize) -> Result<()> {
    dispatch(renderer, grid, workers, Job::rows(grid.width(), grid.height()))
}

/// One pool job per `chunk` consecutive cells.  The number of jobs is
/// the cell count divided by `chunk`, rounded up.
pub fn chunks(
    renderer: Arc<Renderer>,
    grid: &Arc<SharedGrid>,
    workers: usize,
    chunk: usize,
) -> Result<()> {
    if chunk == 0 {
        return Err(Error::ZeroChunk);
    }
    dispatch(renderer, grid, workers, Job::chunks(grid.width(), grid.height(), chunk))
}

fn dispatch(
    renderer: Arc<Renderer>,
    grid: &Arc<SharedGrid>,
    workers: usize,
    jobs: Vec<Job>,
) -> Result<()> {
    debug!("posting {} jobs to {} pool workers", jobs.len(), workers);
    let mut pool = ThreadPool::new(workers, jobs.len())?;
    for job in jobs {
        let renderer = Arc::clone(&renderer);
        let grid = Arc::clone(grid);
        pool.post(move || renderer.run(&job, &grid))?;
    }
    pool.join()
}

/// One pool job per cell.  A row's worth of cells is posted as a
/// single batch, so the workers see the whole row at once.
pub fn cells(renderer: Arc<Renderer>, grid: &Arc<SharedGrid>, workers: usize) -> Result<()> {
    let (width, height) = (grid.width(), grid.height());
    debug!("posting {} rows of {} cell jobs to {} pool workers", height, width, workers);
    let mut pool = ThreadPool::new(workers, width * height)?;
    for row in 0..height {
        let batch = Job::row(row, width).range().map(|index| {
            let renderer = Arc::clone(&renderer);
            let grid = Arc::clone(grid);
            let job = Job::cell(index, width);
            move || renderer.run(&job, &grid)
        });
        pool.post_batch(batch)?;
    }
    pool.join()
}
