// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Renderer bundles the three pure pieces of the pipeline (plane
//! mapping, kernel, palette) and runs a generation with whichever
//! Strategy it is handed.  However the work is cut up, each cell gets
//! the same treatment:
//!
//! ```text
//! Grid[row][col] = palette(kernel(planes(row, col)))
//! ```
//!
//! so every strategy yields the same Grid for the same Renderer.

use std::fmt;
use std::sync::Arc;

use itertools::iproduct;

use counter;
use error::{Error, Result};
use grid::{Grid, SharedGrid};
use job::Job;
use kernel::{Kernel, Rejecting};
use palette::{Color, Palette};
use planes::{Pixel, PlaneMapper};
use pooled;
use spawned;

/// Iteration cap used when none is given.
pub const DEFAULT_LIMIT: u32 = 1000;

/// Chunk size used when none is given.
pub const DEFAULT_CHUNK: usize = 64;

/// How a generation divides its cells among threads.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Everything on the calling thread.  The reference the others are
    /// measured against.
    Sequential,
    /// One fresh thread per cell.
    PerCell,
    /// One fresh thread per row.
    PerRow,
    /// A few long-lived threads claiming cells off a shared atomic
    /// counter.
    Counter {
        /// Number of threads
        workers: usize,
    },
    /// A pool running one job per row.
    PooledRows {
        /// Number of pool workers
        workers: usize,
    },
    /// A pool running one job per `chunk` consecutive cells.
    PooledChunks {
        /// Number of pool workers
        workers: usize,
        /// Cells per job
        chunk: usize,
    },
    /// A pool running one job per cell, posted a row at a time.
    PooledCells {
        /// Number of pool workers
        workers: usize,
    },
}

impl Strategy {
    /// The names `parse` understands.
    pub const NAMES: &'static [&'static str] = &[
        "sequential",
        "cell",
        "row",
        "counter",
        "pool-row",
        "pool-chunk",
        "pool-cell",
    ];

    /// Build a strategy from its name.  `workers` and `chunk` are
    /// ignored by the strategies that have no use for them.
    pub fn parse(name: &str, workers: usize, chunk: usize) -> Option<Strategy> {
        match name {
            "sequential" => Some(Strategy::Sequential),
            "cell" => Some(Strategy::PerCell),
            "row" => Some(Strategy::PerRow),
            "counter" => Some(Strategy::Counter { workers }),
            "pool-row" => Some(Strategy::PooledRows { workers }),
            "pool-chunk" => Some(Strategy::PooledChunks { workers, chunk }),
            "pool-cell" => Some(Strategy::PooledCells { workers }),
            _ => None,
        }
    }

    /// The name `parse` would accept for this strategy.
    pub fn name(&self) -> &'static str {
        match *self {
            Strategy::Sequential => "sequential",
            Strategy::PerCell => "cell",
            Strategy::PerRow => "row",
            Strategy::Counter { .. } => "counter",
            Strategy::PooledRows { .. } => "pool-row",
            Strategy::PooledChunks { .. } => "pool-chunk",
            Strategy::PooledCells { .. } => "pool-cell",
        }
    }

    /// The fixed worker count, for the strategies that have one.
    pub fn workers(&self) -> Option<usize> {
        match *self {
            Strategy::Counter { workers }
            | Strategy::PooledRows { workers }
            | Strategy::PooledChunks { workers, .. }
            | Strategy::PooledCells { workers } => Some(workers),
            _ => None,
        }
    }

    /// Reject parameters that could never produce a grid.
    pub fn validate(&self) -> Result<()> {
        if self.workers() == Some(0) {
            return Err(Error::NoWorkers);
        }
        if let Strategy::PooledChunks { chunk: 0, .. } = *self {
            return Err(Error::ZeroChunk);
        }
        Ok(())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Strategy::PooledChunks { workers, chunk } => {
                write!(f, "{} ({} workers, chunks of {})", self.name(), workers, chunk)
            }
            _ => match self.workers() {
                Some(workers) => write!(f, "{} ({} workers)", self.name(), workers),
                None => write!(f, "{}", self.name()),
            },
        }
    }
}

/// The plane, kernel and palette for a generation.  Cheap to clone;
/// the kernel is shared.
#[derive(Clone)]
pub struct Renderer {
    /// Where the pixels land on the complex plane
    pub planes: PlaneMapper,
    /// How iteration counts become colors
    pub palette: Palette,
    kernel: Arc<dyn Kernel>,
}

impl Renderer {
    /// Assemble a renderer from its parts.
    pub fn new(planes: PlaneMapper, kernel: Arc<dyn Kernel>, palette: Palette) -> Renderer {
        Renderer {
            planes,
            palette,
            kernel,
        }
    }

    /// The classic full view, with the rejecting kernel and the smooth
    /// palette.
    pub fn standard(width: usize, height: usize, limit: u32) -> Result<Renderer> {
        Ok(Renderer::new(
            PlaneMapper::standard(width, height)?,
            Arc::new(Rejecting { limit }),
            Palette::default(),
        ))
    }

    /// The kernel in use.
    pub fn kernel(&self) -> &dyn Kernel {
        &*self.kernel
    }

    /// Compute the color of one cell.
    #[inline]
    pub fn shade(&self, pixel: &Pixel) -> Color {
        let count = self.kernel.evaluate(self.planes.pixel_to_point(pixel));
        self.palette.colorize(count, self.kernel.limit())
    }

    /// Compute every cell of `job` into `grid`.
    pub fn run(&self, job: &Job, grid: &SharedGrid) {
        for (index, pixel) in job.pixels() {
            grid.write(index, self.shade(&pixel));
        }
    }

    fn sequential(&self, grid: &SharedGrid) {
        let width = self.planes.width();
        for (row, col) in iproduct!(0..self.planes.height(), 0..width) {
            let pixel = Pixel { row, col };
            grid.write(pixel.index(width), self.shade(&pixel));
        }
    }

    /// Run a whole generation and return the finished grid.  Nothing is
    /// dispatched unless `strategy` is usable.
    pub fn generate(&self, strategy: Strategy) -> Result<Grid> {
        strategy.validate()?;
        let (width, height) = (self.planes.width(), self.planes.height());
        let grid = Arc::new(SharedGrid::new(width, height)?);
        debug!("generating {}x{} with {}", width, height, strategy);

        match strategy {
            Strategy::Sequential => self.sequential(&grid),
            Strategy::PerCell => spawned::per_cell(self, &grid)?,
            Strategy::PerRow => spawned::per_row(self, &grid)?,
            Strategy::Counter { workers } => counter::pull(self, &grid, workers)?,
            Strategy::PooledRows { workers } => {
                pooled::rows(Arc::new(self.clone()), &grid, workers)?
            }
            Strategy::PooledChunks { workers, chunk } => {
                pooled::chunks(Arc::new(self.clone()), &grid, workers, chunk)?
            }
            Strategy::PooledCells { workers } => {
                pooled::cells(Arc::new(self.clone()), &grid, workers)?
            }
        }

        grid.finish()
    }
}

/// Render the classic full view at `width` by `height` with the
/// default iteration cap.
pub fn generate(width: usize, height: usize, strategy: Strategy) -> Result<Grid> {
    strategy.validate()?;
    Renderer::standard(width, height, DEFAULT_LIMIT)?.generate(strategy)
}
