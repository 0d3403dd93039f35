// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can stop a generation from producing a grid.  All
//! of the configuration failures are caught before a single job is
//! dispatched; the rest are resource or invariant failures.

use std::io;

/// The error type shared by the whole crate.
#[derive(Debug, Fail)]
pub enum Error {
    /// The integral plane has no cells, or more cells than we can
    /// address.
    #[fail(display = "invalid grid dimensions {}x{}", width, height)]
    Dimensions {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },

    /// The corners of the complex plane are in the wrong order.
    #[fail(display = "invalid complex region: {}", _0)]
    Region(String),

    /// A worker-based strategy or pool was asked to run with no
    /// workers; nothing would ever drain the queue.
    #[fail(display = "worker count must be at least 1")]
    NoWorkers,

    /// A chunked strategy was asked for chunks of no cells.
    #[fail(display = "chunk size must be at least 1")]
    ZeroChunk,

    /// More jobs were posted to a pool than it was told to expect.
    #[fail(display = "pool expected {} jobs; refusing to post more", expected)]
    JobOverflow {
        /// The job count the pool was built with
        expected: usize,
    },

    /// A pool was promised more jobs than its countdown can hold.
    #[fail(display = "a pool cannot count down {} jobs", expected)]
    JobCount {
        /// The job count the pool was asked for
        expected: usize,
    },

    /// The operating system would not give us another thread.
    #[fail(display = "could not spawn thread: {}", _0)]
    Spawn(#[cause] io::Error),

    /// A worker thread died before finishing its work.
    #[fail(display = "a worker thread panicked")]
    WorkerPanicked,

    /// Two jobs wrote the same cell, or a job wrote past the end of
    /// the grid.
    #[fail(display = "{} writes hit a cell already written or outside the grid", cells)]
    Overlap {
        /// Number of rejected writes
        cells: usize,
    },

    /// Some cells were never written.
    #[fail(display = "{} cells were never written", missing)]
    Incomplete {
        /// Number of unwritten cells
        missing: usize,
    },

    /// Writing the finished grid failed.
    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = ::std::result::Result<T, Error>;
