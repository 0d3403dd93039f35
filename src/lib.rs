#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer, many ways
//!
//! The Mandelbrot set is rendered by taking each pixel of an image,
//! mapping it to a point on the complex plane, and repeatedly squaring
//! and adding until the result runs off toward infinity.  How quickly
//! that happens is the "velocity" of the point, which we turn into a
//! color.  Every pixel is independent of every other, which makes the
//! whole thing embarrassingly parallel; the interesting question is
//! how to cut it up.
//!
//! This crate renders the same image with a handful of strategies and
//! lets you compare them:
//!
//! * a fresh thread per cell, or per row (`spawned`),
//! * a few threads pulling cells off an atomic counter (`counter`),
//! * a reusable `ThreadPool` fed rows, fixed-size chunks, or single
//!   cells posted a row at a time (`pooled`).
//!
//! They all write into a `SharedGrid` whose cells can each be written
//! once, so any two jobs that overlap are caught rather than racing,
//! and they all produce identical `Grid`s.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

#[cfg(test)]
extern crate tempfile;

pub mod counter;
pub mod error;
pub mod grid;
pub mod job;
pub mod kernel;
pub mod output;
pub mod palette;
pub mod planes;
pub mod pool;
pub mod pooled;
pub mod render;
pub mod spawned;
pub mod stats;

pub use error::{Error, Result};
pub use grid::{Grid, SharedGrid};
pub use job::Job;
pub use kernel::{Escape, Kernel, Rejecting};
pub use palette::{Color, Palette};
pub use planes::{Pixel, PlaneMapper};
pub use pool::ThreadPool;
pub use render::{generate, Renderer, Strategy};
