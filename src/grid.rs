//! The buffers cells are written into.
//!
//! A `SharedGrid` is what the workers see while a generation is
//! running: one atomic slot per cell, shared by reference (or `Arc`)
//! among every thread.  A slot may be written once.  Jobs are built so
//! that no two of them ever name the same cell, which is why no lock is
//! needed; if that ever stops being true, the second write is refused
//! and counted rather than silently racing, and `finish` reports it.
//!
//! A `Grid` is the finished, immutable result handed to the caller.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use error::{Error, Result};
use palette::Color;
use planes::Pixel;

// High byte set marks a written slot; the low three bytes hold RGB.
const WRITTEN: u32 = 0xFF00_0000;

#[inline]
fn pack(color: Color) -> u32 {
    WRITTEN | (u32::from(color.r) << 16) | (u32::from(color.g) << 8) | u32::from(color.b)
}

#[inline]
fn unpack(slot: u32) -> Color {
    Color::new((slot >> 16) as u8, (slot >> 8) as u8, slot as u8)
}

/// The write-once buffer a generation fills in.
#[derive(Debug)]
pub struct SharedGrid {
    width: usize,
    height: usize,
    slots: Vec<AtomicU32>,
    collisions: AtomicUsize,
}

impl SharedGrid {
    /// Allocate an unwritten buffer of `width * height` cells.
    pub fn new(width: usize, height: usize) -> Result<SharedGrid> {
        let len = match width.checked_mul(height) {
            Some(len) if len > 0 => len,
            _ => return Err(Error::Dimensions { width, height }),
        };
        Ok(SharedGrid {
            width,
            height,
            slots: (0..len).map(|_| AtomicU32::new(0)).collect(),
            collisions: AtomicUsize::new(0),
        })
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store `color` at the flattened `index`.  Returns false, and
    /// leaves the grid alone, if the cell was already written or lies
    /// outside the grid; either way `finish` will report it.
    ///
    /// Relaxed ordering is enough: nobody reads a slot until the
    /// writer has been joined.
    pub fn write(&self, index: usize, color: Color) -> bool {
        let stored = match self.slots.get(index) {
            Some(slot) => slot
                .compare_exchange(0, pack(color), Ordering::Relaxed, Ordering::Relaxed)
                .is_ok(),
            None => false,
        };
        if !stored {
            self.collisions.fetch_add(1, Ordering::Relaxed);
        }
        stored
    }

    /// Check that every cell was written exactly once and copy out the
    /// finished grid.  Only call this once every writer has been
    /// joined.
    pub fn finish(&self) -> Result<Grid> {
        let cells = self.collisions.load(Ordering::Relaxed);
        if cells > 0 {
            return Err(Error::Overlap { cells });
        }
        let slots: Vec<u32> = self.slots.iter().map(|s| s.load(Ordering::Relaxed)).collect();
        let missing = slots.iter().filter(|&&s| s & WRITTEN == 0).count();
        if missing > 0 {
            return Err(Error::Incomplete { missing });
        }
        Ok(Grid {
            width: self.width,
            height: self.height,
            cells: slots.into_iter().map(unpack).collect(),
        })
    }
}

/// A fully computed image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The color at `pixel`.
    pub fn get(&self, pixel: Pixel) -> Color {
        self.cells[pixel.index(self.width)]
    }

    /// One row, left to right.
    pub fn row(&self, row: usize) -> &[Color] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    /// Every cell, row-major.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Flat RGB bytes, the layout image encoders expect.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.cells.len() * 3);
        for c in &self.cells {
            out.extend_from_slice(&[c.r, c.g, c.b]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_empty_buffers() {
        assert!(SharedGrid::new(0, 3).is_err());
        assert!(SharedGrid::new(3, 0).is_err());
    }

    #[test]
    fn cells_are_write_once() {
        let g = SharedGrid::new(2, 1).unwrap();
        assert!(g.write(0, Color::new(1, 2, 3)));
        assert!(!g.write(0, Color::new(9, 9, 9)));
        assert!(g.write(1, Color::default()));
        match g.finish() {
            Err(Error::Overlap { cells: 1 }) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn writes_past_the_end_are_reported() {
        let g = SharedGrid::new(3, 2).unwrap();
        for i in 0..6 {
            assert!(g.write(i, Color::new(4, 5, 6)));
        }
        assert!(!g.write(7, Color::new(1, 1, 1)));
        match g.finish() {
            Err(Error::Overlap { cells: 1 }) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unwritten_cells_are_reported() {
        let g = SharedGrid::new(3, 2).unwrap();
        g.write(4, Color::new(1, 1, 1));
        match g.finish() {
            Err(Error::Incomplete { missing: 5 }) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn black_is_distinct_from_unwritten() {
        let g = SharedGrid::new(1, 1).unwrap();
        g.write(0, Color::default());
        let grid = g.finish().unwrap();
        assert_eq!(grid.cells(), &[Color::default()]);
    }

    #[test]
    fn finished_grids_keep_their_layout() {
        let g = SharedGrid::new(3, 2).unwrap();
        for i in 0..6 {
            g.write(i, Color::new(i as u8, 0, 255));
        }
        let grid = g.finish().unwrap();
        assert_eq!(grid.get(Pixel { row: 1, col: 2 }), Color::new(5, 0, 255));
        assert_eq!(grid.row(1)[0], Color::new(3, 0, 255));
        assert_eq!(&grid.to_rgb()[3..6], &[1, 0, 255]);
    }
}
