//! Writes finished grids out as PPM pixmaps.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;

use error::Result;
use grid::Grid;

/// Encode `grid` as a PPM onto `out`.  `ascii` selects the plain `P3`
/// form; otherwise the binary `P6` form is written.
pub fn encode_pnm<W: Write>(out: W, grid: &Grid, ascii: bool) -> Result<()> {
    let encoding = if ascii {
        SampleEncoding::Ascii
    } else {
        SampleEncoding::Binary
    };
    let pixels = grid.to_rgb();
    let mut encoder = PNMEncoder::new(out).with_subtype(PNMSubtype::Pixmap(encoding));
    encoder.encode(
        &pixels[..],
        grid.width() as u32,
        grid.height() as u32,
        ColorType::RGB(8),
    )?;
    Ok(())
}

/// Write `grid` to the file at `path`.
pub fn write_pnm<P: AsRef<Path>>(path: P, grid: &Grid, ascii: bool) -> Result<()> {
    let output = BufWriter::new(File::create(path)?);
    encode_pnm(output, grid, ascii)
}
