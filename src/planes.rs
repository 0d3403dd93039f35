//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0 in
//! the upper left, and a rectangle on the complex plane with an
//! arbitrary pair of corners defining the leftlower and rightupper
//! corners of the region being rendered.
//!
//! Every strategy goes through the same mapper, so a given pixel maps
//! to the same point no matter which thread computes it.

use num::Complex;

use error::{Error, Result};

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the lower-left corner and upper-right corner of the
/// Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// A cell of the integral plane, addressed the way images are: row
/// first, counting down from the top.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pixel {
    /// Zero-based row, counted from the top edge
    pub row: usize,
    /// Zero-based column, counted from the left edge
    pub col: usize,
}

impl Pixel {
    /// Un-flatten a row-major index.
    #[inline]
    pub fn from_index(index: usize, width: usize) -> Pixel {
        Pixel {
            row: index / width,
            col: index % width,
        }
    }

    /// Flatten to a row-major index.
    #[inline]
    pub fn index(&self, width: usize) -> usize {
        self.row * width + self.col
    }
}

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex cartesian plane.  Maps pixels of the one to points on
/// the other.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// Width and height of the integral plane.
    pub integral_plane: IntegralPlane,
    /// The two coordinates defining the complex cartesian plane,
    /// left-lower and right-upper
    pub complex_plane: ComplexPlane,
    // Size of one pixel on the complex plane, real and imaginary.
    steps: (f64, f64),
}

/// Left-lower corner of the region rendered when none is given.
pub const DEFAULT_LEFTLOWER: (f64, f64) = (-2.103, -1.238);

/// Right-upper corner of the region rendered when none is given.
pub const DEFAULT_RIGHTUPPER: (f64, f64) = (1.201, 1.240);

impl PlaneMapper {
    /// Constructor.  Takes the dimensions of the integral plane, and
    /// two points describing the complex plane.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(Error::Dimensions { width, height });
        }

        if !(rightupper.re > leftlower.re) {
            return Err(Error::Region(
                "the left lower corner is not to the left of the right upper corner".to_string(),
            ));
        }

        if !(rightupper.im > leftlower.im) {
            return Err(Error::Region(
                "the left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        let steps = (
            (rightupper.re - leftlower.re) / (width as f64),
            (rightupper.im - leftlower.im) / (height as f64),
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
            steps,
        })
    }

    /// A mapper over the classic full view of the Mandelbrot set.
    pub fn standard(width: usize, height: usize) -> Result<PlaneMapper> {
        PlaneMapper::new(
            width,
            height,
            Complex::new(DEFAULT_LEFTLOWER.0, DEFAULT_LEFTLOWER.1),
            Complex::new(DEFAULT_RIGHTUPPER.0, DEFAULT_RIGHTUPPER.1),
        )
    }

    /// Width of the integral plane.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Height of the integral plane.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Always false; the constructor refuses empty planes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// point at its upper-left corner on the complex cartesian plane.
    /// Row zero is the top edge, the imaginary maximum.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.complex_plane.0.re + (pixel.col as f64) * self.steps.0,
            self.complex_plane.1.im - (pixel.row as f64) * self.steps.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planemapper_fails_on_bad_shape() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert!(pm.is_err());
        let pm = PlaneMapper::new(4, 4, Complex::new(1.0, -1.0), Complex::new(-1.0, 1.0));
        assert!(pm.is_err());
    }

    #[test]
    fn planemapper_fails_on_empty_plane() {
        let pm = PlaneMapper::new(0, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        match pm {
            Err(Error::Dimensions { width: 0, height: 4 }) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert!(PlaneMapper::standard(7, 0).is_err());
    }

    #[test]
    fn planemapper_passes_on_good_shape() {
        let pm = PlaneMapper::new(4, 3, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
        assert_eq!(pm.len(), 12);
        assert_eq!((pm.width(), pm.height()), (4, 3));
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, Complex::new(0.0, 0.0), Complex::new(5.0, 5.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel { row: 0, col: 0 }), Complex::new(0.0, 5.0));
        assert_eq!(pm.pixel_to_point(&Pixel { row: 2, col: 2 }), Complex::new(2.0, 3.0));
        assert_eq!(pm.pixel_to_point(&Pixel { row: 4, col: 1 }), Complex::new(1.0, 1.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let pm = PlaneMapper::new(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(pm.pixel_to_point(&Pixel { row: 2, col: 2 }), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel { row: 0, col: 0 }), Complex::new(-2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel { row: 3, col: 3 }), Complex::new(1.0, -1.0));
    }

    #[test]
    fn pixels_flatten_row_major() {
        let p = Pixel::from_index(23, 10);
        assert_eq!(p, Pixel { row: 2, col: 3 });
        assert_eq!(p.index(10), 23);
    }
}
