//! The escape-time kernel.  Given a point `c` on the complex plane,
//! repeatedly square and add until the orbit leaves the circle of
//! radius 2 or we give up.  The number of steps it took is the
//! "velocity" of the point; points that never leave are in the set.
//!
//! Kernels are pure: they may be called from any number of threads at
//! once without coordination, and they always return.

use num::Complex;

/// The callback every strategy invokes once per cell.
pub trait Kernel: Send + Sync {
    /// The iteration count for `c`, in `0..=self.limit()`.  A result
    /// equal to the limit means the point never escaped.
    fn evaluate(&self, c: Complex<f64>) -> u32;

    /// The iteration cap.
    fn limit(&self) -> u32;
}

/// Iterates `z = z² + c` from zero, returning the step at which `|z|`
/// first exceeded 2, or `limit` if it never did.
pub fn escape_time(c: Complex<f64>, limit: u32) -> u32 {
    let mut z = Complex { re: 0.0_f64, im: 0.0_f64 };
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() > 4.0_f64 {
            return i;
        }
    }
    limit
}

const D4: f64 = 1.0 / 4.0;
const D16: f64 = D4 / 4.0;

/// The two halves of the `and` expression are false if the point is
/// guaranteed to be inside the main cardioid or the period-2 bulb.
/// It does *not* guarantee that a point will be outside; those still
/// have to be iterated.
pub fn maybe_outside(c: Complex<f64>) -> bool {
    let y = c.im * c.im;
    let q = y + (c.re - D4) * (c.re - D4);
    q * (q + c.re - D4) > (y * D4) && (c.re + 1.0_f64) * (c.re + 1.0_f64) + y > D16
}

/// Iterates every point up to the cap.
#[derive(Copy, Clone, Debug)]
pub struct Escape {
    /// Iteration cap
    pub limit: u32,
}

impl Kernel for Escape {
    fn evaluate(&self, c: Complex<f64>) -> u32 {
        escape_time(c, self.limit)
    }

    fn limit(&self) -> u32 {
        self.limit
    }
}

/// Answers the cap immediately for points in the cardioid or the
/// bulb, which otherwise cost the full iteration budget each.
#[derive(Copy, Clone, Debug)]
pub struct Rejecting {
    /// Iteration cap
    pub limit: u32,
}

impl Kernel for Rejecting {
    fn evaluate(&self, c: Complex<f64>) -> u32 {
        if maybe_outside(c) {
            escape_time(c, self.limit)
        } else {
            self.limit
        }
    }

    fn limit(&self) -> u32 {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;

    const LIMIT: u32 = 1000;

    #[test]
    fn points_far_outside_escape_immediately() {
        let c = Complex::new(2.0, 2.0);
        assert_eq!(Escape { limit: LIMIT }.evaluate(c), 0);
        assert_eq!(Rejecting { limit: LIMIT }.evaluate(c), 0);
    }

    #[test]
    fn points_in_the_cardioid_reach_the_cap() {
        let c = Complex::new(-0.5, 0.1);
        assert!(!maybe_outside(c));
        assert_eq!(Escape { limit: LIMIT }.evaluate(c), LIMIT);
        assert_eq!(Rejecting { limit: LIMIT }.evaluate(c), LIMIT);
    }

    #[test]
    fn points_in_the_bulb_reach_the_cap() {
        let c = Complex::new(-1.0, 0.05);
        assert!(!maybe_outside(c));
        assert_eq!(Escape { limit: LIMIT }.evaluate(c), LIMIT);
    }

    #[test]
    fn the_seahorse_valley_escapes_slowly() {
        // Just above the neck between cardioid and bulb: outside the
        // set, but it takes a few dozen steps to find out.
        let c = Complex::new(-0.75, 0.1);
        assert!(maybe_outside(c));
        let n = escape_time(c, LIMIT);
        assert!(n > 10 && n < LIMIT, "escaped at {}", n);
    }

    #[test]
    fn both_kernels_agree() {
        let plain = Escape { limit: 200 };
        let quick = Rejecting { limit: 200 };
        for (i, j) in iproduct!(0..40, 0..30) {
            let c = Complex::new(-2.0 + f64::from(i) * 0.065, -1.2 + f64::from(j) * 0.08);
            assert_eq!(plain.evaluate(c), quick.evaluate(c), "at {}", c);
        }
    }

    #[test]
    fn zero_limit_is_total() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 0), 0);
    }
}
