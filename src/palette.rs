//! Turns an iteration count into a color.  Points that never escaped
//! are always black.

/// An 8-bit RGB triple.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Build a color from its channels.
    pub fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }
}

/// The available mappings from velocity to color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Linear grayscale; faster points are darker.
    Gray,
    /// Bernstein-polynomial gradient, dark blue through orange.
    Smooth,
}

impl Default for Palette {
    fn default() -> Self {
        Palette::Smooth
    }
}

impl Palette {
    /// Color for a point that took `count` of at most `limit` steps.
    pub fn colorize(self, count: u32, limit: u32) -> Color {
        if limit == 0 || count >= limit {
            return Color::default();
        }
        match self {
            Palette::Gray => {
                let v = (u64::from(count) * 255 / u64::from(limit)) as u8;
                Color::new(v, v, v)
            }
            Palette::Smooth => {
                let t = f64::from(count) / f64::from(limit);
                let u = 1.0 - t;
                Color::new(
                    channel(9.0 * u * t * t * t),
                    channel(15.0 * u * u * t * t),
                    channel(8.5 * u * u * u * t),
                )
            }
        }
    }
}

fn channel(v: f64) -> u8 {
    (v * 255.0).max(0.0).min(255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captured_points_are_black() {
        assert_eq!(Palette::Gray.colorize(100, 100), Color::default());
        assert_eq!(Palette::Smooth.colorize(100, 100), Color::default());
    }

    #[test]
    fn gray_is_linear() {
        assert_eq!(Palette::Gray.colorize(50, 100), Color::new(127, 127, 127));
        assert_eq!(Palette::Gray.colorize(0, 100), Color::new(0, 0, 0));
    }

    #[test]
    fn smooth_peaks_in_the_middle() {
        let c = Palette::Smooth.colorize(50, 100);
        assert!(c.r > 0 && c.g > 0 && c.b > 0);
        assert_eq!(Palette::Smooth.colorize(0, 100), Color::default());
    }
}
