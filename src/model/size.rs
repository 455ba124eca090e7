//! Font sizes rounded for grouping.

use std::fmt;

/// A font size rounded to hundredths of a point.
///
/// Stored as an integer so that equality, hashing and ordering agree with the
/// rounding. Every size comparison in the outline pipeline goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(i64);

impl FontSize {
    /// Round a size in points to 2 decimal places (half away from zero).
    pub fn from_points(points: f32) -> Self {
        FontSize((f64::from(points) * 100.0).round() as i64)
    }

    /// Build directly from hundredths of a point.
    pub const fn from_hundredths(hundredths: i64) -> Self {
        FontSize(hundredths)
    }

    /// Size in hundredths of a point.
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    /// Size in points.
    pub fn points(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl From<f32> for FontSize {
    fn from(points: f32) -> Self {
        FontSize::from_points(points)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}
