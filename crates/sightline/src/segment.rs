//! Finite line segments cast from an eye point.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::Aabb;

/// A finite segment from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Where the segment begins (usually the eye position)
    pub start: DVec3,
    /// Where the segment ends
    pub end: DVec3,
}

impl Segment {
    /// Create a segment between two points.
    #[must_use]
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self { start, end }
    }

    /// Create a segment starting at `origin` and running `length` units along
    /// `direction`.
    ///
    /// `direction` is expected to be unit length; it is not normalised here.
    #[must_use]
    pub fn from_ray(origin: DVec3, direction: DVec3, length: f64) -> Self {
        Self {
            start: origin,
            end: origin + direction * length,
        }
    }

    /// Vector from start to end.
    #[must_use]
    pub fn delta(&self) -> DVec3 {
        self.end - self.start
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    /// Unit direction of the segment, or zero for a degenerate segment.
    #[must_use]
    pub fn direction(&self) -> DVec3 {
        self.delta().normalize_or_zero()
    }

    /// Tight box around both end points.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ray_scales_direction() {
        let s = Segment::from_ray(DVec3::new(1.0, 2.0, 3.0), DVec3::X, 3.0);
        assert_eq!(s.end, DVec3::new(4.0, 2.0, 3.0));
        assert_eq!(s.length(), 3.0);
        assert_eq!(s.direction(), DVec3::X);
    }

    #[test]
    fn degenerate_direction_is_zero() {
        let s = Segment::new(DVec3::ONE, DVec3::ONE);
        assert_eq!(s.direction(), DVec3::ZERO);
        assert_eq!(s.length(), 0.0);
    }

    #[test]
    fn bounds_cover_both_ends() {
        let s = Segment::new(DVec3::new(2.0, -1.0, 0.0), DVec3::new(-1.0, 3.0, 1.0));
        let b = s.bounds();
        assert!(b.contains(s.start));
        assert!(b.contains(s.end));
        assert_eq!(b.min, DVec3::new(-1.0, -1.0, 0.0));
    }
}
