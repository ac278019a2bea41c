//! # Sightline
//!
//! Small geometry substrate for short-range targeting: axis-aligned boxes,
//! line segments and a nearest-hit raycast over a set of boxed candidates.
//!
//! All world-space math is done in `f64` ([`glam::DVec3`]) so distances match
//! what a host engine reports for its own entities.
//!
//! ## Quick Start
//!
//! ```
//! use glam::DVec3;
//! use sightline::{nearest_hit, Aabb, Candidate, Segment};
//!
//! let eye = DVec3::new(0.0, 1.62, 0.0);
//! let segment = Segment::from_ray(eye, DVec3::Z, 3.0);
//! let target = Aabb::from_feet(DVec3::new(0.0, 0.0, 2.3), 0.6, 1.8);
//!
//! let hit = nearest_hit(
//!     &segment,
//!     &segment.bounds().inflate(1.0),
//!     [Candidate::new("zombie", target)],
//!     9.0,
//! );
//! assert_eq!(hit.map(|h| h.item), Some("zombie"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod raycast;
pub mod segment;

pub use raycast::{nearest_hit, Candidate, Hit};
pub use segment::Segment;

use glam::DVec3;

/// Below this magnitude a segment component is treated as parallel to a slab.
const PARALLEL_EPSILON: f64 = 1.0e-7;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Aabb {
    /// Create a box from two opposite corners in any order.
    #[must_use]
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box from a center point and full extents.
    #[must_use]
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Create an entity-style box standing on `feet`: `width` wide on X and Z,
    /// `height` tall on Y.
    #[must_use]
    pub fn from_feet(feet: DVec3, width: f64, height: f64) -> Self {
        let half = width.abs() * 0.5;
        Self::new(
            DVec3::new(feet.x - half, feet.y, feet.z - half),
            DVec3::new(feet.x + half, feet.y + height, feet.z + half),
        )
    }

    /// Get the center of the box.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the box.
    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Check if a point is inside the box (faces inclusive).
    #[must_use]
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Check if two boxes overlap (touching faces count).
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Grow the box by a per-axis amount on both sides.
    #[must_use]
    pub fn expand(&self, x: f64, y: f64, z: f64) -> Self {
        let margin = DVec3::new(x, y, z);
        Self::new(self.min - margin, self.max + margin)
    }

    /// Grow the box by the same margin on every side.
    #[must_use]
    pub fn inflate(&self, margin: f64) -> Self {
        self.expand(margin, margin, margin)
    }

    /// Extend the box along `offset`: negative components move the minimum
    /// face, positive components move the maximum face.
    #[must_use]
    pub fn stretch(&self, offset: DVec3) -> Self {
        let mut min = self.min;
        let mut max = self.max;
        for axis in 0..3 {
            if offset[axis] < 0.0 {
                min[axis] += offset[axis];
            } else {
                max[axis] += offset[axis];
            }
        }
        Self { min, max }
    }

    /// Clip the segment `start..end` against the box.
    ///
    /// Returns the point where the segment enters the box, or `start` itself
    /// when it begins inside. `None` when the segment misses.
    #[must_use]
    pub fn clip_segment(&self, start: DVec3, end: DVec3) -> Option<DVec3> {
        let delta = end - start;
        let mut t_enter = 0.0_f64;
        let mut t_exit = 1.0_f64;

        for axis in 0..3 {
            let origin = start[axis];
            let d = delta[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < PARALLEL_EPSILON {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let mut t0 = (lo - origin) / d;
            let mut t1 = (hi - origin) / d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(start + delta * t_enter)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::from_center_size(DVec3::ZERO, DVec3::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(DVec3::ZERO, DVec3::ONE)
    }

    #[test]
    fn test_new_normalises_corners() {
        let b = Aabb::new(DVec3::new(1.0, -2.0, 3.0), DVec3::new(-1.0, 2.0, 0.0));
        assert_eq!(b.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_feet() {
        let b = Aabb::from_feet(DVec3::new(10.0, 64.0, -5.0), 0.6, 1.8);
        assert!((b.min.x - 9.7).abs() < 1e-12);
        assert!((b.max.x - 10.3).abs() < 1e-12);
        assert_eq!(b.min.y, 64.0);
        assert!((b.max.y - 65.8).abs() < 1e-12);
        assert!((b.center().y - 64.9).abs() < 1e-12);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let b = unit_box();
        assert!(b.contains(DVec3::ZERO));
        assert!(b.contains(DVec3::ONE));
        assert!(b.contains(DVec3::splat(0.5)));
        assert!(!b.contains(DVec3::new(1.01, 0.5, 0.5)));
    }

    #[test]
    fn test_intersects() {
        let a = unit_box();
        assert!(a.intersects(&Aabb::new(DVec3::splat(0.5), DVec3::splat(2.0))));
        assert!(a.intersects(&Aabb::new(DVec3::ONE, DVec3::splat(2.0))));
        assert!(!a.intersects(&Aabb::new(DVec3::splat(1.5), DVec3::splat(2.0))));
    }

    #[test]
    fn test_stretch_follows_sign() {
        let b = unit_box().stretch(DVec3::new(-2.0, 0.0, 3.0));
        assert_eq!(b.min, DVec3::new(-2.0, 0.0, 0.0));
        assert_eq!(b.max, DVec3::new(1.0, 1.0, 4.0));
    }

    #[test]
    fn test_expand_and_inflate() {
        let b = unit_box().expand(1.0, 0.0, 0.5);
        assert_eq!(b.min, DVec3::new(-1.0, 0.0, -0.5));
        assert_eq!(b.max, DVec3::new(2.0, 1.0, 1.5));
        assert_eq!(unit_box().inflate(1.0).size(), DVec3::splat(3.0));
    }

    #[test]
    fn test_clip_segment_entry_point() {
        let b = Aabb::new(DVec3::new(-0.5, -0.5, 2.0), DVec3::new(0.5, 0.5, 3.0));
        let hit = b.clip_segment(DVec3::ZERO, DVec3::new(0.0, 0.0, 5.0));
        assert_eq!(hit, Some(DVec3::new(0.0, 0.0, 2.0)));
    }

    #[test]
    fn test_clip_segment_reaching_face_exactly() {
        let b = Aabb::new(DVec3::new(-0.5, -0.5, 3.0), DVec3::new(0.5, 0.5, 4.0));
        let hit = b.clip_segment(DVec3::ZERO, DVec3::new(0.0, 0.0, 3.0));
        assert_eq!(hit, Some(DVec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_clip_segment_too_short() {
        let b = Aabb::new(DVec3::new(-0.5, -0.5, 3.0001), DVec3::new(0.5, 0.5, 4.0));
        assert!(b.clip_segment(DVec3::ZERO, DVec3::new(0.0, 0.0, 3.0)).is_none());
    }

    #[test]
    fn test_clip_segment_parallel_miss() {
        let b = Aabb::new(DVec3::new(1.0, 1.0, 1.0), DVec3::new(2.0, 2.0, 2.0));
        assert!(b.clip_segment(DVec3::ZERO, DVec3::new(0.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_clip_segment_starting_inside() {
        let b = unit_box();
        let start = DVec3::splat(0.5);
        assert_eq!(b.clip_segment(start, DVec3::splat(5.0)), Some(start));
    }

    #[test]
    fn test_bounds_serialization() {
        let b = Aabb::from_feet(DVec3::new(1.0, 2.0, 3.0), 1.0, 2.0);
        let json = serde_json::to_string(&b).unwrap();
        let back: Aabb = serde_json::from_str(&json).unwrap();
        assert_eq!(b, back);
    }
}
