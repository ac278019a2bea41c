//! Nearest-hit raycast over boxed candidates.
//!
//! The host hands over every entity it considers targetable together with its
//! bounding box; [`nearest_hit`] picks the one the segment reaches first.
//!
//! # Selection rules
//!
//! - Candidates whose box does not touch the search volume are skipped.
//! - A candidate whose (margin-inflated) box already contains the segment
//!   start wins outright at distance zero.
//! - Otherwise the candidate with the smallest squared distance from the
//!   segment start to its entry point wins, provided that distance is within
//!   `max_distance_sq` (inclusive).
//! - Ties keep the earlier candidate, so iteration order decides.

use glam::DVec3;

use crate::{Aabb, Segment};

/// An item offered to [`nearest_hit`] together with its collision box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<T> {
    /// Caller payload returned on a hit (usually an entity id)
    pub item: T,
    /// Collision box in world space
    pub bounds: Aabb,
    /// Extra inflation applied to `bounds` before testing the segment
    pub margin: f64,
}

impl<T> Candidate<T> {
    /// Create a candidate with no extra targeting margin.
    #[must_use]
    pub fn new(item: T, bounds: Aabb) -> Self {
        Self {
            item,
            bounds,
            margin: 0.0,
        }
    }

    /// Set the targeting margin.
    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

/// Result of a successful [`nearest_hit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<T> {
    /// Payload of the winning candidate
    pub item: T,
    /// Point where the segment enters the candidate's box
    pub point: DVec3,
    /// Squared distance from the segment start to `point`
    pub distance_sq: f64,
}

impl<T> Hit<T> {
    /// Distance from the segment start to the hit point.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance_sq.sqrt()
    }
}

/// Find the candidate the segment reaches first.
///
/// See the module documentation for the selection rules.
pub fn nearest_hit<T, I>(
    segment: &Segment,
    search_volume: &Aabb,
    candidates: I,
    max_distance_sq: f64,
) -> Option<Hit<T>>
where
    I: IntoIterator<Item = Candidate<T>>,
{
    let mut best: Option<Hit<T>> = None;

    for candidate in candidates {
        if !candidate.bounds.intersects(search_volume) {
            continue;
        }

        let bounds = candidate.bounds.inflate(candidate.margin);

        if bounds.contains(segment.start) {
            return Some(Hit {
                item: candidate.item,
                point: segment.start,
                distance_sq: 0.0,
            });
        }

        let Some(point) = bounds.clip_segment(segment.start, segment.end) else {
            continue;
        };

        let distance_sq = segment.start.distance_squared(point);
        if distance_sq > max_distance_sq {
            continue;
        }
        if best.as_ref().is_some_and(|b| distance_sq >= b.distance_sq) {
            continue;
        }

        best = Some(Hit {
            item: candidate.item,
            point,
            distance_sq,
        });
    }

    best
}
