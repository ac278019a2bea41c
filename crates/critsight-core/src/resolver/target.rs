//! Target resolution: which entity is the viewer looking at?
//!
//! The [`TargetResolver`] reconciles two signals:
//! - A fresh raycast from the eye along the look vector (authoritative)
//! - The engine's cached "targeted entity" (lenient fallback)
//!
//! # Algorithm
//!
//! 1. Cast a segment of length `reach` from the eye along the look direction.
//! 2. Search volume: the viewer's own box stretched along the segment and
//!    padded by `search_margin` on every axis.
//! 3. Take the nearest attackable, non-spectator hit. Accept it if it is a
//!    valid target (living, alive, not hurt) and the eye-to-hit-point
//!    distance is within reach.
//! 4. Otherwise take the cached target. Accept it if it is a valid target and
//!    the smaller of eye-to-visual-center and eye-to-box-center is within
//!    reach.
//!
//! Both paths re-validate; neither signal is trusted blindly.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use sightline::Segment;
use tracing::trace;

use crate::config::ReticleConfig;
use crate::entity::{EntityId, TargetEntity, Viewer};
use crate::world_view::WorldView;

/// Which signal produced a [`ResolvedTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSource {
    /// The eye raycast
    Raycast,
    /// The engine's cached crosshair target
    Cached,
}

/// The entity chosen for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTarget {
    /// Which entity
    pub entity: EntityId,
    /// Distance used for the reach check
    pub distance: f64,
    /// Which signal found it
    pub source: TargetSource,
}

/// Finds the live entity under the reticle.
///
/// # Example
///
/// ```
/// use critsight_core::entity::{TargetEntity, Viewer};
/// use critsight_core::resolver::{TargetResolver, TargetSource};
/// use critsight_core::scene::Scene;
/// use critsight_core::world_view::WorldView;
/// use glam::DVec3;
///
/// let mut scene = Scene::new();
/// scene.set_viewer(Viewer::standing_at(DVec3::ZERO, DVec3::Z));
/// let zombie = scene.spawn(TargetEntity::mob(DVec3::new(0.0, 0.0, 2.3), 0.6, 1.95));
///
/// let target = TargetResolver::new().resolve(WorldView::new(&scene), 3.0).unwrap();
/// assert_eq!(target.entity, zombie);
/// assert_eq!(target.source, TargetSource::Raycast);
/// assert!((target.distance - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetResolver {
    search_margin: f64,
    revalidate_cached_distance: bool,
}

impl TargetResolver {
    /// Creates a resolver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&ReticleConfig::default())
    }

    /// Creates a resolver using the targeting fields of `config`.
    #[must_use]
    pub fn from_config(config: &ReticleConfig) -> Self {
        Self {
            search_margin: config.search_margin,
            revalidate_cached_distance: config.revalidate_cached_distance,
        }
    }

    /// Resolves the target within `reach` of the viewer's eye.
    ///
    /// Returns `None` when no viewer is available or no valid entity is in
    /// reach. Never fails.
    #[must_use]
    pub fn resolve(&self, view: WorldView<'_>, reach: f64) -> Option<ResolvedTarget> {
        let Some(viewer) = view.viewer() else {
            trace!(frame = view.frame(), "no viewer, no target");
            return None;
        };

        self.via_raycast(view, viewer, reach)
            .or_else(|| self.via_cached(view, viewer, reach))
    }

    /// The raycast path.
    fn via_raycast(&self, view: WorldView<'_>, viewer: &Viewer, reach: f64) -> Option<ResolvedTarget> {
        let segment = Segment::from_ray(viewer.eye_position, viewer.look_direction, reach);
        let search_volume = viewer
            .bounds
            .stretch(viewer.look_direction * reach)
            .inflate(self.search_margin);

        let hit = view.raycast_entities(&segment, &search_volume, reach * reach)?;
        let entity = view.entity(hit.item)?;

        if !entity.is_valid_target() {
            trace!(
                frame = view.frame(),
                entity = %hit.item,
                hurt_time = entity.hurt_time,
                "raycast hit rejected"
            );
            return None;
        }

        let distance = viewer.eye_position.distance(hit.point);
        if distance > reach {
            trace!(frame = view.frame(), entity = %hit.item, distance, "raycast hit out of reach");
            return None;
        }

        trace!(frame = view.frame(), entity = %hit.item, distance, "raycast target accepted");
        Some(ResolvedTarget {
            entity: hit.item,
            distance,
            source: TargetSource::Raycast,
        })
    }

    /// The cached-target fallback.
    fn via_cached(&self, view: WorldView<'_>, viewer: &Viewer, reach: f64) -> Option<ResolvedTarget> {
        let (id, entity) = view.targeted_entity()?;

        if !entity.is_valid_target() {
            trace!(
                frame = view.frame(),
                entity = %id,
                hurt_time = entity.hurt_time,
                "cached target rejected"
            );
            return None;
        }

        let distance = lenient_distance(viewer.eye_position, entity);
        if self.revalidate_cached_distance && distance > reach {
            trace!(frame = view.frame(), entity = %id, distance, "cached target out of reach");
            return None;
        }

        trace!(frame = view.frame(), entity = %id, distance, "cached target accepted");
        Some(ResolvedTarget {
            entity: id,
            distance,
            source: TargetSource::Cached,
        })
    }
}

impl Default for TargetResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// The smaller of eye-to-visual-center and eye-to-box-center.
fn lenient_distance(eye: DVec3, entity: &TargetEntity) -> f64 {
    let to_center = eye.distance(entity.visual_center());
    let to_box = eye.distance(entity.bounds.center());
    to_center.min(to_box)
}

// =============================================================================
// Tests
// =============================================================================
