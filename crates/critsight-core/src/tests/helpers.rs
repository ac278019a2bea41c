//! Test helper functions for building scenes.
//!
//! All factories share one geometry: the viewer's eye sits at (0, 1, 0) and
//! looks along +Z, so a mob "ahead" at `face_z` is exactly `face_z` away along
//! the look ray.

use glam::DVec3;
use sightline::Aabb;

use crate::entity::{EntityId, MovementFlags, TargetEntity, Viewer};
use crate::scene::Scene;

// =============================================================================
// Viewers
// =============================================================================

/// Grounded viewer with its eye at (0, 1, 0) looking along +Z, fully charged.
pub fn eye_level_viewer() -> Viewer {
    let mut viewer = Viewer::standing_at(DVec3::ZERO, DVec3::Z);
    viewer.eye_position = DVec3::new(0.0, 1.0, 0.0);
    viewer
}

/// Same as [`eye_level_viewer`] but descending through open air.
pub fn falling_viewer() -> Viewer {
    let mut viewer = eye_level_viewer();
    viewer.movement = MovementFlags::empty();
    viewer.velocity.y = -0.4;
    viewer
}

// =============================================================================
// Entities
// =============================================================================

/// A 2-tall mob on the look ray whose near face sits at `face_z`.
///
/// Bounds are written out explicitly so the hit distance is exact.
pub fn mob_ahead(face_z: f64) -> TargetEntity {
    let mut mob = TargetEntity::mob(DVec3::new(0.0, 0.0, face_z + 0.3), 0.6, 2.0);
    mob.bounds = Aabb::new(
        DVec3::new(-0.3, 0.0, face_z),
        DVec3::new(0.3, 2.0, face_z + 0.6),
    );
    mob
}

/// A 2-tall mob off to the side at `x = distance`, centered at eye height.
///
/// The look ray misses it; only the cached-target path can pick it up.
pub fn mob_beside(distance: f64) -> TargetEntity {
    TargetEntity::mob(DVec3::new(distance, 0.0, 0.0), 0.6, 2.0)
}

// =============================================================================
// Scenarios
// =============================================================================

/// Falling viewer with a valid mob 2 blocks ahead. Classifies as
/// `CriticalReady`.
pub fn crit_scene() -> (Scene, EntityId) {
    scene_with(falling_viewer(), mob_ahead(2.0))
}

/// Grounded viewer with a valid mob 2 blocks ahead. Classifies as
/// `AttackReady`.
pub fn attack_scene() -> (Scene, EntityId) {
    scene_with(eye_level_viewer(), mob_ahead(2.0))
}

/// A scene holding `viewer` and a single `entity`.
pub fn scene_with(viewer: Viewer, entity: TargetEntity) -> (Scene, EntityId) {
    let mut scene = Scene::new();
    scene.set_viewer(viewer);
    let id = scene.spawn(entity);
    (scene, id)
}
