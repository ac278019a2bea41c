//! Per-frame world snapshot.
//!
//! The [`Scene`] is what the host fills in before asking for a reticle. It holds:
//! - The local [`Viewer`], if a player exists yet, and the id of its own
//!   entity when the host lists the player among the entities
//! - Candidate targets keyed by [`EntityId`] in a `BTreeMap`
//! - The engine's own cached "targeted entity", if any
//! - HUD options (hidden, camera perspective, attack indicator mode)
//!
//! # Deterministic order
//!
//! Entities are stored in a `BTreeMap`, so iteration is always ascending by id.
//! The raycast visits candidates in that order and keeps the first of two
//! equally near hits, which makes target selection reproducible for a given
//! snapshot.
//!
//! # Example
//!
//! ```
//! use critsight_core::entity::{TargetEntity, Viewer};
//! use critsight_core::scene::Scene;
//! use glam::DVec3;
//!
//! let mut scene = Scene::new();
//! scene.set_viewer(Viewer::standing_at(DVec3::ZERO, DVec3::Z));
//! let zombie = scene.spawn(TargetEntity::mob(DVec3::new(0.0, 0.0, 2.0), 0.6, 1.95));
//! scene.set_targeted(Some(zombie));
//!
//! assert_eq!(scene.len(), 1);
//! assert_eq!(scene.targeted(), Some(zombie));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, TargetEntity, Viewer};
use crate::hud::HudOptions;

/// Snapshot of everything the reticle reads in one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Frame counter supplied by the host (only used for log context).
    frame: u64,
    /// The local player, absent before the world has loaded.
    viewer: Option<Viewer>,
    /// The viewer's own entry in `entities`, never a target.
    viewer_entity: Option<EntityId>,
    /// Candidate targets.
    entities: BTreeMap<EntityId, TargetEntity>,
    /// Engine-cached crosshair target.
    targeted: Option<EntityId>,
    /// HUD settings.
    hud: HudOptions,
    /// Next id handed out by `spawn`.
    next_id: u64,
}

impl Scene {
    /// Creates an empty scene with no viewer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the host frame counter.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Sets the host frame counter.
    pub fn set_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    /// Returns the viewer, if one is present.
    #[must_use]
    pub fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }

    /// Returns a mutable viewer, if one is present.
    pub fn viewer_mut(&mut self) -> Option<&mut Viewer> {
        self.viewer.as_mut()
    }

    /// Installs the viewer for this frame.
    pub fn set_viewer(&mut self, viewer: Viewer) {
        self.viewer = Some(viewer);
    }

    /// Removes the viewer (e.g. while the world is unloading).
    pub fn clear_viewer(&mut self) -> Option<Viewer> {
        self.viewer_entity = None;
        self.viewer.take()
    }

    /// The id under which the viewer itself is stored, if any.
    #[must_use]
    pub const fn viewer_entity(&self) -> Option<EntityId> {
        self.viewer_entity
    }

    /// Marks `id` as the viewer's own entity. It is skipped by the raycast
    /// and never read back as the cached target.
    pub fn set_viewer_entity(&mut self, id: Option<EntityId>) {
        self.viewer_entity = id;
    }

    /// Adds an entity under a fresh id.
    ///
    /// Ids are allocated above every id used so far, including ones passed to
    /// [`insert`](Self::insert).
    pub fn spawn(&mut self, entity: TargetEntity) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.insert(id, entity);
        id
    }

    /// Adds or replaces an entity under a host-chosen id.
    pub fn insert(&mut self, id: EntityId, entity: TargetEntity) -> Option<TargetEntity> {
        self.next_id = self.next_id.max(id.as_u64().saturating_add(1));
        self.entities.insert(id, entity)
    }

    /// Removes an entity. A cached target pointing at it is cleared too.
    pub fn remove(&mut self, id: EntityId) -> Option<TargetEntity> {
        if self.targeted == Some(id) {
            self.targeted = None;
        }
        if self.viewer_entity == Some(id) {
            self.viewer_entity = None;
        }
        self.entities.remove(&id)
    }

    /// Returns an entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&TargetEntity> {
        self.entities.get(&id)
    }

    /// Returns a mutable entity by id.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut TargetEntity> {
        self.entities.get_mut(&id)
    }

    /// Iterates entities in ascending id order.
    pub fn entities_sorted(&self) -> impl Iterator<Item = (EntityId, &TargetEntity)> + '_ {
        self.entities.iter().map(|(id, e)| (*id, e))
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The engine's cached crosshair target id.
    #[must_use]
    pub const fn targeted(&self) -> Option<EntityId> {
        self.targeted
    }

    /// Sets the engine's cached crosshair target.
    ///
    /// The id is stored as given; an id without a matching entity reads as
    /// "no target".
    pub fn set_targeted(&mut self, id: Option<EntityId>) {
        self.targeted = id;
    }

    /// HUD options.
    #[must_use]
    pub const fn hud(&self) -> &HudOptions {
        &self.hud
    }

    /// Mutable HUD options.
    pub fn hud_mut(&mut self) -> &mut HudOptions {
        &mut self.hud
    }

    /// Drops all entities and the cached target, keeping viewer and HUD.
    pub fn clear_entities(&mut self) {
        self.entities.clear();
        self.targeted = None;
        self.viewer_entity = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn mob(z: f64) -> TargetEntity {
        TargetEntity::mob(DVec3::new(0.0, 0.0, z), 0.6, 1.8)
    }

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn new_scene_is_empty() {
            let scene = Scene::new();
            assert!(scene.is_empty());
            assert!(scene.viewer().is_none());
            assert!(scene.targeted().is_none());
            assert_eq!(scene.frame(), 0);
        }

        #[test]
        fn spawn_assigns_increasing_ids() {
            let mut scene = Scene::new();
            let a = scene.spawn(mob(1.0));
            let b = scene.spawn(mob(2.0));
            assert!(a < b);
            assert_eq!(scene.len(), 2);
        }

        #[test]
        fn spawn_skips_inserted_ids() {
            let mut scene = Scene::new();
            scene.insert(EntityId::new(40), mob(1.0));
            let id = scene.spawn(mob(2.0));
            assert_eq!(id, EntityId::new(41));
        }

        #[test]
        fn insert_replaces() {
            let mut scene = Scene::new();
            let id = EntityId::new(5);
            assert!(scene.insert(id, mob(1.0)).is_none());
            let old = scene.insert(id, mob(2.0)).unwrap();
            assert_eq!(old.position.z, 1.0);
            assert_eq!(scene.get(id).unwrap().position.z, 2.0);
        }

        #[test]
        fn remove_clears_cached_target() {
            let mut scene = Scene::new();
            let id = scene.spawn(mob(1.0));
            scene.set_targeted(Some(id));
            assert!(scene.remove(id).is_some());
            assert!(scene.targeted().is_none());
        }

        #[test]
        fn removing_viewer_entity_unmarks_it() {
            let mut scene = Scene::new();
            scene.set_viewer(Viewer::standing_at(DVec3::ZERO, DVec3::Z));
            let me = scene.spawn(mob(0.0));
            scene.set_viewer_entity(Some(me));
            assert_eq!(scene.viewer_entity(), Some(me));

            scene.remove(me);
            assert!(scene.viewer_entity().is_none());
        }

        #[test]
        fn clear_entities_keeps_viewer() {
            let mut scene = Scene::new();
            scene.set_viewer(Viewer::standing_at(DVec3::ZERO, DVec3::Z));
            let id = scene.spawn(mob(1.0));
            scene.set_targeted(Some(id));
            scene.clear_entities();
            assert!(scene.is_empty());
            assert!(scene.targeted().is_none());
            assert!(scene.viewer().is_some());
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn entities_sorted_ascending() {
            let mut scene = Scene::new();
            scene.insert(EntityId::new(9), mob(1.0));
            scene.insert(EntityId::new(2), mob(2.0));
            scene.insert(EntityId::new(5), mob(3.0));

            let ids: Vec<_> = scene.entities_sorted().map(|(id, _)| id).collect();
            assert_eq!(ids, vec![EntityId::new(2), EntityId::new(5), EntityId::new(9)]);
        }

        #[test]
        fn viewer_can_be_cleared() {
            let mut scene = Scene::new();
            scene.set_viewer(Viewer::standing_at(DVec3::ZERO, DVec3::Z));
            scene.viewer_mut().unwrap().velocity.y = -1.0;
            let taken = scene.clear_viewer().unwrap();
            assert_eq!(taken.velocity.y, -1.0);
            assert!(scene.viewer().is_none());
        }

        #[test]
        fn scene_is_serializable() {
            let mut scene = Scene::new();
            scene.set_viewer(Viewer::standing_at(DVec3::ZERO, DVec3::Z));
            let id = scene.spawn(mob(2.0));
            scene.set_targeted(Some(id));
            scene.hud_mut().hidden = true;

            let json = serde_json::to_string(&scene).unwrap();
            let back: Scene = serde_json::from_str(&json).unwrap();
            assert_eq!(back.len(), 1);
            assert_eq!(back.targeted(), Some(id));
            assert!(back.hud().hidden);
            assert!(back.viewer().is_some());
        }
    }
}
